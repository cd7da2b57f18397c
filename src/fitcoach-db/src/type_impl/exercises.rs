use std::collections::HashMap;

use fitcoach_entities::{exercises, sessions};
use fitcoach_types::{ExerciseSet, ExerciseSetUpdate, NewExerciseSet};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, sea_query::Expr,
};

use crate::{
    DatabaseHandler, StoreError,
    changes::{Change, ChangeKind, Collection},
};

impl DatabaseHandler {
    pub async fn add_exercise(
        &self,
        session_id: i32,
        position: i32,
        set: NewExerciseSet,
    ) -> anyhow::Result<ExerciseSet> {
        set.validate()?;
        let client_id = session_owner(&self.db, session_id)
            .await?
            .ok_or_else(|| StoreError::not_found(Collection::Sessions, session_id))?;

        let set = map_exercise(insert_exercise(&self.db, session_id, position, set).await?);
        self.publish(
            Change::new(Collection::Exercises, ChangeKind::Inserted, set.id)
                .client(client_id)
                .session(session_id),
        );
        Ok(set)
    }

    /// Sets of one session in logged order.
    pub async fn session_exercises(&self, session_id: i32) -> anyhow::Result<Vec<ExerciseSet>> {
        Ok(exercises::Entity::find()
            .filter(exercises::Column::SessionId.eq(session_id))
            .order_by_asc(exercises::Column::Position)
            .order_by_asc(exercises::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(map_exercise)
            .collect())
    }

    pub async fn update_exercise(
        &self,
        id: i32,
        update: ExerciseSetUpdate,
    ) -> anyhow::Result<ExerciseSet> {
        update.validate()?;

        let existing = exercises::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| StoreError::not_found(Collection::Exercises, id))?;
        let change = self
            .exercise_change(ChangeKind::Updated, id, existing.session_id)
            .await?;

        let mut model: exercises::ActiveModel = existing.into();
        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(weight) = update.weight {
            model.weight = Set(weight);
        }
        if let Some(reps) = update.reps {
            model.reps = Set(reps);
        }
        if let Some(rir) = update.rir {
            model.rir = Set(rir);
        }
        if let Some(notes) = update.notes {
            model.notes = Set(notes);
        }
        if let Some(position) = update.position {
            model.position = Set(position);
        }

        let set = map_exercise(model.update(&self.db).await?);
        self.publish(change);
        Ok(set)
    }

    pub async fn delete_exercise(&self, id: i32) -> anyhow::Result<()> {
        let existing = exercises::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| StoreError::not_found(Collection::Exercises, id))?;
        let change = self
            .exercise_change(ChangeKind::Deleted, id, existing.session_id)
            .await?;

        exercises::Entity::delete_by_id(id).exec(&self.db).await?;
        self.publish(change);
        Ok(())
    }

    /// Sets of several sessions keyed by session id.
    pub(crate) async fn exercises_by_session(
        &self,
        session_ids: &[i32],
    ) -> anyhow::Result<HashMap<i32, Vec<ExerciseSet>>> {
        let rows = exercises::Entity::find()
            .filter(exercises::Column::SessionId.is_in(session_ids.iter().copied()))
            .order_by_asc(exercises::Column::SessionId)
            .order_by_asc(exercises::Column::Position)
            .order_by_asc(exercises::Column::Id)
            .all(&self.db)
            .await?;

        let mut grouped: HashMap<i32, Vec<ExerciseSet>> = HashMap::new();
        for row in rows {
            grouped
                .entry(row.session_id)
                .or_default()
                .push(map_exercise(row));
        }
        Ok(grouped)
    }

    /// Number of sets per session, sessions without sets are missing.
    pub(crate) async fn exercise_counts(
        &self,
        session_ids: &[i32],
    ) -> anyhow::Result<HashMap<i32, u64>> {
        let counts: Vec<(i32, i64)> = exercises::Entity::find()
            .select_only()
            .column(exercises::Column::SessionId)
            .column_as(Expr::col(exercises::Column::Id).count(), "exercise_count")
            .filter(exercises::Column::SessionId.is_in(session_ids.iter().copied()))
            .group_by(exercises::Column::SessionId)
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(counts
            .into_iter()
            .map(|(session_id, count)| (session_id, count.try_into().unwrap_or_default()))
            .collect())
    }

    /// Resolved before the write it describes.
    async fn exercise_change(
        &self,
        kind: ChangeKind,
        id: i32,
        session_id: i32,
    ) -> anyhow::Result<Change> {
        let mut change = Change::new(Collection::Exercises, kind, id).session(session_id);
        if let Some(client_id) = session_owner(&self.db, session_id).await? {
            change = change.client(client_id);
        }
        Ok(change)
    }
}

/// Client id owning a session.
pub(crate) async fn session_owner<C>(conn: &C, session_id: i32) -> anyhow::Result<Option<i32>>
where
    C: ConnectionTrait,
{
    Ok(sessions::Entity::find_by_id(session_id)
        .select_only()
        .column(sessions::Column::ClientId)
        .into_tuple()
        .one(conn)
        .await?)
}

pub(crate) async fn insert_exercise<C>(
    conn: &C,
    session_id: i32,
    position: i32,
    set: NewExerciseSet,
) -> anyhow::Result<exercises::Model>
where
    C: ConnectionTrait,
{
    let model = exercises::ActiveModel {
        id: NotSet,
        session_id: Set(session_id),
        name: Set(set.name.trim().to_string()),
        weight: Set(set.weight),
        reps: Set(set.reps),
        rir: Set(set.rir),
        notes: Set(set.notes),
        position: Set(position),
    };

    Ok(model.insert(conn).await?)
}

pub(crate) fn map_exercise(value: exercises::Model) -> ExerciseSet {
    ExerciseSet {
        id: value.id,
        session_id: value.session_id,
        name: value.name,
        weight: value.weight,
        reps: value.reps,
        rir: value.rir,
        notes: value.notes,
        position: value.position,
    }
}
