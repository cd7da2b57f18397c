use fitcoach_entities::{exercises, sessions};
use fitcoach_types::{
    ExerciseSet, NewExerciseSet, NewSession, Session, SessionUpdate, ValidationError,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::{
    DatabaseHandler, StoreError,
    changes::{Change, ChangeKind, Collection},
    db::now,
    type_impl::{
        clients::client_exists,
        exercises::{insert_exercise, map_exercise},
    },
};

impl DatabaseHandler {
    pub async fn create_session(&self, session: NewSession) -> anyhow::Result<Session> {
        if !client_exists(&self.db, session.client_id).await? {
            return Err(StoreError::not_found(Collection::Clients, session.client_id));
        }

        let session = map_session(insert_session(&self.db, session).await?);
        self.publish(
            Change::new(Collection::Sessions, ChangeKind::Inserted, session.id)
                .client(session.client_id),
        );
        Ok(session)
    }

    /// Stores a workout and its sets in one go.
    ///
    /// Sets failing validation (blank name, negative weight, reps or rir) are dropped, the
    /// rest keep their input order as position.
    /// Fails when nothing valid is left.
    pub async fn log_session(
        &self,
        session: NewSession,
        sets: Vec<NewExerciseSet>,
    ) -> anyhow::Result<(Session, Vec<ExerciseSet>)> {
        let total = sets.len();
        let sets: Vec<_> = sets
            .into_iter()
            .filter(|set| match set.validate() {
                Ok(()) => true,
                Err(error) => {
                    debug!("Skipping exercise entry {:?}: {}", set.name, error);
                    false
                }
            })
            .collect();

        if sets.is_empty() {
            return Err(ValidationError::EmptySession.into());
        }

        let txn = self.db.begin().await?;
        if !client_exists(&txn, session.client_id).await? {
            return Err(StoreError::not_found(Collection::Clients, session.client_id));
        }

        let session = insert_session(&txn, session).await?;
        let mut stored = Vec::with_capacity(sets.len());
        for (position, set) in sets.into_iter().enumerate() {
            let position = i32::try_from(position)?;
            stored.push(insert_exercise(&txn, session.id, position, set).await?);
        }
        txn.commit().await?;

        let session = map_session(session);
        let stored: Vec<_> = stored.into_iter().map(map_exercise).collect();
        info!(
            "Logged session #{} for client #{} with {}/{} exercises",
            session.id,
            session.client_id,
            stored.len(),
            total
        );

        let exercise_changes = stored.iter().map(|set| {
            Change::new(Collection::Exercises, ChangeKind::Inserted, set.id)
                .client(session.client_id)
                .session(session.id)
        });
        self.publish_all(
            [Change::new(Collection::Sessions, ChangeKind::Inserted, session.id)
                .client(session.client_id)]
            .into_iter()
            .chain(exercise_changes),
        );
        Ok((session, stored))
    }

    pub async fn get_session(&self, id: i32) -> anyhow::Result<Option<Session>> {
        Ok(sessions::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(map_session))
    }

    /// Sessions of a client, newest first.
    pub async fn client_sessions(
        &self,
        client_id: i32,
        limit: Option<u64>,
    ) -> anyhow::Result<Vec<Session>> {
        Ok(sessions::Entity::find()
            .filter(sessions::Column::ClientId.eq(client_id))
            .order_by_desc(sessions::Column::Date)
            .order_by_desc(sessions::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await?
            .into_iter()
            .map(map_session)
            .collect())
    }

    pub async fn update_session(&self, id: i32, update: SessionUpdate) -> anyhow::Result<Session> {
        update.validate()?;

        let existing = sessions::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| StoreError::not_found(Collection::Sessions, id))?;

        let mut model: sessions::ActiveModel = existing.into();
        if let Some(date) = update.date {
            model.date = Set(date);
        }
        if let Some(notes) = update.notes {
            model.notes = Set(notes);
        }

        let session = map_session(model.update(&self.db).await?);
        self.publish(
            Change::new(Collection::Sessions, ChangeKind::Updated, id).client(session.client_id),
        );
        Ok(session)
    }

    /// Deletes a session together with its exercise entries.
    pub async fn delete_session(&self, id: i32) -> anyhow::Result<()> {
        let txn = self.db.begin().await?;

        let Some(session) = sessions::Entity::find_by_id(id).one(&txn).await? else {
            return Err(StoreError::not_found(Collection::Sessions, id));
        };

        exercises::Entity::delete_many()
            .filter(exercises::Column::SessionId.eq(id))
            .exec(&txn)
            .await?;
        sessions::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        self.publish_all([
            Change::bulk_delete(Collection::Exercises, session.client_id).session(id),
            Change::new(Collection::Sessions, ChangeKind::Deleted, id).client(session.client_id),
        ]);
        Ok(())
    }
}

async fn insert_session<C>(conn: &C, session: NewSession) -> anyhow::Result<sessions::Model>
where
    C: ConnectionTrait,
{
    let model = sessions::ActiveModel {
        id: NotSet,
        client_id: Set(session.client_id),
        date: Set(session.date),
        notes: Set(session.notes),
        created_at: Set(now()),
    };

    Ok(model.insert(conn).await?)
}

pub(crate) fn map_session(value: sessions::Model) -> Session {
    Session {
        id: value.id,
        client_id: value.client_id,
        date: value.date,
        notes: value.notes,
        created_at: value.created_at,
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        changes::Interest,
        db::test_helpers::{date, memory_db, new_client, new_session, set},
    };

    use super::*;

    #[tokio::test]
    async fn log_session_assigns_positions_and_skips_invalid_entries() {
        let db = memory_db().await;
        let client = db.create_client(new_client("Ana")).await.unwrap();

        let (session, stored) = db
            .log_session(
                new_session(client.id, date(4, 2)),
                vec![
                    set("Squat", 100.0, 5),
                    set("   ", 20.0, 10),
                    set("Row", -5.0, 10),
                    set("Bench press", 60.0, 8),
                ],
            )
            .await
            .unwrap();

        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].position, 0);
        assert_eq!(stored[1].position, 1);
        assert_eq!(stored[1].name, "Bench press");

        let fetched = db.session_exercises(session.id).await.unwrap();
        assert_eq!(fetched, stored);
    }

    #[tokio::test]
    async fn log_session_without_valid_entries_fails() {
        let db = memory_db().await;
        let client = db.create_client(new_client("Ana")).await.unwrap();

        let err = db
            .log_session(new_session(client.id, date(4, 2)), vec![set("", 20.0, 5)])
            .await
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::EmptySession)
        );
        assert!(db.client_sessions(client.id, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn log_session_for_unknown_client_leaves_nothing_behind() {
        let db = memory_db().await;

        let result = db
            .log_session(new_session(12, date(4, 2)), vec![set("Squat", 100.0, 5)])
            .await;

        assert!(result.is_err());
        assert!(db.client_sessions(12, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn client_sessions_newest_first_with_limit() {
        let db = memory_db().await;
        let client = db.create_client(new_client("Ana")).await.unwrap();

        for day in [5, 1, 9, 3] {
            db.create_session(new_session(client.id, date(4, day)))
                .await
                .unwrap();
        }

        let all = db.client_sessions(client.id, None).await.unwrap();
        let days: Vec<_> = all.iter().map(|s| s.date).collect();
        assert_eq!(days, vec![date(4, 9), date(4, 5), date(4, 3), date(4, 1)]);

        let latest = db.client_sessions(client.id, Some(2)).await.unwrap();
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[1].date, date(4, 5));
    }

    #[tokio::test]
    async fn update_and_delete_session() {
        let db = memory_db().await;
        let client = db.create_client(new_client("Ana")).await.unwrap();
        let (session, _) = db
            .log_session(
                new_session(client.id, date(4, 2)),
                vec![set("Squat", 100.0, 5)],
            )
            .await
            .unwrap();

        let updated = db
            .update_session(
                session.id,
                SessionUpdate {
                    notes: Some("Felt strong".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.notes, "Felt strong");
        assert_eq!(updated.date, date(4, 2));

        let mut subscription =
            db.subscribe(Interest::collection(Collection::Exercises).for_session(session.id));
        db.delete_session(session.id).await.unwrap();

        assert!(db.get_session(session.id).await.unwrap().is_none());
        assert!(db.session_exercises(session.id).await.unwrap().is_empty());
        assert_eq!(
            subscription.try_next().map(|change| change.kind),
            Some(ChangeKind::Deleted)
        );
        assert!(db.delete_session(session.id).await.is_err());
    }
}
