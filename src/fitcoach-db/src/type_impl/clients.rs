use fitcoach_entities::{clients, exercises, programs, sessions, weight_logs};
use fitcoach_types::{Client, ClientUpdate, NewClient};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::{
    DatabaseHandler, StoreError,
    changes::{Change, ChangeKind, Collection},
    db::now,
    type_impl::weight_logs::{insert_weight_log, map_weight_log},
};

impl DatabaseHandler {
    pub async fn create_client(&self, client: NewClient) -> anyhow::Result<Client> {
        client.validate()?;

        let model = client_model(client).insert(&self.db).await?;
        let client = map_client(model);

        debug!("Created client #{} {}", client.id, client.name);
        self.publish(
            Change::new(Collection::Clients, ChangeKind::Inserted, client.id).client(client.id),
        );
        Ok(client)
    }

    /// Creates the client together with a first weight log of its start weight.
    pub async fn register_client(&self, client: NewClient) -> anyhow::Result<Client> {
        client.validate()?;
        let (start_weight, start_date) = (client.start_weight, client.start_date);

        let txn = self.db.begin().await?;
        let model = client_model(client).insert(&txn).await?;
        let log = insert_weight_log(&txn, model.id, start_weight, start_date).await?;
        txn.commit().await?;

        let client = map_client(model);
        let log = map_weight_log(log);
        info!("Registered client #{} {}", client.id, client.name);

        self.publish_all([
            Change::new(Collection::Clients, ChangeKind::Inserted, client.id).client(client.id),
            Change::new(Collection::WeightLogs, ChangeKind::Inserted, log.id).client(client.id),
        ]);
        Ok(client)
    }

    pub async fn get_client(&self, id: i32) -> anyhow::Result<Option<Client>> {
        Ok(clients::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(map_client))
    }

    pub async fn list_clients(&self) -> anyhow::Result<Vec<Client>> {
        Ok(clients::Entity::find()
            .order_by_asc(clients::Column::Name)
            .order_by_asc(clients::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(map_client)
            .collect())
    }

    /// Case-insensitive substring match on the client name.
    pub async fn search_clients(&self, query: &str) -> anyhow::Result<Vec<Client>> {
        let query = query.trim().to_lowercase();
        let mut clients = self.list_clients().await?;
        clients.retain(|client| client.name.to_lowercase().contains(&query));
        Ok(clients)
    }

    pub async fn update_client(&self, id: i32, update: ClientUpdate) -> anyhow::Result<Client> {
        update.validate()?;

        let existing = clients::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| StoreError::not_found(Collection::Clients, id))?;

        let mut model: clients::ActiveModel = existing.into();
        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(age) = update.age {
            model.age = Set(age);
        }
        if let Some(height) = update.height {
            model.height = Set(height);
        }
        if let Some(start_weight) = update.start_weight {
            model.start_weight = Set(start_weight);
        }
        if let Some(goal) = update.goal {
            model.goal = Set(goal);
        }
        if let Some(injuries) = update.injuries {
            model.injuries = Set(injuries);
        }
        if let Some(start_date) = update.start_date {
            model.start_date = Set(start_date);
        }
        model.updated_at = Set(now());

        let client = map_client(model.update(&self.db).await?);
        self.publish(Change::new(Collection::Clients, ChangeKind::Updated, id).client(id));
        Ok(client)
    }

    /// Deletes a client with its sessions, their exercises, weight logs and programs.
    /// Either everything goes or nothing does.
    pub async fn delete_client(&self, id: i32) -> anyhow::Result<()> {
        let txn = self.db.begin().await?;

        if clients::Entity::find_by_id(id).one(&txn).await?.is_none() {
            return Err(StoreError::not_found(Collection::Clients, id));
        }

        let session_ids: Vec<i32> = sessions::Entity::find()
            .select_only()
            .column(sessions::Column::Id)
            .filter(sessions::Column::ClientId.eq(id))
            .into_tuple()
            .all(&txn)
            .await?;

        let removed_exercises = exercises::Entity::delete_many()
            .filter(exercises::Column::SessionId.is_in(session_ids.clone()))
            .exec(&txn)
            .await?
            .rows_affected;
        sessions::Entity::delete_many()
            .filter(sessions::Column::ClientId.eq(id))
            .exec(&txn)
            .await?;
        let removed_logs = weight_logs::Entity::delete_many()
            .filter(weight_logs::Column::ClientId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;
        programs::Entity::delete_many()
            .filter(programs::Column::ClientId.eq(id))
            .exec(&txn)
            .await?;
        clients::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        info!(
            "Deleted client #{id} with {} sessions, {removed_exercises} exercises, {removed_logs} weight logs",
            session_ids.len()
        );

        let exercise_changes = session_ids.iter().map(|session_id| {
            Change::bulk_delete(Collection::Exercises, id).session(*session_id)
        });
        self.publish_all(exercise_changes.chain([
            Change::bulk_delete(Collection::Sessions, id),
            Change::bulk_delete(Collection::WeightLogs, id),
            Change::bulk_delete(Collection::Programs, id),
            Change::new(Collection::Clients, ChangeKind::Deleted, id).client(id),
        ]));
        Ok(())
    }
}

pub(crate) async fn client_exists<C>(conn: &C, id: i32) -> anyhow::Result<bool>
where
    C: ConnectionTrait,
{
    Ok(clients::Entity::find_by_id(id).one(conn).await?.is_some())
}

fn client_model(client: NewClient) -> clients::ActiveModel {
    let created = now();
    clients::ActiveModel {
        id: NotSet,
        name: Set(client.name.trim().to_string()),
        age: Set(client.age),
        height: Set(client.height),
        start_weight: Set(client.start_weight),
        goal: Set(client.goal),
        injuries: Set(client.injuries),
        start_date: Set(client.start_date),
        created_at: Set(created),
        updated_at: Set(created),
    }
}

pub(crate) fn map_client(value: clients::Model) -> Client {
    Client {
        id: value.id,
        name: value.name,
        age: value.age,
        height: value.height,
        start_weight: value.start_weight,
        goal: value.goal,
        injuries: value.injuries,
        start_date: value.start_date,
        created_at: value.created_at,
        updated_at: value.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use fitcoach_types::{ExerciseTemplate, NewProgram, NewWeightLog, ValidationError};

    use crate::{
        changes::Interest,
        db::test_helpers::{date, memory_db, new_client, new_session, set},
    };

    use super::*;

    #[tokio::test]
    async fn create_and_get_client() {
        let db = memory_db().await;
        let created = db.create_client(new_client("  Ana Lima ")).await.unwrap();

        let client = db.get_client(created.id).await.unwrap().unwrap();
        assert_eq!(client.name, "Ana Lima");
        assert_eq!(client.start_date, date(1, 6));
        assert_eq!(client.created_at, client.updated_at);
        assert!(db.get_client(created.id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn invalid_client_is_rejected() {
        let db = memory_db().await;
        let mut client = new_client("Ana");
        client.start_weight = -1.0;

        let err = db.create_client(client).await.unwrap_err();
        assert!(err.downcast_ref::<ValidationError>().is_some());
        assert!(db.list_clients().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn register_client_logs_start_weight() {
        let db = memory_db().await;
        let client = db.register_client(new_client("Ana")).await.unwrap();

        let history = db.weight_history(client.id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].weight, 80.0);
        assert_eq!(history[0].date, date(1, 6));
    }

    #[tokio::test]
    async fn list_and_search_clients() {
        let db = memory_db().await;
        for name in ["Zoe", "anabel", "Bruno", "Ana"] {
            db.create_client(new_client(name)).await.unwrap();
        }

        let names: Vec<_> = db
            .list_clients()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Ana", "Bruno", "Zoe", "anabel"]);

        let found: Vec<_> = db
            .search_clients("ANA")
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(found, vec!["Ana", "anabel"]);
        assert_eq!(db.search_clients("").await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn update_client_changes_fields() {
        let db = memory_db().await;
        let client = db.create_client(new_client("Ana")).await.unwrap();

        let updated = db
            .update_client(
                client.id,
                ClientUpdate {
                    goal: Some("Half marathon".into()),
                    age: Some(30),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.goal, "Half marathon");
        assert_eq!(updated.age, 30);
        assert_eq!(updated.name, "Ana");
        assert!(updated.updated_at >= client.updated_at);

        let missing = db
            .update_client(
                client.id + 10,
                ClientUpdate {
                    age: Some(31),
                    ..Default::default()
                },
            )
            .await;
        assert!(missing.is_err());
    }

    #[tokio::test]
    async fn delete_client_cascades() {
        let db = memory_db().await;
        let client = db.register_client(new_client("Ana")).await.unwrap();
        let other = db.register_client(new_client("Bruno")).await.unwrap();

        let mut session_ids = Vec::new();
        for (owner, day) in [(client.id, 1), (client.id, 3), (other.id, 2)] {
            let (session, _) = db
                .log_session(
                    new_session(owner, date(2, day)),
                    vec![set("Squat", 100.0, 5), set("Bench", 60.0, 8)],
                )
                .await
                .unwrap();
            session_ids.push(session.id);
        }
        db.add_weight_log(NewWeightLog {
            client_id: client.id,
            weight: 79.0,
            date: date(2, 1),
        })
        .await
        .unwrap();
        db.create_program(NewProgram {
            client_id: client.id,
            name: "Base".into(),
            description: String::new(),
            exercises: vec![ExerciseTemplate {
                name: "Squat".into(),
                target_sets: 3,
                target_reps: 5,
            }],
        })
        .await
        .unwrap();

        let mut exercise_changes =
            db.subscribe(Interest::collection(Collection::Exercises).for_session(session_ids[0]));

        db.delete_client(client.id).await.unwrap();

        assert!(db.get_client(client.id).await.unwrap().is_none());
        assert!(db.client_sessions(client.id, None).await.unwrap().is_empty());
        assert!(db.weight_history(client.id).await.unwrap().is_empty());
        assert!(db.client_programs(client.id).await.unwrap().is_empty());
        for session_id in &session_ids[..2] {
            assert!(db.session_exercises(*session_id).await.unwrap().is_empty());
        }

        // The other client is untouched
        assert_eq!(db.client_sessions(other.id, None).await.unwrap().len(), 1);
        assert_eq!(db.session_exercises(session_ids[2]).await.unwrap().len(), 2);
        assert_eq!(db.weight_history(other.id).await.unwrap().len(), 1);

        let remaining = exercises::Entity::find().all(db.connection()).await.unwrap();
        assert!(remaining.iter().all(|e| e.session_id == session_ids[2]));

        let change = exercise_changes.try_next().unwrap();
        assert_eq!(change.kind, ChangeKind::Deleted);
        assert_eq!(change.client_id, Some(client.id));
    }

    #[tokio::test]
    async fn failed_delete_keeps_everything() {
        let db = memory_db().await;
        let client = db.register_client(new_client("Ana")).await.unwrap();
        let (session, _) = db
            .log_session(
                new_session(client.id, date(2, 1)),
                vec![set("Squat", 100.0, 5), set("Bench", 60.0, 8)],
            )
            .await
            .unwrap();
        let mut client_changes = db.subscribe(Interest::collection(Collection::Clients));

        // Makes the last child delete inside the transaction fail
        db.connection()
            .execute_unprepared("DROP TABLE programs")
            .await
            .unwrap();

        assert!(db.delete_client(client.id).await.is_err());

        assert!(db.get_client(client.id).await.unwrap().is_some());
        assert_eq!(db.client_sessions(client.id, None).await.unwrap().len(), 1);
        assert_eq!(db.session_exercises(session.id).await.unwrap().len(), 2);
        assert_eq!(db.weight_history(client.id).await.unwrap().len(), 1);
        assert_eq!(client_changes.try_next(), None);
    }

    #[tokio::test]
    async fn delete_missing_client_fails() {
        let db = memory_db().await;
        assert!(db.delete_client(1).await.is_err());
    }
}
