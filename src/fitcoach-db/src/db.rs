use chrono::{Local, NaiveDateTime};
use fitcoach_migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use thiserror::Error;

use crate::changes::{Change, ChangeFeed, Collection, Interest, Subscription};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{collection} record #{id} not found")]
    RecordNotFound { collection: Collection, id: i32 },
}

impl StoreError {
    pub(crate) fn not_found(collection: Collection, id: i32) -> anyhow::Error {
        Self::RecordNotFound { collection, id }.into()
    }
}

#[derive(Clone)]
pub struct DatabaseHandler {
    pub(crate) db: DatabaseConnection,
    changes: ChangeFeed,
}

impl DatabaseHandler {
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn new<C>(path: C) -> anyhow::Result<Self>
    where
        C: Into<ConnectOptions>,
    {
        let db = Database::connect(path).await?;
        Migrator::up(&db, None).await?;

        Ok(Self {
            db,
            changes: ChangeFeed::new(),
        })
    }

    /// Registers interest in changes to one collection.
    pub fn subscribe(&self, interest: Interest) -> Subscription {
        self.changes.subscribe(interest)
    }

    pub(crate) fn publish(&self, change: Change) {
        self.changes.publish(change);
    }

    pub(crate) fn publish_all(&self, changes: impl IntoIterator<Item = Change>) {
        self.changes.publish_all(changes);
    }
}

pub(crate) fn now() -> NaiveDateTime {
    Local::now().naive_local()
}


#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use super::*;

    #[tokio::test]
    async fn migrations_create_empty_store() {
        let db = memory_db().await;
        assert!(db.list_clients().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn not_found_error_is_typed() {
        let db = memory_db().await;
        let err = db.delete_client(42).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::RecordNotFound {
                collection: Collection::Clients,
                id: 42
            })
        ));
        assert_eq!(err.to_string(), "clients record #42 not found");
    }

    #[tokio::test]
    async fn clones_share_the_change_feed() {
        let db = memory_db().await;
        let other = db.clone();
        let mut subscription = db.subscribe(Interest::collection(Collection::Clients));

        let client = other.create_client(new_client("Ana")).await.unwrap();

        let change = subscription.try_next().unwrap();
        assert_eq!(change.id, Some(client.id));
        assert_eq!(change.client_id, Some(client.id));
    }
}
