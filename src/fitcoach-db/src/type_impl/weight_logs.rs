use chrono::NaiveDate;
use fitcoach_entities::weight_logs;
use fitcoach_types::{NewWeightLog, WeightLog, WeightLogUpdate};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::{
    DatabaseHandler, StoreError,
    changes::{Change, ChangeKind, Collection},
    db::now,
    type_impl::clients::client_exists,
};

impl DatabaseHandler {
    pub async fn add_weight_log(&self, log: NewWeightLog) -> anyhow::Result<WeightLog> {
        log.validate()?;
        if !client_exists(&self.db, log.client_id).await? {
            return Err(StoreError::not_found(Collection::Clients, log.client_id));
        }

        let log = map_weight_log(
            insert_weight_log(&self.db, log.client_id, log.weight, log.date).await?,
        );
        self.publish(
            Change::new(Collection::WeightLogs, ChangeKind::Inserted, log.id).client(log.client_id),
        );
        Ok(log)
    }

    /// All weight logs of a client, oldest first.
    pub async fn weight_history(&self, client_id: i32) -> anyhow::Result<Vec<WeightLog>> {
        Ok(weight_logs::Entity::find()
            .filter(weight_logs::Column::ClientId.eq(client_id))
            .order_by_asc(weight_logs::Column::Date)
            .order_by_asc(weight_logs::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(map_weight_log)
            .collect())
    }

    pub async fn latest_weight_log(&self, client_id: i32) -> anyhow::Result<Option<WeightLog>> {
        Ok(weight_logs::Entity::find()
            .filter(weight_logs::Column::ClientId.eq(client_id))
            .order_by_desc(weight_logs::Column::Date)
            .order_by_desc(weight_logs::Column::Id)
            .one(&self.db)
            .await?
            .map(map_weight_log))
    }

    pub async fn update_weight_log(
        &self,
        id: i32,
        update: WeightLogUpdate,
    ) -> anyhow::Result<WeightLog> {
        update.validate()?;

        let existing = weight_logs::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| StoreError::not_found(Collection::WeightLogs, id))?;

        let mut model: weight_logs::ActiveModel = existing.into();
        if let Some(weight) = update.weight {
            model.weight = Set(weight);
        }
        if let Some(date) = update.date {
            model.date = Set(date);
        }

        let log = map_weight_log(model.update(&self.db).await?);
        self.publish(
            Change::new(Collection::WeightLogs, ChangeKind::Updated, id).client(log.client_id),
        );
        Ok(log)
    }

    pub async fn delete_weight_log(&self, id: i32) -> anyhow::Result<()> {
        let existing = weight_logs::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| StoreError::not_found(Collection::WeightLogs, id))?;

        weight_logs::Entity::delete_by_id(id).exec(&self.db).await?;
        self.publish(
            Change::new(Collection::WeightLogs, ChangeKind::Deleted, id).client(existing.client_id),
        );
        Ok(())
    }
}

pub(crate) async fn insert_weight_log<C>(
    conn: &C,
    client_id: i32,
    weight: f64,
    date: NaiveDate,
) -> anyhow::Result<weight_logs::Model>
where
    C: ConnectionTrait,
{
    let model = weight_logs::ActiveModel {
        id: NotSet,
        client_id: Set(client_id),
        weight: Set(weight),
        date: Set(date),
        created_at: Set(now()),
    };

    Ok(model.insert(conn).await?)
}

pub(crate) fn map_weight_log(value: weight_logs::Model) -> WeightLog {
    WeightLog {
        id: value.id,
        client_id: value.client_id,
        weight: value.weight,
        date: value.date,
        created_at: value.created_at,
    }
}
