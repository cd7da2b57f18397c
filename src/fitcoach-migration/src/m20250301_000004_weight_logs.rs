use sea_orm_migration::prelude::*;

use crate::m20250301_000001_clients::Clients;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WeightLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WeightLogs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WeightLogs::ClientId).integer().not_null())
                    .col(ColumnDef::new(WeightLogs::Weight).double().not_null())
                    .col(ColumnDef::new(WeightLogs::Date).date().not_null())
                    .col(ColumnDef::new(WeightLogs::CreatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_weight_logs_clients")
                            .from(WeightLogs::Table, WeightLogs::ClientId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_weight_logs_client_date")
                    .table(WeightLogs::Table)
                    .col(WeightLogs::ClientId)
                    .col(WeightLogs::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WeightLogs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum WeightLogs {
    Table,
    Id,
    ClientId,
    Weight,
    Date,
    CreatedAt,
}
