use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clients::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Clients::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Clients::Name).string().not_null())
                    .col(ColumnDef::new(Clients::Age).integer().not_null())
                    .col(ColumnDef::new(Clients::Height).double().not_null())
                    .col(ColumnDef::new(Clients::StartWeight).double().not_null())
                    .col(ColumnDef::new(Clients::Goal).text().not_null())
                    .col(ColumnDef::new(Clients::Injuries).text().not_null())
                    .col(ColumnDef::new(Clients::StartDate).date().not_null())
                    .col(ColumnDef::new(Clients::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Clients::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_clients_name")
                    .table(Clients::Table)
                    .col(Clients::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Clients::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Clients {
    Table,
    Id,
    Name,
    Age,
    Height,
    StartWeight,
    Goal,
    Injuries,
    StartDate,
    CreatedAt,
    UpdatedAt,
}
