use sea_orm_migration::prelude::*;

use crate::m20250301_000002_sessions::Sessions;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Exercises::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Exercises::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Exercises::SessionId).integer().not_null())
                    .col(ColumnDef::new(Exercises::Name).string().not_null())
                    .col(ColumnDef::new(Exercises::Weight).double().not_null())
                    .col(ColumnDef::new(Exercises::Reps).integer().not_null())
                    .col(
                        ColumnDef::new(Exercises::Rir)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Exercises::Notes).text().not_null())
                    .col(ColumnDef::new(Exercises::Position).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_exercises_sessions")
                            .from(Exercises::Table, Exercises::SessionId)
                            .to(Sessions::Table, Sessions::Id)
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
                    .name("idx_exercises_session_position")
                    .table(Exercises::Table)
                    .col(Exercises::SessionId)
                    .col(Exercises::Position)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_exercises_name")
                    .table(Exercises::Table)
                    .col(Exercises::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Exercises::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Exercises {
    Table,
    Id,
    SessionId,
    Name,
    Weight,
    Reps,
    Rir,
    Notes,
    Position,
}
