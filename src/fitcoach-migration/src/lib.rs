pub use sea_orm_migration::prelude::*;

pub mod m20250301_000001_clients;
pub mod m20250301_000002_sessions;
mod m20250301_000003_exercises;
mod m20250301_000004_weight_logs;
mod m20250301_000005_programs;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_clients::Migration),
            Box::new(m20250301_000002_sessions::Migration),
            Box::new(m20250301_000003_exercises::Migration),
            Box::new(m20250301_000004_weight_logs::Migration),
            Box::new(m20250301_000005_programs::Migration),
        ]
    }
}
