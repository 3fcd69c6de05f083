//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20260405_000001_create_projects;
mod m20260405_000002_create_sections;
mod m20260405_000003_create_test_cases;
mod m20260405_000004_create_test_runs;
mod m20260405_000005_create_test_results;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260405_000001_create_projects::Migration),
            Box::new(m20260405_000002_create_sections::Migration),
            Box::new(m20260405_000003_create_test_cases::Migration),
            Box::new(m20260405_000004_create_test_runs::Migration),
            Box::new(m20260405_000005_create_test_results::Migration),
        ]
    }
}
