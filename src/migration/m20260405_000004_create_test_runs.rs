//! Migration: Create test_runs table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE test_runs (
                    id SERIAL PRIMARY KEY,

                    project_id INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,

                    title VARCHAR(255) NOT NULL,
                    description VARCHAR(500) NOT NULL DEFAULT '',

                    environment VARCHAR(20) NOT NULL DEFAULT 'dev'
                        CHECK (environment IN ('dev', 'staging', 'live')),

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                -- Index for runs-by-project queries
                CREATE INDEX idx_test_runs_project_id ON test_runs(project_id);

                CREATE TRIGGER update_test_runs_updated_at
                    BEFORE UPDATE ON test_runs
                    FOR EACH ROW
                    EXECUTE FUNCTION update_updated_at_column();
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP TRIGGER IF EXISTS update_test_runs_updated_at ON test_runs;
                DROP TABLE IF EXISTS test_runs CASCADE;
                "#,
            )
            .await?;

        Ok(())
    }
}
