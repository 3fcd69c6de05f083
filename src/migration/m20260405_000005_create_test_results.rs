//! Migration: Create test_results table.

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
                CREATE TABLE test_results (
                    id SERIAL PRIMARY KEY,

                    test_run_id INTEGER NOT NULL REFERENCES test_runs(id) ON DELETE CASCADE,
                    test_case_id INTEGER NOT NULL REFERENCES test_cases(id) ON DELETE CASCADE,

                    status VARCHAR(20) NOT NULL DEFAULT 'untested'
                        CHECK (status IN ('untested', 'passed', 'failed', 'skipped', 'retest')),

                    priority VARCHAR(20) NOT NULL DEFAULT 'medium'
                        CHECK (priority IN ('low', 'medium', 'high')),

                    details VARCHAR(255) NOT NULL DEFAULT '',

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

                    -- At most one result per (run, case) pair
                    CONSTRAINT uq_test_results_run_case UNIQUE (test_run_id, test_case_id)
                );

                -- Index for results-by-run queries
                CREATE INDEX idx_test_results_test_run_id ON test_results(test_run_id);

                -- Index for results-by-case queries (cascade bookkeeping)
                CREATE INDEX idx_test_results_test_case_id ON test_results(test_case_id);

                CREATE TRIGGER update_test_results_updated_at
                    BEFORE UPDATE ON test_results
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
                DROP TRIGGER IF EXISTS update_test_results_updated_at ON test_results;
                DROP TABLE IF EXISTS test_results CASCADE;
                "#,
            )
            .await?;

        Ok(())
    }
}
