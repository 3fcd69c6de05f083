//! Migration: Create test_cases table.

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
                CREATE TABLE test_cases (
                    id SERIAL PRIMARY KEY,

                    -- External case identifier (e.g. "C1024")
                    case_id VARCHAR(8) NOT NULL UNIQUE,

                    title VARCHAR(500) NOT NULL,
                    is_automation BOOLEAN NOT NULL DEFAULT FALSE,

                    -- Weak reference: cleared, not cascaded, when the section goes
                    section_id INTEGER REFERENCES sections(id) ON DELETE SET NULL,

                    expected_result VARCHAR(500) NOT NULL DEFAULT '',
                    preconditions VARCHAR(500) NOT NULL DEFAULT '',

                    test_type VARCHAR(20) NOT NULL DEFAULT 'none'
                        CHECK (test_type IN ('none', 'smoke', 'functional')),

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                -- Index for subtree test-case queries
                CREATE INDEX idx_test_cases_section_id ON test_cases(section_id)
                    WHERE section_id IS NOT NULL;

                CREATE TRIGGER update_test_cases_updated_at
                    BEFORE UPDATE ON test_cases
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
                DROP TRIGGER IF EXISTS update_test_cases_updated_at ON test_cases;
                DROP TABLE IF EXISTS test_cases CASCADE;
                "#,
            )
            .await?;

        Ok(())
    }
}
