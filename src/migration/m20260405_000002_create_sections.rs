//! Migration: Create sections table.
//!
//! Sections form a per-project forest via the self-referencing parent_id.
//! Sibling-name uniqueness needs two partial indexes: a plain UNIQUE over
//! (parent_id, name) would treat the NULL parents of root sections as
//! always-distinct, so roots get their own index keyed on the project scope.

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
                CREATE TABLE sections (
                    id SERIAL PRIMARY KEY,
                    name VARCHAR(255) NOT NULL,

                    -- Deleting a section deletes its whole subtree
                    parent_id INTEGER REFERENCES sections(id) ON DELETE CASCADE,

                    -- Deleting a project deletes its sections
                    project_id INTEGER REFERENCES projects(id) ON DELETE CASCADE,

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

                    -- Single-edge cycle guard; multi-edge cycles are rejected
                    -- at the store layer before the UPDATE is issued
                    CONSTRAINT chk_sections_no_self_parent CHECK (parent_id IS DISTINCT FROM id)
                );

                -- Sibling-name uniqueness among children of the same parent
                CREATE UNIQUE INDEX uq_sections_parent_name ON sections(parent_id, name)
                    WHERE parent_id IS NOT NULL;

                -- Sibling-name uniqueness among roots, per project scope
                -- (project-less roots share the 0 bucket)
                CREATE UNIQUE INDEX uq_sections_root_name
                    ON sections(COALESCE(project_id, 0), name)
                    WHERE parent_id IS NULL;

                -- Index for child lookups
                CREATE INDEX idx_sections_parent_id ON sections(parent_id)
                    WHERE parent_id IS NOT NULL;

                -- Index for project-scoped loads
                CREATE INDEX idx_sections_project_id ON sections(project_id)
                    WHERE project_id IS NOT NULL;

                CREATE TRIGGER update_sections_updated_at
                    BEFORE UPDATE ON sections
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
                DROP TRIGGER IF EXISTS update_sections_updated_at ON sections;
                DROP TABLE IF EXISTS sections CASCADE;
                "#,
            )
            .await?;

        Ok(())
    }
}
