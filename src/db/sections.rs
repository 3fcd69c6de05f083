//! Database queries for the section hierarchy store.
//!
//! Every mutation runs as a single transaction. Sibling-name uniqueness is
//! enforced by the partial unique indexes from the sections migration, so a
//! race between concurrent creators of same-named siblings resolves in the
//! database: the loser gets a `ConstraintViolation`. The multi-level cycle
//! guard for reparenting is checked here against the section arena loaded
//! inside the same transaction.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::entity::section::{self, ActiveModel, Entity as Section};
use crate::entity::test_case::{self, Entity as TestCase};
use crate::error::{AppError, AppResult};
use crate::hierarchy::{SectionIndex, SectionNode};
use crate::models::{CreateSectionRequest, SectionPatch};

use super::DbPool;

/// Load the full section arena from `conn` into a hierarchy index.
pub async fn load_section_index<C: ConnectionTrait>(conn: &C) -> AppResult<SectionIndex> {
    let rows = Section::find()
        .order_by_asc(section::Column::Id)
        .all(conn)
        .await?;

    let nodes = rows
        .into_iter()
        .map(|m| SectionNode {
            id: m.id,
            parent_id: m.parent_id,
            project_id: m.project_id,
            name: m.name,
        })
        .collect();

    Ok(SectionIndex::from_rows(nodes))
}

fn sibling_collision(name: &str) -> AppError {
    AppError::ConstraintViolation(format!(
        "A section named \"{}\" already exists under that parent",
        name
    ))
}

impl DbPool {
    /// Load the section arena for read-side hierarchy derivation.
    pub async fn section_index(&self) -> AppResult<SectionIndex> {
        load_section_index(self.connection()).await
    }

    /// List all sections ordered by id.
    pub async fn list_sections(&self) -> AppResult<Vec<section::Model>> {
        let sections = Section::find()
            .order_by_asc(section::Column::Id)
            .all(self.connection())
            .await?;
        Ok(sections)
    }

    /// Get a section by id.
    pub async fn get_section_by_id(&self, id: i32) -> AppResult<Option<section::Model>> {
        let result = Section::find_by_id(id).one(self.connection()).await?;
        Ok(result)
    }

    /// Insert a new section.
    ///
    /// A child section inherits its parent's project scope; a root section
    /// takes the requested project (verified to exist).
    pub async fn insert_section(&self, req: CreateSectionRequest) -> AppResult<section::Model> {
        let txn = self.connection().begin().await?;

        let project_id = match req.parent_id {
            Some(parent_id) => {
                let parent = Section::find_by_id(parent_id)
                    .one(&txn)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("Parent section {}", parent_id)))?;
                parent.project_id
            }
            None => match req.project_id {
                Some(project_id) => {
                    crate::entity::project::Entity::find_by_id(project_id)
                        .one(&txn)
                        .await?
                        .ok_or_else(|| AppError::NotFound(format!("Project {}", project_id)))?;
                    Some(project_id)
                }
                None => None,
            },
        };

        let model = ActiveModel {
            name: Set(req.name.clone()),
            parent_id: Set(req.parent_id),
            project_id: Set(project_id),
            ..Default::default()
        };

        let result = model.insert(&txn).await.map_err(|e| match e.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => sibling_collision(&req.name),
            _ => AppError::Database(format!("Failed to insert section: {}", e)),
        })?;

        txn.commit().await?;
        Ok(result)
    }

    /// Apply a partial update to a section.
    ///
    /// Only present fields are overwritten. Reparenting rejects the section
    /// itself and any of its descendants as the new parent (the tree must
    /// stay acyclic), and moves the subtree into the new parent's project
    /// scope when that scope differs.
    pub async fn update_section(&self, id: i32, patch: SectionPatch) -> AppResult<section::Model> {
        let txn = self.connection().begin().await?;

        let current = Section::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Section {}", id)))?;

        let mut new_scope: Option<Option<i32>> = None;
        let mut active: ActiveModel = current.clone().into();

        if let Some(new_parent) = patch.parent_id {
            if new_parent == id {
                txn.rollback().await?;
                return Err(AppError::ConstraintViolation(
                    "A section cannot be its own parent".to_string(),
                ));
            }

            let index = load_section_index(&txn).await?;
            let parent_row = index
                .get(new_parent)
                .ok_or_else(|| AppError::NotFound(format!("Parent section {}", new_parent)))?;

            if index.is_descendant(new_parent, id) {
                txn.rollback().await?;
                return Err(AppError::ConstraintViolation(
                    "Cannot move a section under one of its own descendants".to_string(),
                ));
            }

            if parent_row.project_id != current.project_id {
                new_scope = Some(parent_row.project_id);
                active.project_id = Set(parent_row.project_id);
            }
            active.parent_id = Set(Some(new_parent));
        }

        let effective_name = match patch.name {
            Some(name) => {
                active.name = Set(name.clone());
                name
            }
            None => current.name.clone(),
        };

        let result = active.update(&txn).await.map_err(|e| match e.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
                sibling_collision(&effective_name)
            }
            _ => AppError::Database(format!("Failed to update section: {}", e)),
        })?;

        // Moving across projects drags the whole subtree into the new scope.
        if let Some(scope) = new_scope {
            let index = load_section_index(&txn).await?;
            let subtree = index.descendant_ids(id);
            Section::update_many()
                .col_expr(section::Column::ProjectId, Expr::value(scope))
                .filter(section::Column::Id.is_in(subtree))
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(result)
    }

    /// Delete a section. Descendant sections are cascade-deleted; test cases
    /// pointing into the removed subtree get their section reference cleared
    /// (both via the FK behavior declared in the migration).
    pub async fn delete_section(&self, id: i32) -> AppResult<()> {
        let section = self
            .get_section_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Section {}", id)))?;

        section.delete(self.connection()).await?;
        Ok(())
    }

    /// All test cases attached to the section or any of its descendants,
    /// ordered by id.
    pub async fn get_testcases_in_subtree(
        &self,
        section_id: i32,
    ) -> AppResult<Vec<test_case::Model>> {
        let index = self.section_index().await?;
        if !index.contains(section_id) {
            return Err(AppError::NotFound(format!("Section {}", section_id)));
        }

        let mut ids = vec![section_id];
        ids.extend(index.descendant_ids(section_id));

        let cases = TestCase::find()
            .filter(test_case::Column::SectionId.is_in(ids))
            .order_by_asc(test_case::Column::Id)
            .all(self.connection())
            .await?;

        Ok(cases)
    }
}
