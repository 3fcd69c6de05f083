//! Database queries for projects.

use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set};

use crate::entity::project::{self, ActiveModel, Entity as Project};
use crate::error::{AppError, AppResult};
use crate::models::{ProjectPatch, slugify};

use super::DbPool;

impl DbPool {
    /// List all projects ordered by id.
    pub async fn list_projects(&self) -> AppResult<Vec<project::Model>> {
        let projects = Project::find()
            .order_by_asc(project::Column::Id)
            .all(self.connection())
            .await?;
        Ok(projects)
    }

    /// Get a project by id.
    pub async fn get_project_by_id(&self, id: i32) -> AppResult<Option<project::Model>> {
        let project = Project::find_by_id(id).one(self.connection()).await?;
        Ok(project)
    }

    /// Get a project by slug.
    pub async fn get_project_by_slug(&self, slug: &str) -> AppResult<Option<project::Model>> {
        let project = Project::find()
            .filter(project::Column::Slug.eq(slug))
            .one(self.connection())
            .await?;
        Ok(project)
    }

    /// Insert a new project; the slug is derived from the name.
    pub async fn insert_project(&self, name: String) -> AppResult<project::Model> {
        let slug = slugify(&name);

        let model = ActiveModel {
            name: Set(name.clone()),
            slug: Set(slug),
            ..Default::default()
        };

        let result = model.insert(self.connection()).await.map_err(|e| {
            match e.sql_err() {
                Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => AppError::ConstraintViolation(
                    format!("A project named \"{}\" already exists", name),
                ),
                _ => AppError::Database(format!("Failed to insert project: {}", e)),
            }
        })?;

        Ok(result)
    }

    /// Apply a partial update to a project. Renaming regenerates the slug.
    pub async fn update_project(&self, id: i32, patch: ProjectPatch) -> AppResult<project::Model> {
        let project = self
            .get_project_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {}", id)))?;

        let mut active: ActiveModel = project.into();
        if let Some(name) = patch.name {
            active.slug = Set(slugify(&name));
            active.name = Set(name);
        }

        let result = active.update(self.connection()).await.map_err(|e| {
            match e.sql_err() {
                Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => AppError::ConstraintViolation(
                    "A project with that name already exists".to_string(),
                ),
                _ => AppError::Database(format!("Failed to update project: {}", e)),
            }
        })?;

        Ok(result)
    }

    /// Delete a project. Owned sections and test runs go with it (FK cascade).
    pub async fn delete_project(&self, id: i32) -> AppResult<()> {
        let project = self
            .get_project_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {}", id)))?;

        project.delete(self.connection()).await?;
        Ok(())
    }
}
