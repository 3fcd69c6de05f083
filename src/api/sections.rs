//! Section API handlers.
//!
//! Reads attach the derived hierarchy fields by loading the section arena
//! and walking it with `crate::hierarchy`; nothing derived is persisted.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use crate::db::DbPool;
use crate::entity::section;
use crate::error::{AppError, AppResult};
use crate::hierarchy::SectionIndex;
use crate::models::{
    CreateSectionRequest, DeleteResponse, SectionOut, SectionPatch, SectionSummary,
    SectionTreeNode,
};

/// Build a full section response from a row and the loaded arena.
pub(crate) fn section_out(model: section::Model, index: &SectionIndex) -> SectionOut {
    let section_hierarchy = index.ancestor_path(model.id).unwrap_or_default();
    let full_section_hierarchy = format!("/{}", section_hierarchy.join("/"));

    SectionOut {
        id: model.id,
        name: model.name,
        parent_id: model.parent_id,
        project_id: model.project_id,
        section_hierarchy,
        full_section_hierarchy,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// Build the compact section reference embedded in test case bodies.
pub(crate) fn section_summary(section_id: i32, index: &SectionIndex) -> Option<SectionSummary> {
    let node = index.get(section_id)?;
    Some(SectionSummary {
        id: node.id,
        name: node.name.clone(),
        full_section_hierarchy: index.full_path(section_id)?,
    })
}

/// Query parameters for the tree endpoint.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TreeQuery {
    /// Restrict the forest to one project scope.
    pub project_id: Option<i32>,
}

/// List all sections with their derived hierarchy paths.
#[utoipa::path(
    get,
    path = "/sections",
    tag = "Sections",
    responses(
        (status = 200, description = "List of sections", body = [SectionOut]),
    )
)]
pub async fn list_sections(pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let sections = pool.list_sections().await?;
    let index = pool.section_index().await?;

    let response: Vec<SectionOut> = sections
        .into_iter()
        .map(|s| section_out(s, &index))
        .collect();

    Ok(HttpResponse::Ok().json(response))
}

/// Get the nested forest of root sections.
#[utoipa::path(
    get,
    path = "/sections/tree",
    tag = "Sections",
    params(
        ("project_id" = Option<i32>, Query, description = "Filter roots to one project")
    ),
    responses(
        (status = 200, description = "Nested section forest", body = [SectionTreeNode]),
    )
)]
pub async fn section_tree(
    pool: web::Data<DbPool>,
    query: web::Query<TreeQuery>,
) -> AppResult<HttpResponse> {
    let index = pool.section_index().await?;
    let forest = index.tree(query.project_id);
    Ok(HttpResponse::Ok().json(forest))
}

/// Get a section by id.
#[utoipa::path(
    get,
    path = "/sections/{section_id}",
    tag = "Sections",
    params(
        ("section_id" = i32, Path, description = "Section id")
    ),
    responses(
        (status = 200, description = "Section details", body = SectionOut),
        (status = 404, description = "Section not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_section(pool: web::Data<DbPool>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let section_id = path.into_inner();

    let section = pool
        .get_section_by_id(section_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Section {}", section_id)))?;

    let index = pool.section_index().await?;
    Ok(HttpResponse::Ok().json(section_out(section, &index)))
}

/// Create a new section.
#[utoipa::path(
    post,
    path = "/sections",
    tag = "Sections",
    request_body = CreateSectionRequest,
    responses(
        (status = 201, description = "Section created", body = SectionOut),
        (status = 404, description = "Parent or project not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Sibling name collision", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_section(
    pool: web::Data<DbPool>,
    body: web::Json<CreateSectionRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    if req.name.trim().is_empty() {
        return Err(AppError::InvalidInput("name must not be empty".to_string()));
    }

    let section = pool.insert_section(req).await?;
    info!("Section created: id={}, name={}", section.id, section.name);

    let index = pool.section_index().await?;
    Ok(HttpResponse::Created().json(section_out(section, &index)))
}

/// Rename or reparent a section.
///
/// Only fields present in the body are applied. Reparenting a section under
/// itself or one of its descendants is rejected.
#[utoipa::path(
    patch,
    path = "/sections/{section_id}",
    tag = "Sections",
    params(
        ("section_id" = i32, Path, description = "Section id")
    ),
    request_body = SectionPatch,
    responses(
        (status = 200, description = "Section updated", body = SectionOut),
        (status = 404, description = "Section or parent not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Name collision or cycle", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_section(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    body: web::Json<SectionPatch>,
) -> AppResult<HttpResponse> {
    let section_id = path.into_inner();
    let section = pool.update_section(section_id, body.into_inner()).await?;

    let index = pool.section_index().await?;
    Ok(HttpResponse::Ok().json(section_out(section, &index)))
}

/// Delete a section and its whole subtree.
///
/// Test cases pointing into the removed subtree keep existing with their
/// section reference cleared.
#[utoipa::path(
    delete,
    path = "/sections/{section_id}",
    tag = "Sections",
    params(
        ("section_id" = i32, Path, description = "Section id")
    ),
    responses(
        (status = 200, description = "Section deleted", body = DeleteResponse),
        (status = 404, description = "Section not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_section(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let section_id = path.into_inner();
    pool.delete_section(section_id).await?;
    info!("Section deleted: id={}", section_id);
    Ok(HttpResponse::Ok().json(DeleteResponse::ok()))
}

/// Configure section routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/sections")
            .route(web::get().to(list_sections))
            .route(web::post().to(create_section)),
    )
    .service(web::resource("/sections/tree").route(web::get().to(section_tree)))
    .service(
        web::resource("/sections/{section_id}")
            .route(web::get().to(get_section))
            .route(web::patch().to(update_section))
            .route(web::delete().to(delete_section)),
    );
}
