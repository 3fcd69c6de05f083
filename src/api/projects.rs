//! Project API handlers.

use actix_web::{HttpResponse, web};
use tracing::info;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{CreateProjectRequest, DeleteResponse, ProjectOut, ProjectPatch};

/// List all projects.
#[utoipa::path(
    get,
    path = "/projects",
    tag = "Projects",
    responses(
        (status = 200, description = "List of projects", body = [ProjectOut]),
    )
)]
pub async fn list_projects(pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let projects = pool.list_projects().await?;
    let response: Vec<ProjectOut> = projects.into_iter().map(ProjectOut::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// Get a project by id.
#[utoipa::path(
    get,
    path = "/projects/{project_id}",
    tag = "Projects",
    params(
        ("project_id" = i32, Path, description = "Project id")
    ),
    responses(
        (status = 200, description = "Project details", body = ProjectOut),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_project(pool: web::Data<DbPool>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let project_id = path.into_inner();

    let project = pool
        .get_project_by_id(project_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {}", project_id)))?;

    Ok(HttpResponse::Ok().json(ProjectOut::from(project)))
}

/// Create a new project.
#[utoipa::path(
    post,
    path = "/projects",
    tag = "Projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = ProjectOut),
        (status = 409, description = "Name already taken", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_project(
    pool: web::Data<DbPool>,
    body: web::Json<CreateProjectRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    if req.name.trim().is_empty() {
        return Err(AppError::InvalidInput("name must not be empty".to_string()));
    }

    let project = pool.insert_project(req.name).await?;
    info!("Project created: id={}, slug={}", project.id, project.slug);

    Ok(HttpResponse::Created().json(ProjectOut::from(project)))
}

/// Rename a project. The slug is regenerated from the new name.
#[utoipa::path(
    patch,
    path = "/projects/{project_id}",
    tag = "Projects",
    params(
        ("project_id" = i32, Path, description = "Project id")
    ),
    request_body = ProjectPatch,
    responses(
        (status = 200, description = "Project updated", body = ProjectOut),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Name already taken", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_project(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    body: web::Json<ProjectPatch>,
) -> AppResult<HttpResponse> {
    let project_id = path.into_inner();
    let project = pool.update_project(project_id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ProjectOut::from(project)))
}

/// Delete a project with its sections and test runs.
#[utoipa::path(
    delete,
    path = "/projects/{project_id}",
    tag = "Projects",
    params(
        ("project_id" = i32, Path, description = "Project id")
    ),
    responses(
        (status = 200, description = "Project deleted", body = DeleteResponse),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_project(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let project_id = path.into_inner();
    pool.delete_project(project_id).await?;
    info!("Project deleted: id={}", project_id);
    Ok(HttpResponse::Ok().json(DeleteResponse::ok()))
}

/// Configure project routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/projects")
            .route(web::get().to(list_projects))
            .route(web::post().to(create_project)),
    )
    .service(
        web::resource("/projects/{project_id}")
            .route(web::get().to(get_project))
            .route(web::patch().to(update_project))
            .route(web::delete().to(delete_project)),
    );
}
