//! Test run API handlers.

use actix_web::{HttpResponse, web};
use tracing::info;

use crate::api::sections::section_summary;
use crate::db::DbPool;
use crate::entity::test_run;
use crate::error::{AppError, AppResult};
use crate::hierarchy::SectionIndex;
use crate::models::{
    CaseIdsRequest, CreateTestRunRequest, DeleteResponse, Environment, ProjectOut, ResultPriority,
    ResultStatus, TestResultOut, TestRunOut,
};

/// Assemble a full test run response: owning project plus result rows with
/// their case details.
async fn run_out(
    pool: &DbPool,
    index: &SectionIndex,
    run: test_run::Model,
) -> AppResult<TestRunOut> {
    let project = pool
        .get_project_by_id(run.project_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {}", run.project_id)))?;

    let rows = pool.get_results_with_cases(run.id).await?;

    let results: Vec<TestResultOut> = rows
        .into_iter()
        .filter_map(|(result, case)| {
            // A result without its case only exists mid-cascade; skip it.
            let case = case?;
            Some(TestResultOut {
                id: result.id,
                test_case_id: case.id,
                case_id: case.case_id,
                title: case.title,
                section: case.section_id.and_then(|id| section_summary(id, index)),
                status: ResultStatus::parse(&result.status).unwrap_or_default(),
                priority: ResultPriority::parse(&result.priority).unwrap_or_default(),
                details: result.details,
                created_at: result.created_at,
                updated_at: result.updated_at,
            })
        })
        .collect();

    Ok(TestRunOut {
        id: run.id,
        project: ProjectOut::from(project),
        title: run.title,
        description: run.description,
        environment: Environment::parse(&run.environment).unwrap_or_default(),
        results,
        created_at: run.created_at,
        updated_at: run.updated_at,
    })
}

/// List all test runs with their results.
#[utoipa::path(
    get,
    path = "/testruns",
    tag = "Testruns",
    responses(
        (status = 200, description = "List of test runs", body = [TestRunOut]),
    )
)]
pub async fn list_testruns(pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let runs = pool.list_testruns().await?;
    let index = pool.section_index().await?;

    let mut response = Vec::with_capacity(runs.len());
    for run in runs {
        response.push(run_out(&pool, &index, run).await?);
    }

    Ok(HttpResponse::Ok().json(response))
}

/// Get a test run by id.
#[utoipa::path(
    get,
    path = "/testruns/{run_id}",
    tag = "Testruns",
    params(
        ("run_id" = i32, Path, description = "Test run id")
    ),
    responses(
        (status = 200, description = "Test run details", body = TestRunOut),
        (status = 404, description = "Test run not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_testrun(pool: web::Data<DbPool>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let run_id = path.into_inner();

    let run = pool
        .get_testrun_by_id(run_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Test run {}", run_id)))?;

    let index = pool.section_index().await?;
    Ok(HttpResponse::Ok().json(run_out(&pool, &index, run).await?))
}

/// List test runs of a project, addressed by slug.
#[utoipa::path(
    get,
    path = "/testruns/project/{project_slug}",
    tag = "Testruns",
    params(
        ("project_slug" = String, Path, description = "Project slug")
    ),
    responses(
        (status = 200, description = "Test runs of the project", body = [TestRunOut]),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn testruns_by_project(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();

    let project = pool
        .get_project_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project \"{}\"", slug)))?;

    let runs = pool.get_testruns_by_project(project.id).await?;
    let index = pool.section_index().await?;

    let mut response = Vec::with_capacity(runs.len());
    for run in runs {
        response.push(run_out(&pool, &index, run).await?);
    }

    Ok(HttpResponse::Ok().json(response))
}

/// Create a new test run.
#[utoipa::path(
    post,
    path = "/testruns",
    tag = "Testruns",
    request_body = CreateTestRunRequest,
    responses(
        (status = 201, description = "Test run created", body = TestRunOut),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_testrun(
    pool: web::Data<DbPool>,
    body: web::Json<CreateTestRunRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    if req.title.trim().is_empty() {
        return Err(AppError::InvalidInput("title must not be empty".to_string()));
    }

    let run = pool.insert_testrun(req).await?;
    info!("Test run created: id={}, title={}", run.id, run.title);

    let index = pool.section_index().await?;
    Ok(HttpResponse::Created().json(run_out(&pool, &index, run).await?))
}

/// Attach test cases to a run.
///
/// Creates one untested result row per case as a single atomic batch;
/// already-attached cases are deduplicated.
#[utoipa::path(
    patch,
    path = "/testruns/{run_id}/add-cases",
    tag = "Testruns",
    params(
        ("run_id" = i32, Path, description = "Test run id")
    ),
    request_body = CaseIdsRequest,
    responses(
        (status = 200, description = "Updated test run", body = TestRunOut),
        (status = 404, description = "Test run not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn add_cases(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    body: web::Json<CaseIdsRequest>,
) -> AppResult<HttpResponse> {
    let run_id = path.into_inner();

    let attached = pool.attach_cases_to_run(run_id, &body.case_ids).await?;
    info!("Attached {} cases to run {}", attached, run_id);

    let run = pool
        .get_testrun_by_id(run_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Test run {}", run_id)))?;

    let index = pool.section_index().await?;
    Ok(HttpResponse::Ok().json(run_out(&pool, &index, run).await?))
}

/// Detach test cases from a run. Returns the removed result row ids.
#[utoipa::path(
    patch,
    path = "/testruns/{run_id}/remove-cases",
    tag = "Testruns",
    params(
        ("run_id" = i32, Path, description = "Test run id")
    ),
    request_body = CaseIdsRequest,
    responses(
        (status = 200, description = "Removed result ids", body = [i32]),
        (status = 404, description = "Test run not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn remove_cases(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    body: web::Json<CaseIdsRequest>,
) -> AppResult<HttpResponse> {
    let run_id = path.into_inner();

    let removed = pool.remove_cases_from_run(run_id, &body.case_ids).await?;
    info!("Removed {} results from run {}", removed.len(), run_id);

    Ok(HttpResponse::Ok().json(removed))
}

/// Delete a test run and its result rows.
#[utoipa::path(
    delete,
    path = "/testruns/{run_id}",
    tag = "Testruns",
    params(
        ("run_id" = i32, Path, description = "Test run id")
    ),
    responses(
        (status = 200, description = "Test run deleted", body = DeleteResponse),
        (status = 404, description = "Test run not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_testrun(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let run_id = path.into_inner();
    pool.delete_testrun(run_id).await?;
    info!("Test run deleted: id={}", run_id);
    Ok(HttpResponse::Ok().json(DeleteResponse::ok()))
}

/// Configure test run routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/testruns")
            .route(web::get().to(list_testruns))
            .route(web::post().to(create_testrun)),
    )
    .service(
        web::resource("/testruns/project/{project_slug}")
            .route(web::get().to(testruns_by_project)),
    )
    .service(
        web::resource("/testruns/{run_id}")
            .route(web::get().to(get_testrun))
            .route(web::delete().to(delete_testrun)),
    )
    .service(web::resource("/testruns/{run_id}/add-cases").route(web::patch().to(add_cases)))
    .service(web::resource("/testruns/{run_id}/remove-cases").route(web::patch().to(remove_cases)));
}
