//! Test case API handlers.

use actix_web::{HttpResponse, web};
use tracing::info;

use crate::api::sections::section_summary;
use crate::config::Config;
use crate::db::DbPool;
use crate::entity::test_case;
use crate::error::{AppError, AppResult};
use crate::hierarchy::SectionIndex;
use crate::models::{
    CreateTestCaseRequest, DeleteResponse, ListTestCasesQuery, TestCaseIdsRequest,
    TestCaseListResponse, TestCaseOut, TestCasePatch, TestCaseSearchQuery, TestType,
};

/// Build a test case response from a row and the loaded section arena.
pub(crate) fn testcase_out(model: test_case::Model, index: &SectionIndex) -> TestCaseOut {
    TestCaseOut {
        id: model.id,
        case_id: model.case_id,
        title: model.title,
        is_automation: model.is_automation,
        section: model.section_id.and_then(|id| section_summary(id, index)),
        expected_result: model.expected_result,
        preconditions: model.preconditions,
        test_type: TestType::parse(&model.test_type).unwrap_or_default(),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// List test cases with limit/offset pagination.
#[utoipa::path(
    get,
    path = "/testcases",
    tag = "Testcases",
    params(
        ("limit" = Option<u64>, Query, description = "Results per page"),
        ("offset" = Option<u64>, Query, description = "Pagination offset")
    ),
    responses(
        (status = 200, description = "Paginated test cases", body = TestCaseListResponse),
    )
)]
pub async fn list_testcases(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    query: web::Query<ListTestCasesQuery>,
) -> AppResult<HttpResponse> {
    let limit = query
        .limit
        .unwrap_or(config.default_page_size)
        .min(config.max_page_size);
    let offset = query.offset.unwrap_or(0);

    let (cases, total) = pool.list_testcases(limit, offset).await?;
    let index = pool.section_index().await?;

    let response = TestCaseListResponse {
        test_cases: cases.into_iter().map(|c| testcase_out(c, &index)).collect(),
        total,
        limit,
        offset,
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Bulk fetch test cases by id.
#[utoipa::path(
    post,
    path = "/testcases/by-id",
    tag = "Testcases",
    request_body = TestCaseIdsRequest,
    responses(
        (status = 200, description = "Matching test cases", body = [TestCaseOut]),
    )
)]
pub async fn testcases_by_id(
    pool: web::Data<DbPool>,
    body: web::Json<TestCaseIdsRequest>,
) -> AppResult<HttpResponse> {
    let cases = pool.get_testcases_by_ids(&body.ids).await?;
    let index = pool.section_index().await?;

    let response: Vec<TestCaseOut> = cases.into_iter().map(|c| testcase_out(c, &index)).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// Search test cases by title or section name (case-insensitive substring).
#[utoipa::path(
    get,
    path = "/testcases/search",
    tag = "Testcases",
    params(
        ("q" = String, Query, description = "Search query string")
    ),
    responses(
        (status = 200, description = "Matching test cases", body = [TestCaseOut]),
    )
)]
pub async fn search_testcases(
    pool: web::Data<DbPool>,
    query: web::Query<TestCaseSearchQuery>,
) -> AppResult<HttpResponse> {
    let q = query.q.trim();
    if q.is_empty() {
        return Ok(HttpResponse::Ok().json(Vec::<TestCaseOut>::new()));
    }

    let cases = pool.search_testcases(q).await?;
    let index = pool.section_index().await?;

    let response: Vec<TestCaseOut> = cases.into_iter().map(|c| testcase_out(c, &index)).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// Get a test case by id.
#[utoipa::path(
    get,
    path = "/testcases/{testcase_id}",
    tag = "Testcases",
    params(
        ("testcase_id" = i32, Path, description = "Test case id")
    ),
    responses(
        (status = 200, description = "Test case details", body = TestCaseOut),
        (status = 404, description = "Test case not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_testcase(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let testcase_id = path.into_inner();

    let case = pool
        .get_testcase_by_id(testcase_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Test case {}", testcase_id)))?;

    let index = pool.section_index().await?;
    Ok(HttpResponse::Ok().json(testcase_out(case, &index)))
}

/// List all test cases in a section's subtree.
///
/// Walks the section and every descendant; the order is stable (ascending
/// id) and recomputed per request.
#[utoipa::path(
    get,
    path = "/testcases/section/{section_id}",
    tag = "Testcases",
    params(
        ("section_id" = i32, Path, description = "Section id")
    ),
    responses(
        (status = 200, description = "Test cases in the subtree", body = [TestCaseOut]),
        (status = 404, description = "Section not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn testcases_by_section(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let section_id = path.into_inner();

    let cases = pool.get_testcases_in_subtree(section_id).await?;
    let index = pool.section_index().await?;

    let response: Vec<TestCaseOut> = cases.into_iter().map(|c| testcase_out(c, &index)).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// Create a new test case.
#[utoipa::path(
    post,
    path = "/testcases",
    tag = "Testcases",
    request_body = CreateTestCaseRequest,
    responses(
        (status = 201, description = "Test case created", body = TestCaseOut),
        (status = 404, description = "Section not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Case ID already taken", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_testcase(
    pool: web::Data<DbPool>,
    body: web::Json<CreateTestCaseRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    if req.case_id.trim().is_empty() || req.title.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "case_id and title must not be empty".to_string(),
        ));
    }

    let case = pool.insert_testcase(req).await?;
    info!("Test case created: id={}, case_id={}", case.id, case.case_id);

    let index = pool.section_index().await?;
    Ok(HttpResponse::Created().json(testcase_out(case, &index)))
}

/// Apply a partial update to a test case.
#[utoipa::path(
    patch,
    path = "/testcases/{testcase_id}",
    tag = "Testcases",
    params(
        ("testcase_id" = i32, Path, description = "Test case id")
    ),
    request_body = TestCasePatch,
    responses(
        (status = 200, description = "Test case updated", body = TestCaseOut),
        (status = 404, description = "Test case or section not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Case ID already taken", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_testcase(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    body: web::Json<TestCasePatch>,
) -> AppResult<HttpResponse> {
    let testcase_id = path.into_inner();
    let case = pool.update_testcase(testcase_id, body.into_inner()).await?;

    let index = pool.section_index().await?;
    Ok(HttpResponse::Ok().json(testcase_out(case, &index)))
}

/// Delete a test case and its result rows.
#[utoipa::path(
    delete,
    path = "/testcases/{testcase_id}",
    tag = "Testcases",
    params(
        ("testcase_id" = i32, Path, description = "Test case id")
    ),
    responses(
        (status = 200, description = "Test case deleted", body = DeleteResponse),
        (status = 404, description = "Test case not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_testcase(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let testcase_id = path.into_inner();
    pool.delete_testcase(testcase_id).await?;
    info!("Test case deleted: id={}", testcase_id);
    Ok(HttpResponse::Ok().json(DeleteResponse::ok()))
}

/// Configure test case routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/testcases")
            .route(web::get().to(list_testcases))
            .route(web::post().to(create_testcase)),
    )
    .service(web::resource("/testcases/by-id").route(web::post().to(testcases_by_id)))
    .service(web::resource("/testcases/search").route(web::get().to(search_testcases)))
    .service(
        web::resource("/testcases/section/{section_id}")
            .route(web::get().to(testcases_by_section)),
    )
    .service(
        web::resource("/testcases/{testcase_id}")
            .route(web::get().to(get_testcase))
            .route(web::patch().to(update_testcase))
            .route(web::delete().to(delete_testcase)),
    );
}
