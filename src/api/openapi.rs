//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "QA Manager API",
        version = "0.2.0",
        description = "Manage projects, hierarchical test sections, test cases and test runs"
    ),
    servers(
        (url = "/api/v1", description = "Versioned API root")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Project endpoints
        api::projects::list_projects,
        api::projects::get_project,
        api::projects::create_project,
        api::projects::update_project,
        api::projects::delete_project,
        // Section endpoints
        api::sections::list_sections,
        api::sections::section_tree,
        api::sections::get_section,
        api::sections::create_section,
        api::sections::update_section,
        api::sections::delete_section,
        // Test case endpoints
        api::test_cases::list_testcases,
        api::test_cases::testcases_by_id,
        api::test_cases::search_testcases,
        api::test_cases::get_testcase,
        api::test_cases::testcases_by_section,
        api::test_cases::create_testcase,
        api::test_cases::update_testcase,
        api::test_cases::delete_testcase,
        // Test run endpoints
        api::test_runs::list_testruns,
        api::test_runs::get_testrun,
        api::test_runs::testruns_by_project,
        api::test_runs::create_testrun,
        api::test_runs::add_cases,
        api::test_runs::remove_cases,
        api::test_runs::delete_testrun,
    ),
    components(
        schemas(
            error::ErrorResponse,
            models::DeleteResponse,
            models::ProjectOut,
            models::CreateProjectRequest,
            models::ProjectPatch,
            models::SectionOut,
            models::SectionSummary,
            models::SectionTreeNode,
            models::CreateSectionRequest,
            models::SectionPatch,
            models::TestType,
            models::TestCaseOut,
            models::TestCaseListResponse,
            models::TestCaseIdsRequest,
            models::CreateTestCaseRequest,
            models::TestCasePatch,
            models::Environment,
            models::TestRunOut,
            models::CreateTestRunRequest,
            models::CaseIdsRequest,
            models::ResultStatus,
            models::ResultPriority,
            models::TestResultOut,
        )
    ),
    tags(
        (name = "Health", description = "Service health endpoints"),
        (name = "Projects", description = "Project management"),
        (name = "Sections", description = "Hierarchical test sections"),
        (name = "Testcases", description = "Test case management"),
        (name = "Testruns", description = "Test runs and per-run results"),
    )
)]
pub struct ApiDoc;
