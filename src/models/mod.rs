//! Domain models and DTOs for the QA Manager server.

use utoipa::ToSchema;

pub mod project;
pub mod section;
pub mod test_case;
pub mod test_result;
pub mod test_run;

// Re-export commonly used types
pub use project::{CreateProjectRequest, ProjectOut, ProjectPatch, slugify};
pub use section::{
    CreateSectionRequest, SectionOut, SectionPatch, SectionSummary, SectionTreeNode,
};
pub use test_case::{
    CreateTestCaseRequest, ListTestCasesQuery, TestCaseIdsRequest, TestCaseListResponse,
    TestCaseOut, TestCasePatch, TestCaseSearchQuery, TestType,
};
pub use test_result::{ResultPriority, ResultStatus, TestResultOut};
pub use test_run::{CaseIdsRequest, CreateTestRunRequest, Environment, TestRunOut};

/// Body returned by delete endpoints.
#[derive(Debug, Clone, serde::Serialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
}

impl DeleteResponse {
    pub fn ok() -> Self {
        DeleteResponse { success: true }
    }
}
