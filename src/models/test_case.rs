//! Test case DTOs and the test type enum.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::section::SectionSummary;

/// Test case classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TestType {
    #[default]
    None,
    Smoke,
    Functional,
}

impl TestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Smoke => "smoke",
            Self::Functional => "functional",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Self::None),
            "smoke" => Some(Self::Smoke),
            "functional" => Some(Self::Functional),
            _ => None,
        }
    }
}

/// Test case response body.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TestCaseOut {
    pub id: i32,
    pub case_id: String,
    pub title: String,
    pub is_automation: bool,
    pub section: Option<SectionSummary>,
    pub expected_result: String,
    pub preconditions: String,
    pub test_type: TestType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a test case.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateTestCaseRequest {
    pub case_id: String,
    pub title: String,
    #[serde(default)]
    pub is_automation: bool,
    pub section_id: Option<i32>,
    #[serde(default)]
    pub expected_result: String,
    #[serde(default)]
    pub preconditions: String,
    #[serde(default)]
    pub test_type: TestType,
}

/// Partial update for a test case. Absent fields stay unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct TestCasePatch {
    pub case_id: Option<String>,
    pub title: Option<String>,
    pub is_automation: Option<bool>,
    pub section_id: Option<i32>,
    pub expected_result: Option<String>,
    pub preconditions: Option<String>,
    pub test_type: Option<TestType>,
}

/// Query parameters for the paginated test case list.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ListTestCasesQuery {
    /// Results per page (default from config, clamped to the max).
    pub limit: Option<u64>,
    /// Pagination offset.
    pub offset: Option<u64>,
}

/// Paginated test case list response.
#[derive(Debug, Serialize, ToSchema)]
pub struct TestCaseListResponse {
    pub test_cases: Vec<TestCaseOut>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

/// Request body for bulk fetch by id.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TestCaseIdsRequest {
    pub ids: Vec<i32>,
}

/// Query parameters for test case search.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TestCaseSearchQuery {
    /// Substring matched against test case titles and section names.
    pub q: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_type_roundtrip() {
        for t in [TestType::None, TestType::Smoke, TestType::Functional] {
            assert_eq!(TestType::parse(t.as_str()), Some(t));
        }
        assert_eq!(TestType::parse("regression"), None);
    }

    #[test]
    fn test_test_type_wire_format() {
        assert_eq!(
            serde_json::to_value(TestType::Smoke).unwrap(),
            serde_json::json!("smoke")
        );
        let parsed: TestType = serde_json::from_str("\"functional\"").unwrap();
        assert_eq!(parsed, TestType::Functional);
    }

    #[test]
    fn test_create_request_defaults() {
        let req: CreateTestCaseRequest =
            serde_json::from_str(r#"{"case_id": "C1", "title": "Login works"}"#).unwrap();
        assert!(!req.is_automation);
        assert!(req.section_id.is_none());
        assert_eq!(req.expected_result, "");
        assert_eq!(req.test_type, TestType::None);
    }

    #[test]
    fn test_patch_only_carries_present_fields() {
        let patch: TestCasePatch =
            serde_json::from_str(r#"{"title": "Renamed", "is_automation": true}"#).unwrap();
        assert_eq!(patch.title.as_deref(), Some("Renamed"));
        assert_eq!(patch.is_automation, Some(true));
        assert!(patch.case_id.is_none());
        assert!(patch.test_type.is_none());
    }
}
