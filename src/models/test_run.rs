//! Test run DTOs and the environment enum.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::project::ProjectOut;
use super::test_result::TestResultOut;

/// Environment a test run executes against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    #[serde(rename = "dev")]
    Development,
    Staging,
    Live,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "dev",
            Self::Staging => "staging",
            Self::Live => "live",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "dev" => Some(Self::Development),
            "staging" => Some(Self::Staging),
            "live" => Some(Self::Live),
            _ => None,
        }
    }
}

/// Test run response body with its owning project and result rows.
#[derive(Debug, Serialize, ToSchema)]
pub struct TestRunOut {
    pub id: i32,
    pub project: ProjectOut,
    pub title: String,
    pub description: String,
    pub environment: Environment,
    pub results: Vec<TestResultOut>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a test run.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateTestRunRequest {
    pub project_id: i32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub environment: Environment,
}

/// Request body for bulk attach/detach of test cases on a run.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CaseIdsRequest {
    pub case_ids: Vec<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_roundtrip() {
        for e in [Environment::Development, Environment::Staging, Environment::Live] {
            assert_eq!(Environment::parse(e.as_str()), Some(e));
        }
        assert_eq!(Environment::parse("qa"), None);
    }

    #[test]
    fn test_environment_wire_format() {
        assert_eq!(
            serde_json::to_value(Environment::Development).unwrap(),
            serde_json::json!("dev")
        );
        let parsed: Environment = serde_json::from_str("\"staging\"").unwrap();
        assert_eq!(parsed, Environment::Staging);
    }

    #[test]
    fn test_create_run_defaults() {
        let req: CreateTestRunRequest =
            serde_json::from_str(r#"{"project_id": 1, "title": "Release 1.2"}"#).unwrap();
        assert_eq!(req.environment, Environment::Development);
        assert_eq!(req.description, "");
    }
}
