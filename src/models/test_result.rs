//! Test result DTOs and the status/priority enums.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::section::SectionSummary;

/// Outcome of one test case within one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    #[default]
    Untested,
    Passed,
    Failed,
    Skipped,
    Retest,
}

impl ResultStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Untested => "untested",
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
            Self::Retest => "retest",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "untested" => Some(Self::Untested),
            "passed" => Some(Self::Passed),
            "failed" => Some(Self::Failed),
            "skipped" => Some(Self::Skipped),
            "retest" => Some(Self::Retest),
            _ => None,
        }
    }
}

/// Priority of a result row within its run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResultPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl ResultPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Result row embedded in test run responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct TestResultOut {
    pub id: i32,
    pub test_case_id: i32,
    pub case_id: String,
    pub title: String,
    pub section: Option<SectionSummary>,
    pub status: ResultStatus,
    pub priority: ResultPriority,
    pub details: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for s in [
            ResultStatus::Untested,
            ResultStatus::Passed,
            ResultStatus::Failed,
            ResultStatus::Skipped,
            ResultStatus::Retest,
        ] {
            assert_eq!(ResultStatus::parse(s.as_str()), Some(s));
        }
        assert_eq!(ResultStatus::parse("blocked"), None);
    }

    #[test]
    fn test_priority_roundtrip() {
        for p in [
            ResultPriority::Low,
            ResultPriority::Medium,
            ResultPriority::High,
        ] {
            assert_eq!(ResultPriority::parse(p.as_str()), Some(p));
        }
        assert_eq!(ResultPriority::parse("urgent"), None);
    }

    #[test]
    fn test_defaults_match_schema_defaults() {
        assert_eq!(ResultStatus::default(), ResultStatus::Untested);
        assert_eq!(ResultPriority::default(), ResultPriority::Medium);
    }
}
