//! Section DTOs.
//!
//! Reads carry the derived hierarchy fields (`section_hierarchy`,
//! `full_section_hierarchy`); these are computed from the section forest on
//! every read and never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Section response body with derived hierarchy fields.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SectionOut {
    pub id: i32,
    pub name: String,
    pub parent_id: Option<i32>,
    pub project_id: Option<i32>,
    /// Ordered ancestor names from the root down to this section.
    pub section_hierarchy: Vec<String>,
    /// The same names joined with `/` and a leading `/` (e.g. "/UI/Login").
    pub full_section_hierarchy: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact section reference embedded in test case and result bodies.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SectionSummary {
    pub id: i32,
    pub name: String,
    pub full_section_hierarchy: String,
}

/// One node of the nested section forest returned by the tree endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SectionTreeNode {
    pub id: i32,
    pub name: String,
    #[schema(no_recursion)]
    pub children: Vec<SectionTreeNode>,
}

/// Request body for creating a section.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateSectionRequest {
    pub name: String,
    pub parent_id: Option<i32>,
    pub project_id: Option<i32>,
}

/// Partial update for a section. Absent (or null) fields stay unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SectionPatch {
    pub name: Option<String>,
    pub parent_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_patch_partial_fields() {
        let patch: SectionPatch = serde_json::from_str(r#"{"name": "Login"}"#).unwrap();
        assert_eq!(patch.name.as_deref(), Some("Login"));
        assert!(patch.parent_id.is_none());

        let patch: SectionPatch = serde_json::from_str(r#"{"parent_id": 4}"#).unwrap();
        assert!(patch.name.is_none());
        assert_eq!(patch.parent_id, Some(4));
    }

    #[test]
    fn test_section_patch_null_means_unchanged() {
        // Explicit null is not a reset; it means "leave the field alone".
        let patch: SectionPatch =
            serde_json::from_str(r#"{"name": null, "parent_id": null}"#).unwrap();
        assert!(patch.name.is_none());
        assert!(patch.parent_id.is_none());
    }

    #[test]
    fn test_tree_node_serialization() {
        let node = SectionTreeNode {
            id: 1,
            name: "UI".to_string(),
            children: vec![SectionTreeNode {
                id: 2,
                name: "Login".to_string(),
                children: vec![],
            }],
        };
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["name"], "UI");
        assert_eq!(json["children"][0]["name"], "Login");
        assert_eq!(json["children"][0]["children"], serde_json::json!([]));
    }
}
