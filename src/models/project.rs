//! Project DTOs and slug derivation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::project;

/// Derive a URL-safe slug from a project name.
///
/// Lowercases the name, collapses every run of non-alphanumeric characters
/// into a single `-`, and trims leading/trailing dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Project response body.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProjectOut {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<project::Model> for ProjectOut {
    fn from(model: project::Model) -> Self {
        ProjectOut {
            id: model.id,
            name: model.name,
            slug: model.slug,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Request body for creating a project.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateProjectRequest {
    pub name: String,
}

/// Partial update for a project. Absent fields stay unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProjectPatch {
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Checkout"), "checkout");
        assert_eq!(slugify("Mobile App"), "mobile-app");
    }

    #[test]
    fn test_slugify_collapses_separator_runs() {
        assert_eq!(slugify("Mobile -- App  v2"), "mobile-app-v2");
        assert_eq!(slugify("a___b"), "a-b");
    }

    #[test]
    fn test_slugify_trims_edges() {
        assert_eq!(slugify("  Checkout!  "), "checkout");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_slugify_unicode_lowercase() {
        assert_eq!(slugify("Ärger Über"), "ärger-über");
    }

    #[test]
    fn test_patch_absent_field_is_none() {
        let patch: ProjectPatch = serde_json::from_str("{}").unwrap();
        assert!(patch.name.is_none());

        let patch: ProjectPatch = serde_json::from_str(r#"{"name": "New"}"#).unwrap();
        assert_eq!(patch.name.as_deref(), Some("New"));
    }
}
