//! CSV test case import.
//!
//! Reads a TestRail-style CSV export: every row names its full section
//! chain in a `>`-separated "Section Hierarchy" column. Sections along the
//! chain and the test case itself are get-or-created, so re-importing the
//! same file is idempotent.

use std::path::Path;

use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::Deserialize;
use tracing::info;

use crate::db::DbPool;
use crate::entity::section::{self, Entity as Section};
use crate::entity::test_case::{self, Entity as TestCase};
use crate::error::{AppError, AppResult};
use crate::models::TestType;

/// Columns read from the export; everything else in the file is ignored.
#[derive(Debug, Clone, Deserialize)]
struct CsvRow {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Automation required?")]
    automation_required: String,
    #[serde(rename = "Expected Result", default)]
    expected_result: String,
    #[serde(rename = "Preconditions", default)]
    preconditions: String,
    #[serde(rename = "Section Hierarchy")]
    section_hierarchy: String,
    #[serde(rename = "Type")]
    case_type: String,
}

/// Counters reported after an import.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportStats {
    pub rows: usize,
    pub sections_created: usize,
    pub cases_created: usize,
    pub cases_skipped: usize,
}

/// Split a `>`-separated hierarchy string into trimmed, non-empty names.
fn split_hierarchy(raw: &str) -> Vec<String> {
    raw.split('>')
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Map the export's "Type" column onto the test type enum.
fn map_test_type(raw: &str) -> TestType {
    if raw.trim().starts_with("Smoke") {
        TestType::Smoke
    } else {
        TestType::Functional
    }
}

fn map_is_automation(raw: &str) -> bool {
    raw.trim() == "Yes"
}

/// Import test cases from a CSV export into the store.
pub async fn import_csv(pool: &DbPool, csv_path: &Path) -> AppResult<ImportStats> {
    let mut reader = csv::Reader::from_path(csv_path)
        .map_err(|e| AppError::InvalidInput(format!("Could not open CSV file: {}", e)))?;

    let mut stats = ImportStats::default();

    for record in reader.deserialize::<CsvRow>() {
        let row =
            record.map_err(|e| AppError::InvalidInput(format!("Malformed CSV row: {}", e)))?;
        stats.rows += 1;

        let chain = split_hierarchy(&row.section_hierarchy);
        let mut parent_id: Option<i32> = None;
        for name in &chain {
            let (id, created) = get_or_create_section(pool, parent_id, name).await?;
            if created {
                stats.sections_created += 1;
            }
            parent_id = Some(id);
        }

        if get_or_create_case(pool, &row, parent_id).await? {
            stats.cases_created += 1;
        } else {
            stats.cases_skipped += 1;
        }
    }

    info!(
        "Import finished: {} rows, {} sections created, {} cases created, {} skipped",
        stats.rows, stats.sections_created, stats.cases_created, stats.cases_skipped
    );

    Ok(stats)
}

/// Find a section by (parent, name) or create it. Returns (id, created).
async fn get_or_create_section(
    pool: &DbPool,
    parent_id: Option<i32>,
    name: &str,
) -> AppResult<(i32, bool)> {
    let mut query = Section::find().filter(section::Column::Name.eq(name));
    query = match parent_id {
        Some(parent) => query.filter(section::Column::ParentId.eq(parent)),
        None => query.filter(section::Column::ParentId.is_null()),
    };

    if let Some(existing) = query.one(pool.connection()).await? {
        return Ok((existing.id, false));
    }

    let model = section::ActiveModel {
        name: Set(name.to_string()),
        parent_id: Set(parent_id),
        project_id: Set(None),
        ..Default::default()
    };
    let created = model.insert(pool.connection()).await?;
    Ok((created.id, true))
}

/// Create the test case unless its external id is already known.
/// Returns true if a row was created.
async fn get_or_create_case(
    pool: &DbPool,
    row: &CsvRow,
    section_id: Option<i32>,
) -> AppResult<bool> {
    let existing = TestCase::find()
        .filter(test_case::Column::CaseId.eq(row.id.as_str()))
        .one(pool.connection())
        .await?;
    if existing.is_some() {
        return Ok(false);
    }

    let model = test_case::ActiveModel {
        case_id: Set(row.id.clone()),
        title: Set(row.title.clone()),
        is_automation: Set(map_is_automation(&row.automation_required)),
        section_id: Set(section_id),
        expected_result: Set(row.expected_result.clone()),
        preconditions: Set(row.preconditions.clone()),
        test_type: Set(map_test_type(&row.case_type).as_str().to_string()),
        ..Default::default()
    };
    model.insert(pool.connection()).await?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_hierarchy() {
        assert_eq!(
            split_hierarchy("UI > Login > Errors"),
            vec!["UI", "Login", "Errors"]
        );
        assert_eq!(split_hierarchy("  UI  "), vec!["UI"]);
        assert!(split_hierarchy("").is_empty());
        assert_eq!(split_hierarchy("UI > > Errors"), vec!["UI", "Errors"]);
    }

    #[test]
    fn test_map_test_type() {
        assert_eq!(map_test_type("Smoke & Sanity"), TestType::Smoke);
        assert_eq!(map_test_type("Functional"), TestType::Functional);
        assert_eq!(map_test_type("Other"), TestType::Functional);
    }

    #[test]
    fn test_map_is_automation() {
        assert!(map_is_automation("Yes"));
        assert!(!map_is_automation("No"));
        assert!(!map_is_automation(""));
    }

    #[test]
    fn test_row_deserialization_ignores_extra_columns() {
        let data = "\
ID,Title,Automation required?,Expected Result,Preconditions,Section Hierarchy,Type,Priority
C100,Login works,Yes,User is logged in,Account exists,UI > Login,Smoke & Sanity,High
";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let rows: Vec<CsvRow> = reader
            .deserialize()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.id, "C100");
        assert_eq!(row.title, "Login works");
        assert_eq!(split_hierarchy(&row.section_hierarchy), vec!["UI", "Login"]);
        assert_eq!(map_test_type(&row.case_type), TestType::Smoke);
        assert!(map_is_automation(&row.automation_required));
    }
}
