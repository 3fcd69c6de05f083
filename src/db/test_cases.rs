//! Database queries for test cases.

use sea_orm::sea_query::{Expr, extension::postgres::PgExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, JoinType, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};

use crate::entity::section;
use crate::entity::test_case::{self, ActiveModel, Entity as TestCase};
use crate::error::{AppError, AppResult};
use crate::models::{CreateTestCaseRequest, TestCasePatch};

use super::DbPool;

fn case_id_collision(case_id: &str) -> AppError {
    AppError::ConstraintViolation(format!("A test case with ID \"{}\" already exists", case_id))
}

impl DbPool {
    /// List test cases with limit/offset pagination; returns the page and
    /// the total row count.
    pub async fn list_testcases(
        &self,
        limit: u64,
        offset: u64,
    ) -> AppResult<(Vec<test_case::Model>, u64)> {
        let total = TestCase::find().count(self.connection()).await?;

        let cases = TestCase::find()
            .order_by_asc(test_case::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(self.connection())
            .await?;

        Ok((cases, total))
    }

    /// Get a test case by id.
    pub async fn get_testcase_by_id(&self, id: i32) -> AppResult<Option<test_case::Model>> {
        let result = TestCase::find_by_id(id).one(self.connection()).await?;
        Ok(result)
    }

    /// Bulk fetch test cases by id, ordered by id.
    pub async fn get_testcases_by_ids(&self, ids: &[i32]) -> AppResult<Vec<test_case::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let cases = TestCase::find()
            .filter(test_case::Column::Id.is_in(ids.to_vec()))
            .order_by_asc(test_case::Column::Id)
            .all(self.connection())
            .await?;
        Ok(cases)
    }

    /// Case-insensitive substring search over titles and section names.
    pub async fn search_testcases(&self, query: &str) -> AppResult<Vec<test_case::Model>> {
        let pattern = format!("%{}%", query);

        let cases = TestCase::find()
            .join(JoinType::LeftJoin, test_case::Relation::Section.def())
            .filter(
                Condition::any()
                    .add(Expr::col((TestCase, test_case::Column::Title)).ilike(pattern.clone()))
                    .add(Expr::col((section::Entity, section::Column::Name)).ilike(pattern)),
            )
            .order_by_asc(test_case::Column::Id)
            .all(self.connection())
            .await?;

        Ok(cases)
    }

    /// Insert a new test case.
    pub async fn insert_testcase(
        &self,
        req: CreateTestCaseRequest,
    ) -> AppResult<test_case::Model> {
        if let Some(section_id) = req.section_id {
            self.get_section_by_id(section_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Section {}", section_id)))?;
        }

        let model = ActiveModel {
            case_id: Set(req.case_id.clone()),
            title: Set(req.title),
            is_automation: Set(req.is_automation),
            section_id: Set(req.section_id),
            expected_result: Set(req.expected_result),
            preconditions: Set(req.preconditions),
            test_type: Set(req.test_type.as_str().to_string()),
            ..Default::default()
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| match e.sql_err() {
                Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
                    case_id_collision(&req.case_id)
                }
                _ => AppError::Database(format!("Failed to insert test case: {}", e)),
            })?;

        Ok(result)
    }

    /// Apply a partial update to a test case. Only present fields overwrite.
    pub async fn update_testcase(
        &self,
        id: i32,
        patch: TestCasePatch,
    ) -> AppResult<test_case::Model> {
        let case = self
            .get_testcase_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Test case {}", id)))?;

        if let Some(section_id) = patch.section_id {
            self.get_section_by_id(section_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Section {}", section_id)))?;
        }

        let effective_case_id = patch.case_id.clone().unwrap_or_else(|| case.case_id.clone());

        let mut active: ActiveModel = case.into();
        if let Some(case_id) = patch.case_id {
            active.case_id = Set(case_id);
        }
        if let Some(title) = patch.title {
            active.title = Set(title);
        }
        if let Some(is_automation) = patch.is_automation {
            active.is_automation = Set(is_automation);
        }
        if let Some(section_id) = patch.section_id {
            active.section_id = Set(Some(section_id));
        }
        if let Some(expected_result) = patch.expected_result {
            active.expected_result = Set(expected_result);
        }
        if let Some(preconditions) = patch.preconditions {
            active.preconditions = Set(preconditions);
        }
        if let Some(test_type) = patch.test_type {
            active.test_type = Set(test_type.as_str().to_string());
        }

        let result = active
            .update(self.connection())
            .await
            .map_err(|e| match e.sql_err() {
                Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
                    case_id_collision(&effective_case_id)
                }
                _ => AppError::Database(format!("Failed to update test case: {}", e)),
            })?;

        Ok(result)
    }

    /// Delete a test case. Its result rows go with it (FK cascade).
    pub async fn delete_testcase(&self, id: i32) -> AppResult<()> {
        let case = self
            .get_testcase_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Test case {}", id)))?;

        case.delete(self.connection()).await?;
        Ok(())
    }

    /// Get a test case by its external case identifier.
    pub async fn get_testcase_by_case_id(
        &self,
        case_id: &str,
    ) -> AppResult<Option<test_case::Model>> {
        let result = TestCase::find()
            .filter(test_case::Column::CaseId.eq(case_id))
            .one(self.connection())
            .await?;
        Ok(result)
    }
}
