//! Database queries for test runs and their result rows.

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::entity::test_case::{self, Entity as TestCase};
use crate::entity::test_result::{self, ActiveModel as TestResultActiveModel, Entity as TestResult};
use crate::entity::test_run::{self, ActiveModel, Entity as TestRun};
use crate::error::{AppError, AppResult};
use crate::models::{CreateTestRunRequest, ResultPriority, ResultStatus};

use super::DbPool;

impl DbPool {
    /// List all test runs ordered by id.
    pub async fn list_testruns(&self) -> AppResult<Vec<test_run::Model>> {
        let runs = TestRun::find()
            .order_by_asc(test_run::Column::Id)
            .all(self.connection())
            .await?;
        Ok(runs)
    }

    /// Get a test run by id.
    pub async fn get_testrun_by_id(&self, id: i32) -> AppResult<Option<test_run::Model>> {
        let result = TestRun::find_by_id(id).one(self.connection()).await?;
        Ok(result)
    }

    /// List test runs owned by a project.
    pub async fn get_testruns_by_project(&self, project_id: i32) -> AppResult<Vec<test_run::Model>> {
        let runs = TestRun::find()
            .filter(test_run::Column::ProjectId.eq(project_id))
            .order_by_asc(test_run::Column::Id)
            .all(self.connection())
            .await?;
        Ok(runs)
    }

    /// Insert a new test run.
    pub async fn insert_testrun(&self, req: CreateTestRunRequest) -> AppResult<test_run::Model> {
        self.get_project_by_id(req.project_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {}", req.project_id)))?;

        let model = ActiveModel {
            project_id: Set(req.project_id),
            title: Set(req.title),
            description: Set(req.description),
            environment: Set(req.environment.as_str().to_string()),
            ..Default::default()
        };

        let result = model.insert(self.connection()).await?;
        Ok(result)
    }

    /// Delete a test run. Its result rows go with it (FK cascade).
    pub async fn delete_testrun(&self, id: i32) -> AppResult<()> {
        let run = self
            .get_testrun_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Test run {}", id)))?;

        run.delete(self.connection()).await?;
        Ok(())
    }

    /// Result rows of a run joined with their test cases, ordered by
    /// result id.
    pub async fn get_results_with_cases(
        &self,
        run_id: i32,
    ) -> AppResult<Vec<(test_result::Model, Option<test_case::Model>)>> {
        let rows = TestResult::find()
            .filter(test_result::Column::TestRunId.eq(run_id))
            .find_also_related(TestCase)
            .order_by_asc(test_result::Column::Id)
            .all(self.connection())
            .await?;
        Ok(rows)
    }

    /// Attach test cases to a run: one untested result row per existing
    /// case, created atomically as a single batch. Ids that match no test
    /// case are skipped; cases already attached are deduplicated via
    /// ON CONFLICT DO NOTHING, so re-attaching is idempotent.
    pub async fn attach_cases_to_run(&self, run_id: i32, case_ids: &[i32]) -> AppResult<u64> {
        let txn = self.connection().begin().await?;

        TestRun::find_by_id(run_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Test run {}", run_id)))?;

        if case_ids.is_empty() {
            txn.commit().await?;
            return Ok(0);
        }

        let cases = TestCase::find()
            .filter(test_case::Column::Id.is_in(case_ids.to_vec()))
            .all(&txn)
            .await?;

        if cases.is_empty() {
            txn.commit().await?;
            return Ok(0);
        }

        let now = Utc::now();
        let rows: Vec<TestResultActiveModel> = cases
            .iter()
            .map(|case| TestResultActiveModel {
                id: NotSet,
                test_run_id: Set(run_id),
                test_case_id: Set(case.id),
                status: Set(ResultStatus::Untested.as_str().to_string()),
                priority: Set(ResultPriority::Medium.as_str().to_string()),
                details: Set(String::new()),
                created_at: Set(now),
                updated_at: Set(now),
            })
            .collect();

        let inserted = TestResult::insert_many(rows)
            .on_conflict(
                OnConflict::columns([
                    test_result::Column::TestRunId,
                    test_result::Column::TestCaseId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&txn)
            .await?;

        txn.commit().await?;
        Ok(inserted)
    }

    /// Remove the result rows linking a run to the given cases. Returns the
    /// ids of the removed rows.
    pub async fn remove_cases_from_run(&self, run_id: i32, case_ids: &[i32]) -> AppResult<Vec<i32>> {
        let txn = self.connection().begin().await?;

        TestRun::find_by_id(run_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Test run {}", run_id)))?;

        if case_ids.is_empty() {
            txn.commit().await?;
            return Ok(Vec::new());
        }

        let rows = TestResult::find()
            .filter(test_result::Column::TestRunId.eq(run_id))
            .filter(test_result::Column::TestCaseId.is_in(case_ids.to_vec()))
            .all(&txn)
            .await?;

        let removed_ids: Vec<i32> = rows.iter().map(|r| r.id).collect();

        if !removed_ids.is_empty() {
            TestResult::delete_many()
                .filter(test_result::Column::Id.is_in(removed_ids.clone()))
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(removed_ids)
    }
}
