//! Integration tests for test runs and per-run results.
//!
//! Tests /api/v1/testruns including case attachment.

#[cfg(test)]
mod tests {
    /// Test creating a run under a project.
    #[test]
    fn test_create_testrun() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. Start test server with fresh database
        // 2. Create a project
        // 3. POST /testruns with name, environment "staging"
        // 4. Assert 201 Created with embedded project
    }

    /// Test attaching cases creates untested results and skips duplicates.
    #[test]
    fn test_add_cases_idempotent() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. Start test server
        // 2. Create run and 3 cases
        // 3. PATCH /testruns/{id}/add-cases with all 3 ids
        // 4. Assert 3 results created, all status "untested"
        // 5. Repeat the same request, assert 0 new results
    }

    /// Test removing cases from a run.
    #[test]
    fn test_remove_cases() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. Start test server
        // 2. Attach 3 cases to a run
        // 3. PATCH /testruns/{id}/remove-cases with 2 ids
        // 4. Assert response lists the 2 removed ids
        // 5. GET /testruns/{id} and assert 1 result remains
    }

    /// Test listing runs by project slug.
    #[test]
    fn test_testruns_by_project_slug() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. Start test server
        // 2. Create two projects with runs
        // 3. GET /testruns/project/{slug}
        // 4. Assert only that project's runs are returned
    }

    /// Test deleting a run removes its results but not the cases.
    #[test]
    fn test_delete_testrun_keeps_cases() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. Start test server
        // 2. Attach a case to a run
        // 3. DELETE /testruns/{id}
        // 4. Assert the test case still exists via GET /testcases/{id}
    }
}
