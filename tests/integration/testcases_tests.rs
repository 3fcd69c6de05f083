//! Integration tests for test case management.
//!
//! Tests CRUD, search and pagination on /api/v1/testcases.

#[cfg(test)]
mod tests {
    /// Test listing test cases with pagination.
    #[test]
    fn test_list_testcases_with_pagination() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. Start test server with fresh database
        // 2. Create 25 test cases
        // 3. GET /testcases?limit=10&offset=10
        // 4. Assert 10 items returned and total == 25
    }

    /// Test duplicate external case id is rejected.
    #[test]
    fn test_create_testcase_duplicate_case_id() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. Start test server
        // 2. POST /testcases with case_id "C100" twice
        // 3. Assert second request returns 409 Conflict
    }

    /// Test creating a test case under a missing section fails.
    #[test]
    fn test_create_testcase_missing_section() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. Start test server
        // 2. POST /testcases with section_id = 9999
        // 3. Assert 404 Not Found
    }

    /// Test title search is case-insensitive and matches section names.
    #[test]
    fn test_search_testcases() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. Start test server
        // 2. Create case "Login works" in section "Checkout"
        // 3. GET /testcases/search?q=login and assert 1 hit
        // 4. GET /testcases/search?q=CHECKOUT and assert 1 hit
    }

    /// Test subtree listing includes cases of descendant sections.
    #[test]
    fn test_testcases_by_section_includes_subtree() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. Start test server
        // 2. Create UI > Login, one case in each
        // 3. GET /testcases/section/{ui_id}
        // 4. Assert both cases returned
    }

    /// Test deleting a section detaches its cases instead of deleting them.
    #[test]
    fn test_delete_section_detaches_cases() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. Start test server
        // 2. Create a section with a case
        // 3. DELETE /sections/{id}
        // 4. GET /testcases/{case_id} and assert section is null
    }
}
