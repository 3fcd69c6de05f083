//! Integration tests for the section hierarchy.
//!
//! Tests CRUD on /api/v1/sections plus tree and path behavior.

#[cfg(test)]
mod tests {
    /// Test a child section inherits its parent's project scope.
    #[test]
    fn test_create_child_inherits_project_scope() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. Start test server with fresh database
        // 2. Create project P, create root section "UI" in P
        // 3. POST /sections with parent=UI, no project
        // 4. Assert created section reports project P
    }

    /// Test sibling names must be unique under the same parent.
    #[test]
    fn test_sibling_name_collision_rejected() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. Start test server
        // 2. Create section "Login" under "UI" twice
        // 3. Assert second request returns 409 Conflict
        // 4. Create "Login" under a different parent, assert 201
    }

    /// Test root sections collide per project, not globally.
    #[test]
    fn test_root_name_collision_scoped_by_project() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. Start test server
        // 2. Create root "UI" in project A and root "UI" in project B
        // 3. Assert both succeed
        // 4. Create a second root "UI" in project A, assert 409
    }

    /// Test the derived hierarchy path of a nested section.
    #[test]
    fn test_section_hierarchy_path() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. Start test server
        // 2. Create UI > Login > Errors
        // 3. GET /sections/{errors_id}
        // 4. Assert section_hierarchy == ["UI", "Login", "Errors"]
        // 5. Assert full_section_hierarchy == "/UI/Login/Errors"
    }

    /// Test reparenting a section under its own descendant is rejected.
    #[test]
    fn test_reparent_under_descendant_rejected() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. Start test server
        // 2. Create UI > Login
        // 3. PATCH /sections/{ui_id} with parent_id = login_id
        // 4. Assert 409 Conflict
        // 5. PATCH /sections/{ui_id} with parent_id = ui_id, assert 409
    }

    /// Test deleting a section removes its whole subtree.
    #[test]
    fn test_delete_section_cascades_subtree() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. Start test server
        // 2. Create UI > Login > Errors
        // 3. DELETE /sections/{ui_id}
        // 4. Assert GET /sections/{login_id} and /sections/{errors_id} return 404
    }

    /// Test the tree endpoint nests children under roots.
    #[test]
    fn test_section_tree_shape() {
        // TODO: Implement when test infrastructure is set up
        // This test should:
        // 1. Start test server
        // 2. Create two roots, one with two children
        // 3. GET /sections/tree
        // 4. Assert two top-level nodes, children nested in order
        // 5. GET /sections/tree?project_id={p} and assert filtering
    }
}
