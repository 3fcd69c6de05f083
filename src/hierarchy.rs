//! Section hierarchy algorithms.
//!
//! Sections form a forest: each row carries an optional parent id and the
//! tree shape is derived by indexing, never by owning pointers in both
//! directions. All traversals are iterative (explicit stacks) and recompute
//! from the row set on every call, so they stay finite even if the stored
//! data is corrupt.

use std::collections::{HashMap, HashSet};

use crate::models::SectionTreeNode;

/// One section row as loaded from the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionNode {
    pub id: i32,
    pub parent_id: Option<i32>,
    pub project_id: Option<i32>,
    pub name: String,
}

/// Arena of section rows with an adjacency index derived on construction.
#[derive(Debug, Default)]
pub struct SectionIndex {
    nodes: HashMap<i32, SectionNode>,
    /// parent id -> child ids, ordered by id for stable output.
    children: HashMap<i32, Vec<i32>>,
    /// Root ids (no parent), ordered by id.
    roots: Vec<i32>,
}

impl SectionIndex {
    /// Build the index from a row set.
    pub fn from_rows(rows: Vec<SectionNode>) -> Self {
        let mut nodes: HashMap<i32, SectionNode> = HashMap::with_capacity(rows.len());
        let mut children: HashMap<i32, Vec<i32>> = HashMap::new();
        let mut roots: Vec<i32> = Vec::new();

        for row in rows {
            match row.parent_id {
                Some(parent) => children.entry(parent).or_default().push(row.id),
                None => roots.push(row.id),
            }
            nodes.insert(row.id, row);
        }

        for ids in children.values_mut() {
            ids.sort_unstable();
        }
        roots.sort_unstable();

        SectionIndex {
            nodes,
            children,
            roots,
        }
    }

    /// Look up a row by id.
    pub fn get(&self, id: i32) -> Option<&SectionNode> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: i32) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Ordered ancestor names from the root down to and including `id`.
    ///
    /// Walks the parent reference iteratively with a visited guard, so the
    /// walk terminates even if a cycle has somehow entered the stored data.
    /// Returns `None` for an unknown id.
    pub fn ancestor_path(&self, id: i32) -> Option<Vec<String>> {
        let mut node = self.nodes.get(&id)?;
        let mut visited = HashSet::new();
        let mut path = vec![node.name.clone()];

        while let Some(parent_id) = node.parent_id {
            if !visited.insert(parent_id) {
                break;
            }
            match self.nodes.get(&parent_id) {
                Some(parent) => {
                    path.push(parent.name.clone());
                    node = parent;
                }
                None => break,
            }
        }

        path.reverse();
        Some(path)
    }

    /// Slash-joined hierarchy path with a leading `/` (e.g. "/UI/Login").
    pub fn full_path(&self, id: i32) -> Option<String> {
        self.ancestor_path(id)
            .map(|names| format!("/{}", names.join("/")))
    }

    /// Ids of all descendants of `id` (self excluded), depth-first with
    /// children visited in id order.
    pub fn descendant_ids(&self, id: i32) -> Vec<i32> {
        let mut result = Vec::new();
        let mut seen = HashSet::new();
        let mut stack: Vec<i32> = match self.children.get(&id) {
            Some(ids) => ids.iter().rev().copied().collect(),
            None => return result,
        };

        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            result.push(current);
            if let Some(ids) = self.children.get(&current) {
                stack.extend(ids.iter().rev());
            }
        }

        result
    }

    /// Whether `candidate` lies anywhere in the subtree below `of`.
    pub fn is_descendant(&self, candidate: i32, of: i32) -> bool {
        self.descendant_ids(of).contains(&candidate)
    }

    /// Build the nested forest of root sections, optionally filtered to one
    /// project scope.
    ///
    /// Nodes are built deepest-first so every child exists before its parent
    /// collects it; no recursion involved.
    pub fn tree(&self, project_id: Option<i32>) -> Vec<SectionTreeNode> {
        let depths = self.depths();

        let mut order: Vec<i32> = self.nodes.keys().copied().collect();
        order.sort_unstable_by_key(|id| (std::cmp::Reverse(depths.get(id).copied().unwrap_or(0)), *id));

        let mut built: HashMap<i32, SectionTreeNode> = HashMap::with_capacity(order.len());
        for id in order {
            let node = &self.nodes[&id];
            let child_nodes = self
                .children
                .get(&id)
                .map(|ids| ids.iter().filter_map(|c| built.remove(c)).collect())
                .unwrap_or_default();
            built.insert(
                id,
                SectionTreeNode {
                    id,
                    name: node.name.clone(),
                    children: child_nodes,
                },
            );
        }

        self.roots
            .iter()
            .copied()
            .filter(|&id| match project_id {
                Some(project) => self.nodes[&id].project_id == Some(project),
                None => true,
            })
            .filter_map(|id| built.remove(&id))
            .collect()
    }

    /// Depth of every node (roots at 0), computed iteratively with a
    /// cycle guard.
    fn depths(&self) -> HashMap<i32, u32> {
        let mut depths: HashMap<i32, u32> = HashMap::with_capacity(self.nodes.len());
        for &id in self.nodes.keys() {
            if depths.contains_key(&id) {
                continue;
            }
            // Walk up until a known depth or a root, then unwind.
            let mut chain = Vec::new();
            let mut on_chain = HashSet::new();
            let mut current = id;
            let mut base = 0u32;
            loop {
                if let Some(&d) = depths.get(&current) {
                    base = d + 1;
                    break;
                }
                if !on_chain.insert(current) {
                    break;
                }
                chain.push(current);
                match self.nodes.get(&current).and_then(|n| n.parent_id) {
                    Some(parent) if self.nodes.contains_key(&parent) => current = parent,
                    _ => break,
                }
            }
            for (i, node_id) in chain.iter().rev().enumerate() {
                depths.insert(*node_id, base + i as u32);
            }
        }
        depths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: i32, parent_id: Option<i32>, name: &str) -> SectionNode {
        SectionNode {
            id,
            parent_id,
            project_id: Some(1),
            name: name.to_string(),
        }
    }

    /// UI(1) -> Login(2) -> Errors(3); UI(1) -> Settings(4); API(5)
    fn sample_index() -> SectionIndex {
        SectionIndex::from_rows(vec![
            node(1, None, "UI"),
            node(2, Some(1), "Login"),
            node(3, Some(2), "Errors"),
            node(4, Some(1), "Settings"),
            node(5, None, "API"),
        ])
    }

    #[test]
    fn test_ancestor_path_from_root() {
        let index = sample_index();
        assert_eq!(index.ancestor_path(1), Some(vec!["UI".to_string()]));
        assert_eq!(index.full_path(1), Some("/UI".to_string()));
    }

    #[test]
    fn test_ancestor_path_nested() {
        let index = sample_index();
        assert_eq!(
            index.ancestor_path(3),
            Some(vec![
                "UI".to_string(),
                "Login".to_string(),
                "Errors".to_string()
            ])
        );
        assert_eq!(index.full_path(3), Some("/UI/Login/Errors".to_string()));
    }

    #[test]
    fn test_ancestor_path_unknown_id() {
        let index = sample_index();
        assert_eq!(index.ancestor_path(99), None);
    }

    #[test]
    fn test_full_path_two_levels() {
        // Root "UI", child "Login" -> "/UI/Login"
        let index = SectionIndex::from_rows(vec![node(1, None, "UI"), node(2, Some(1), "Login")]);
        assert_eq!(index.full_path(2), Some("/UI/Login".to_string()));
    }

    #[test]
    fn test_descendant_ids_depth_first() {
        let index = sample_index();
        assert_eq!(index.descendant_ids(1), vec![2, 3, 4]);
        assert_eq!(index.descendant_ids(2), vec![3]);
        assert_eq!(index.descendant_ids(3), Vec::<i32>::new());
        assert_eq!(index.descendant_ids(5), Vec::<i32>::new());
    }

    #[test]
    fn test_is_descendant() {
        let index = sample_index();
        assert!(index.is_descendant(3, 1));
        assert!(index.is_descendant(2, 1));
        assert!(!index.is_descendant(1, 3));
        assert!(!index.is_descendant(5, 1));
        // A node is not its own descendant.
        assert!(!index.is_descendant(1, 1));
    }

    #[test]
    fn test_ancestor_path_terminates_on_corrupt_cycle() {
        // 10 <-> 11 parent each other; the guard must still terminate.
        let index = SectionIndex::from_rows(vec![
            node(10, Some(11), "A"),
            node(11, Some(10), "B"),
        ]);
        let path = index.ancestor_path(10).unwrap();
        assert!(path.ends_with(&["A".to_string()]));
        assert!(path.len() <= 3);
    }

    #[test]
    fn test_descendants_terminate_on_corrupt_cycle() {
        let index = SectionIndex::from_rows(vec![
            node(10, Some(11), "A"),
            node(11, Some(10), "B"),
        ]);
        let descendants = index.descendant_ids(10);
        assert_eq!(descendants, vec![11, 10]);
    }

    #[test]
    fn test_tree_builds_nested_forest() {
        let index = sample_index();
        let forest = index.tree(None);

        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].name, "UI");
        assert_eq!(forest[1].name, "API");

        let ui = &forest[0];
        assert_eq!(ui.children.len(), 2);
        assert_eq!(ui.children[0].name, "Login");
        assert_eq!(ui.children[1].name, "Settings");
        assert_eq!(ui.children[0].children[0].name, "Errors");
    }

    #[test]
    fn test_tree_filters_by_project() {
        let mut rows = vec![node(1, None, "UI"), node(2, Some(1), "Login")];
        rows.push(SectionNode {
            id: 3,
            parent_id: None,
            project_id: Some(2),
            name: "Billing".to_string(),
        });
        let index = SectionIndex::from_rows(rows);

        let forest = index.tree(Some(1));
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].name, "UI");

        let forest = index.tree(Some(2));
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].name, "Billing");

        let forest = index.tree(None);
        assert_eq!(forest.len(), 2);
    }

    #[test]
    fn test_empty_index() {
        let index = SectionIndex::from_rows(vec![]);
        assert!(index.tree(None).is_empty());
        assert!(index.descendant_ids(1).is_empty());
        assert_eq!(index.ancestor_path(1), None);
    }
}
