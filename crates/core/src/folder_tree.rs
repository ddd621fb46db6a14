//! In-memory arena over the folder hierarchy.
//!
//! Folders reference their parent by id only. [`FolderTree`] indexes a flat
//! list of folders by id and derives the "child of" relation at build time,
//! so nothing holds a pointer to another folder. Because `parent_id` is not
//! guarded against loops when written, every walk here tracks visited ids.

use std::collections::{HashMap, HashSet};

use crate::error::CoreError;
use crate::types::DbId;

/// Anything that sits in the folder hierarchy.
pub trait FolderNode {
    fn id(&self) -> DbId;
    fn parent_id(&self) -> Option<DbId>;
}

impl FolderNode for (DbId, Option<DbId>) {
    fn id(&self) -> DbId {
        self.0
    }

    fn parent_id(&self) -> Option<DbId> {
        self.1
    }
}

/// Flat id-keyed store of folders plus a derived child index.
#[derive(Debug)]
pub struct FolderTree<T> {
    nodes: HashMap<DbId, T>,
    children: HashMap<DbId, Vec<DbId>>,
    roots: Vec<DbId>,
}

impl<T: FolderNode> FolderTree<T> {
    /// Index `folders` by id. Children and roots are kept in ascending id
    /// order so walks are deterministic.
    pub fn build(folders: impl IntoIterator<Item = T>) -> Self {
        let mut nodes = HashMap::new();
        let mut children: HashMap<DbId, Vec<DbId>> = HashMap::new();
        let mut roots = Vec::new();

        for folder in folders {
            let id = folder.id();
            match folder.parent_id() {
                Some(parent) => children.entry(parent).or_default().push(id),
                None => roots.push(id),
            }
            nodes.insert(id, folder);
        }

        for ids in children.values_mut() {
            ids.sort_unstable();
        }
        roots.sort_unstable();

        Self {
            nodes,
            children,
            roots,
        }
    }

    /// Ids of the direct children of `id`.
    pub fn children_of(&self, id: DbId) -> &[DbId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Order in which to delete `root` and all of its descendants so that no
    /// folder is removed while a child still points at it.
    ///
    /// The walk is an iterative depth-first post-order. Reaching an id a
    /// second time means the `parent_id` graph loops, and the whole plan is
    /// refused with [`CoreError::Integrity`] before anything is deleted.
    pub fn deletion_order(&self, root: DbId) -> Result<Vec<DbId>, CoreError> {
        if !self.nodes.contains_key(&root) {
            return Err(CoreError::NotFound {
                entity: "Folder",
                id: root,
            });
        }

        let mut order = Vec::new();
        let mut visited = HashSet::from([root]);
        let mut stack = vec![(root, false)];

        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                order.push(id);
                continue;
            }
            stack.push((id, true));
            // Reverse so the lowest id is walked first.
            for &child in self.children_of(id).iter().rev() {
                if !visited.insert(child) {
                    return Err(CoreError::Integrity(format!(
                        "Folder hierarchy under folder {root} contains a cycle at folder {child}"
                    )));
                }
                stack.push((child, false));
            }
        }

        Ok(order)
    }

    /// Fold the subtree under `root` into a nested value, children first.
    ///
    /// `build` receives a folder and the already-built values of its
    /// children. A folder reached again through a loop is not expanded a
    /// second time. Returns `None` when `root` is not in the tree.
    pub fn nest<N, F>(&self, root: DbId, build: &F) -> Option<N>
    where
        F: Fn(&T, Vec<N>) -> N,
    {
        let mut visited = HashSet::new();
        self.nest_inner(root, build, &mut visited)
    }

    /// [`FolderTree::nest`] applied to every root folder.
    pub fn nest_roots<N, F>(&self, build: &F) -> Vec<N>
    where
        F: Fn(&T, Vec<N>) -> N,
    {
        self.roots
            .iter()
            .filter_map(|&id| self.nest(id, build))
            .collect()
    }

    fn nest_inner<N, F>(&self, id: DbId, build: &F, visited: &mut HashSet<DbId>) -> Option<N>
    where
        F: Fn(&T, Vec<N>) -> N,
    {
        if !visited.insert(id) {
            return None;
        }
        let node = self.nodes.get(&id)?;
        let children = self
            .children_of(id)
            .iter()
            .filter_map(|&child| self.nest_inner(child, build, visited))
            .collect();
        Some(build(node, children))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    /// 1 ─┬─ 2 ── 4
    ///    └─ 3
    /// 5
    fn sample() -> FolderTree<(DbId, Option<DbId>)> {
        FolderTree::build(vec![
            (3, Some(1)),
            (1, None),
            (4, Some(2)),
            (5, None),
            (2, Some(1)),
        ])
    }

    #[derive(Debug, PartialEq)]
    struct Nested {
        id: DbId,
        children: Vec<Nested>,
    }

    fn nested(node: &(DbId, Option<DbId>), children: Vec<Nested>) -> Nested {
        Nested {
            id: node.0,
            children,
        }
    }

    #[test]
    fn build_indexes_roots_and_children() {
        let tree = sample();
        assert_eq!(tree.roots, vec![1, 5]);
        assert_eq!(tree.children_of(1), &[2, 3]);
        assert_eq!(tree.children_of(2), &[4]);
        assert!(tree.children_of(4).is_empty());
        assert!(tree.children_of(99).is_empty());
    }

    #[test]
    fn deletion_order_removes_children_before_parents() {
        let tree = sample();
        assert_eq!(tree.deletion_order(1).unwrap(), vec![4, 2, 3, 1]);
        assert_eq!(tree.deletion_order(2).unwrap(), vec![4, 2]);
        assert_eq!(tree.deletion_order(5).unwrap(), vec![5]);
    }

    #[test]
    fn deletion_order_for_unknown_folder_is_not_found() {
        let tree = sample();
        assert_matches!(
            tree.deletion_order(42),
            Err(CoreError::NotFound { entity: "Folder", id: 42 })
        );
    }

    #[test]
    fn deletion_order_detects_self_parent() {
        let tree = FolderTree::build(vec![(1, Some(1))]);
        assert_matches!(tree.deletion_order(1), Err(CoreError::Integrity(_)));
    }

    #[test]
    fn deletion_order_detects_longer_cycle() {
        // 1 -> 2 -> 3 -> 1, with 4 hanging off 2.
        let tree = FolderTree::build(vec![(1, Some(3)), (2, Some(1)), (3, Some(2)), (4, Some(2))]);
        assert_matches!(tree.deletion_order(2), Err(CoreError::Integrity(msg)) if msg.contains("cycle"));
    }

    #[test]
    fn deletion_order_ignores_cycles_outside_the_subtree() {
        let tree = FolderTree::build(vec![(1, Some(2)), (2, Some(1)), (3, None), (4, Some(3))]);
        assert_eq!(tree.deletion_order(3).unwrap(), vec![4, 3]);
    }

    #[test]
    fn nest_builds_full_subtree() {
        let tree = sample();
        let root = tree.nest(1, &nested).unwrap();
        assert_eq!(
            root,
            Nested {
                id: 1,
                children: vec![
                    Nested {
                        id: 2,
                        children: vec![Nested { id: 4, children: vec![] }],
                    },
                    Nested { id: 3, children: vec![] },
                ],
            }
        );
        assert!(tree.nest(42, &nested).is_none());
    }

    #[test]
    fn nest_roots_covers_top_level_only() {
        let tree = sample();
        let ids: Vec<DbId> = tree.nest_roots(&nested).iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 5]);
    }

    #[test]
    fn nest_terminates_on_cycle() {
        let tree = FolderTree::build(vec![(1, Some(2)), (2, Some(1))]);
        let root = tree.nest(1, &nested).unwrap();
        assert_eq!(root.id, 1);
        assert_eq!(root.children.len(), 1);
        assert!(root.children[0].children.is_empty());
    }
}
