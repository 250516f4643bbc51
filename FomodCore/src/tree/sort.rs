//! Deterministic sibling order for serialization
//!
//! Element children sort by `schema_key.user_key` compared as strings; comments
//! always use [`COMMENT_SORT_KEY`] and therefore precede every element. The sort
//! is stable, so equal keys (comments among themselves, unordered siblings of
//! one kind) keep their current relative order.

use super::{Child, NodeId, Tree, TreeEvent};
use crate::error::Result;

/// Sort key of comment children.
pub const COMMENT_SORT_KEY: &str = "0";

impl Tree {
    /// Sort the direct children of `id`.
    pub fn sort_children(&mut self, id: NodeId) -> Result<()> {
        let mut keyed = Vec::new();
        for child in &self.node(id)?.children {
            let key = match child {
                Child::Node(child_id) => self.node(*child_id)?.sort_key(),
                Child::Comment(_) => COMMENT_SORT_KEY.to_string(),
            };
            keyed.push((key, child.clone()));
        }
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        let sorted: Vec<Child> = keyed.into_iter().map(|(_, child)| child).collect();

        let node = self.node_mut(id)?;
        if node.children != sorted {
            node.children = sorted;
            self.emit(&TreeEvent::Reordered { node: id });
        }
        Ok(())
    }

    /// Sort every node with children in the subtree rooted at `id`.
    pub fn sort_tree(&mut self, id: NodeId) -> Result<()> {
        for node in self.descendants(id)? {
            if !self.node(node)?.children.is_empty() {
                self.sort_children(node)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::NodeKind;
    use pretty_assertions::assert_eq;

    fn kinds(tree: &Tree, id: NodeId) -> Vec<NodeKind> {
        tree.children(id)
            .unwrap()
            .into_iter()
            .map(|c| tree.node(c).unwrap().kind())
            .collect()
    }

    #[test]
    fn test_schema_order_wins_over_insertion_order() {
        let mut tree = Tree::new(NodeKind::ConfigRoot);
        let root = tree.root();
        tree.append_child(root, NodeKind::ConditionalFileInstalls).unwrap();
        tree.append_child(root, NodeKind::InstallSteps).unwrap();
        tree.append_child(root, NodeKind::ModuleName).unwrap();
        tree.add_comment(root, "note").unwrap();

        tree.sort_children(root).unwrap();
        assert_eq!(
            kinds(&tree, root),
            vec![
                NodeKind::ModuleName,
                NodeKind::InstallSteps,
                NodeKind::ConditionalFileInstalls
            ]
        );
        assert!(matches!(tree.node(root).unwrap().children()[0], Child::Comment(_)));
    }

    #[test]
    fn test_user_sort_orders_same_kind_siblings() {
        let mut tree = Tree::new(NodeKind::ConfigRoot);
        let steps = tree.append_child(tree.root(), NodeKind::InstallSteps).unwrap();
        let first = tree.append_child(steps, NodeKind::InstallStep).unwrap();
        let second = tree.append_child(steps, NodeKind::InstallStep).unwrap();
        let third = tree.append_child(steps, NodeKind::InstallStep).unwrap();
        tree.set_user_sort(first, 2).unwrap();
        tree.set_user_sort(second, 1).unwrap();

        tree.sort_tree(tree.root()).unwrap();
        assert_eq!(tree.children(steps).unwrap(), vec![third, second, first]);
    }

    #[test]
    fn test_sort_is_stable_and_idempotent() {
        let mut tree = Tree::new(NodeKind::ConfigRoot);
        let files = tree.append_child(tree.root(), NodeKind::RequiredInstallFiles).unwrap();
        let a = tree.append_child(files, NodeKind::Folder).unwrap();
        let b = tree.append_child(files, NodeKind::File).unwrap();
        let c = tree.append_child(files, NodeKind::Folder).unwrap();

        let reorders = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = std::sync::Arc::clone(&reorders);
        tree.subscribe(Box::new(move |event| {
            if matches!(event, TreeEvent::Reordered { .. }) {
                counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            }
        }));

        tree.sort_tree(tree.root()).unwrap();
        assert_eq!(tree.children(files).unwrap(), vec![a, b, c]);
        tree.sort_tree(tree.root()).unwrap();
        assert_eq!(tree.children(files).unwrap(), vec![a, b, c]);
        assert_eq!(reorders.load(std::sync::atomic::Ordering::SeqCst), 0);
    }
}
