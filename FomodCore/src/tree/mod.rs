//! In-memory installer document
//!
//! A [`Tree`] is an arena of [`Node`]s. Each parent owns the ids of its
//! children; each child keeps a non-owning id of its parent. Removing a child
//! frees its whole subtree, so ownership stays strictly hierarchical.
//!
//! All mutation goes through `Tree` so that schema rules are checked and
//! observers (see [`TreeEvent`]) hear about every change.

mod attribs;
mod events;
mod metadata;
mod mutation;
mod node;
mod sort;

use std::fmt;

pub use events::{TreeEvent, TreeObserver};
pub use mutation::{Violation, ViolationKind};
pub use node::{Child, Node, NodeId};
pub use sort::COMMENT_SORT_KEY;

use crate::error::{Error, Result};
use crate::schema::NodeKind;
use crate::xml::{RawElement, RawNode};

/// A schema-typed XML document.
pub struct Tree {
    slots: Vec<Option<Node>>,
    root: NodeId,
    observers: Vec<TreeObserver>,
}

impl Tree {
    /// Create a document holding only a root of `root_kind`.
    #[must_use]
    pub fn new(root_kind: NodeKind) -> Self {
        Self {
            slots: vec![Some(Node::new(root_kind))],
            root: NodeId(0),
            observers: Vec::new(),
        }
    }

    /// Create a document whose root holds one default instance of each child
    /// kind the root requires.
    #[must_use]
    pub fn skeleton(root_kind: NodeKind) -> Self {
        let mut tree = Self::new(root_kind);
        for &kind in root_kind.schema().required_children {
            let id = NodeId(tree.slots.len());
            let mut node = Node::new(kind);
            node.parent = Some(tree.root);
            tree.slots.push(Some(node));
            if let Some(Some(root)) = tree.slots.get_mut(tree.root.0) {
                root.children.push(Child::Node(id));
            }
        }
        tree
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub fn root_kind(&self) -> NodeKind {
        self.slots[self.root.0]
            .as_ref()
            .map_or(NodeKind::InfoRoot, Node::kind)
    }

    /// Create a detached node. Attach it with [`Tree::add_child`], or free it
    /// with [`Tree::drop_detached`]; until then it stays allocated.
    pub fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.slots.len());
        self.slots.push(Some(Node::new(kind)));
        id
    }

    /// Free a detached node and everything built beneath it.
    ///
    /// # Errors
    /// [`Error::NodeAttached`] for the root or a node that still has a parent.
    pub fn drop_detached(&mut self, id: NodeId) -> Result<()> {
        if id == self.root || self.node(id)?.parent.is_some() {
            return Err(Error::NodeAttached(id));
        }
        self.discard(id);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Look up a live node.
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.get(id).ok_or(Error::NodeNotFound(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.slots
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(Error::NodeNotFound(id))
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes, detached ones included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Element children, in document order.
    pub fn children(&self, id: NodeId) -> Result<Vec<NodeId>> {
        Ok(self.node(id)?.children.iter().filter_map(Child::as_node).collect())
    }

    /// Element children of one kind, in document order.
    pub fn children_of_kind(&self, id: NodeId, kind: NodeKind) -> Result<Vec<NodeId>> {
        Ok(self
            .children(id)?
            .into_iter()
            .filter(|child| self.get(*child).is_some_and(|n| n.kind == kind))
            .collect())
    }

    /// First element child of `kind`.
    pub fn find_child(&self, id: NodeId, kind: NodeKind) -> Result<Option<NodeId>> {
        Ok(self.children_of_kind(id, kind)?.into_iter().next())
    }

    /// Comment children, in document order.
    pub fn comments(&self, id: NodeId) -> Result<Vec<&str>> {
        Ok(self.node(id)?.children.iter().filter_map(Child::as_comment).collect())
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.node(id)?.parent)
    }

    /// Ancestors, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Result<Vec<NodeId>> {
        let mut ancestors = Vec::new();
        let mut current = self.node(id)?.parent;
        while let Some(parent) = current {
            ancestors.push(parent);
            current = self.node(parent)?.parent;
        }
        Ok(ancestors)
    }

    /// `id` and everything beneath it, in pre-order.
    pub fn descendants(&self, id: NodeId) -> Result<Vec<NodeId>> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = self.node(current)?;
            out.push(current);
            stack.extend(node.children.iter().rev().filter_map(Child::as_node));
        }
        Ok(out)
    }

    /// Path of element names from the root, e.g. `config/installSteps/installStep`.
    pub fn path(&self, id: NodeId) -> Result<String> {
        let mut segments: Vec<&str> = self
            .ancestors(id)?
            .into_iter()
            .rev()
            .filter_map(|a| self.get(a).map(Node::tag))
            .collect();
        segments.push(self.node(id)?.tag());
        Ok(segments.join("/"))
    }

    /// Copy the current attribute/text state of a subtree into a detached,
    /// schema-agnostic element.
    ///
    /// The result owns all of its data and can be handed to another thread.
    pub fn freeze(&self, id: NodeId) -> Result<RawElement> {
        let node = self.node(id)?;
        let mut children = Vec::with_capacity(node.children.len());
        for child in &node.children {
            match child {
                Child::Node(child_id) => children.push(RawNode::Element(self.freeze(*child_id)?)),
                Child::Comment(text) => children.push(RawNode::Comment(text.clone())),
            }
        }
        Ok(RawElement {
            tag: node.tag().to_string(),
            attributes: node
                .attributes
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            text: node.text.clone(),
            children,
        })
    }

    /// Append a comment child. Comments are not checked against the schema.
    pub fn add_comment(&mut self, id: NodeId, text: impl Into<String>) -> Result<()> {
        self.node_mut(id)?.children.push(Child::Comment(text.into()));
        Ok(())
    }

    /// Free a node and its subtree. The node must already be detached.
    pub(crate) fn discard(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.slots.get_mut(current.0).and_then(Option::take) {
                stack.extend(node.children.iter().filter_map(Child::as_node));
            }
        }
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("root", &self.root)
            .field("nodes", &self.node_count())
            .field("observers", &self.observers.len())
            .finish()
    }
}
