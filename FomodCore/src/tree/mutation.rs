//! Schema-checked structural edits
//!
//! Every rejected edit leaves the tree exactly as it was.

use std::fmt;

use super::{Child, NodeId, Tree, TreeEvent};
use crate::error::{Error, Result};
use crate::schema::NodeKind;

/// An unmet child-presence rule found by [`Tree::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub node: NodeId,
    /// Element path of `node`, for display.
    pub path: String,
    pub kind: ViolationKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// A required child kind has no instance.
    MissingRequired(NodeKind),
    /// None of the listed kinds is present.
    MissingOneOf(&'static [NodeKind]),
    /// An either/or group has `found` members instead of exactly one.
    EitherOr {
        group: &'static [NodeKind],
        found: usize,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::MissingRequired(kind) => {
                write!(f, "{}: missing required <{}>", self.path, kind.tag())
            }
            ViolationKind::MissingOneOf(kinds) => {
                write!(f, "{}: needs at least one of {}", self.path, tag_list(kinds))
            }
            ViolationKind::EitherOr { group, found } => write!(
                f,
                "{}: needs exactly one of {}, found {}",
                self.path,
                tag_list(group),
                found
            ),
        }
    }
}

fn tag_list(kinds: &[NodeKind]) -> String {
    kinds
        .iter()
        .map(|k| format!("<{}>", k.tag()))
        .collect::<Vec<_>>()
        .join(", ")
}

impl Tree {
    /// Whether a `kind` child may be attached to `parent` right now.
    ///
    /// Checks type membership and the instance ceiling. Presence groups are
    /// reported by [`Tree::validate`] instead.
    pub fn can_add_child(&self, parent: NodeId, kind: NodeKind) -> Result<bool> {
        if !self.node(parent)?.schema().allows(kind) {
            return Ok(false);
        }
        let ceiling = kind.schema().allowed_instances;
        Ok(ceiling == 0 || self.count_children(parent, &[kind])? < ceiling)
    }

    /// Attach a detached node as the last child of `parent`.
    ///
    /// On success the child's attributes are re-emitted from its properties
    /// and its metadata comment (if any) is applied.
    ///
    /// # Errors
    /// [`Error::CannotAddChild`] when the schema forbids it, the child is
    /// already attached, or the edit would create a cycle.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let parent_kind = self.node(parent)?.kind;
        let child_node = self.node(child)?;
        let child_kind = child_node.kind;
        let rejected = || Error::CannotAddChild {
            parent: parent_kind.tag(),
            child: child_kind.tag(),
        };

        if child_node.parent.is_some()
            || child == self.root
            || child == parent
            || self.ancestors(parent)?.contains(&child)
            || !self.can_add_child(parent, child_kind)?
        {
            return Err(rejected());
        }

        self.node_mut(parent)?.children.push(Child::Node(child));
        let node = self.node_mut(child)?;
        node.parent = Some(parent);
        node.write_attribs();
        self.load_metadata(child)?;
        self.emit(&TreeEvent::ChildAdded { parent, child });
        Ok(())
    }

    /// Create a `kind` node and attach it to `parent`.
    pub fn append_child(&mut self, parent: NodeId, kind: NodeKind) -> Result<NodeId> {
        if !self.can_add_child(parent, kind)? {
            return Err(Error::CannotAddChild {
                parent: self.node(parent)?.tag(),
                child: kind.tag(),
            });
        }
        let child = self.create_node(kind);
        self.add_child(parent, child)?;
        Ok(child)
    }

    /// Detach `child` from `parent` and free its subtree.
    ///
    /// # Errors
    /// [`Error::CannotRemoveChild`] when `child` is not a child of `parent`;
    /// [`Error::CannotRemoveRequiredChild`] when it is the last member of a
    /// required, at-least-one or either/or group.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let parent_node = self.node(parent)?;
        let schema = parent_node.schema();
        let Some(position) = parent_node
            .children
            .iter()
            .position(|c| c.as_node() == Some(child))
        else {
            return Err(Error::CannotRemoveChild {
                parent: parent_node.tag(),
            });
        };

        let kind = self.node(child)?.kind;
        let mut groups: Vec<&[NodeKind]> = Vec::new();
        if schema.required_children.contains(&kind) {
            groups.push(std::slice::from_ref(&kind));
        }
        if schema.at_least_one_of.contains(&kind) {
            groups.push(schema.at_least_one_of);
        }
        groups.extend(schema.either_or.iter().copied().filter(|g| g.contains(&kind)));
        for group in groups {
            if self.count_children(parent, group)? <= 1 {
                return Err(Error::CannotRemoveRequiredChild {
                    parent: schema.tag,
                    child: kind.tag(),
                });
            }
        }

        self.node_mut(parent)?.children.remove(position);
        self.discard(child);
        self.emit(&TreeEvent::ChildRemoved { parent, child });
        Ok(())
    }

    /// Report unmet presence rules in the subtree rooted at `id`.
    pub fn validate(&self, id: NodeId) -> Result<Vec<Violation>> {
        let mut violations = Vec::new();
        for node_id in self.descendants(id)? {
            let schema = self.node(node_id)?.schema();
            let mut found = Vec::new();

            for &kind in schema.required_children {
                if self.count_children(node_id, &[kind])? == 0 {
                    found.push(ViolationKind::MissingRequired(kind));
                }
            }
            if !schema.at_least_one_of.is_empty()
                && self.count_children(node_id, schema.at_least_one_of)? == 0
            {
                found.push(ViolationKind::MissingOneOf(schema.at_least_one_of));
            }
            for &group in schema.either_or {
                let count = self.count_children(node_id, group)?;
                if count != 1 {
                    found.push(ViolationKind::EitherOr { group, found: count });
                }
            }

            if !found.is_empty() {
                let path = self.path(node_id)?;
                violations.extend(found.into_iter().map(|kind| Violation {
                    node: node_id,
                    path: path.clone(),
                    kind,
                }));
            }
        }
        Ok(violations)
    }

    /// Number of element children whose kind is in `kinds`.
    pub(crate) fn count_children(&self, parent: NodeId, kinds: &[NodeKind]) -> Result<usize> {
        let node = self.node(parent)?;
        let mut count = 0;
        for child in node.children.iter().filter_map(Child::as_node) {
            if kinds.contains(&self.node(child)?.kind) {
                count += 1;
            }
        }
        Ok(count)
    }
}
