//! Change notifications
//!
//! Front-ends keep their own projection of a tree (a tree view, a list of
//! warnings) and stay in sync by subscribing to these events.

use super::{NodeId, Tree};

/// A change that has already been applied to the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEvent {
    ChildAdded { parent: NodeId, child: NodeId },
    /// `child` has been freed by the time observers run.
    ChildRemoved { parent: NodeId, child: NodeId },
    PropertyChanged { node: NodeId, tag: &'static str },
    TextChanged { node: NodeId },
    DisplayNameChanged { node: NodeId },
    /// Children of `node` were re-sorted.
    Reordered { node: NodeId },
    MetadataChanged { node: NodeId },
}

/// Callback invoked after every change.
pub type TreeObserver = Box<dyn FnMut(&TreeEvent) + Send>;

impl Tree {
    /// Register an observer. Observers live as long as the tree.
    pub fn subscribe(&mut self, observer: TreeObserver) {
        self.observers.push(observer);
    }

    pub(crate) fn emit(&mut self, event: &TreeEvent) {
        for observer in &mut self.observers {
            observer(event);
        }
    }
}
