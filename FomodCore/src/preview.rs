//! Detached snapshots for preview rendering
//!
//! A preview renderer runs off the editing thread. It never sees the live
//! [`Tree`]: the caller freezes a node first and hands over the owned copy.
//!
//! ```
//! use fomodcore::{Installer, freeze_to_xml};
//!
//! let installer = Installer::new();
//! let xml = freeze_to_xml(&installer.config, installer.config.root())?;
//! assert!(xml.starts_with("<config"));
//! # Ok::<(), fomodcore::Error>(())
//! ```

use crate::error::Result;
use crate::package::ExportOptions;
use crate::tree::{NodeId, Tree};
use crate::xml::{RawElement, write_fragment};

/// Owned, schema-agnostic copy of a subtree, as produced by [`Tree::freeze`].
pub type FrozenElement = RawElement;

/// Serialize the current state of `id` and its subtree as an XML fragment.
///
/// No declaration is written. Metadata comments are included as they stand;
/// nothing is sorted or refreshed, so the tree is left untouched.
pub fn freeze_to_xml(tree: &Tree, id: NodeId) -> Result<String> {
    let frozen = tree.freeze(id)?;
    write_fragment(&frozen, &ExportOptions::default())
}
