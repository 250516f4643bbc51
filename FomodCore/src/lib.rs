#![allow(non_snake_case)]
//! # FomodCore
//!
//! A schema-typed document model for FOMOD installers: the `fomod/Info.xml`
//! and `fomod/ModuleConfig.xml` pair shipped with game mods.
//!
//! ## Overview
//!
//! - **Schema** - Static tables for every element of `ModConfig5.0.xsd` and the
//!   designer's `Info.xml` layout
//! - **Tree** - Arena-backed node tree whose mutations are checked against the schema
//! - **Package** - Case-insensitive import, lenient or strict, and canonical export
//! - **Metadata** - Display names and sort overrides persisted as XML comments
//!
//! ## Quick Start
//!
//! ### Reading and writing a package
//!
//! ```no_run
//! use fomodcore::{ExportOptions, ImportOptions, ImportOutcome, Installer};
//!
//! let mut installer = match Installer::import("MyMod", &ImportOptions::default())? {
//!     ImportOutcome::Found(installer) => installer,
//!     ImportOutcome::NotPresent { .. } => Installer::new(),
//! };
//! installer.export("MyMod", &ExportOptions::default())?;
//! # Ok::<(), fomodcore::Error>(())
//! ```
//!
//! ### Editing a tree
//!
//! ```
//! use fomodcore::prelude::*;
//!
//! let mut installer = Installer::new();
//! let config = &mut installer.config;
//! let steps = config.append_child(config.root(), NodeKind::InstallSteps)?;
//! let step = config.append_child(steps, NodeKind::InstallStep)?;
//! config.set_property(step, "name", "Textures")?;
//!
//! // installSteps must keep at least one installStep
//! assert!(config.remove_child(steps, step).is_err());
//! # Ok::<(), fomodcore::Error>(())
//! ```

pub mod error;
pub mod property;
pub mod schema;
pub mod tree;
pub mod metadata;
pub mod xml;
pub mod package;
pub mod preview;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, Result};
pub use package::{ExportOptions, ImportOptions, ImportOutcome, Installer};
pub use preview::{FrozenElement, freeze_to_xml};
pub use property::{Property, PropertyDecl, PropertyKind};
pub use schema::{NodeKind, NodeSchema};
pub use tree::{Child, Node, NodeId, Tree, TreeEvent, TreeObserver, Violation, ViolationKind};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::package::{ExportOptions, ImportOptions, ImportOutcome, Installer};
    pub use crate::preview::{FrozenElement, freeze_to_xml};
    pub use crate::property::{Property, PropertyKind};
    pub use crate::schema::{NodeKind, NodeSchema};
    pub use crate::tree::{Child, Node, NodeId, Tree, TreeEvent, Violation, ViolationKind};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
