//! Installer packages on disk
//!
//! An installer is always a pair of documents living in a `fomod` folder under
//! the package root:
//!
//! ```text
//! <package_root>/
//!   fomod/
//!     Info.xml
//!     ModuleConfig.xml
//! ```
//!
//! Every level is matched case-insensitively, and export reuses whatever
//! spelling is already on disk.

mod export;
mod import;
mod options;

use std::path::PathBuf;

pub use options::{ExportOptions, ImportOptions};

use crate::error::{Error, Result};
use crate::schema::NodeKind;
use crate::tree::Tree;

/// Folder holding the installer files.
pub const FOMOD_DIR: &str = "fomod";
/// File name of the metadata document.
pub const INFO_FILE: &str = "Info.xml";
/// File name of the structure document.
pub const CONFIG_FILE: &str = "ModuleConfig.xml";

/// An installer: the `Info.xml` tree and the `ModuleConfig.xml` tree.
///
/// The two trees are independent; they are only created, read and written
/// together.
#[derive(Debug)]
pub struct Installer {
    /// Tree rooted at `<fomod>`.
    pub info: Tree,
    /// Tree rooted at `<config>`.
    pub config: Tree,
}

impl Installer {
    /// A blank installer. The config tree already holds its required `moduleName`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            info: Tree::skeleton(NodeKind::InfoRoot),
            config: Tree::skeleton(NodeKind::ConfigRoot),
        }
    }
}

impl Default for Installer {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of looking for an installer under a package root.
#[derive(Debug)]
pub enum ImportOutcome {
    /// Both files were found and parsed.
    Found(Installer),
    /// No `fomod` folder, or one of its files is missing.
    NotPresent {
        /// The package root that was searched.
        path: PathBuf,
    },
}

impl ImportOutcome {
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The installer, treating absence as an error.
    ///
    /// # Errors
    /// Returns [`Error::NotPresent`] for [`ImportOutcome::NotPresent`].
    pub fn into_installer(self) -> Result<Installer> {
        match self {
            Self::Found(installer) => Ok(installer),
            Self::NotPresent { path } => Err(Error::NotPresent { path }),
        }
    }
}
