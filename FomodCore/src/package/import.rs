//! Reading an installer from a package folder

use std::path::{Path, PathBuf};

use super::{CONFIG_FILE, FOMOD_DIR, INFO_FILE, ImportOptions, ImportOutcome, Installer};
use crate::error::Result;
use crate::schema::NodeKind;
use crate::utils::find_case_insensitive;
use crate::xml::{parse_tree, read_tree};

/// Resolved on-disk locations of an existing installer.
#[derive(Debug)]
struct InstallerFiles {
    info: PathBuf,
    config: PathBuf,
}

impl Installer {
    /// Read the installer under `package_root`.
    ///
    /// A missing `fomod` folder or file is reported as
    /// [`ImportOutcome::NotPresent`], not as an error.
    ///
    /// # Errors
    /// Returns an error if a file cannot be read, is malformed, or does not
    /// follow the schema closely enough to be typed (see [`crate::xml::build_tree`]).
    pub fn import<P: AsRef<Path>>(
        package_root: P,
        options: &ImportOptions,
    ) -> Result<ImportOutcome> {
        let package_root = package_root.as_ref();
        let Some(files) = locate(package_root)? else {
            tracing::info!("No installer found in {}", package_root.display());
            return Ok(ImportOutcome::NotPresent {
                path: package_root.to_path_buf(),
            });
        };

        tracing::info!("Importing installer from {}", package_root.display());
        let info = read_tree(&files.info, NodeKind::InfoRoot, options)?;
        let config = read_tree(&files.config, NodeKind::ConfigRoot, options)?;
        Ok(ImportOutcome::Found(Self { info, config }))
    }

    /// Build an installer from the contents of both files.
    ///
    /// # Errors
    /// Returns an error if either document is malformed or cannot be typed.
    pub fn from_xml_strings(info: &str, config: &str, options: &ImportOptions) -> Result<Self> {
        Ok(Self {
            info: parse_tree(info, NodeKind::InfoRoot, options)?,
            config: parse_tree(config, NodeKind::ConfigRoot, options)?,
        })
    }
}

fn locate(package_root: &Path) -> Result<Option<InstallerFiles>> {
    let Some(dir) = find_case_insensitive(package_root, FOMOD_DIR)?.filter(|d| d.is_dir()) else {
        return Ok(None);
    };
    let info = find_case_insensitive(&dir, INFO_FILE)?.filter(|f| f.is_file());
    let config = find_case_insensitive(&dir, CONFIG_FILE)?.filter(|f| f.is_file());

    match (info, config) {
        (Some(info), Some(config)) => Ok(Some(InstallerFiles { info, config })),
        (info, config) => {
            tracing::debug!(
                "Incomplete installer in {}: Info.xml {}, ModuleConfig.xml {}",
                dir.display(),
                if info.is_some() { "found" } else { "missing" },
                if config.is_some() { "found" } else { "missing" },
            );
            Ok(None)
        }
    }
}
