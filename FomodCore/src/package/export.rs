//! Writing an installer to a package folder

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::{CONFIG_FILE, ExportOptions, FOMOD_DIR, INFO_FILE, Installer};
use crate::error::Result;
use crate::tree::Tree;
use crate::utils::find_case_insensitive;
use crate::xml::serialize_tree;

impl Installer {
    /// Write both documents under `package_root`.
    ///
    /// An existing `fomod` folder and existing files are reused under their
    /// current spelling; anything missing is created with the canonical name.
    /// Both trees are sorted in place first. Each file is written to a
    /// temporary sibling and then moved over the destination.
    ///
    /// # Errors
    /// Returns an error if serialization or any filesystem operation fails.
    pub fn export<P: AsRef<Path>>(
        &mut self,
        package_root: P,
        options: &ExportOptions,
    ) -> Result<()> {
        let package_root = package_root.as_ref();
        let dir = match find_case_insensitive(package_root, FOMOD_DIR)?.filter(|d| d.is_dir()) {
            Some(dir) => dir,
            None => {
                let dir = package_root.join(FOMOD_DIR);
                fs::create_dir_all(&dir)?;
                dir
            }
        };
        let info_path = destination(&dir, INFO_FILE)?;
        let config_path = destination(&dir, CONFIG_FILE)?;

        let (info, config) = self.to_xml_strings(options)?;
        write_atomic(&info_path, &info)?;
        write_atomic(&config_path, &config)?;

        tracing::info!(
            "Exported installer to {} and {}",
            info_path.display(),
            config_path.display()
        );
        Ok(())
    }

    /// Serialize both documents as `(Info.xml, ModuleConfig.xml)` contents.
    ///
    /// Sorts both trees in place and refreshes their attributes and metadata
    /// comments first, exactly as [`Installer::export`] does.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_xml_strings(&mut self, options: &ExportOptions) -> Result<(String, String)> {
        prepare(&mut self.info, options)?;
        prepare(&mut self.config, options)?;
        Ok((
            serialize_tree(&self.info, options)?,
            serialize_tree(&self.config, options)?,
        ))
    }
}

/// Bring a tree into its canonical on-disk state.
fn prepare(tree: &mut Tree, options: &ExportOptions) -> Result<()> {
    let root = tree.root();
    for id in tree.descendants(root)? {
        tree.write_attribs(id)?;
        if options.write_metadata {
            tree.save_metadata(id)?;
        } else {
            tree.remove_metadata_comment(id)?;
        }
    }
    tree.sort_tree(root)
}

fn destination(dir: &Path, name: &str) -> Result<PathBuf> {
    Ok(find_case_insensitive(dir, name)?
        .filter(|path| path.is_file())
        .unwrap_or_else(|| dir.join(name)))
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents.as_bytes())?;
    file.persist(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::ImportOptions;
    use crate::schema::NodeKind;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_export_creates_canonical_layout() {
        let temp = TempDir::new().unwrap();
        let mut installer = Installer::new();
        installer.export(temp.path(), &ExportOptions::default()).unwrap();

        let info = fs::read_to_string(temp.path().join("fomod").join("Info.xml")).unwrap();
        assert_eq!(info, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<fomod/>\n");

        let config =
            fs::read_to_string(temp.path().join("fomod").join("ModuleConfig.xml")).unwrap();
        assert_eq!(
            config,
            concat!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
                "<config xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" ",
                "xsi:noNamespaceSchemaLocation=\"http://qconsulting.ca/fo3/ModConfig5.0.xsd\">\n",
                "    <moduleName position=\"Left\" colour=\"000000\"/>\n",
                "</config>\n",
            )
        );
    }

    #[test]
    fn test_export_reuses_existing_spelling() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("FoMod");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("info.XML"), "old").unwrap();

        Installer::new().export(temp.path(), &ExportOptions::default()).unwrap();

        let mut names: Vec<String> = fs::read_dir(&dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["ModuleConfig.xml".to_string(), "info.XML".to_string()]);
        assert_ne!(fs::read_to_string(dir.join("info.XML")).unwrap(), "old");
    }

    #[test]
    fn test_metadata_can_be_left_out() {
        let mut installer = Installer::new();
        let root = installer.config.root();
        let steps = installer.config.append_child(root, NodeKind::InstallSteps).unwrap();
        installer.config.set_display_name(steps, "Pages").unwrap();

        let (_, with) = installer.to_xml_strings(&ExportOptions::default()).unwrap();
        assert!(with.contains(r#"{"name":"Pages"}"#));

        let (_, without) = installer
            .to_xml_strings(&ExportOptions::new().with_write_metadata(false))
            .unwrap();
        assert!(!without.contains("designer.metadata"));

        let reread =
            Installer::from_xml_strings("<fomod/>", &with, &ImportOptions::default()).unwrap();
        let steps = reread
            .config
            .find_child(reread.config.root(), NodeKind::InstallSteps)
            .unwrap()
            .unwrap();
        assert_eq!(reread.config.node(steps).unwrap().display_name(), "Pages");
    }
}
