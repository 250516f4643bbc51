//! Path utilities

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

/// Normalize path separators to forward slashes
pub fn normalize_path<P: AsRef<Path>>(path: P) -> String {
    path.as_ref().to_string_lossy().replace('\\', "/")
}

/// Last component of a package path written with either separator
#[must_use]
pub fn file_name_segment(path: &str) -> &str {
    path.trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
}

/// Find an entry directly inside `dir` whose name matches `name` ignoring
/// ASCII case.
///
/// An exact match wins; otherwise the first match in file name order. A missing
/// `dir` is not an error.
///
/// # Errors
/// Returns an error if the directory cannot be listed.
pub fn find_case_insensitive<P: AsRef<Path>>(dir: P, name: &str) -> Result<Option<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Ok(None);
    }

    let mut found = None;
    for entry in WalkDir::new(dir)
        .min_depth(1) // Skip the directory itself
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let Some(file_name) = entry.file_name().to_str() else {
            continue;
        };
        if file_name == name {
            return Ok(Some(entry.into_path()));
        }
        if found.is_none() && file_name.eq_ignore_ascii_case(name) {
            found = Some(entry.into_path());
        }
    }
    Ok(found)
}
