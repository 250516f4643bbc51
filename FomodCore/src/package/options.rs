//! Import and export options
//!
//! Both follow the same builder shape: start from `new()` (the defaults) and
//! adjust with `with_*` calls.

/// Options controlling how installer files are read.
///
/// # Example
///
/// ```
/// use fomodcore::ImportOptions;
///
/// // Reject hand-edited files with stray elements instead of cleaning them up
/// let options = ImportOptions::new().with_strict(true);
/// assert!(options.strict);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Fail on unknown or misplaced elements instead of dropping them.
    /// Default: false
    pub strict: bool,
}

impl ImportOptions {
    /// Lenient import: invalid children are pruned and logged.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Options controlling how installer files are written.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Byte used for indentation.
    /// Default: b' '
    pub indent_char: u8,

    /// Indentation characters per level.
    /// Default: 4
    pub indent_size: usize,

    /// Persist display names and user sort keys as metadata comments.
    /// When false, existing metadata comments are stripped.
    /// Default: true
    pub write_metadata: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            indent_char: b' ',
            indent_size: 4,
            write_metadata: true,
        }
    }
}

impl ExportOptions {
    /// Four-space indentation with metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_indent(mut self, indent_char: u8, indent_size: usize) -> Self {
        self.indent_char = indent_char;
        self.indent_size = indent_size;
        self
    }

    #[must_use]
    pub fn with_write_metadata(mut self, write_metadata: bool) -> Self {
        self.write_metadata = write_metadata;
        self
    }
}
