//! Error types for `FomodCore`

use std::path::PathBuf;

use thiserror::Error;

use crate::tree::NodeId;

/// The error type for `FomodCore` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No `fomod` folder, or one of its two files, exists under the package root.
    ///
    /// This is the "create a new installer" signal, not a failure.
    #[error("no installer present in {path}")]
    NotPresent {
        /// The package root that was searched.
        path: PathBuf,
    },

    /// A temporary file could not be moved over its destination.
    #[error("failed to persist temporary file {path}: {message}")]
    Persist {
        /// The temporary file that was left behind.
        path: PathBuf,
        /// The underlying error message.
        message: String,
    },

    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDirError(String),

    // ==================== Parsing Errors ====================
    /// Malformed XML in an installer file.
    #[error("parse error in {file} at byte {position}: {message}")]
    Parse {
        /// The path or conventional file name of the document.
        file: String,
        /// Byte offset reported by the reader.
        position: usize,
        /// The parser message.
        message: String,
    },

    /// XML error outside of document parsing (writer side).
    #[error("XML error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// XML attribute error.
    #[error("XML attribute error: {0}")]
    XmlAttrError(String),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// UTF-8 conversion error.
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    // ==================== Schema Errors ====================
    /// A tag matches no schema descriptor in its ancestor context.
    #[error("no schema entry for <{tag}> under <{}>", .parent.as_deref().unwrap_or("document"))]
    TagNotFound {
        /// The element tag.
        tag: String,
        /// The parent tag, if any.
        parent: Option<String>,
    },

    /// The document element is not the one the file must start with.
    #[error("expected root <{expected}>, found <{found}>")]
    UnexpectedRoot {
        /// The root tag the file must use.
        expected: &'static str,
        /// The root tag that was found.
        found: String,
    },

    // ==================== Tree Mutation Errors ====================
    /// The child type is not allowed under the parent, or its instance limit is reached.
    #[error("<{child}> cannot be added to <{parent}>")]
    CannotAddChild {
        /// The parent tag.
        parent: &'static str,
        /// The rejected child tag.
        child: &'static str,
    },

    /// The node passed for removal is not a child of the parent.
    #[error("node is not a child of <{parent}>")]
    CannotRemoveChild {
        /// The parent tag.
        parent: &'static str,
    },

    /// Removing the child would leave a required group of the parent empty.
    #[error("<{child}> is required by <{parent}> and cannot be removed")]
    CannotRemoveRequiredChild {
        /// The parent tag.
        parent: &'static str,
        /// The protected child tag.
        child: &'static str,
    },

    /// Text was set on a node whose schema forbids element text.
    #[error("<{tag}> does not allow text")]
    TextNotAllowed {
        /// The node tag.
        tag: &'static str,
    },

    /// The node has no property bound to the given tag.
    #[error("<{tag}> has no property '{property}'")]
    PropertyNotFound {
        /// The node tag.
        tag: &'static str,
        /// The requested property tag.
        property: String,
    },

    /// The node is still part of the tree; detach it with `remove_child` instead.
    #[error("node {0} is attached to the tree")]
    NodeAttached(NodeId),

    /// The node id does not refer to a live node of this tree.
    #[error("node {0} does not exist in this tree")]
    NodeNotFound(NodeId),
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlAttrError(err.to_string())
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDirError(err.to_string())
    }
}

impl From<tempfile::PersistError> for Error {
    fn from(err: tempfile::PersistError) -> Self {
        Error::Persist {
            path: err.file.path().to_path_buf(),
            message: err.error.to_string(),
        }
    }
}

/// A specialized Result type for `FomodCore` operations.
pub type Result<T> = std::result::Result<T, Error>;
