//! Utility functions

pub mod path;

pub use path::{file_name_segment, find_case_insensitive, normalize_path};
