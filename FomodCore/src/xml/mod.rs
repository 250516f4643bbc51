//! XML reading and writing

mod raw;
mod reader;
mod writer;

pub use raw::{RawElement, RawNode, decode_bytes, parse_raw};
pub use reader::{build_tree, parse_tree, read_tree};
pub use writer::{serialize_tree, write_document, write_fragment};
