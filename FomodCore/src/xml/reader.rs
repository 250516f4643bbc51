//! Building typed trees from markup
//!
//! The second parse phase. The raw tree is walked top-down: every element is
//! resolved against the kinds of its already-resolved parent and grandparent,
//! its subtree is built, and only then is it attached to its parent through
//! the normal schema check.

use std::fs;
use std::path::Path;

use super::raw::{RawElement, RawNode, decode_bytes, parse_raw};
use crate::error::{Error, Result};
use crate::package::ImportOptions;
use crate::schema::{NodeKind, resolve};
use crate::tree::{NodeId, Tree};
use crate::utils::normalize_path;

/// Read and build a tree from a file.
///
/// # Errors
/// Returns an error if the file cannot be read, is malformed, or its root is
/// not `expected_root`.
pub fn read_tree<P: AsRef<Path>>(
    path: P,
    expected_root: NodeKind,
    options: &ImportOptions,
) -> Result<Tree> {
    let path = path.as_ref();
    let label = normalize_path(path);
    let bytes = fs::read(path)?;
    let content = decode_bytes(&bytes, &label)?;
    tracing::debug!("Parsing {} ({} bytes)", label, bytes.len());
    parse_labelled(&content, &label, expected_root, options)
}

/// Build a tree from markup held in memory.
///
/// # Errors
/// Returns an error if the markup is malformed or its root is not `expected_root`.
pub fn parse_tree(content: &str, expected_root: NodeKind, options: &ImportOptions) -> Result<Tree> {
    parse_labelled(content, document_name(expected_root), expected_root, options)
}

/// Conventional file name of the document rooted at `kind`.
fn document_name(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::InfoRoot => "Info.xml",
        _ => "ModuleConfig.xml",
    }
}

fn parse_labelled(
    content: &str,
    label: &str,
    expected_root: NodeKind,
    options: &ImportOptions,
) -> Result<Tree> {
    let raw = parse_raw(content, label)?;
    build_tree(&raw, expected_root, options)
}

/// Type a raw tree.
///
/// An unknown or unexpected root is always fatal. Below the root, unknown tags
/// and children the schema rejects are dropped with a warning, or abort the
/// build when `options.strict` is set.
///
/// # Errors
/// [`Error::TagNotFound`], [`Error::UnexpectedRoot`], and in strict mode
/// [`Error::CannotAddChild`].
pub fn build_tree(
    raw: &RawElement,
    expected_root: NodeKind,
    options: &ImportOptions,
) -> Result<Tree> {
    let root_kind = resolve(&raw.tag, None, None)?;
    if root_kind != expected_root {
        return Err(Error::UnexpectedRoot {
            expected: expected_root.tag(),
            found: raw.tag.clone(),
        });
    }

    let mut tree = Tree::new(root_kind);
    let root = tree.root();
    fill(&mut tree, root, raw, None, options)?;
    tree.write_attribs(root)?;
    tree.load_metadata(root)?;
    Ok(tree)
}

/// Load `raw` into the detached node `id`, building and attaching its children.
fn fill(
    tree: &mut Tree,
    id: NodeId,
    raw: &RawElement,
    parent: Option<NodeKind>,
    options: &ImportOptions,
) -> Result<()> {
    let kind = {
        let node = tree.node_mut(id)?;
        node.attributes = raw.attributes.iter().cloned().collect();
        node.text.clone_from(&raw.text);
        node.parse_attribs();
        node.kind()
    };

    for child in &raw.children {
        let element = match child {
            RawNode::Comment(text) => {
                tree.add_comment(id, text.clone())?;
                continue;
            }
            RawNode::Element(element) => element,
        };

        let child_kind = match resolve(&element.tag, Some(kind), parent) {
            Ok(child_kind) => child_kind,
            Err(err) if options.strict => return Err(err),
            Err(err) => {
                tracing::warn!("Dropping element: {}", err);
                continue;
            }
        };

        if !tree.can_add_child(id, child_kind)? {
            if options.strict {
                return Err(Error::CannotAddChild {
                    parent: kind.tag(),
                    child: child_kind.tag(),
                });
            }
            tracing::warn!(
                "Dropping <{}> under <{}>: not allowed here or too many instances",
                element.tag,
                kind.tag()
            );
            continue;
        }

        let child_id = tree.create_node(child_kind);
        fill(tree, child_id, element, Some(kind), options)?;
        tree.add_child(id, child_id)?;
    }
    Ok(())
}
