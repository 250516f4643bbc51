//! Pretty-printed XML output

use std::io::Write;

use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::raw::{RawElement, RawNode};
use crate::error::Result;
use crate::package::ExportOptions;
use crate::tree::Tree;

/// Serialize a whole tree as a standalone document.
///
/// Children are written in their current order; sort first for canonical output.
///
/// # Errors
/// Returns an error if XML serialization fails.
pub fn serialize_tree(tree: &Tree, options: &ExportOptions) -> Result<String> {
    let root = tree.freeze(tree.root())?;
    write_document(&root, options)
}

/// Serialize an element as a document: UTF-8 declaration, indented body and a
/// trailing newline.
///
/// # Errors
/// Returns an error if XML serialization fails.
pub fn write_document(root: &RawElement, options: &ExportOptions) -> Result<String> {
    let mut output = Vec::new();
    let mut writer = Writer::new_with_indent(&mut output, options.indent_char, options.indent_size);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_element(&mut writer, root)?;

    let mut xml = String::from_utf8(output)?;
    xml.push('\n');
    Ok(xml)
}

/// Serialize an element on its own, without a declaration.
///
/// # Errors
/// Returns an error if XML serialization fails.
pub fn write_fragment(element: &RawElement, options: &ExportOptions) -> Result<String> {
    let mut output = Vec::new();
    let mut writer = Writer::new_with_indent(&mut output, options.indent_char, options.indent_size);
    write_element(&mut writer, element)?;
    Ok(String::from_utf8(output)?)
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &RawElement) -> Result<()> {
    let mut start = BytesStart::new(element.tag.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() && element.text.is_none() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    match &element.text {
        // Mixed content goes out as one unindented span so no whitespace
        // leaks into the element's text.
        Some(text) => {
            let mut inline = Writer::new(Vec::new());
            inline.write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
            for child in &element.children {
                write_child(&mut inline, child)?;
            }
            let span = String::from_utf8(inline.into_inner())?;
            writer.write_event(Event::Text(BytesText::from_escaped(span)))?;
        }
        None => {
            for child in &element.children {
                write_child(writer, child)?;
            }
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.tag.as_str())))?;
    Ok(())
}

fn write_child<W: Write>(writer: &mut Writer<W>, child: &RawNode) -> Result<()> {
    match child {
        RawNode::Element(element) => write_element(writer, element),
        RawNode::Comment(text) => {
            writer.write_event(Event::Comment(BytesText::from_escaped(comment_text(text))))?;
            Ok(())
        }
    }
}

/// Make `text` legal comment content: no `--` anywhere and no trailing `-`.
fn comment_text(text: &str) -> String {
    let mut text = text.to_string();
    while text.contains("--") {
        text = text.replace("--", "- -");
    }
    if text.ends_with('-') {
        text.push(' ');
    }
    text
}
