//! Schema-agnostic element tree
//!
//! The first parse phase: markup becomes a labelled tree of tags, attributes,
//! text and comments, with no knowledge of node kinds. The same structure is
//! what [`Tree::freeze`](crate::Tree::freeze) produces for previews.

use crate::error::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// One element with its attributes, text and ordered children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawElement {
    pub tag: String,
    /// Attributes in document order.
    pub attributes: Vec<(String, String)>,
    /// Concatenated, trimmed text content.
    pub text: Option<String>,
    pub children: Vec<RawNode>,
}

/// A child of a [`RawElement`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawNode {
    Element(RawElement),
    Comment(String),
}

impl RawElement {
    /// Value of an attribute by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Element children, skipping comments.
    pub fn elements(&self) -> impl Iterator<Item = &RawElement> {
        self.children.iter().filter_map(|child| match child {
            RawNode::Element(element) => Some(element),
            RawNode::Comment(_) => None,
        })
    }
}

/// Decode file bytes into text.
///
/// UTF-8 (with or without BOM) and BOM-marked UTF-16 in either byte order are
/// accepted; installer files in the wild use all three.
///
/// # Errors
/// Returns an error if the bytes are not valid in the detected encoding.
pub fn decode_bytes(bytes: &[u8], file: &str) -> Result<String> {
    match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => Ok(String::from_utf8(rest.to_vec())?),
        [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, file, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, file, u16::from_be_bytes),
        _ => Ok(String::from_utf8(bytes.to_vec())?),
    }
}

fn decode_utf16(bytes: &[u8], file: &str, unit: fn([u8; 2]) -> u16) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(Error::Parse {
            file: file.to_string(),
            position: bytes.len(),
            message: "truncated UTF-16 data".to_string(),
        });
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).map_err(|err| Error::Parse {
        file: file.to_string(),
        position: 0,
        message: err.to_string(),
    })
}

/// Parse markup into a [`RawElement`] tree.
///
/// Whitespace-only text is dropped. Comments outside the root element and the
/// XML declaration are discarded.
///
/// # Errors
/// Returns [`Error::Parse`] with the byte offset of the failure for malformed
/// markup, a missing root or unclosed elements.
pub fn parse_raw(content: &str, file: &str) -> Result<RawElement> {
    let mut reader = Reader::from_str(content);
    reader.trim_text(true);

    let fail = |position: usize, message: String| Error::Parse {
        file: file.to_string(),
        position,
        message,
    };

    let mut buf = Vec::new();
    let mut stack: Vec<RawElement> = Vec::new();
    let mut root: Option<RawElement> = None;

    loop {
        let event = match reader.read_event_into(&mut buf) {
            Ok(event) => event,
            Err(e) => return Err(fail(reader.buffer_position(), e.to_string())),
        };
        let position = reader.buffer_position();

        match event {
            Event::Start(e) => {
                let element = open_element(&e).map_err(|err| fail(position, err.to_string()))?;
                if stack.is_empty() && root.is_some() {
                    return Err(fail(position, format!("second root element <{}>", element.tag)));
                }
                stack.push(element);
            }
            Event::Empty(e) => {
                let element = open_element(&e).map_err(|err| fail(position, err.to_string()))?;
                close_element(&mut stack, &mut root, element)
                    .map_err(|message| fail(position, message))?;
            }
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    close_element(&mut stack, &mut root, element)
                        .map_err(|message| fail(position, message))?;
                }
            }
            Event::Text(e) => {
                let text = e.unescape().map_err(|err| fail(position, err.to_string()))?;
                append_text(&mut stack, &text);
            }
            Event::CData(e) => {
                let text = std::str::from_utf8(&e).map_err(|err| fail(position, err.to_string()))?;
                append_text(&mut stack, text);
            }
            Event::Comment(e) => {
                let text = std::str::from_utf8(&e).map_err(|err| fail(position, err.to_string()))?;
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(RawNode::Comment(text.to_string()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(fail(content.len(), format!("unclosed element <{}>", open.tag)));
    }
    root.ok_or_else(|| fail(content.len(), "document has no root element".to_string()))
}

fn open_element(start: &BytesStart<'_>) -> Result<RawElement> {
    let tag = String::from_utf8(start.name().as_ref().to_vec())?;
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8(attr.key.as_ref().to_vec())?;
        let value = attr.unescape_value()?.into_owned();
        attributes.push((key, value));
    }
    Ok(RawElement {
        tag,
        attributes,
        text: None,
        children: Vec::new(),
    })
}

fn close_element(
    stack: &mut [RawElement],
    root: &mut Option<RawElement>,
    element: RawElement,
) -> std::result::Result<(), String> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(RawNode::Element(element));
    } else if root.is_some() {
        return Err(format!("second root element <{}>", element.tag));
    } else {
        *root = Some(element);
    }
    Ok(())
}

fn append_text(stack: &mut [RawElement], text: &str) {
    if let Some(element) = stack.last_mut() {
        element.text.get_or_insert_with(String::new).push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_nested_with_comments() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<config a="1" b="x &amp; y">
    <!-- note -->
    <moduleName>My &lt;Mod&gt;</moduleName>
    <installSteps order="Explicit"/>
</config>"#;
        let root = parse_raw(xml, "ModuleConfig.xml").unwrap();

        assert_eq!(root.tag, "config");
        assert_eq!(root.attribute("b"), Some("x & y"));
        assert_eq!(root.children.len(), 3);
        assert_eq!(root.children[0], RawNode::Comment(" note ".to_string()));

        let elements: Vec<_> = root.elements().collect();
        assert_eq!(elements[0].text.as_deref(), Some("My <Mod>"));
        assert_eq!(elements[1].attribute("order"), Some("Explicit"));
        assert!(elements[1].children.is_empty());
    }

    #[test]
    fn test_cdata_is_text() {
        let root = parse_raw("<description><![CDATA[a < b]]></description>", "x").unwrap();
        assert_eq!(root.text.as_deref(), Some("a < b"));
    }

    #[test]
    fn test_mismatched_end_tag_reports_position() {
        let err = parse_raw("<config><moduleName></config>", "ModuleConfig.xml").unwrap_err();
        match err {
            Error::Parse { file, position, .. } => {
                assert_eq!(file, "ModuleConfig.xml");
                assert!(position > 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unclosed_and_empty_documents() {
        assert!(matches!(parse_raw("<config><moduleName>", "x"), Err(Error::Parse { .. })));
        assert!(matches!(parse_raw("   ", "x"), Err(Error::Parse { .. })));
        assert!(matches!(parse_raw("<a/><b/>", "x"), Err(Error::Parse { .. })));
    }

    #[test]
    fn test_decode_bytes_handles_boms() {
        assert_eq!(decode_bytes(b"\xEF\xBB\xBF<a/>", "x").unwrap(), "<a/>");
        assert_eq!(decode_bytes(b"<a/>", "x").unwrap(), "<a/>");

        let le: Vec<u8> = [0xFF, 0xFE]
            .into_iter()
            .chain("<a/>".encode_utf16().flat_map(u16::to_le_bytes))
            .collect();
        assert_eq!(decode_bytes(&le, "x").unwrap(), "<a/>");

        let be: Vec<u8> = [0xFE, 0xFF]
            .into_iter()
            .chain("<é/>".encode_utf16().flat_map(u16::to_be_bytes))
            .collect();
        assert_eq!(decode_bytes(&be, "x").unwrap(), "<é/>");

        assert!(decode_bytes(&[0xFF, 0xFE, 0x3C], "x").is_err());
    }
}
