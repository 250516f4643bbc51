//! Property <-> markup synchronisation
//!
//! Properties are the source of truth while editing; `attributes` and `text`
//! are the markup view of them. `parse_attribs` pulls markup into properties,
//! `write_attribs` pushes properties back out.

use super::{Node, NodeId, Tree, TreeEvent};
use crate::error::{Error, Result};
use crate::metadata::user_sort_key;
use crate::property::TEXT_TAG;
use crate::utils::file_name_segment;

const NAME_PROPERTY: &str = "name";
const SOURCE_PROPERTY: &str = "source";

impl Node {
    /// Feed raw attributes and text into the declared properties.
    ///
    /// Values a property rejects keep the property's default. Undeclared
    /// attributes are ignored.
    pub(crate) fn parse_attribs(&mut self) {
        for prop in self.properties.values_mut() {
            let raw = if prop.is_text() {
                self.text.as_deref()
            } else {
                self.attributes.get(prop.tag()).map(String::as_str)
            };
            let Some(raw) = raw else { continue };
            if !prop.set_value(raw) && prop.editable() {
                tracing::debug!(
                    "<{}> rejected {}=\"{}\", keeping \"{}\"",
                    self.kind.tag(),
                    prop.tag(),
                    raw,
                    prop.value()
                );
            }
        }
        self.update_item_name();
    }

    /// Rebuild attributes and text from the current property values.
    ///
    /// Optional attributes are left out while empty; empty text becomes no text.
    pub(crate) fn write_attribs(&mut self) {
        self.attributes.clear();
        self.text = None;
        for prop in self.properties.values() {
            if prop.is_text() {
                if !prop.value().is_empty() {
                    self.text = Some(prop.value().to_string());
                }
            } else if prop.required() || !prop.value().is_empty() {
                self.attributes
                    .insert(prop.tag().to_string(), prop.value().to_string());
            }
        }
    }

    /// Recompute the display name from the `name` or `source` property.
    pub(crate) fn update_item_name(&mut self) {
        let from_name = self
            .property(NAME_PROPERTY)
            .map(|p| p.value().trim())
            .filter(|v| !v.is_empty());
        let from_source = || {
            self.property(SOURCE_PROPERTY)
                .map(|p| file_name_segment(p.value()))
                .filter(|v| !v.is_empty())
        };
        let name = from_name
            .or_else(from_source)
            .unwrap_or(self.kind.display_name())
            .to_string();
        self.display_name = name;
    }
}

impl Tree {
    /// Load property values from the node's raw attributes and text.
    pub fn parse_attribs(&mut self, id: NodeId) -> Result<()> {
        self.node_mut(id)?.parse_attribs();
        Ok(())
    }

    /// Re-emit the node's attributes and text from its properties.
    pub fn write_attribs(&mut self, id: NodeId) -> Result<()> {
        self.node_mut(id)?.write_attribs();
        Ok(())
    }

    /// Recompute the node's display name from its properties.
    pub fn update_item_name(&mut self, id: NodeId) -> Result<()> {
        self.node_mut(id)?.update_item_name();
        Ok(())
    }

    /// Validate and set a property by its tag.
    ///
    /// Returns `Ok(false)` when the value is rejected; the node is untouched.
    ///
    /// # Errors
    /// [`Error::PropertyNotFound`] when the node's schema declares no such property.
    pub fn set_property(&mut self, id: NodeId, tag: &str, value: &str) -> Result<bool> {
        let node = self.node_mut(id)?;
        let kind = node.kind;
        let prop = node
            .properties
            .get_mut(tag)
            .ok_or_else(|| Error::PropertyNotFound {
                tag: kind.tag(),
                property: tag.to_string(),
            })?;
        let tag = prop.tag();
        if !prop.set_value(value) {
            return Ok(false);
        }
        node.write_attribs();
        node.update_item_name();
        self.emit(&TreeEvent::PropertyChanged { node: id, tag });
        Ok(true)
    }

    /// Set element text.
    ///
    /// # Errors
    /// [`Error::TextNotAllowed`] when the schema does not let this node carry text.
    pub fn set_text(&mut self, id: NodeId, text: &str) -> Result<()> {
        let node = self.node_mut(id)?;
        if !node.allow_text() {
            return Err(Error::TextNotAllowed { tag: node.tag() });
        }
        if let Some(prop) = node.properties.get_mut(TEXT_TAG) {
            prop.set_value(text);
        }
        node.write_attribs();
        self.emit(&TreeEvent::TextChanged { node: id });
        Ok(())
    }

    /// Override the display name. Persisted through the metadata comment.
    pub fn set_display_name(&mut self, id: NodeId, name: &str) -> Result<()> {
        name.clone_into(&mut self.node_mut(id)?.display_name);
        self.emit(&TreeEvent::DisplayNameChanged { node: id });
        Ok(())
    }

    /// Override the node's position among same-keyed siblings.
    ///
    /// Takes effect at the next sort.
    pub fn set_user_sort(&mut self, id: NodeId, position: u32) -> Result<()> {
        self.node_mut(id)?.user_sort_key = user_sort_key(position);
        self.emit(&TreeEvent::MetadataChanged { node: id });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::NodeKind;

    #[test]
    fn test_parse_attribs_keeps_defaults_for_invalid_values() {
        let mut node = Node::new(NodeKind::Group);
        node.attributes.insert("name".to_string(), "Textures".to_string());
        node.attributes.insert("type".to_string(), "SelectSome".to_string());
        node.attributes.insert("stray".to_string(), "x".to_string());
        node.parse_attribs();

        assert_eq!(node.property("name").unwrap().value(), "Textures");
        assert_eq!(node.property("type").unwrap().value(), "SelectAtLeastOne");
        assert_eq!(node.display_name(), "Textures");

        node.write_attribs();
        let attrs: Vec<_> = node.attributes().iter().collect();
        assert_eq!(
            attrs,
            vec![
                (&"name".to_string(), &"Textures".to_string()),
                (&"type".to_string(), &"SelectAtLeastOne".to_string()),
            ]
        );
    }

    #[test]
    fn test_optional_attribute_omitted_while_empty() {
        let mut tree = Tree::new(NodeKind::ConfigRoot);
        let files = tree.append_child(tree.root(), NodeKind::RequiredInstallFiles).unwrap();
        let file = tree.append_child(files, NodeKind::File).unwrap();
        assert_eq!(tree.node(file).unwrap().attribute("destination"), None);

        assert!(tree.set_property(file, "destination", "Data/x.esp").unwrap());
        assert_eq!(tree.node(file).unwrap().attribute("destination"), Some("Data/x.esp"));
    }

    #[test]
    fn test_display_name_falls_back_to_source() {
        let mut tree = Tree::new(NodeKind::ConfigRoot);
        let files = tree.append_child(tree.root(), NodeKind::RequiredInstallFiles).unwrap();
        let folder = tree.append_child(files, NodeKind::Folder).unwrap();
        assert_eq!(tree.node(folder).unwrap().display_name(), "Folder");

        tree.set_property(folder, "source", r"textures\armour\").unwrap();
        assert_eq!(tree.node(folder).unwrap().display_name(), "armour");

        tree.set_property(folder, "source", "meshes/body.nif").unwrap();
        assert_eq!(tree.node(folder).unwrap().display_name(), "body.nif");
    }

    #[test]
    fn test_set_property_rejections() {
        let mut tree = Tree::new(NodeKind::ConfigRoot);
        let root = tree.root();
        assert!(!tree.set_property(root, "xsi:noNamespaceSchemaLocation", "x.xsd").unwrap());
        assert!(matches!(
            tree.set_property(root, "colour", "FFFFFF"),
            Err(Error::PropertyNotFound { tag: "config", .. })
        ));
    }

    #[test]
    fn test_set_text() {
        let mut tree = Tree::new(NodeKind::ConfigRoot);
        let name = tree.append_child(tree.root(), NodeKind::ModuleName).unwrap();
        tree.set_text(name, "Better Bodies").unwrap();
        assert_eq!(tree.node(name).unwrap().text(), Some("Better Bodies"));
        assert_eq!(tree.node(name).unwrap().text_value(), Some("Better Bodies"));

        let root = tree.root();
        assert!(matches!(
            tree.set_text(root, "nope"),
            Err(Error::TextNotAllowed { tag: "config" })
        ));
    }
}
