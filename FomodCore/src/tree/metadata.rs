//! Moving designer state between nodes and their metadata comments

use serde_json::Value;

use super::{Child, NodeId, Tree, TreeEvent};
use crate::error::Result;
use crate::metadata::{
    self, DEFAULT_USER_SORT, NAME_KEY, USER_SORT_KEY, is_metadata_comment, parse_user_sort,
};

impl Tree {
    /// Write the node's display name override and user sort key into its
    /// metadata comment.
    ///
    /// Nodes that can hold neither children nor text are skipped. When there is
    /// nothing to persist any existing metadata comment is dropped. Unknown
    /// keys already in the map are kept.
    pub fn save_metadata(&mut self, id: NodeId) -> Result<()> {
        let node = self.node_mut(id)?;
        if !node.schema().holds_metadata() {
            return Ok(());
        }

        if node.display_name == node.kind.display_name() {
            node.metadata.shift_remove(NAME_KEY);
        } else {
            node.metadata
                .insert(NAME_KEY.to_string(), Value::from(node.display_name.clone()));
        }
        if node.user_sort_key == DEFAULT_USER_SORT {
            node.metadata.shift_remove(USER_SORT_KEY);
        } else {
            node.metadata
                .insert(USER_SORT_KEY.to_string(), Value::from(node.user_sort_key.clone()));
        }

        if node.metadata.is_empty() {
            return self.remove_metadata_comment(id);
        }

        let text = metadata::encode(&node.metadata)?;
        let first = node
            .children
            .iter()
            .position(|c| c.as_comment().is_some_and(is_metadata_comment));
        match first {
            Some(index) => {
                node.children[index] = Child::Comment(text);
                let mut seen = 0;
                node.children.retain(|c| {
                    if c.as_comment().is_some_and(is_metadata_comment) {
                        seen += 1;
                        seen == 1
                    } else {
                        true
                    }
                });
            }
            None => node.children.push(Child::Comment(text)),
        }
        Ok(())
    }

    /// Apply the node's metadata comment, if it has a readable one.
    ///
    /// A missing `name` falls back to the property-derived display name and a
    /// missing `user_sort` to the default. Without a readable comment the node
    /// is left as it is.
    pub fn load_metadata(&mut self, id: NodeId) -> Result<()> {
        let node = self.node_mut(id)?;
        let Some(loaded) = node
            .children
            .iter()
            .filter_map(Child::as_comment)
            .filter(|text| is_metadata_comment(text))
            .find_map(metadata::decode)
        else {
            return Ok(());
        };

        match loaded.get(NAME_KEY).and_then(Value::as_str) {
            Some(name) => name.clone_into(&mut node.display_name),
            None => node.update_item_name(),
        }
        node.user_sort_key = loaded
            .get(USER_SORT_KEY)
            .and_then(parse_user_sort)
            .unwrap_or_else(|| DEFAULT_USER_SORT.to_string());
        node.metadata = loaded;

        self.emit(&TreeEvent::MetadataChanged { node: id });
        Ok(())
    }

    /// Drop every metadata comment from the node's children.
    pub fn remove_metadata_comment(&mut self, id: NodeId) -> Result<()> {
        self.node_mut(id)?
            .children
            .retain(|c| !c.as_comment().is_some_and(is_metadata_comment));
        Ok(())
    }

    /// [`Tree::save_metadata`] over a whole subtree.
    pub fn save_metadata_tree(&mut self, id: NodeId) -> Result<()> {
        for node in self.descendants(id)? {
            self.save_metadata(node)?;
        }
        Ok(())
    }
}
