//! Node storage

use std::fmt;

use indexmap::IndexMap;

use crate::metadata::{DEFAULT_USER_SORT, Metadata};
use crate::property::{Property, TEXT_TAG};
use crate::schema::{NodeKind, NodeSchema};

/// Handle to a node inside a [`Tree`](super::Tree).
///
/// Ids are never reused within a tree, so a stale id reports
/// [`Error::NodeNotFound`](crate::Error::NodeNotFound) instead of aliasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Arena slot of this node.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An entry in a node's ordered child list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    /// A schema-typed element.
    Node(NodeId),
    /// An XML comment. Not subject to schema rules.
    Comment(String),
}

impl Child {
    #[must_use]
    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Self::Node(id) => Some(*id),
            Self::Comment(_) => None,
        }
    }

    #[must_use]
    pub fn as_comment(&self) -> Option<&str> {
        match self {
            Self::Comment(text) => Some(text),
            Self::Node(_) => None,
        }
    }
}

/// One schema-typed XML element.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) display_name: String,
    pub(crate) user_sort_key: String,
    pub(crate) attributes: IndexMap<String, String>,
    pub(crate) text: Option<String>,
    pub(crate) properties: IndexMap<&'static str, Property>,
    pub(crate) metadata: Metadata,
    pub(crate) children: Vec<Child>,
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    /// A detached node of `kind` with every property at its default.
    pub(crate) fn new(kind: NodeKind) -> Self {
        let schema = kind.schema();
        let properties = schema
            .properties
            .iter()
            .map(|decl| (decl.tag, Property::from_decl(decl)))
            .collect();

        let mut node = Self {
            kind,
            display_name: schema.name.to_string(),
            user_sort_key: DEFAULT_USER_SORT.to_string(),
            attributes: IndexMap::new(),
            text: None,
            properties,
            metadata: Metadata::new(),
            children: Vec::new(),
            parent: None,
        };
        node.write_attribs();
        node
    }

    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    #[must_use]
    pub fn schema(&self) -> &'static NodeSchema {
        self.kind.schema()
    }

    /// XML element name.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        self.kind.tag()
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// User override of the sibling order, a zero-padded number.
    #[must_use]
    pub fn user_sort_key(&self) -> &str {
        &self.user_sort_key
    }

    /// Serialization order among siblings: `schema_key.user_key`.
    #[must_use]
    pub fn sort_key(&self) -> String {
        format!("{}.{}", self.schema().sort_key, self.user_sort_key)
    }

    #[must_use]
    pub fn allow_text(&self) -> bool {
        self.schema().allow_text
    }

    #[must_use]
    pub fn allowed_instances(&self) -> usize {
        self.schema().allowed_instances
    }

    /// Element text as it will be serialized.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// XML attributes as they will be serialized.
    #[must_use]
    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Properties in schema declaration order.
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.properties.values()
    }

    /// The property bound to an attribute name (or [`TEXT_TAG`]).
    #[must_use]
    pub fn property(&self, tag: &str) -> Option<&Property> {
        self.properties.get(tag)
    }

    /// The value of the element-text property, if this kind has one.
    #[must_use]
    pub fn text_value(&self) -> Option<&str> {
        self.property(TEXT_TAG).map(Property::value)
    }

    #[must_use]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Ordered children, comments included.
    #[must_use]
    pub fn children(&self) -> &[Child] {
        &self.children
    }
}
