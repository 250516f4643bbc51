//! Typed, validated scalar values bound to an XML attribute or to element text
//!
//! Every node carries one [`Property`] per schema-declared attribute (plus one
//! bound to [`TEXT_TAG`] for text-bearing elements). Values are stored as the
//! strings that end up in the markup; the [`PropertyKind`] decides which strings
//! are accepted.

use std::fmt;

/// Sentinel tag for the property that maps to element text instead of an attribute.
pub const TEXT_TAG: &str = "<node_text>";

/// Validation capability of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// Any string.
    Text,
    /// One of an enumerated set; defaults to the first entry.
    Combo(&'static [&'static str]),
    /// An integer within the inclusive range.
    Int {
        /// Smallest accepted value.
        min: i64,
        /// Largest accepted value.
        max: i64,
    },
    /// A path to a file inside the package (text; the distinction is for front-ends).
    FilePath,
    /// A path to a folder inside the package.
    FolderPath,
    /// Six hex digits, e.g. `000000`.
    Colour,
}

impl PropertyKind {
    /// Whether `value` passes this kind's validation.
    #[must_use]
    pub fn accepts(self, value: &str) -> bool {
        match self {
            Self::Text | Self::FilePath | Self::FolderPath => true,
            Self::Combo(values) => values.contains(&value),
            Self::Int { min, max } => value
                .trim()
                .parse::<i64>()
                .is_ok_and(|v| (min..=max).contains(&v)),
            Self::Colour => value.len() == 6 && value.chars().all(|c| c.is_ascii_hexdigit()),
        }
    }
}

/// Static declaration of a property, part of a node type's schema entry.
#[derive(Debug, Clone, Copy)]
pub struct PropertyDecl {
    /// Display label.
    pub name: &'static str,
    /// Serialized attribute name, or [`TEXT_TAG`].
    pub tag: &'static str,
    /// Validation capability.
    pub kind: PropertyKind,
    /// Value at creation. Empty for combos means "first entry".
    pub default: &'static str,
    /// Whether `set_value` may change the value.
    pub editable: bool,
    /// Optional attributes are left out of the markup while empty.
    pub required: bool,
}

impl PropertyDecl {
    /// A free-text attribute.
    #[must_use]
    pub const fn text(name: &'static str, tag: &'static str) -> Self {
        Self::new(name, tag, PropertyKind::Text, "")
    }

    /// The element-text property.
    #[must_use]
    pub const fn node_text(name: &'static str) -> Self {
        Self::new(name, TEXT_TAG, PropertyKind::Text, "")
    }

    /// An enumerated attribute, defaulting to the first value.
    #[must_use]
    pub const fn combo(
        name: &'static str,
        tag: &'static str,
        values: &'static [&'static str],
    ) -> Self {
        Self::new(name, tag, PropertyKind::Combo(values), "")
    }

    /// An integer attribute.
    #[must_use]
    pub const fn int(
        name: &'static str,
        tag: &'static str,
        min: i64,
        max: i64,
        default: &'static str,
    ) -> Self {
        Self::new(name, tag, PropertyKind::Int { min, max }, default)
    }

    /// A file path attribute.
    #[must_use]
    pub const fn file(name: &'static str, tag: &'static str) -> Self {
        Self::new(name, tag, PropertyKind::FilePath, "")
    }

    /// A folder path attribute.
    #[must_use]
    pub const fn folder(name: &'static str, tag: &'static str) -> Self {
        Self::new(name, tag, PropertyKind::FolderPath, "")
    }

    /// A hex colour attribute.
    #[must_use]
    pub const fn colour(name: &'static str, tag: &'static str, default: &'static str) -> Self {
        Self::new(name, tag, PropertyKind::Colour, default)
    }

    const fn new(
        name: &'static str,
        tag: &'static str,
        kind: PropertyKind,
        default: &'static str,
    ) -> Self {
        Self {
            name,
            tag,
            kind,
            default,
            editable: true,
            required: true,
        }
    }

    /// Mark the attribute as optional.
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Pin the value to `value`; `set_value` will reject everything.
    #[must_use]
    pub const fn fixed(mut self, value: &'static str) -> Self {
        self.default = value;
        self.editable = false;
        self
    }

    /// Override the default value.
    #[must_use]
    pub const fn with_default(mut self, value: &'static str) -> Self {
        self.default = value;
        self
    }
}

/// A live property owned by a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    name: &'static str,
    tag: &'static str,
    kind: PropertyKind,
    editable: bool,
    required: bool,
    value: String,
}

impl Property {
    /// Instantiate a declaration, reset to its default.
    #[must_use]
    pub fn from_decl(decl: &PropertyDecl) -> Self {
        let value = match decl.kind {
            PropertyKind::Combo(values) if decl.default.is_empty() => {
                values.first().copied().unwrap_or_default().to_string()
            }
            _ => decl.default.to_string(),
        };
        Self {
            name: decl.name,
            tag: decl.tag,
            kind: decl.kind,
            editable: decl.editable,
            required: decl.required,
            value,
        }
    }

    /// Validate and set. Returns whether the value was accepted.
    ///
    /// A rejected value leaves the property unchanged.
    pub fn set_value(&mut self, value: &str) -> bool {
        if !self.editable || !self.kind.accepts(value) {
            return false;
        }
        value.clone_into(&mut self.value);
        true
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    #[must_use]
    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    #[must_use]
    pub fn editable(&self) -> bool {
        self.editable
    }

    #[must_use]
    pub fn required(&self) -> bool {
        self.required
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether this property is serialized as element text.
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.tag == TEXT_TAG
    }

    /// Enumerated values; empty for unconstrained kinds.
    #[must_use]
    pub fn allowed_values(&self) -> &'static [&'static str] {
        match self.kind {
            PropertyKind::Combo(values) => values,
            _ => &[],
        }
    }

    /// Inclusive range for integer properties.
    #[must_use]
    pub fn range(&self) -> Option<(i64, i64)> {
        match self.kind {
            PropertyKind::Int { min, max } => Some((min, max)),
            _ => None,
        }
    }

    /// The value parsed as an integer, for `Int` properties.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self.kind {
            PropertyKind::Int { .. } => self.value.trim().parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}
