//! `Info.xml` node types

use super::{NodeKind, NodeSchema};
use crate::property::PropertyDecl;

const NO_KINDS: &[NodeKind] = &[];

const fn text_node(
    tag: &'static str,
    name: &'static str,
    sort_key: &'static str,
    properties: &'static [PropertyDecl],
) -> NodeSchema {
    NodeSchema {
        tag,
        name,
        allowed_instances: 1,
        sort_key,
        allow_text: true,
        properties,
        allowed_children: NO_KINDS,
        required_children: NO_KINDS,
        at_least_one_of: NO_KINDS,
        either_or: &[],
    }
}

pub(super) static ROOT: NodeSchema = NodeSchema {
    tag: "fomod",
    name: "Info",
    allowed_instances: 1,
    sort_key: "00",
    allow_text: false,
    properties: &[],
    allowed_children: &[
        NodeKind::InfoName,
        NodeKind::InfoAuthor,
        NodeKind::InfoVersion,
        NodeKind::InfoId,
        NodeKind::InfoWebsite,
        NodeKind::InfoDescription,
        NodeKind::InfoGroups,
    ],
    required_children: NO_KINDS,
    at_least_one_of: NO_KINDS,
    either_or: &[],
};

const NAME_PROPS: &[PropertyDecl] = &[PropertyDecl::node_text("Name")];
const AUTHOR_PROPS: &[PropertyDecl] = &[PropertyDecl::node_text("Author")];
const ID_PROPS: &[PropertyDecl] = &[PropertyDecl::node_text("ID")];
const WEBSITE_PROPS: &[PropertyDecl] = &[PropertyDecl::node_text("Website")];
const DESCRIPTION_PROPS: &[PropertyDecl] = &[PropertyDecl::node_text("Description")];
const CATEGORY_PROPS: &[PropertyDecl] = &[PropertyDecl::node_text("Category")];

const VERSION_PROPS: &[PropertyDecl] = &[
    PropertyDecl::text("Machine Version", "MachineVersion").optional(),
    PropertyDecl::node_text("Version"),
];

pub(super) static NAME: NodeSchema = text_node("Name", "Name", "00", NAME_PROPS);

pub(super) static AUTHOR: NodeSchema = text_node("Author", "Author", "01", AUTHOR_PROPS);

pub(super) static VERSION: NodeSchema = text_node("Version", "Version", "02", VERSION_PROPS);

pub(super) static ID: NodeSchema = text_node("Id", "ID", "03", ID_PROPS);

pub(super) static WEBSITE: NodeSchema = text_node("Website", "Website", "04", WEBSITE_PROPS);

pub(super) static DESCRIPTION: NodeSchema =
    text_node("Description", "Description", "05", DESCRIPTION_PROPS);

pub(super) static GROUPS: NodeSchema = NodeSchema {
    tag: "Groups",
    name: "Categories",
    allowed_instances: 1,
    sort_key: "06",
    allow_text: false,
    properties: &[],
    allowed_children: &[NodeKind::InfoElement],
    required_children: NO_KINDS,
    at_least_one_of: NO_KINDS,
    either_or: &[],
};

pub(super) static ELEMENT: NodeSchema = NodeSchema {
    allowed_instances: 0,
    ..text_node("element", "Category", "00", CATEGORY_PROPS)
};
