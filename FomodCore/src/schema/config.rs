//! `ModuleConfig.xml` node types (`ModConfig5.0.xsd`)

use super::{MODULE_CONFIG_XSD, NodeKind, NodeSchema, XSI_NAMESPACE};
use crate::property::PropertyDecl;

const NO_KINDS: &[NodeKind] = &[];

const BOOLEAN: &[&str] = &["true", "false"];
const BOOLEAN_OFF: &[&str] = &["false", "true"];
const ORDER: &[&str] = &["Ascending", "Descending", "Explicit"];
const OPERATOR: &[&str] = &["And", "Or"];
const FILE_STATE: &[&str] = &["Missing", "Inactive", "Active"];
const POSITION: &[&str] = &["Left", "Right", "RightOfImage"];
const GROUP_TYPE: &[&str] = &[
    "SelectAtLeastOne",
    "SelectAtMostOne",
    "SelectExactlyOne",
    "SelectAll",
    "SelectAny",
];
const PLUGIN_TYPE: &[&str] = &["Required", "Optional", "Recommended", "NotUsable", "CouldBeUsable"];

const INT_MIN: i64 = -2_147_483_648;
const INT_MAX: i64 = 2_147_483_647;

const DEPENDENCY_CHILDREN: &[NodeKind] = &[
    NodeKind::FileDependency,
    NodeKind::FlagDependency,
    NodeKind::GameDependency,
    NodeKind::FommDependency,
    NodeKind::NestedDependencies,
];

const FILE_LIST_CHILDREN: &[NodeKind] = &[NodeKind::File, NodeKind::Folder];

const OPERATOR_PROPS: &[PropertyDecl] = &[PropertyDecl::combo("Type", "operator", OPERATOR)];

const ORDER_PROPS: &[PropertyDecl] = &[PropertyDecl::combo("Order", "order", ORDER)];

const fn node(
    tag: &'static str,
    name: &'static str,
    sort_key: &'static str,
    allowed_instances: usize,
) -> NodeSchema {
    NodeSchema {
        tag,
        name,
        allowed_instances,
        sort_key,
        allow_text: false,
        properties: &[],
        allowed_children: NO_KINDS,
        required_children: NO_KINDS,
        at_least_one_of: NO_KINDS,
        either_or: &[],
    }
}

const fn dependency_group(
    tag: &'static str,
    name: &'static str,
    sort_key: &'static str,
    allowed_instances: usize,
) -> NodeSchema {
    NodeSchema {
        properties: OPERATOR_PROPS,
        allowed_children: DEPENDENCY_CHILDREN,
        at_least_one_of: DEPENDENCY_CHILDREN,
        ..node(tag, name, sort_key, allowed_instances)
    }
}

const fn file_item(
    tag: &'static str,
    name: &'static str,
    properties: &'static [PropertyDecl],
) -> NodeSchema {
    NodeSchema {
        properties,
        ..node(tag, name, "00", 0)
    }
}

pub(super) static ROOT: NodeSchema = NodeSchema {
    properties: &[
        PropertyDecl::text("Schema Namespace", "xmlns:xsi").fixed(XSI_NAMESPACE),
        PropertyDecl::text("Schema", "xsi:noNamespaceSchemaLocation").fixed(MODULE_CONFIG_XSD),
    ],
    allowed_children: &[
        NodeKind::ModuleName,
        NodeKind::ModuleImage,
        NodeKind::ModuleDependencies,
        NodeKind::RequiredInstallFiles,
        NodeKind::InstallSteps,
        NodeKind::ConditionalFileInstalls,
    ],
    required_children: &[NodeKind::ModuleName],
    ..node("config", "Installer", "00", 1)
};

pub(super) static MODULE_NAME: NodeSchema = NodeSchema {
    allow_text: true,
    properties: &[
        PropertyDecl::node_text("Name"),
        PropertyDecl::combo("Position", "position", POSITION),
        PropertyDecl::colour("Colour", "colour", "000000"),
    ],
    ..node("moduleName", "Name", "00", 1)
};

pub(super) static MODULE_IMAGE: NodeSchema = NodeSchema {
    properties: &[
        PropertyDecl::file("Path", "path"),
        PropertyDecl::combo("Show Image", "showImage", BOOLEAN),
        PropertyDecl::combo("Show Fade", "showFade", BOOLEAN),
        PropertyDecl::int("Height", "height", -1, INT_MAX, "-1"),
    ],
    ..node("moduleImage", "Image", "01", 1)
};

pub(super) static MODULE_DEPENDENCIES: NodeSchema =
    dependency_group("moduleDependencies", "Mod Requirements", "02", 1);

pub(super) static REQUIRED_INSTALL_FILES: NodeSchema = NodeSchema {
    allowed_children: FILE_LIST_CHILDREN,
    ..node("requiredInstallFiles", "Mandatory Files", "03", 1)
};

pub(super) static INSTALL_STEPS: NodeSchema = NodeSchema {
    properties: ORDER_PROPS,
    allowed_children: &[NodeKind::InstallStep],
    required_children: &[NodeKind::InstallStep],
    ..node("installSteps", "Installation Steps", "04", 1)
};

pub(super) static CONDITIONAL_FILE_INSTALLS: NodeSchema = NodeSchema {
    allowed_children: &[NodeKind::ConditionalPatterns],
    required_children: &[NodeKind::ConditionalPatterns],
    ..node("conditionalFileInstalls", "Conditional Installation", "05", 1)
};

pub(super) static FILE_DEPENDENCY: NodeSchema = NodeSchema {
    properties: &[
        PropertyDecl::file("File", "file"),
        PropertyDecl::combo("State", "state", FILE_STATE),
    ],
    ..node("fileDependency", "File Dependency", "00", 0)
};

pub(super) static FLAG_DEPENDENCY: NodeSchema = NodeSchema {
    properties: &[
        PropertyDecl::text("Flag", "flag"),
        PropertyDecl::text("Value", "value"),
    ],
    ..node("flagDependency", "Flag Dependency", "00", 0)
};

pub(super) static GAME_DEPENDENCY: NodeSchema = NodeSchema {
    properties: &[PropertyDecl::text("Version", "version")],
    ..node("gameDependency", "Game Dependency", "00", 0)
};

pub(super) static FOMM_DEPENDENCY: NodeSchema = NodeSchema {
    properties: &[PropertyDecl::text("Version", "version")],
    ..node("fommDependency", "Mod Manager Dependency", "00", 0)
};

pub(super) static PATTERN_DEPENDENCIES: NodeSchema =
    dependency_group("dependencies", "Dependencies", "00", 1);

pub(super) static NESTED_DEPENDENCIES: NodeSchema =
    dependency_group("dependencies", "Dependencies", "00", 0);

pub(super) static VISIBLE: NodeSchema = dependency_group("visible", "Visibility", "00", 1);

pub(super) static FILES: NodeSchema = NodeSchema {
    allowed_children: FILE_LIST_CHILDREN,
    ..node("files", "Files", "02", 1)
};

const FILE_PROPS: &[PropertyDecl] = &[
    PropertyDecl::file("Source", "source"),
    PropertyDecl::text("Destination", "destination").optional(),
    PropertyDecl::combo("Always Install", "alwaysInstall", BOOLEAN_OFF),
    PropertyDecl::combo("Install If Usable", "installIfUsable", BOOLEAN_OFF),
    PropertyDecl::int("Priority", "priority", INT_MIN, INT_MAX, "0"),
];

const FOLDER_PROPS: &[PropertyDecl] = &[
    PropertyDecl::folder("Source", "source"),
    PropertyDecl::text("Destination", "destination").optional(),
    PropertyDecl::combo("Always Install", "alwaysInstall", BOOLEAN_OFF),
    PropertyDecl::combo("Install If Usable", "installIfUsable", BOOLEAN_OFF),
    PropertyDecl::int("Priority", "priority", INT_MIN, INT_MAX, "0"),
];

pub(super) static FILE: NodeSchema = file_item("file", "File", FILE_PROPS);

pub(super) static FOLDER: NodeSchema = file_item("folder", "Folder", FOLDER_PROPS);

pub(super) static INSTALL_STEP: NodeSchema = NodeSchema {
    properties: &[PropertyDecl::text("Name", "name")],
    allowed_children: &[NodeKind::Visible, NodeKind::OptionalFileGroups],
    required_children: &[NodeKind::OptionalFileGroups],
    ..node("installStep", "Install Step", "00", 0)
};

pub(super) static OPTIONAL_FILE_GROUPS: NodeSchema = NodeSchema {
    properties: ORDER_PROPS,
    allowed_children: &[NodeKind::Group],
    required_children: &[NodeKind::Group],
    ..node("optionalFileGroups", "Option Groups", "01", 1)
};

pub(super) static GROUP: NodeSchema = NodeSchema {
    properties: &[
        PropertyDecl::text("Name", "name"),
        PropertyDecl::combo("Type", "type", GROUP_TYPE),
    ],
    allowed_children: &[NodeKind::Plugins],
    required_children: &[NodeKind::Plugins],
    ..node("group", "Group", "00", 0)
};

pub(super) static PLUGINS: NodeSchema = NodeSchema {
    properties: ORDER_PROPS,
    allowed_children: &[NodeKind::Plugin],
    required_children: &[NodeKind::Plugin],
    ..node("plugins", "Plugins", "00", 1)
};

pub(super) static PLUGIN: NodeSchema = NodeSchema {
    properties: &[PropertyDecl::text("Name", "name")],
    allowed_children: &[
        NodeKind::Description,
        NodeKind::Image,
        NodeKind::Files,
        NodeKind::ConditionFlags,
        NodeKind::TypeDescriptor,
    ],
    required_children: &[NodeKind::Description, NodeKind::TypeDescriptor],
    at_least_one_of: &[NodeKind::Files, NodeKind::ConditionFlags],
    ..node("plugin", "Plugin", "00", 0)
};

pub(super) static DESCRIPTION: NodeSchema = NodeSchema {
    allow_text: true,
    properties: &[PropertyDecl::node_text("Description")],
    ..node("description", "Description", "00", 1)
};

pub(super) static IMAGE: NodeSchema = NodeSchema {
    properties: &[PropertyDecl::file("Path", "path")],
    ..node("image", "Image", "01", 1)
};

pub(super) static CONDITION_FLAGS: NodeSchema = NodeSchema {
    allowed_children: &[NodeKind::Flag],
    required_children: &[NodeKind::Flag],
    ..node("conditionFlags", "Flags", "03", 1)
};

pub(super) static FLAG: NodeSchema = NodeSchema {
    allow_text: true,
    properties: &[
        PropertyDecl::text("Name", "name"),
        PropertyDecl::node_text("Value"),
    ],
    ..node("flag", "Flag", "00", 0)
};

pub(super) static TYPE_DESCRIPTOR: NodeSchema = NodeSchema {
    allowed_children: &[NodeKind::Type, NodeKind::DependencyType],
    either_or: &[&[NodeKind::Type, NodeKind::DependencyType]],
    ..node("typeDescriptor", "Type Descriptor", "04", 1)
};

pub(super) static TYPE: NodeSchema = NodeSchema {
    properties: &[PropertyDecl::combo("Name", "name", PLUGIN_TYPE)],
    ..node("type", "Type", "01", 1)
};

pub(super) static DEFAULT_TYPE: NodeSchema = NodeSchema {
    properties: &[PropertyDecl::combo("Name", "name", PLUGIN_TYPE)],
    ..node("defaultType", "Default Type", "00", 1)
};

pub(super) static DEPENDENCY_TYPE: NodeSchema = NodeSchema {
    allowed_children: &[NodeKind::DefaultType, NodeKind::TypePatterns],
    required_children: &[NodeKind::DefaultType, NodeKind::TypePatterns],
    ..node("dependencyType", "Dependency Type", "01", 1)
};

pub(super) static TYPE_PATTERNS: NodeSchema = NodeSchema {
    allowed_children: &[NodeKind::TypePattern],
    required_children: &[NodeKind::TypePattern],
    ..node("patterns", "Patterns", "01", 1)
};

pub(super) static TYPE_PATTERN: NodeSchema = NodeSchema {
    allowed_children: &[NodeKind::PatternDependencies, NodeKind::Type],
    required_children: &[NodeKind::PatternDependencies, NodeKind::Type],
    ..node("pattern", "Pattern", "00", 0)
};

pub(super) static CONDITIONAL_PATTERNS: NodeSchema = NodeSchema {
    allowed_children: &[NodeKind::ConditionalPattern],
    required_children: &[NodeKind::ConditionalPattern],
    ..node("patterns", "Patterns", "00", 1)
};

pub(super) static CONDITIONAL_PATTERN: NodeSchema = NodeSchema {
    allowed_children: &[NodeKind::PatternDependencies, NodeKind::Files],
    required_children: &[NodeKind::PatternDependencies, NodeKind::Files],
    ..node("pattern", "Pattern", "00", 0)
};
