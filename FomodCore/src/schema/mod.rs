//! Static schema registry
//!
//! One [`NodeSchema`] per [`NodeKind`], mirroring `ModConfig5.0.xsd` for
//! `ModuleConfig.xml` and the designer's own layout for `Info.xml`. The tables
//! are compiled in and never change at runtime; a node's behaviour is entirely
//! driven by the entry of its kind.

mod config;
mod info;
pub mod resolver;

use std::fmt;

use crate::property::PropertyDecl;

pub use resolver::resolve;

/// Schema namespace attribute written on `<config>`.
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
/// Schema location written on `<config>`.
pub const MODULE_CONFIG_XSD: &str = "http://qconsulting.ca/fo3/ModConfig5.0.xsd";

/// Concrete node type. Several variants share an XML tag and are told apart
/// by ancestry (see [`resolver`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    // Info.xml
    InfoRoot,
    InfoName,
    InfoAuthor,
    InfoVersion,
    InfoId,
    InfoWebsite,
    InfoDescription,
    InfoGroups,
    InfoElement,

    // ModuleConfig.xml
    ConfigRoot,
    ModuleName,
    ModuleImage,
    ModuleDependencies,
    RequiredInstallFiles,
    InstallSteps,
    ConditionalFileInstalls,
    FileDependency,
    FlagDependency,
    GameDependency,
    FommDependency,
    /// `dependencies` directly under a `pattern`; exactly one per pattern.
    PatternDependencies,
    /// `dependencies` nested inside another dependency group.
    NestedDependencies,
    Visible,
    Files,
    File,
    Folder,
    InstallStep,
    OptionalFileGroups,
    Group,
    Plugins,
    Plugin,
    Description,
    Image,
    ConditionFlags,
    Flag,
    TypeDescriptor,
    Type,
    DefaultType,
    DependencyType,
    /// `patterns` under `dependencyType`.
    TypePatterns,
    /// `pattern` under `dependencyType/patterns`.
    TypePattern,
    /// `patterns` under `conditionalFileInstalls`.
    ConditionalPatterns,
    /// `pattern` under `conditionalFileInstalls/patterns`.
    ConditionalPattern,
}

/// Static description of one node type.
#[derive(Debug)]
pub struct NodeSchema {
    /// XML element name.
    pub tag: &'static str,
    /// Default display name.
    pub name: &'static str,
    /// Maximum same-type siblings; 0 = unbounded.
    pub allowed_instances: usize,
    /// Base sibling order, compared as a string.
    pub sort_key: &'static str,
    /// Whether element text is meaningful.
    pub allow_text: bool,
    /// Attribute/text bindings in declaration order.
    pub properties: &'static [PropertyDecl],
    /// Kinds permitted directly beneath.
    pub allowed_children: &'static [NodeKind],
    /// Each listed kind must keep at least one instance.
    pub required_children: &'static [NodeKind],
    /// At least one child of any listed kind must remain.
    pub at_least_one_of: &'static [NodeKind],
    /// Groups of mutually exclusive alternatives; exactly one member of each group.
    pub either_or: &'static [&'static [NodeKind]],
}

impl NodeSchema {
    /// Whether `kind` may appear directly beneath this node type.
    #[must_use]
    pub fn allows(&self, kind: NodeKind) -> bool {
        self.allowed_children.contains(&kind)
    }

    /// Whether this type can carry a metadata comment worth writing.
    #[must_use]
    pub fn holds_metadata(&self) -> bool {
        !self.allowed_children.is_empty() || self.allow_text
    }
}

impl NodeKind {
    /// Every kind, Info kinds first.
    pub const ALL: &'static [NodeKind] = &[
        Self::InfoRoot,
        Self::InfoName,
        Self::InfoAuthor,
        Self::InfoVersion,
        Self::InfoId,
        Self::InfoWebsite,
        Self::InfoDescription,
        Self::InfoGroups,
        Self::InfoElement,
        Self::ConfigRoot,
        Self::ModuleName,
        Self::ModuleImage,
        Self::ModuleDependencies,
        Self::RequiredInstallFiles,
        Self::InstallSteps,
        Self::ConditionalFileInstalls,
        Self::FileDependency,
        Self::FlagDependency,
        Self::GameDependency,
        Self::FommDependency,
        Self::PatternDependencies,
        Self::NestedDependencies,
        Self::Visible,
        Self::Files,
        Self::File,
        Self::Folder,
        Self::InstallStep,
        Self::OptionalFileGroups,
        Self::Group,
        Self::Plugins,
        Self::Plugin,
        Self::Description,
        Self::Image,
        Self::ConditionFlags,
        Self::Flag,
        Self::TypeDescriptor,
        Self::Type,
        Self::DefaultType,
        Self::DependencyType,
        Self::TypePatterns,
        Self::TypePattern,
        Self::ConditionalPatterns,
        Self::ConditionalPattern,
    ];

    /// The schema entry for this kind.
    #[must_use]
    pub fn schema(self) -> &'static NodeSchema {
        match self {
            Self::InfoRoot => &info::ROOT,
            Self::InfoName => &info::NAME,
            Self::InfoAuthor => &info::AUTHOR,
            Self::InfoVersion => &info::VERSION,
            Self::InfoId => &info::ID,
            Self::InfoWebsite => &info::WEBSITE,
            Self::InfoDescription => &info::DESCRIPTION,
            Self::InfoGroups => &info::GROUPS,
            Self::InfoElement => &info::ELEMENT,
            Self::ConfigRoot => &config::ROOT,
            Self::ModuleName => &config::MODULE_NAME,
            Self::ModuleImage => &config::MODULE_IMAGE,
            Self::ModuleDependencies => &config::MODULE_DEPENDENCIES,
            Self::RequiredInstallFiles => &config::REQUIRED_INSTALL_FILES,
            Self::InstallSteps => &config::INSTALL_STEPS,
            Self::ConditionalFileInstalls => &config::CONDITIONAL_FILE_INSTALLS,
            Self::FileDependency => &config::FILE_DEPENDENCY,
            Self::FlagDependency => &config::FLAG_DEPENDENCY,
            Self::GameDependency => &config::GAME_DEPENDENCY,
            Self::FommDependency => &config::FOMM_DEPENDENCY,
            Self::PatternDependencies => &config::PATTERN_DEPENDENCIES,
            Self::NestedDependencies => &config::NESTED_DEPENDENCIES,
            Self::Visible => &config::VISIBLE,
            Self::Files => &config::FILES,
            Self::File => &config::FILE,
            Self::Folder => &config::FOLDER,
            Self::InstallStep => &config::INSTALL_STEP,
            Self::OptionalFileGroups => &config::OPTIONAL_FILE_GROUPS,
            Self::Group => &config::GROUP,
            Self::Plugins => &config::PLUGINS,
            Self::Plugin => &config::PLUGIN,
            Self::Description => &config::DESCRIPTION,
            Self::Image => &config::IMAGE,
            Self::ConditionFlags => &config::CONDITION_FLAGS,
            Self::Flag => &config::FLAG,
            Self::TypeDescriptor => &config::TYPE_DESCRIPTOR,
            Self::Type => &config::TYPE,
            Self::DefaultType => &config::DEFAULT_TYPE,
            Self::DependencyType => &config::DEPENDENCY_TYPE,
            Self::TypePatterns => &config::TYPE_PATTERNS,
            Self::TypePattern => &config::TYPE_PATTERN,
            Self::ConditionalPatterns => &config::CONDITIONAL_PATTERNS,
            Self::ConditionalPattern => &config::CONDITIONAL_PATTERN,
        }
    }

    /// XML element name.
    #[must_use]
    pub fn tag(self) -> &'static str {
        self.schema().tag
    }

    /// Default display name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        self.schema().name
    }

    /// Whether this kind is a document root.
    #[must_use]
    pub fn is_root(self) -> bool {
        matches!(self, Self::InfoRoot | Self::ConfigRoot)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
