//! Tag resolution: raw element name + already-resolved ancestry -> node kind
//!
//! Most tags map to exactly one kind. The exceptions are `patterns`, `pattern`
//! and `dependencies`, which need the parent (and for `pattern` the
//! grandparent) to pick a kind. Callers resolve top-down, so the ancestors
//! passed in are always typed nodes, never raw strings.

use super::NodeKind;
use crate::error::{Error, Result};

/// Resolve `tag` given the kinds of its parent and grandparent.
///
/// # Errors
/// Returns [`Error::TagNotFound`] when no kind matches the tag in this context.
pub fn resolve(
    tag: &str,
    parent: Option<NodeKind>,
    grandparent: Option<NodeKind>,
) -> Result<NodeKind> {
    let kind = match tag {
        "patterns" => match parent {
            Some(NodeKind::ConditionalFileInstalls) => Some(NodeKind::ConditionalPatterns),
            Some(NodeKind::DependencyType) => Some(NodeKind::TypePatterns),
            _ => None,
        },
        "pattern" => match (parent, grandparent) {
            (Some(NodeKind::ConditionalPatterns), _)
            | (_, Some(NodeKind::ConditionalFileInstalls)) => Some(NodeKind::ConditionalPattern),
            (Some(NodeKind::TypePatterns), _) | (_, Some(NodeKind::DependencyType)) => {
                Some(NodeKind::TypePattern)
            }
            _ => None,
        },
        "dependencies" => match parent {
            Some(NodeKind::ConditionalPattern | NodeKind::TypePattern) => {
                Some(NodeKind::PatternDependencies)
            }
            _ => Some(NodeKind::NestedDependencies),
        },
        other => unique(other),
    };

    kind.ok_or_else(|| Error::TagNotFound {
        tag: tag.to_string(),
        parent: parent.map(|p| p.tag().to_string()),
    })
}

/// Kinds whose tag is not shared with any other kind.
fn unique(tag: &str) -> Option<NodeKind> {
    let kind = match tag {
        "fomod" => NodeKind::InfoRoot,
        "Name" => NodeKind::InfoName,
        "Author" => NodeKind::InfoAuthor,
        "Version" => NodeKind::InfoVersion,
        "Id" => NodeKind::InfoId,
        "Website" => NodeKind::InfoWebsite,
        "Description" => NodeKind::InfoDescription,
        "Groups" => NodeKind::InfoGroups,
        "element" => NodeKind::InfoElement,
        "config" => NodeKind::ConfigRoot,
        "moduleName" => NodeKind::ModuleName,
        "moduleImage" => NodeKind::ModuleImage,
        "moduleDependencies" => NodeKind::ModuleDependencies,
        "requiredInstallFiles" => NodeKind::RequiredInstallFiles,
        "installSteps" => NodeKind::InstallSteps,
        "conditionalFileInstalls" => NodeKind::ConditionalFileInstalls,
        "fileDependency" => NodeKind::FileDependency,
        "flagDependency" => NodeKind::FlagDependency,
        "gameDependency" => NodeKind::GameDependency,
        "fommDependency" => NodeKind::FommDependency,
        "visible" => NodeKind::Visible,
        "files" => NodeKind::Files,
        "file" => NodeKind::File,
        "folder" => NodeKind::Folder,
        "installStep" => NodeKind::InstallStep,
        "optionalFileGroups" => NodeKind::OptionalFileGroups,
        "group" => NodeKind::Group,
        "plugins" => NodeKind::Plugins,
        "plugin" => NodeKind::Plugin,
        "description" => NodeKind::Description,
        "image" => NodeKind::Image,
        "conditionFlags" => NodeKind::ConditionFlags,
        "flag" => NodeKind::Flag,
        "typeDescriptor" => NodeKind::TypeDescriptor,
        "type" => NodeKind::Type,
        "defaultType" => NodeKind::DefaultType,
        "dependencyType" => NodeKind::DependencyType,
        _ => return None,
    };
    Some(kind)
}
