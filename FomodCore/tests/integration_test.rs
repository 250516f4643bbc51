use fomodcore::prelude::*;
use pretty_assertions::assert_eq;
use quick_xml::events::Event;
use std::fs;
use std::path::Path;
use tempfile::{TempDir, tempdir};

const INFO: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<fomod>
    <Name>Better Armour</Name>
    <Author>Someone</Author>
    <Version MachineVersion="1.2.0">1.2</Version>
    <Groups>
        <element>Armour</element>
        <element>Textures</element>
    </Groups>
</fomod>
"#;

const CONFIG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<config xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:noNamespaceSchemaLocation="http://qconsulting.ca/fo3/ModConfig5.0.xsd">
    <moduleName>Better Armour</moduleName>
    <requiredInstallFiles>
        <folder source="core" destination=""/>
    </requiredInstallFiles>
    <installSteps order="Explicit">
        <installStep name="Body">
            <optionalFileGroups order="Explicit">
                <group name="Meshes" type="SelectExactlyOne">
                    <plugins order="Explicit">
                        <plugin name="Slim">
                            <description>Slim variant</description>
                            <files>
                                <file source="slim.esp"/>
                            </files>
                            <typeDescriptor>
                                <type name="Optional"/>
                            </typeDescriptor>
                        </plugin>
                        <plugin name="Heavy">
                            <description>Heavy variant</description>
                            <conditionFlags>
                                <flag name="heavy">On</flag>
                            </conditionFlags>
                            <typeDescriptor>
                                <type name="Recommended"/>
                            </typeDescriptor>
                        </plugin>
                    </plugins>
                </group>
            </optionalFileGroups>
        </installStep>
    </installSteps>
    <conditionalFileInstalls>
        <patterns>
            <pattern>
                <dependencies operator="And">
                    <flagDependency flag="heavy" value="On"/>
                </dependencies>
                <files>
                    <file source="heavy.esp"/>
                </files>
            </pattern>
        </patterns>
    </conditionalFileInstalls>
</config>
"#;

fn write_package(root: &Path, dir: &str, info: &str, config: &str) {
    let fomod = root.join(dir);
    fs::create_dir_all(&fomod).unwrap();
    fs::write(fomod.join("Info.xml"), info).unwrap();
    fs::write(fomod.join("ModuleConfig.xml"), config).unwrap();
}

fn import(root: &Path) -> Installer {
    Installer::import(root, &ImportOptions::default())
        .unwrap()
        .into_installer()
        .unwrap()
}

fn read_exported(root: &Path) -> (String, String) {
    let fomod = root.join("fomod");
    (
        fs::read_to_string(fomod.join("Info.xml")).unwrap(),
        fs::read_to_string(fomod.join("ModuleConfig.xml")).unwrap(),
    )
}

/// Text content of every `tag` element, read without any whitespace trimming.
fn untrimmed_texts(xml: &str, tag: &str) -> Vec<String> {
    let mut reader = quick_xml::Reader::from_str(xml);
    let mut texts = Vec::new();
    let mut current: Option<String> = None;
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) if e.name().as_ref() == tag.as_bytes() => current = Some(String::new()),
            Event::Text(e) => {
                if let Some(text) = current.as_mut() {
                    text.push_str(&e.unescape().unwrap());
                }
            }
            Event::End(e) if e.name().as_ref() == tag.as_bytes() => texts.extend(current.take()),
            Event::Eof => break,
            _ => {}
        }
    }
    texts
}

fn only_child(tree: &Tree, parent: NodeId, kind: NodeKind) -> NodeId {
    let children = tree.children_of_kind(parent, kind).unwrap();
    assert_eq!(children.len(), 1, "expected one <{}>", kind.tag());
    children[0]
}

#[test]
fn test_directory_without_fomod_is_not_present() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("readme.txt"), "not an installer").unwrap();

    let outcome = Installer::import(temp.path(), &ImportOptions::default()).unwrap();
    assert!(matches!(outcome, ImportOutcome::NotPresent { .. }));
    assert!(matches!(outcome.into_installer(), Err(Error::NotPresent { .. })));
}

#[test]
fn test_nested_group_imports_typed() {
    let config = r#"<config>
        <moduleName>Mod</moduleName>
        <installSteps order="Explicit">
            <installStep name="Step">
                <optionalFileGroups order="Explicit">
                    <group type="SelectAny" name="G">
                        <plugins>
                            <plugin name="P">
                                <description>d</description>
                                <files/>
                                <conditionFlags/>
                            </plugin>
                        </plugins>
                    </group>
                </optionalFileGroups>
            </installStep>
        </installSteps>
    </config>"#;
    let temp = tempdir().unwrap();
    write_package(temp.path(), "fomod", "<fomod/>", config);

    let installer = import(temp.path());
    let tree = &installer.config;
    let steps = only_child(tree, tree.root(), NodeKind::InstallSteps);
    let step = only_child(tree, steps, NodeKind::InstallStep);
    let groups = only_child(tree, step, NodeKind::OptionalFileGroups);
    let group = only_child(tree, groups, NodeKind::Group);
    assert_eq!(tree.node(group).unwrap().property("type").unwrap().value(), "SelectAny");

    assert_eq!(tree.children(group).unwrap().len(), 1);
    let plugins = only_child(tree, group, NodeKind::Plugins);
    assert_eq!(tree.children(plugins).unwrap().len(), 1);
    let plugin = only_child(tree, plugins, NodeKind::Plugin);
    assert_eq!(tree.node(plugin).unwrap().display_name(), "P");
    assert_eq!(
        tree.path(plugin).unwrap(),
        "config/installSteps/installStep/optionalFileGroups/group/plugins/plugin"
    );
}

#[test]
fn test_second_module_name_is_rejected() {
    let mut installer = Installer::new();
    let tree = &mut installer.config;
    let root = tree.root();

    assert!(!tree.can_add_child(root, NodeKind::ModuleName).unwrap());
    assert!(matches!(
        tree.append_child(root, NodeKind::ModuleName),
        Err(Error::CannotAddChild { parent: "config", child: "moduleName" })
    ));

    let extra = tree.create_node(NodeKind::ModuleName);
    assert!(tree.add_child(root, extra).is_err());
    assert_eq!(tree.children_of_kind(root, NodeKind::ModuleName).unwrap().len(), 1);
}

#[test]
fn test_sole_install_step_is_protected() {
    let mut tree = Tree::new(NodeKind::ConfigRoot);
    let steps = tree.append_child(tree.root(), NodeKind::InstallSteps).unwrap();
    let first = tree.append_child(steps, NodeKind::InstallStep).unwrap();

    assert!(matches!(
        tree.remove_child(steps, first),
        Err(Error::CannotRemoveRequiredChild { parent: "installSteps", child: "installStep" })
    ));
    assert_eq!(tree.children(steps).unwrap(), vec![first]);

    let second = tree.append_child(steps, NodeKind::InstallStep).unwrap();
    tree.remove_child(steps, first).unwrap();
    assert_eq!(tree.children(steps).unwrap(), vec![second]);
    assert!(!tree.contains(first));
    assert!(tree.remove_child(steps, second).is_err());
}

#[test]
fn test_unknown_element_is_pruned() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let config = r#"<config>
        <moduleName>Mod</moduleName>
        <bogus/>
        <requiredInstallFiles>
            <file source="a.esp"/>
        </requiredInstallFiles>
    </config>"#;
    let temp = tempdir().unwrap();
    write_package(temp.path(), "fomod", "<fomod/>", config);

    let installer = import(temp.path());
    let tree = &installer.config;
    let tags: Vec<&str> = tree
        .children(tree.root())
        .unwrap()
        .into_iter()
        .map(|id| tree.node(id).unwrap().tag())
        .collect();
    assert_eq!(tags, vec!["moduleName", "requiredInstallFiles"]);

    // strict import refuses the same file
    let strict = Installer::import(temp.path(), &ImportOptions::new().with_strict(true));
    assert!(matches!(strict, Err(Error::TagNotFound { .. })));
}

#[test]
fn test_metadata_survives_export_and_import() {
    let temp = tempdir().unwrap();
    let mut installer = Installer::new();
    let tree = &mut installer.config;
    let steps = tree.append_child(tree.root(), NodeKind::InstallSteps).unwrap();
    let step = tree.append_child(steps, NodeKind::InstallStep).unwrap();
    let groups = tree.append_child(step, NodeKind::OptionalFileGroups).unwrap();
    let group = tree.append_child(groups, NodeKind::Group).unwrap();
    let plugins = tree.append_child(group, NodeKind::Plugins).unwrap();
    let plugin = tree.append_child(plugins, NodeKind::Plugin).unwrap();
    tree.set_property(plugin, "name", "Boss").unwrap();
    tree.set_user_sort(plugin, 5).unwrap();

    installer.export(temp.path(), &ExportOptions::default()).unwrap();
    let (_, config) = read_exported(temp.path());
    assert!(config.contains(
        r#"<!--<designer.metadata.do.not.edit> {"name":"Boss","user_sort":"0000005"}-->"#
    ));

    let reread = import(temp.path());
    let tree = &reread.config;
    let plugin = tree
        .descendants(tree.root())
        .unwrap()
        .into_iter()
        .find(|id| tree.node(*id).unwrap().kind() == NodeKind::Plugin)
        .unwrap();
    let node = tree.node(plugin).unwrap();
    assert_eq!(node.display_name(), "Boss");
    assert_eq!(node.user_sort_key(), "0000005");
}

#[test]
fn test_export_is_idempotent() {
    let first = TempDir::new().unwrap();
    write_package(first.path(), "Fomod", INFO, CONFIG);
    import(first.path()).export(first.path(), &ExportOptions::default()).unwrap();
    let once = fs::read_to_string(first.path().join("Fomod").join("ModuleConfig.xml")).unwrap();
    let once_info = fs::read_to_string(first.path().join("Fomod").join("Info.xml")).unwrap();

    let second = TempDir::new().unwrap();
    write_package(second.path(), "fomod", &once_info, &once);
    import(second.path()).export(second.path(), &ExportOptions::default()).unwrap();
    let (twice_info, twice) = read_exported(second.path());

    assert_eq!(once_info, twice_info);
    assert_eq!(once, twice);
}

#[test]
fn test_export_keeps_content() {
    let temp = TempDir::new().unwrap();
    write_package(temp.path(), "fomod", INFO, CONFIG);
    let mut installer = import(temp.path());
    assert!(installer.config.validate(installer.config.root()).unwrap().is_empty());

    let (info, config) = installer.to_xml_strings(&ExportOptions::default()).unwrap();
    assert!(info.contains(r#"<Version MachineVersion="1.2.0">1.2</Version>"#));
    assert!(info.contains("<element>Textures</element>"));
    assert!(config.contains(r#"<group name="Meshes" type="SelectExactlyOne">"#));
    assert!(config.contains(
        r#"<flag name="heavy">On<!--<designer.metadata.do.not.edit> {"name":"heavy"}--></flag>"#
    ));
    assert!(config.contains("<description>Slim variant</description>"));
    assert!(config.contains(
        r#"<moduleName position="Left" colour="000000">Better Armour</moduleName>"#
    ));
    assert!(config.contains(r#"<flagDependency flag="heavy" value="On"/>"#));

    // plain comments are kept alongside the designer's
    let reread = Installer::from_xml_strings(
        &info,
        &config.replace("<moduleName", "<!--hand written-->\n<moduleName"),
        &ImportOptions::default(),
    )
    .unwrap();
    assert_eq!(reread.config.comments(reread.config.root()).unwrap(), vec!["hand written"]);
}

#[test]
fn test_text_is_exact_next_to_metadata_comments() {
    let mut installer =
        Installer::from_xml_strings(INFO, CONFIG, &ImportOptions::default()).unwrap();
    let config = &mut installer.config;
    let root = config.root();
    let module_name = only_child(config, root, NodeKind::ModuleName);
    config.set_display_name(module_name, "Title").unwrap();
    let description = config
        .descendants(root)
        .unwrap()
        .into_iter()
        .find(|id| config.node(*id).unwrap().kind() == NodeKind::Description)
        .unwrap();
    config.set_display_name(description, "Blurb").unwrap();
    let info = &mut installer.info;
    let name = only_child(info, info.root(), NodeKind::InfoName);
    info.set_display_name(name, "Mod Name").unwrap();

    let (info, config) = installer.to_xml_strings(&ExportOptions::default()).unwrap();
    assert!(config.contains(r#"{"name":"Title"}--></moduleName>"#));
    assert!(config.contains(r#"{"name":"Blurb"}--></description>"#));

    assert_eq!(untrimmed_texts(&config, "flag"), vec!["On"]);
    assert_eq!(untrimmed_texts(&config, "moduleName"), vec!["Better Armour"]);
    assert_eq!(untrimmed_texts(&config, "description"), vec!["Slim variant", "Heavy variant"]);
    assert_eq!(untrimmed_texts(&info, "Name"), vec!["Better Armour"]);
}

#[test]
fn test_case_insensitive_lookup() {
    let temp = tempdir().unwrap();
    let fomod = temp.path().join("FOMOD");
    fs::create_dir(&fomod).unwrap();
    fs::write(fomod.join("info.xml"), INFO).unwrap();
    fs::write(fomod.join("MODULECONFIG.XML"), CONFIG).unwrap();

    let mut installer = import(temp.path());
    installer.export(temp.path(), &ExportOptions::default()).unwrap();

    let mut names: Vec<String> = fs::read_dir(&fomod)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["MODULECONFIG.XML".to_string(), "info.xml".to_string()]);
}

#[test]
fn test_cardinality_never_exceeded() {
    for &parent_kind in NodeKind::ALL {
        for &child_kind in parent_kind.schema().allowed_children {
            let limit = child_kind.schema().allowed_instances;
            if limit == 0 {
                continue;
            }
            let mut tree = Tree::new(parent_kind);
            let root = tree.root();
            for _ in 0..limit + 2 {
                let _ = tree.append_child(root, child_kind);
            }
            assert_eq!(
                tree.children_of_kind(root, child_kind).unwrap().len(),
                limit,
                "<{}> under <{}>",
                child_kind.tag(),
                parent_kind.tag()
            );
        }
    }
}

#[test]
fn test_required_children_never_drop_to_zero() {
    for &kind in NodeKind::ALL {
        if kind.schema().required_children.is_empty() {
            continue;
        }
        let mut tree = Tree::skeleton(kind);
        let root = tree.root();
        let before = tree.children(root).unwrap();
        for &child in &before {
            assert!(matches!(
                tree.remove_child(root, child),
                Err(Error::CannotRemoveRequiredChild { .. })
            ));
        }
        assert_eq!(tree.children(root).unwrap(), before, "<{}>", kind.tag());
    }
}

#[test]
fn test_sorting_twice_changes_nothing() {
    let mut installer =
        Installer::from_xml_strings(INFO, CONFIG, &ImportOptions::default()).unwrap();
    let root = installer.config.root();
    installer.config.sort_tree(root).unwrap();
    let once = freeze_to_xml(&installer.config, root).unwrap();
    installer.config.sort_tree(root).unwrap();
    assert_eq!(freeze_to_xml(&installer.config, root).unwrap(), once);
}
