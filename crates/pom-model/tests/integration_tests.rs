//! Integration tests using fixture files.

use pom_model::{
    Configuration, DependencyScope, DocumentRoot, PomError, Project, ReadOptions, Reflective,
    WriteOptions, XmlNode, read_pom, read_pom_file, read_pom_with, write_pom, write_pom_file,
    write_pom_with,
};

fn load_fixture(name: &str) -> String {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {name}: {e}"))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn full_project() -> (DocumentRoot, Project) {
    let root = read_pom(&load_fixture("full_pom.xml")).unwrap();
    let project = root.project().cloned().unwrap();
    (root, project)
}

#[test]
fn test_fixture_coordinates() {
    init_tracing();
    let (_, project) = full_project();

    assert_eq!(project.model_version(), Some("4.0.0"));
    assert!(project.group_id().is_none());
    assert_eq!(project.effective_group_id(), Some("org.example"));
    assert_eq!(project.artifact_id(), Some("sample-app"));
    assert_eq!(project.version(), Some("1.2.0-SNAPSHOT"));
    assert_eq!(project.effective_packaging(), "pom");
    assert_eq!(project.description(), Some("Tools & libraries"));
    assert_eq!(project.inception_year(), Some("2019"));

    let parent = project.parent().unwrap();
    assert_eq!(parent.relative_path(), Some("../parent/pom.xml"));
    assert_eq!(parent.gav(), Some("org.example:example-parent:7".into()));

    assert_eq!(project.prerequisites().unwrap().effective_maven(), "3.6.3");
}

#[test]
fn test_fixture_metadata() {
    let (_, project) = full_project();

    assert_eq!(project.licenses().len(), 2);
    assert_eq!(project.licenses()[0].distribution(), Some("repo"));
    assert_eq!(project.licenses()[1].comments(), Some(""));
    assert!(project.licenses()[1].url().is_none());

    assert_eq!(project.modules(), ["core", "cli"]);

    let scm = project.scm().unwrap();
    assert!(!scm.is_tag_set());
    assert_eq!(scm.effective_tag(), "HEAD");
    assert_eq!(
        scm.developer_connection(),
        Some("scm:git:ssh://git@example.org/sample.git")
    );

    assert_eq!(project.issue_management().unwrap().system(), Some("GitHub"));

    let distribution = project.distribution_management().unwrap();
    assert_eq!(distribution.status(), Some("deployed"));
    assert_eq!(
        distribution.relocation().unwrap().message(),
        Some("Moved to org.example.sample")
    );
}

#[test]
fn test_fixture_dependencies() {
    let (_, project) = full_project();

    let managed = project.dependency_management().unwrap();
    let bom = managed.find("org.junit", "junit-bom").unwrap();
    assert_eq!(bom.kind(), Some("pom"));
    assert_eq!(bom.scope_kind(), DependencyScope::Import);

    let deps = project.dependencies();
    assert_eq!(deps.len(), 2);
    assert_eq!(
        deps[0].coordinates(),
        Some("org.apache.commons:commons-lang3".into())
    );
    assert_eq!(deps[0].exclusions().len(), 1);
    assert_eq!(
        deps[0].exclusions()[0].artifact_id(),
        Some("commons-logging")
    );
    assert!(deps[1].version().is_none());
    assert_eq!(deps[1].scope_kind(), DependencyScope::Test);
    assert!(deps[1].is_optional());
}

#[test]
fn test_fixture_build() {
    let (_, project) = full_project();
    let build = project.build().unwrap();

    assert_eq!(build.final_name(), Some("sample"));
    let surefire = build
        .plugin_management()
        .unwrap()
        .find("org.apache.maven.plugins:maven-surefire-plugin")
        .unwrap();
    assert_eq!(surefire.version(), Some("3.2.2"));

    let compiler = build
        .find_plugin("org.apache.maven.plugins:maven-compiler-plugin")
        .unwrap();
    let configuration = compiler.configuration().unwrap();
    assert_eq!(configuration.string_value("release"), Some("17".into()));
    assert_eq!(
        configuration.list_value("compilerArgs"),
        Some(vec!["-Xlint:all".to_string(), "-Werror".to_string()])
    );
    assert!(
        configuration
            .root()
            .children
            .iter()
            .any(|n| matches!(n, XmlNode::Comment(c) if c.trim() == "keep warnings visible"))
    );
    assert_eq!(compiler.dependencies()[0].artifact_id(), Some("asm"));
}

#[test]
fn test_fixture_reporting_and_profiles() {
    let (_, project) = full_project();

    let reporting = project.reporting().unwrap();
    assert_eq!(reporting.output_directory(), Some("target/site"));
    let javadoc = &reporting.plugins()[0];
    assert_eq!(javadoc.report_sets().len(), 2);
    let default_set = javadoc.report_set("default").unwrap();
    assert!(!default_set.is_id_set());
    assert_eq!(default_set.reports(), ["javadoc", "test-javadoc"]);
    assert_eq!(
        javadoc.report_set("aggregate").unwrap().inherited(),
        Some("false")
    );

    let profiles = project.profiles();
    assert_eq!(profiles.len(), 2);
    let os = profiles[0].activation().unwrap().os().unwrap();
    assert_eq!(os.family(), Some("windows"));
    assert!(os.name().is_none());

    let generated = profiles[1].activation().unwrap();
    assert!(!generated.is_active_by_default());
    assert_eq!(generated.jdk(), Some("[17,)"));
    assert_eq!(
        generated.file().unwrap().missing(),
        Some("target/generated-sources")
    );
    assert_eq!(profiles[1].dependencies().len(), 1);
}

#[test]
fn test_fixture_document_root() {
    let (root, _) = full_project();

    assert_eq!(
        root.default_namespace(),
        Some("http://maven.apache.org/POM/4.0.0")
    );
    assert_eq!(
        root.prefix_for("http://www.w3.org/2001/XMLSchema-instance"),
        Some("xsi")
    );
    assert_eq!(
        root.xsi_schema_location()
            .get("http://maven.apache.org/POM/4.0.0")
            .map(String::as_str),
        Some("https://maven.apache.org/xsd/maven-4.0.0.xsd")
    );
    assert_eq!(
        root.leading(),
        [XmlNode::Comment(" Sample multi-module project ".into())]
    );
    assert_eq!(root.trailing(), [XmlNode::Comment(" end of file ".into())]);
}

#[test]
fn test_fixture_round_trip() {
    init_tracing();
    for name in ["full_pom.xml", "minimal_pom.xml", "prefixed_pom.xml"] {
        let root = read_pom(&load_fixture(name)).unwrap();
        let written = write_pom(&root).unwrap();
        let reread = read_pom(&written).unwrap();
        assert_eq!(reread, root, "round trip changed {name}");

        let compact = WriteOptions {
            indent: 0,
            declaration: false,
        };
        let written = write_pom_with(&root, &compact).unwrap();
        assert_eq!(read_pom(&written).unwrap(), root, "compact round trip changed {name}");
    }
}

#[test]
fn test_prefixed_root() {
    let root = read_pom(&load_fixture("prefixed_pom.xml")).unwrap();
    assert!(root.default_namespace().is_none());
    assert_eq!(
        root.xmlns_prefix_map().get("pom").map(String::as_str),
        Some("http://maven.apache.org/POM/4.0.0")
    );
    assert_eq!(root.xsi_schema_location().len(), 1);
    assert_eq!(
        root.project().and_then(Project::artifact_id),
        Some("prefixed")
    );

    let written = write_pom(&root).unwrap();
    assert!(written.contains("s:schemaLocation="));
    assert!(written.contains("<pom:project "));
    assert!(written.contains("<pom:artifactId>prefixed</pom:artifactId>"));
    assert!(!written.contains("<artifactId>"));
}

#[test]
fn test_reflective_mixed_round_trip_keeps_comment_order() {
    let source = "<!-- head --><project><artifactId>a</artifactId></project><!-- foot -->";
    let mut root = read_pom(source).unwrap();
    let before = write_pom(&root).unwrap();

    let mixed = root.get(DocumentRoot::MIXED).unwrap();
    root.set(DocumentRoot::MIXED, mixed).unwrap();
    let after = write_pom(&root).unwrap();

    assert_eq!(after, before);
    assert!(after.find("<!-- foot -->") > after.find("</project>"));
}

#[test]
fn test_invalid_comment_fails_to_write() {
    let mut root = read_pom(&load_fixture("minimal_pom.xml")).unwrap();
    root.set_mixed(vec![XmlNode::Comment("a -- b".into())], Vec::new());
    assert!(matches!(write_pom(&root), Err(PomError::Xml(_))));

    root.set_mixed(Vec::new(), vec![XmlNode::Text("stray".into())]);
    assert!(write_pom(&root).is_err());
}

#[test]
fn test_not_a_pom() {
    let err = read_pom(&load_fixture("not_a_pom.xml")).unwrap_err();
    assert!(matches!(err, PomError::UnexpectedRoot { ref found } if found == "settings"));
    assert_eq!(
        err.to_string(),
        "Expected <project> as document root, found <settings>"
    );
}

#[test]
fn test_read_options_from_json() {
    let options: ReadOptions = serde_json::from_str(r#"{"keepComments": false}"#).unwrap();
    assert!(!options.keep_comments);
    assert!(options.trim_text);

    let root = read_pom_with(&load_fixture("full_pom.xml"), &options).unwrap();
    assert!(root.mixed().is_empty());
    let build = root.project().and_then(Project::build).unwrap();
    let configuration: &Configuration = build.plugins()[0].configuration().unwrap();
    assert!(
        !configuration
            .root()
            .children
            .iter()
            .any(|n| matches!(n, XmlNode::Comment(_)))
    );

    let options: WriteOptions = serde_json::from_str(r#"{"indent": 4}"#).unwrap();
    assert!(options.declaration);
    let xml = write_pom_with(&root, &options).unwrap();
    assert!(xml.contains("\n    <modelVersion>4.0.0</modelVersion>"));
}

#[test]
fn test_file_io() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pom.xml");

    let (root, _) = full_project();
    write_pom_file(&root, &path).unwrap();
    let reread = read_pom_file(&path).unwrap();
    assert_eq!(reread, root);

    let missing = read_pom_file(dir.path().join("missing.xml")).unwrap_err();
    assert!(matches!(missing, PomError::Io(_)));
}

#[test]
fn test_edit_then_write() {
    let (mut root, _) = full_project();
    let project = root.project_mut().unwrap();
    project.set_version("1.2.0");
    project.modules_mut().push("web".to_string());
    project
        .build_mut()
        .unwrap()
        .plugins_mut()
        .get_mut(0)
        .unwrap()
        .configuration_mut()
        .unwrap()
        .set_node_values("compilerArgs", "arg", &["-parameters"]);
    project.unset_scm();

    let xml = write_pom(&root).unwrap();
    assert!(xml.contains("<version>1.2.0</version>"));
    assert!(xml.contains("<module>web</module>"));
    assert!(xml.contains("<arg>-parameters</arg>"));
    assert!(!xml.contains("-Werror"));
    assert!(!xml.contains("<scm>"));

    assert_eq!(read_pom(&xml).unwrap(), root);
}
