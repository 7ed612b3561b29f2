//! Loading and saving `pom.xml` documents.
//!
//! Reading goes through the `pom_xml` tree: the document is parsed first,
//! then the root `<project>` element is mapped onto [`Project`] and its
//! namespace attributes onto [`DocumentRoot`]. Writing runs the same path
//! backwards. When the POM namespace is bound to a prefix and there is no
//! default namespace, every unprefixed element is written with that prefix.

use crate::document_root::{DocumentRoot, POM_NAMESPACE, XSI_NAMESPACE};
use crate::elements::Project;
use crate::error::{PomError, Result};
use crate::xml_map::XmlMapped;
use pom_xml::{ReadOptions, WriteOptions, XmlDocument, XmlElement};
use std::path::Path;

/// Parses pom.xml content with default [`ReadOptions`].
pub fn read_pom(content: &str) -> Result<DocumentRoot> {
    read_pom_with(content, &ReadOptions::default())
}

pub fn read_pom_with(content: &str, options: &ReadOptions) -> Result<DocumentRoot> {
    let doc = pom_xml::parse_document_with(content, options)?;
    if doc.root.local_name() != Project::XML_TAG {
        return Err(PomError::UnexpectedRoot {
            found: doc.root.name,
        });
    }

    let mut root = DocumentRoot::new();
    root.set_mixed(doc.prolog, doc.epilog);
    read_root_attributes(&mut root, &doc.root);

    let project = Project::from_xml(&doc.root);
    tracing::info!(
        "read pom {}:{} ({} dependencies, {} modules, {} profiles)",
        project.effective_group_id().unwrap_or("?"),
        project.artifact_id().unwrap_or("?"),
        project.dependencies().len(),
        project.modules().len(),
        project.profiles().len()
    );
    root.set_project(project);

    Ok(root)
}

pub fn read_pom_file(path: impl AsRef<Path>) -> Result<DocumentRoot> {
    let path = path.as_ref();
    tracing::debug!("reading {}", path.display());
    let content = std::fs::read_to_string(path)?;
    read_pom(&content)
}

fn read_root_attributes(root: &mut DocumentRoot, element: &XmlElement) {
    let xsi_prefix = element
        .attributes
        .iter()
        .find(|(_, uri)| uri.as_str() == XSI_NAMESPACE)
        .and_then(|(key, _)| key.strip_prefix("xmlns:"))
        .unwrap_or("xsi");

    for (key, value) in &element.attributes {
        if key == "xmlns" {
            root.set_namespace("", value.as_str());
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            root.set_namespace(prefix, value.as_str());
        } else if key.split_once(':') == Some((xsi_prefix, "schemaLocation")) {
            for (namespace, location) in DocumentRoot::parse_schema_location(value) {
                root.set_schema_location(namespace, location);
            }
        } else {
            tracing::debug!("skipping attribute {}=\"{}\" on <project>", key, value);
        }
    }
}

/// Serializes with default [`WriteOptions`].
pub fn write_pom(root: &DocumentRoot) -> Result<String> {
    write_pom_with(root, &WriteOptions::default())
}

pub fn write_pom_with(root: &DocumentRoot, options: &WriteOptions) -> Result<String> {
    let mut element = match root.project() {
        Some(project) => project.to_xml(Project::XML_TAG),
        None => {
            tracing::warn!("writing a document without a project");
            XmlElement::new(Project::XML_TAG)
        }
    };

    if root.default_namespace().is_none()
        && let Some(prefix) = root.prefix_for(POM_NAMESPACE).filter(|p| !p.is_empty())
    {
        qualify(&mut element, prefix);
    }

    for (prefix, uri) in root.xmlns_prefix_map() {
        let key = if prefix.is_empty() {
            "xmlns".to_string()
        } else {
            format!("xmlns:{prefix}")
        };
        element.set_attribute(key, uri.as_str());
    }
    if let Some(locations) = root.schema_location_attribute() {
        let prefix = root.prefix_for(XSI_NAMESPACE).unwrap_or("xsi");
        element.set_attribute(format!("{prefix}:schemaLocation"), locations);
    }

    let doc = XmlDocument {
        prolog: root.leading().to_vec(),
        root: element,
        epilog: root.trailing().to_vec(),
    };
    Ok(pom_xml::write_document_with(&doc, options)?)
}

/// Puts `prefix` on every unprefixed element of the tree.
fn qualify(element: &mut XmlElement, prefix: &str) {
    if !element.name.contains(':') {
        element.name = format!("{prefix}:{}", element.name);
    }
    for child in element.elements_mut() {
        qualify(child, prefix);
    }
}

pub fn write_pom_file(root: &DocumentRoot, path: impl AsRef<Path>) -> Result<()> {
    let xml = write_pom(root)?;
    std::fs::write(path, xml)?;
    Ok(())
}
