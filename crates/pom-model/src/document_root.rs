//! Document-level state of a pom.xml: the `project` element plus what sits
//! around and on top of it.

use crate::elements::Project;
use crate::error::Result;
use crate::notify::{Notification, NotificationKind, Notifier, Notifying};
use crate::reflect::{
    FeatureId, FeatureInfo, FeatureKind, Reflective, take_optional, type_mismatch, unknown_feature,
};
use crate::value::{Value, optional_value};
use indexmap::IndexMap;
use pom_xml::XmlNode;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const POM_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRoot {
    /// Comments and text outside the root element, in document order.
    mixed: Vec<XmlNode>,
    /// Number of `mixed` entries that precede the root element.
    root_index: usize,
    /// Prefix to namespace URI; the default namespace has the empty prefix.
    xmlns_prefix_map: IndexMap<String, String>,
    /// Namespace URI to schema location.
    xsi_schema_location: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    project: Option<Project>,
    #[serde(skip)]
    notifier: Notifier,
}

impl DocumentRoot {
    pub const MIXED: FeatureId = 0;
    pub const XMLNS_PREFIX_MAP: FeatureId = 1;
    pub const XSI_SCHEMA_LOCATION: FeatureId = 2;
    pub const PROJECT: FeatureId = 3;

    pub fn new() -> Self {
        Self::default()
    }

    /// A document holding `project` in the POM 4.0.0 namespace.
    pub fn with_project(project: Project) -> Self {
        let mut root = Self::new();
        root.xmlns_prefix_map
            .insert(String::new(), POM_NAMESPACE.to_string());
        root.xmlns_prefix_map
            .insert("xsi".to_string(), XSI_NAMESPACE.to_string());
        root.xsi_schema_location.insert(
            POM_NAMESPACE.to_string(),
            "https://maven.apache.org/xsd/maven-4.0.0.xsd".to_string(),
        );
        root.project = Some(project);
        root
    }

    fn fire(&self, kind: NotificationKind, code: FeatureId, old_value: Value, new_value: Value) {
        let name = Self::FEATURES
            .iter()
            .find(|f| f.code == code)
            .map_or("", |f| f.name);
        self.notifier.notify(&Notification::new(
            kind,
            Self::ELEMENT,
            code,
            name,
            old_value,
            new_value,
        ));
    }

    pub fn mixed(&self) -> &[XmlNode] {
        &self.mixed
    }

    /// Nodes written before the root element.
    pub fn leading(&self) -> &[XmlNode] {
        &self.mixed[..self.root_index.min(self.mixed.len())]
    }

    /// Nodes written after the root element.
    pub fn trailing(&self) -> &[XmlNode] {
        &self.mixed[self.root_index.min(self.mixed.len())..]
    }

    /// Replaces the content around the root element.
    pub fn set_mixed(&mut self, leading: Vec<XmlNode>, trailing: Vec<XmlNode>) {
        let old = std::mem::take(&mut self.mixed);
        self.root_index = leading.len();
        self.mixed = leading;
        self.mixed.extend(trailing);
        if self.notifier.is_required() {
            self.fire(
                NotificationKind::Set,
                Self::MIXED,
                Value::XmlNodes(old),
                Value::XmlNodes(self.mixed.clone()),
            );
        }
    }

    pub fn xmlns_prefix_map(&self) -> &IndexMap<String, String> {
        &self.xmlns_prefix_map
    }

    /// Declares `prefix` for `uri`. The empty prefix sets the default
    /// namespace.
    pub fn set_namespace(&mut self, prefix: impl Into<String>, uri: impl Into<String>) {
        let old = self.snapshot(&self.xmlns_prefix_map);
        self.xmlns_prefix_map.insert(prefix.into(), uri.into());
        self.map_changed(Self::XMLNS_PREFIX_MAP, old);
    }

    pub fn remove_namespace(&mut self, prefix: &str) -> Option<String> {
        let old = self.snapshot(&self.xmlns_prefix_map);
        let removed = self.xmlns_prefix_map.shift_remove(prefix)?;
        self.map_changed(Self::XMLNS_PREFIX_MAP, old);
        Some(removed)
    }

    pub fn default_namespace(&self) -> Option<&str> {
        self.xmlns_prefix_map.get("").map(String::as_str)
    }

    /// Prefix bound to `uri`, if any.
    pub fn prefix_for(&self, uri: &str) -> Option<&str> {
        self.xmlns_prefix_map
            .iter()
            .find(|(_, v)| v.as_str() == uri)
            .map(|(k, _)| k.as_str())
    }

    pub fn xsi_schema_location(&self) -> &IndexMap<String, String> {
        &self.xsi_schema_location
    }

    pub fn set_schema_location(
        &mut self,
        namespace: impl Into<String>,
        location: impl Into<String>,
    ) {
        let old = self.snapshot(&self.xsi_schema_location);
        self.xsi_schema_location
            .insert(namespace.into(), location.into());
        self.map_changed(Self::XSI_SCHEMA_LOCATION, old);
    }

    pub fn remove_schema_location(&mut self, namespace: &str) -> Option<String> {
        let old = self.snapshot(&self.xsi_schema_location);
        let removed = self.xsi_schema_location.shift_remove(namespace)?;
        self.map_changed(Self::XSI_SCHEMA_LOCATION, old);
        Some(removed)
    }

    /// Schema locations as the `xsi:schemaLocation` attribute value.
    pub fn schema_location_attribute(&self) -> Option<String> {
        if self.xsi_schema_location.is_empty() {
            return None;
        }
        let pairs: Vec<String> = self
            .xsi_schema_location
            .iter()
            .map(|(namespace, location)| format!("{namespace} {location}"))
            .collect();
        Some(pairs.join(" "))
    }

    /// Parses an `xsi:schemaLocation` value into namespace/location pairs.
    /// A dangling namespace without a location is dropped.
    pub fn parse_schema_location(value: &str) -> IndexMap<String, String> {
        let tokens: Vec<&str> = value.split_whitespace().collect();
        if tokens.len() % 2 != 0 {
            tracing::warn!(
                "xsi:schemaLocation has an odd number of entries, ignoring '{}'",
                tokens.last().copied().unwrap_or_default()
            );
        }
        tokens
            .chunks_exact(2)
            .map(|pair| (pair[0].to_string(), pair[1].to_string()))
            .collect()
    }

    fn snapshot(&self, map: &IndexMap<String, String>) -> Option<IndexMap<String, String>> {
        self.notifier.is_required().then(|| map.clone())
    }

    fn map_changed(&self, code: FeatureId, old: Option<IndexMap<String, String>>) {
        if let Some(old) = old {
            let new = match code {
                Self::XMLNS_PREFIX_MAP => self.xmlns_prefix_map.clone(),
                _ => self.xsi_schema_location.clone(),
            };
            self.fire(NotificationKind::Set, code, Value::Map(old), Value::Map(new));
        }
    }

    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    pub fn project_mut(&mut self) -> Option<&mut Project> {
        self.project.as_mut()
    }

    pub fn set_project(&mut self, project: Project) -> Option<Project> {
        let old = self.project.replace(project);
        if self.notifier.is_required() {
            self.fire(
                NotificationKind::Set,
                Self::PROJECT,
                optional_value(&old),
                optional_value(&self.project),
            );
        }
        old
    }

    pub fn unset_project(&mut self) -> Option<Project> {
        let old = self.project.take();
        if self.notifier.is_required() {
            self.fire(
                NotificationKind::Unset,
                Self::PROJECT,
                optional_value(&old),
                Value::Null,
            );
        }
        old
    }

    pub fn is_project_set(&self) -> bool {
        self.project.is_some()
    }

    pub fn into_project(self) -> Option<Project> {
        self.project
    }
}

fn take_map(value: Value, feature: &'static str) -> Result<IndexMap<String, String>> {
    match value {
        Value::Map(map) => Ok(map),
        Value::Null => Ok(IndexMap::new()),
        other => Err(type_mismatch(DocumentRoot::ELEMENT, feature, "map", &other)),
    }
}

impl Reflective for DocumentRoot {
    const ELEMENT: &'static str = "DocumentRoot";

    const FEATURES: &'static [FeatureInfo] = &[
        FeatureInfo::new(Self::MIXED, "mixed", FeatureKind::Opaque),
        FeatureInfo::new(Self::XMLNS_PREFIX_MAP, "xmlnsPrefixMap", FeatureKind::Opaque),
        FeatureInfo::new(Self::XSI_SCHEMA_LOCATION, "xsiSchemaLocation", FeatureKind::Opaque),
        FeatureInfo::new(Self::PROJECT, "project", FeatureKind::Child),
    ];

    fn get(&self, code: FeatureId) -> Result<Value> {
        match code {
            Self::MIXED => Ok(Value::XmlNodes(self.mixed.clone())),
            Self::XMLNS_PREFIX_MAP => Ok(Value::Map(self.xmlns_prefix_map.clone())),
            Self::XSI_SCHEMA_LOCATION => Ok(Value::Map(self.xsi_schema_location.clone())),
            Self::PROJECT => Ok(optional_value(&self.project)),
            _ => Err(unknown_feature(Self::ELEMENT, code)),
        }
    }

    fn set(&mut self, code: FeatureId, value: Value) -> Result<()> {
        match code {
            Self::MIXED => match value {
                Value::XmlNodes(mut nodes) => {
                    let trailing = nodes.split_off(self.root_index.min(nodes.len()));
                    self.set_mixed(nodes, trailing);
                }
                Value::Null => self.set_mixed(Vec::new(), Vec::new()),
                other => {
                    return Err(type_mismatch(Self::ELEMENT, "mixed", "xml nodes", &other));
                }
            },
            Self::XMLNS_PREFIX_MAP => {
                let map = take_map(value, "xmlnsPrefixMap")?;
                let old = std::mem::replace(&mut self.xmlns_prefix_map, map);
                self.map_changed(code, self.notifier.is_required().then_some(old));
            }
            Self::XSI_SCHEMA_LOCATION => {
                let map = take_map(value, "xsiSchemaLocation")?;
                let old = std::mem::replace(&mut self.xsi_schema_location, map);
                self.map_changed(code, self.notifier.is_required().then_some(old));
            }
            Self::PROJECT => {
                match take_optional::<Project>(value, Self::ELEMENT, "project", "Project")? {
                    Some(project) => {
                        self.set_project(project);
                    }
                    None => {
                        self.unset_project();
                    }
                }
            }
            _ => return Err(unknown_feature(Self::ELEMENT, code)),
        }
        Ok(())
    }

    fn unset(&mut self, code: FeatureId) -> Result<()> {
        match code {
            Self::PROJECT => {
                self.unset_project();
                Ok(())
            }
            Self::MIXED | Self::XMLNS_PREFIX_MAP | Self::XSI_SCHEMA_LOCATION => {
                self.set(code, Value::Null)
            }
            _ => Err(unknown_feature(Self::ELEMENT, code)),
        }
    }

    fn is_set(&self, code: FeatureId) -> Result<bool> {
        match code {
            Self::MIXED => Ok(!self.mixed.is_empty()),
            Self::XMLNS_PREFIX_MAP => Ok(!self.xmlns_prefix_map.is_empty()),
            Self::XSI_SCHEMA_LOCATION => Ok(!self.xsi_schema_location.is_empty()),
            Self::PROJECT => Ok(self.project.is_some()),
            _ => Err(unknown_feature(Self::ELEMENT, code)),
        }
    }
}

impl Notifying for DocumentRoot {
    fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    fn notifier_mut(&mut self) -> &mut Notifier {
        &mut self.notifier
    }
}

fn write_map(f: &mut fmt::Formatter<'_>, map: &IndexMap<String, String>) -> fmt::Result {
    f.write_str("{")?;
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{key}={value}")?;
    }
    f.write_str("}")
}

impl fmt::Display for DocumentRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DocumentRoot (xmlnsPrefixMap: ")?;
        write_map(f, &self.xmlns_prefix_map)?;
        f.write_str(", xsiSchemaLocation: ")?;
        write_map(f, &self.xsi_schema_location)?;
        match self.project.as_ref().and_then(Project::artifact_id) {
            Some(artifact_id) => write!(f, ", project: {artifact_id})"),
            None if self.project.is_some() => f.write_str(", project: <project>)"),
            None => f.write_str(", project: null)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PomError;
    use crate::notify::ChangeLog;

    #[test]
    fn test_namespaces() {
        let mut root = DocumentRoot::new();
        assert!(root.default_namespace().is_none());

        root.set_namespace("", POM_NAMESPACE);
        root.set_namespace("xsi", XSI_NAMESPACE);
        assert_eq!(root.default_namespace(), Some(POM_NAMESPACE));
        assert_eq!(root.prefix_for(XSI_NAMESPACE), Some("xsi"));

        assert_eq!(root.remove_namespace("xsi").as_deref(), Some(XSI_NAMESPACE));
        assert!(root.remove_namespace("xsi").is_none());
        assert_eq!(root.xmlns_prefix_map().len(), 1);
    }

    #[test]
    fn test_schema_location_parsing() {
        let map = DocumentRoot::parse_schema_location(
            "http://maven.apache.org/POM/4.0.0\n   https://maven.apache.org/xsd/maven-4.0.0.xsd",
        );
        assert_eq!(
            map.get(POM_NAMESPACE).map(String::as_str),
            Some("https://maven.apache.org/xsd/maven-4.0.0.xsd")
        );

        let dangling = DocumentRoot::parse_schema_location("a b c");
        assert_eq!(dangling.len(), 1);
        assert!(DocumentRoot::parse_schema_location("").is_empty());
    }

    #[test]
    fn test_schema_location_attribute() {
        let mut root = DocumentRoot::new();
        assert!(root.schema_location_attribute().is_none());
        root.set_schema_location("urn:a", "a.xsd");
        root.set_schema_location("urn:b", "b.xsd");
        assert_eq!(
            root.schema_location_attribute().as_deref(),
            Some("urn:a a.xsd urn:b b.xsd")
        );
    }

    #[test]
    fn test_mixed_split() {
        let mut root = DocumentRoot::new();
        root.set_mixed(
            vec![XmlNode::Comment(" header ".into())],
            vec![XmlNode::Comment(" footer ".into())],
        );
        assert_eq!(root.mixed().len(), 2);
        assert_eq!(root.leading(), [XmlNode::Comment(" header ".into())]);
        assert_eq!(root.trailing(), [XmlNode::Comment(" footer ".into())]);
    }

    #[test]
    fn test_reflective_mixed_keeps_root_position() {
        let mut root = DocumentRoot::new();
        root.set_mixed(
            vec![XmlNode::Comment(" head ".into())],
            vec![XmlNode::Comment(" foot ".into())],
        );

        let mixed = root.get(DocumentRoot::MIXED).unwrap();
        root.set(DocumentRoot::MIXED, mixed).unwrap();
        assert_eq!(root.leading(), [XmlNode::Comment(" head ".into())]);
        assert_eq!(root.trailing(), [XmlNode::Comment(" foot ".into())]);

        root.set(
            DocumentRoot::MIXED,
            Value::XmlNodes(vec![XmlNode::Comment(" only ".into())]),
        )
        .unwrap();
        assert_eq!(root.leading(), [XmlNode::Comment(" only ".into())]);
        assert!(root.trailing().is_empty());

        root.unset(DocumentRoot::MIXED).unwrap();
        assert!(root.mixed().is_empty());
    }

    #[test]
    fn test_project_child_and_display() {
        let mut root = DocumentRoot::new();
        assert_eq!(
            root.to_string(),
            "DocumentRoot (xmlnsPrefixMap: {}, xsiSchemaLocation: {}, project: null)"
        );

        let mut project = Project::new();
        project.set_artifact_id("app");
        assert!(root.set_project(project).is_none());
        assert!(root.is_project_set());
        assert_eq!(
            root.to_string(),
            "DocumentRoot (xmlnsPrefixMap: {}, xsiSchemaLocation: {}, project: app)"
        );

        let detached = root.unset_project().unwrap();
        assert_eq!(detached.artifact_id(), Some("app"));
    }

    #[test]
    fn test_reflective_maps() {
        let log = ChangeLog::shared();
        let mut root = DocumentRoot::new();
        root.subscribe(log.clone());

        let mut map = IndexMap::new();
        map.insert(String::new(), POM_NAMESPACE.to_string());
        root.set(DocumentRoot::XMLNS_PREFIX_MAP, Value::Map(map.clone()))
            .unwrap();
        assert_eq!(root.get(DocumentRoot::XMLNS_PREFIX_MAP).unwrap(), Value::Map(map));
        assert!(root.is_set(DocumentRoot::XMLNS_PREFIX_MAP).unwrap());

        assert!(matches!(
            root.set(DocumentRoot::XSI_SCHEMA_LOCATION, Value::from("x")),
            Err(PomError::TypeMismatch {
                feature: "xsiSchemaLocation",
                ..
            })
        ));
        assert!(matches!(
            root.get(4),
            Err(PomError::UnknownFeature { code: 4, .. })
        ));

        root.unset(DocumentRoot::XMLNS_PREFIX_MAP).unwrap();
        assert!(root.xmlns_prefix_map().is_empty());

        let notifications = log.take();
        assert_eq!(notifications.len(), 2);
        assert_eq!(notifications[0].feature_name, "xmlnsPrefixMap");
    }

    #[test]
    fn test_with_project_declares_pom_namespace() {
        let root = DocumentRoot::with_project(Project::new());
        assert_eq!(root.default_namespace(), Some(POM_NAMESPACE));
        assert!(root.xsi_schema_location().contains_key(POM_NAMESPACE));
    }
}
