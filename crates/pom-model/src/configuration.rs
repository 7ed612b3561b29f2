//! Free-form `<configuration>` blocks.
//!
//! Plugin and report configuration has no fixed schema, so it is kept as a
//! raw XML subtree. Paths are `/`-separated child names relative to the
//! `<configuration>` element; each segment selects the first child element
//! with that local name.
//!
//! Every mutating call fires exactly one `Set` notification on the `node`
//! feature, carrying the whole subtree before and after the change.

use crate::error::Result;
use crate::notify::{Notification, NotificationKind, Notifier, Notifying};
use crate::reflect::{FeatureId, FeatureInfo, FeatureKind, Reflective};
use crate::value::{ModelValue, PomNode, Value};
use crate::xml_map::XmlMapped;
use pom_xml::{WriteOptions, XmlElement, XmlNode};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    node: XmlElement,
    #[serde(skip)]
    notifier: Notifier,
}

impl Default for Configuration {
    fn default() -> Self {
        Self::from_element(XmlElement::new(Self::XML_TAG))
    }
}

/// Splits a path into its parent path and last segment.
fn split_last(path: &str) -> (&str, &str) {
    let path = path.trim_matches('/');
    match path.rsplit_once('/') {
        Some((parent, name)) => (parent, name.trim()),
        None => ("", path.trim()),
    }
}

impl Configuration {
    pub const XML_TAG: &'static str = "configuration";
    pub const NODE: FeatureId = 0;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_element(node: XmlElement) -> Self {
        Self {
            node,
            notifier: Notifier::default(),
        }
    }

    /// Parses a `<configuration>` fragment.
    pub fn from_xml_str(xml: &str) -> Result<Self> {
        Ok(Self::from_element(pom_xml::parse_element(xml)?))
    }

    /// The `<configuration>` element itself.
    pub fn root(&self) -> &XmlElement {
        &self.node
    }

    pub fn into_element(self) -> XmlElement {
        self.node
    }

    /// Element at `path`; the empty path is the configuration root.
    pub fn node(&self, path: &str) -> Option<&XmlElement> {
        self.node.find(path)
    }

    /// Mutable element at `path`. Edits made through the returned handle are
    /// not reported to observers.
    pub fn node_mut(&mut self, path: &str) -> Option<&mut XmlElement> {
        self.node.find_mut(path)
    }

    pub fn string_value(&self, path: &str) -> Option<String> {
        self.node.find(path).map(XmlElement::text)
    }

    /// Sets the text at `path`, creating missing elements along the way.
    pub fn set_string_value(&mut self, path: &str, value: impl Into<String>) {
        let old = self.snapshot();
        self.node.ensure_path(path).set_text(value);
        self.changed(old);
    }

    /// Texts of the child elements of the node at `path`, in order.
    pub fn list_value(&self, path: &str) -> Option<Vec<String>> {
        self.node
            .find(path)
            .map(|node| node.elements().map(XmlElement::text).collect())
    }

    /// Same as [`set_node_values`](Self::set_node_values).
    pub fn set_list_value<S: AsRef<str>>(&mut self, path: &str, item: &str, values: &[S]) {
        self.set_node_values(path, item, values);
    }

    /// Makes the node at `path` hold exactly `values.len()` children named
    /// `item`, removing or appending at the end, then writes the texts in
    /// order. Other children are left alone.
    pub fn set_node_values<S: AsRef<str>>(&mut self, path: &str, item: &str, values: &[S]) {
        let old = self.snapshot();
        let target = self.node.ensure_path(path);

        let mut count = target.elements_named(item).count();
        while count > values.len() {
            target.remove_last_child(item);
            count -= 1;
        }
        while count < values.len() {
            target.append_child(XmlElement::new(item));
            count += 1;
        }
        for (element, value) in target.elements_named_mut(item).zip(values) {
            element.set_text(value.as_ref());
        }

        self.changed(old);
    }

    /// Appends a new element at `path`. Intermediate elements are reused
    /// when present and created otherwise. The empty path returns the root
    /// unchanged.
    pub fn create_node(&mut self, path: &str) -> &mut XmlElement {
        let (parent_path, name) = split_last(path);
        if name.is_empty() {
            return &mut self.node;
        }

        let old = self.snapshot();
        let parent = self.node.ensure_path(parent_path);
        let index = parent.children.len();
        parent.append_child(XmlElement::new(name));
        self.changed(old);

        match self
            .node
            .ensure_path(parent_path)
            .children
            .get_mut(index)
            .and_then(XmlNode::as_element_mut)
        {
            Some(created) => created,
            None => unreachable!("element was appended at {index}"),
        }
    }

    /// Detaches the element at `path`.
    pub fn remove_node(&mut self, path: &str) -> Option<XmlElement> {
        let old = self.snapshot();
        let removed = self.node.remove_path(path)?;
        self.changed(old);
        Some(removed)
    }

    /// Replaces the whole subtree, returning the previous one.
    pub fn replace(&mut self, node: XmlElement) -> XmlElement {
        let old = std::mem::replace(&mut self.node, node);
        if self.notifier.is_required() {
            self.fire(NotificationKind::Set, Value::Xml(old.clone()));
        }
        old
    }

    /// Removes all children and attributes.
    pub fn clear(&mut self) {
        let name = self.node.name.clone();
        let old = std::mem::replace(&mut self.node, XmlElement::new(name));
        if self.notifier.is_required() {
            self.fire(NotificationKind::Unset, Value::Xml(old));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.node.children.is_empty() && self.node.attributes.is_empty()
    }

    fn snapshot(&self) -> Option<XmlElement> {
        self.notifier.is_required().then(|| self.node.clone())
    }

    fn changed(&self, old: Option<XmlElement>) {
        if let Some(old) = old {
            self.fire(NotificationKind::Set, Value::Xml(old));
        }
    }

    fn fire(&self, kind: NotificationKind, old_value: Value) {
        let new_value = match kind {
            NotificationKind::Unset => Value::Null,
            _ => Value::Xml(self.node.clone()),
        };
        self.notifier.notify(&Notification::new(
            kind,
            Self::ELEMENT,
            Self::NODE,
            "node",
            old_value,
            new_value,
        ));
    }
}

impl Reflective for Configuration {
    const ELEMENT: &'static str = "Configuration";

    const FEATURES: &'static [FeatureInfo] =
        &[FeatureInfo::new(Self::NODE, "node", FeatureKind::Opaque)];

    fn get(&self, code: FeatureId) -> Result<Value> {
        match code {
            Self::NODE => Ok(Value::Xml(self.node.clone())),
            _ => Err(crate::reflect::unknown_feature(Self::ELEMENT, code)),
        }
    }

    fn set(&mut self, code: FeatureId, value: Value) -> Result<()> {
        match (code, value) {
            (Self::NODE, Value::Xml(node)) => {
                self.replace(node);
                Ok(())
            }
            (Self::NODE, Value::Null) => {
                self.clear();
                Ok(())
            }
            (Self::NODE, other) => Err(crate::reflect::type_mismatch(
                Self::ELEMENT,
                "node",
                "xml element",
                &other,
            )),
            (code, _) => Err(crate::reflect::unknown_feature(Self::ELEMENT, code)),
        }
    }

    fn unset(&mut self, code: FeatureId) -> Result<()> {
        match code {
            Self::NODE => {
                self.clear();
                Ok(())
            }
            _ => Err(crate::reflect::unknown_feature(Self::ELEMENT, code)),
        }
    }

    fn is_set(&self, code: FeatureId) -> Result<bool> {
        match code {
            Self::NODE => Ok(!self.is_empty()),
            _ => Err(crate::reflect::unknown_feature(Self::ELEMENT, code)),
        }
    }
}

impl Notifying for Configuration {
    fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    fn notifier_mut(&mut self) -> &mut Notifier {
        &mut self.notifier
    }
}

impl ModelValue for Configuration {
    const IS_ATTRIBUTE: bool = false;

    fn to_value(&self) -> Value {
        Value::Node(Box::new(PomNode::Configuration(self.clone())))
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Node(node) => match *node {
                PomNode::Configuration(inner) => Some(inner),
                _ => None,
            },
            _ => None,
        }
    }

    fn list_to_value(items: &[Self]) -> Value {
        Value::NodeList(items.iter().cloned().map(PomNode::Configuration).collect())
    }

    fn list_from_value(value: Value) -> Option<Vec<Self>> {
        match value {
            Value::NodeList(nodes) => nodes
                .into_iter()
                .map(|node| match node {
                    PomNode::Configuration(inner) => Some(inner),
                    _ => None,
                })
                .collect(),
            Value::Null => Some(Vec::new()),
            _ => None,
        }
    }
}

impl From<Configuration> for PomNode {
    fn from(value: Configuration) -> Self {
        Self::Configuration(value)
    }
}

impl XmlMapped for Configuration {
    fn from_xml(element: &XmlElement) -> Self {
        Self::from_element(element.clone())
    }

    fn to_xml(&self, name: &str) -> XmlElement {
        let mut element = self.node.clone();
        element.name = name.to_string();
        element
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options = WriteOptions {
            indent: 0,
            declaration: false,
        };
        match pom_xml::write_element(&self.node, &options) {
            Ok(xml) => write!(f, "Configuration (node: {})", xml.trim_end()),
            Err(_) => write!(
                f,
                "Configuration (node: <{}> with {} children)",
                self.node.name,
                self.node.children.len()
            ),
        }
    }
}
