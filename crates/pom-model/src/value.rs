//! Dynamic values exchanged through reflective access and notifications.

use crate::configuration::Configuration;
use crate::elements::{
    Activation, ActivationFile, ActivationOs, Build, Dependency, DependencyManagement,
    DistributionManagement, Exclusion, IssueManagement, License, Parent, Plugin,
    PluginManagement, Prerequisites, Profile, Project, Relocation, ReportPlugin, ReportSet,
    Reporting, Scm,
};
use indexmap::IndexMap;
use pom_xml::{XmlElement, XmlNode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    Null,
    Text(String),
    TextList(Vec<String>),
    Node(Box<PomNode>),
    NodeList(Vec<PomNode>),
    Xml(XmlElement),
    XmlNodes(Vec<XmlNode>),
    Map(IndexMap<String, String>),
}

impl Value {
    /// Short name of the variant, used in type mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Text(_) => "text",
            Self::TextList(_) => "text list",
            Self::Node(node) => node.element(),
            Self::NodeList(_) => "node list",
            Self::Xml(_) => "xml element",
            Self::XmlNodes(_) => "xml nodes",
            Self::Map(_) => "map",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl<T: ModelValue> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, |v| v.to_value())
    }
}

/// Any element of the POM model, as carried inside a [`Value`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PomNode {
    Activation(Activation),
    ActivationFile(ActivationFile),
    ActivationOs(ActivationOs),
    Build(Build),
    Configuration(Configuration),
    Dependency(Dependency),
    DependencyManagement(DependencyManagement),
    DistributionManagement(DistributionManagement),
    Exclusion(Exclusion),
    IssueManagement(IssueManagement),
    License(License),
    Parent(Parent),
    Plugin(Plugin),
    PluginManagement(PluginManagement),
    Prerequisites(Prerequisites),
    Profile(Profile),
    Project(Project),
    Relocation(Relocation),
    ReportPlugin(ReportPlugin),
    ReportSet(ReportSet),
    Reporting(Reporting),
    Scm(Scm),
}

impl PomNode {
    /// Element type name of the wrapped node.
    pub fn element(&self) -> &'static str {
        match self {
            Self::Activation(_) => "Activation",
            Self::ActivationFile(_) => "ActivationFile",
            Self::ActivationOs(_) => "ActivationOs",
            Self::Build(_) => "Build",
            Self::Configuration(_) => "Configuration",
            Self::Dependency(_) => "Dependency",
            Self::DependencyManagement(_) => "DependencyManagement",
            Self::DistributionManagement(_) => "DistributionManagement",
            Self::Exclusion(_) => "Exclusion",
            Self::IssueManagement(_) => "IssueManagement",
            Self::License(_) => "License",
            Self::Parent(_) => "Parent",
            Self::Plugin(_) => "Plugin",
            Self::PluginManagement(_) => "PluginManagement",
            Self::Prerequisites(_) => "Prerequisites",
            Self::Profile(_) => "Profile",
            Self::Project(_) => "Project",
            Self::Relocation(_) => "Relocation",
            Self::ReportPlugin(_) => "ReportPlugin",
            Self::ReportSet(_) => "ReportSet",
            Self::Reporting(_) => "Reporting",
            Self::Scm(_) => "Scm",
        }
    }
}

/// Types that can sit in a single-valued slot or a list of the model.
pub trait ModelValue: Clone {
    /// Whether the type is a plain attribute (rendered by `Display`) rather
    /// than a contained element.
    const IS_ATTRIBUTE: bool;

    fn to_value(&self) -> Value;

    fn from_value(value: Value) -> Option<Self>;

    fn list_to_value(items: &[Self]) -> Value;

    /// Accepts `Null` as the empty list.
    fn list_from_value(value: Value) -> Option<Vec<Self>>;

    /// Text shown by `Display` for attribute values.
    fn attribute_text(&self) -> Option<&str> {
        None
    }
}

impl ModelValue for String {
    const IS_ATTRIBUTE: bool = true;

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    fn list_to_value(items: &[Self]) -> Value {
        Value::TextList(items.to_vec())
    }

    fn list_from_value(value: Value) -> Option<Vec<Self>> {
        match value {
            Value::TextList(items) => Some(items),
            Value::Null => Some(Vec::new()),
            _ => None,
        }
    }

    fn attribute_text(&self) -> Option<&str> {
        Some(self)
    }
}

/// `Value` of an optional slot: `Null` when empty.
pub fn optional_value<T: ModelValue>(slot: &Option<T>) -> Value {
    slot.as_ref().map_or(Value::Null, ModelValue::to_value)
}
