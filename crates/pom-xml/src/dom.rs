//! In-memory XML tree.
//!
//! Elements keep their children in document order so mixed content and
//! comments survive a read/write cycle. Lookups by name compare the local
//! part of the element name on both sides, so `<pom:groupId>` and
//! `<groupId>` answer to both `groupId` and `pom:groupId`. New elements keep
//! the name exactly as given.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A parsed XML document: the root element plus comments and text around it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlDocument {
    pub prolog: Vec<XmlNode>,
    pub root: XmlElement,
    pub epilog: Vec<XmlNode>,
}

/// A single node inside an element.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
    Comment(String),
}

impl XmlNode {
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            Self::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut XmlElement> {
        match self {
            Self::Element(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlElement {
    pub name: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<XmlNode>,
}

/// Name without its namespace prefix.
pub fn local_part(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

/// Splits a `/`-separated child-name path, ignoring empty segments.
pub fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').map(str::trim).filter(|s| !s.is_empty())
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Creates an element holding a single text node.
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut element = Self::new(name);
        element.set_text(text);
        element
    }

    /// Element name without its namespace prefix.
    pub fn local_name(&self) -> &str {
        local_part(&self.name)
    }

    /// Whether this element answers to `name`, prefixed or not.
    pub fn is_named(&self, name: &str) -> bool {
        self.local_name() == local_part(name)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Self> {
        self.children.iter_mut().filter_map(XmlNode::as_element_mut)
    }

    pub fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Self> {
        self.elements().filter(move |e| e.is_named(name))
    }

    pub fn elements_named_mut<'a>(
        &'a mut self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a mut Self> {
        self.elements_mut().filter(move |e| e.is_named(name))
    }

    /// First child element with the given local name.
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.elements().find(|e| e.is_named(name))
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Self> {
        self.elements_mut().find(|e| e.is_named(name))
    }

    /// Text of the first child element with the given local name.
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.child(name).map(Self::text)
    }

    /// Appends `child` and returns a handle to it.
    pub fn append_child(&mut self, child: Self) -> &mut Self {
        self.children.push(XmlNode::Element(child));
        match self.children.last_mut() {
            Some(XmlNode::Element(e)) => e,
            _ => unreachable!("an element was just pushed"),
        }
    }

    /// Removes the first child element with the given local name.
    pub fn remove_child(&mut self, name: &str) -> Option<Self> {
        let index = self
            .children
            .iter()
            .position(|n| matches!(n, XmlNode::Element(e) if e.is_named(name)))?;
        match self.children.remove(index) {
            XmlNode::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Removes the last child element with the given local name.
    pub fn remove_last_child(&mut self, name: &str) -> Option<Self> {
        let index = self
            .children
            .iter()
            .rposition(|n| matches!(n, XmlNode::Element(e) if e.is_named(name)))?;
        match self.children.remove(index) {
            XmlNode::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Concatenated text of the direct text children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|n| match n {
                XmlNode::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Replaces all children with a single text node.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.children.clear();
        if !text.is_empty() {
            self.children.push(XmlNode::Text(text));
        }
    }

    /// Follows a `/`-separated path of child names, taking the first match
    /// at each level. An empty path resolves to `self`.
    pub fn find(&self, path: &str) -> Option<&Self> {
        path_segments(path).try_fold(self, |current, segment| current.child(segment))
    }

    pub fn find_mut(&mut self, path: &str) -> Option<&mut Self> {
        let mut current = self;
        for segment in path_segments(path) {
            current = current.child_mut(segment)?;
        }
        Some(current)
    }

    /// Like [`find_mut`](Self::find_mut), but appends missing elements
    /// along the way.
    pub fn ensure_path(&mut self, path: &str) -> &mut Self {
        let mut current = self;
        for segment in path_segments(path) {
            current = current.child_or_append(segment);
        }
        current
    }

    fn child_or_append(&mut self, name: &str) -> &mut Self {
        if self.child(name).is_none() {
            return self.append_child(Self::new(name));
        }
        match self.child_mut(name) {
            Some(child) => child,
            None => unreachable!("child was found above"),
        }
    }

    /// Detaches the element at `path` from its parent.
    pub fn remove_path(&mut self, path: &str) -> Option<Self> {
        let path = path.trim_matches('/');
        let (parent, name) = match path.rsplit_once('/') {
            Some((parent, name)) => (self.find_mut(parent)?, name),
            None => (self, path),
        };
        if name.is_empty() {
            return None;
        }
        parent.remove_child(name.trim())
    }
}
