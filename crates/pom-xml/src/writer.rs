//! XML serialization through `quick_xml::Writer`.

use crate::dom::{XmlDocument, XmlElement, XmlNode};
use crate::error::{Result, XmlError};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde::Deserialize;
use std::fmt::Display;

/// Writer settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WriteOptions {
    /// Spaces per nesting level; `0` writes everything on one line.
    pub indent: usize,
    /// Emit `<?xml version="1.0" encoding="UTF-8"?>`.
    pub declaration: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            declaration: true,
        }
    }
}

pub fn write_document(doc: &XmlDocument) -> Result<String> {
    write_document_with(doc, &WriteOptions::default())
}

pub fn write_document_with(doc: &XmlDocument, options: &WriteOptions) -> Result<String> {
    let mut writer = new_writer(options);

    if options.declaration {
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(write_error)?;
    }
    for node in &doc.prolog {
        write_outside_root(&mut writer, node)?;
    }
    write_tree(&mut writer, &doc.root)?;
    for node in &doc.epilog {
        write_outside_root(&mut writer, node)?;
    }

    finish(writer, options)
}

/// Serializes a single element without a declaration.
pub fn write_element(element: &XmlElement, options: &WriteOptions) -> Result<String> {
    let mut writer = new_writer(options);
    write_tree(&mut writer, element)?;
    finish(writer, options)
}

fn new_writer(options: &WriteOptions) -> Writer<Vec<u8>> {
    if options.indent > 0 {
        Writer::new_with_indent(Vec::new(), b' ', options.indent)
    } else {
        Writer::new(Vec::new())
    }
}

fn finish(writer: Writer<Vec<u8>>, options: &WriteOptions) -> Result<String> {
    let mut bytes = writer.into_inner();
    if options.indent > 0 {
        bytes.push(b'\n');
    }
    String::from_utf8(bytes).map_err(write_error)
}

fn write_error(e: impl Display) -> XmlError {
    XmlError::Write {
        message: e.to_string(),
    }
}

fn write_tree(writer: &mut Writer<Vec<u8>>, element: &XmlElement) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(write_error);
    }

    writer
        .write_event(Event::Start(start))
        .map_err(write_error)?;
    for child in &element.children {
        write_node(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(write_error)
}

/// Only comments and whitespace may appear before or after the root.
fn write_outside_root(writer: &mut Writer<Vec<u8>>, node: &XmlNode) -> Result<()> {
    match node {
        XmlNode::Text(text) if text.trim().is_empty() => Ok(()),
        XmlNode::Text(text) => Err(XmlError::Write {
            message: format!("text '{}' outside the root element", text.trim()),
        }),
        XmlNode::Element(element) => Err(XmlError::Write {
            message: format!("second root element <{}>", element.name),
        }),
        XmlNode::Comment(_) => write_node(writer, node),
    }
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &XmlNode) -> Result<()> {
    match node {
        XmlNode::Element(element) => write_tree(writer, element),
        XmlNode::Text(text) => writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(write_error),
        XmlNode::Comment(text) if text.contains("--") || text.ends_with('-') => {
            Err(XmlError::Write {
                message: format!("comment '{text}' contains '--' or ends with '-'"),
            })
        }
        XmlNode::Comment(text) => writer
            .write_event(Event::Comment(BytesText::from_escaped(text.as_str())))
            .map_err(write_error),
    }
}
