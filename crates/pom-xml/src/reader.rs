//! XML reader built on the quick-xml pull parser.
//!
//! Events are folded into an [`XmlDocument`] with an explicit element stack.
//! Adjacent text, CDATA and entity references are merged into one text node
//! before trimming, so `a &amp; b` stays `a & b`.

use crate::dom::{XmlDocument, XmlElement, XmlNode};
use crate::error::{Result, XmlError};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde::Deserialize;

/// Reader settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReadOptions {
    /// Trim text nodes and drop whitespace-only ones.
    pub trim_text: bool,
    /// Keep `<!-- -->` comments as [`XmlNode::Comment`].
    pub keep_comments: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            trim_text: true,
            keep_comments: true,
        }
    }
}

pub fn parse_document(content: &str) -> Result<XmlDocument> {
    parse_document_with(content, &ReadOptions::default())
}

/// Parses a fragment and returns its root element.
pub fn parse_element(content: &str) -> Result<XmlElement> {
    parse_document(content).map(|doc| doc.root)
}

pub fn parse_document_with(content: &str, options: &ReadOptions) -> Result<XmlDocument> {
    let mut reader = Reader::from_str(content);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;
    let mut prolog = Vec::new();
    let mut epilog = Vec::new();

    loop {
        let position = reader.buffer_position();
        let event = reader.read_event().map_err(|e| XmlError::Parse {
            message: e.to_string(),
            position,
        })?;

        match event {
            Event::Start(ref e) => {
                stack.push(start_element(e, position)?);
            }
            Event::Empty(ref e) => {
                let element = start_element(e, position)?;
                close_element(element, &mut stack, &mut root, options, position)?;
            }
            Event::End(_) => {
                let element = stack.pop().ok_or_else(|| XmlError::Parse {
                    message: "closing tag without matching start".into(),
                    position,
                })?;
                close_element(element, &mut stack, &mut root, options, position)?;
            }
            Event::Text(ref e) => {
                let raw = e.decode().map_err(|err| XmlError::Parse {
                    message: err.to_string(),
                    position,
                })?;
                let text = quick_xml::escape::unescape(&raw)
                    .map(|c| c.into_owned())
                    .unwrap_or_else(|_| raw.into_owned());
                push_text(outer_nodes(&mut stack, &root, &mut prolog, &mut epilog), &text);
            }
            Event::CData(ref e) => {
                let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                push_text(outer_nodes(&mut stack, &root, &mut prolog, &mut epilog), &text);
            }
            Event::GeneralRef(ref e) => {
                let name = e.decode().map_err(|err| XmlError::Parse {
                    message: err.to_string(),
                    position,
                })?;
                let resolved = match e.resolve_char_ref() {
                    Ok(Some(ch)) => ch.to_string(),
                    _ => match quick_xml::escape::resolve_predefined_entity(&name) {
                        Some(value) => value.to_string(),
                        None => {
                            tracing::debug!("keeping unknown entity reference &{};", name);
                            format!("&{name};")
                        }
                    },
                };
                push_text(
                    outer_nodes(&mut stack, &root, &mut prolog, &mut epilog),
                    &resolved,
                );
            }
            Event::Comment(ref e) => {
                if options.keep_comments {
                    let text = e.decode().map_err(|err| XmlError::Parse {
                        message: err.to_string(),
                        position,
                    })?;
                    outer_nodes(&mut stack, &root, &mut prolog, &mut epilog)
                        .push(XmlNode::Comment(text.into_owned()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(XmlError::Parse {
            message: format!("unclosed element <{}>", open.name),
            position: reader.buffer_position(),
        });
    }

    let root = root.ok_or(XmlError::MissingRoot)?;
    if options.trim_text {
        trim_nodes(&mut prolog);
        trim_nodes(&mut epilog);
    }

    Ok(XmlDocument {
        prolog,
        root,
        epilog,
    })
}

fn start_element(start: &BytesStart<'_>, position: u64) -> Result<XmlElement> {
    let mut element = XmlElement::new(String::from_utf8_lossy(start.name().as_ref()));

    for attr in start.attributes() {
        let attr = attr.map_err(|e| XmlError::Parse {
            message: e.to_string(),
            position,
        })?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = match attr.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(e) => {
                tracing::warn!("Failed to unescape attribute '{}': {}", key, e);
                String::from_utf8_lossy(&attr.value).into_owned()
            }
        };
        element.attributes.insert(key, value);
    }

    Ok(element)
}

fn close_element(
    mut element: XmlElement,
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    options: &ReadOptions,
    position: u64,
) -> Result<()> {
    if options.trim_text {
        trim_nodes(&mut element.children);
    }

    if let Some(parent) = stack.last_mut() {
        parent.children.push(XmlNode::Element(element));
        return Ok(());
    }

    if root.is_some() {
        return Err(XmlError::Parse {
            message: format!("second root element <{}>", element.name),
            position,
        });
    }
    *root = Some(element);
    Ok(())
}

/// Node list that receives content at the current depth.
fn outer_nodes<'a>(
    stack: &'a mut [XmlElement],
    root: &Option<XmlElement>,
    prolog: &'a mut Vec<XmlNode>,
    epilog: &'a mut Vec<XmlNode>,
) -> &'a mut Vec<XmlNode> {
    match stack.last_mut() {
        Some(parent) => &mut parent.children,
        None if root.is_some() => epilog,
        None => prolog,
    }
}

fn push_text(nodes: &mut Vec<XmlNode>, text: &str) {
    if let Some(XmlNode::Text(last)) = nodes.last_mut() {
        last.push_str(text);
    } else {
        nodes.push(XmlNode::Text(text.to_string()));
    }
}

fn trim_nodes(nodes: &mut Vec<XmlNode>) {
    nodes.retain_mut(|node| match node {
        XmlNode::Text(text) => {
            let trimmed = text.trim();
            if trimmed.len() != text.len() {
                *text = trimmed.to_string();
            }
            !text.is_empty()
        }
        _ => true,
    });
}
