//! Generic XML tree used by pom-model.
//!
//! Provides an owned element tree (`XmlDocument`, `XmlElement`, `XmlNode`),
//! a quick-xml based reader and writer, and lookups by `/`-separated child
//! names.

pub mod dom;
pub mod error;
pub mod reader;
pub mod writer;

pub use dom::{XmlDocument, XmlElement, XmlNode, local_part, path_segments};
pub use error::{Result, XmlError};
pub use reader::{ReadOptions, parse_document, parse_document_with, parse_element};
pub use writer::{WriteOptions, write_document, write_document_with, write_element};
