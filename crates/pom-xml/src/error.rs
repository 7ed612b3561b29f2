//! Errors raised while reading or writing XML trees.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum XmlError {
    #[error("Failed to parse XML at byte {position}: {message}")]
    Parse { message: String, position: u64 },

    #[error("XML document has no root element")]
    MissingRoot,

    #[error("Failed to write XML: {message}")]
    Write { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, XmlError>;
