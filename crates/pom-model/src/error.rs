//! Errors raised by the POM model.

use crate::reflect::FeatureId;
use pom_xml::XmlError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PomError {
    #[error("{element} has no feature with code {code}")]
    UnknownFeature { element: &'static str, code: FeatureId },

    #[error("Feature '{feature}' of {element} expects {expected}, got {found}")]
    TypeMismatch {
        element: &'static str,
        feature: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Index {index} is out of bounds for '{feature}' with {len} entries")]
    IndexOutOfBounds {
        feature: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Unknown dependency scope '{scope}'")]
    UnknownScope { scope: String },

    #[error("Expected <project> as document root, found <{found}>")]
    UnexpectedRoot { found: String },

    #[error(transparent)]
    Xml(#[from] XmlError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PomError::UnknownFeature {
            element: "Parent",
            code: 42,
        };
        assert_eq!(err.to_string(), "Parent has no feature with code 42");

        let err = PomError::TypeMismatch {
            element: "Scm",
            feature: "tag",
            expected: "text",
            found: "text list",
        };
        assert_eq!(
            err.to_string(),
            "Feature 'tag' of Scm expects text, got text list"
        );

        let err = PomError::UnexpectedRoot {
            found: "settings".into(),
        };
        assert!(err.to_string().contains("<settings>"));
    }

    #[test]
    fn test_xml_error_is_transparent() {
        let err: PomError = XmlError::MissingRoot.into();
        assert!(matches!(err, PomError::Xml(XmlError::MissingRoot)));
        assert_eq!(err.to_string(), "XML document has no root element");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::from(std::io::ErrorKind::NotFound);
        let err: PomError = io_err.into();
        assert!(matches!(err, PomError::Io(_)));
    }
}
