//! Typed object model for Maven `pom.xml` documents.
//!
//! Every POM element is a plain record with optional text fields, contained
//! children and ordered containment lists. On top of the typed accessors,
//! each element offers:
//!
//! - change notification to registered [`Observer`]s ([`notify`]),
//! - reflective access by integer feature code ([`Reflective`]),
//! - mapping to and from the `pom_xml` tree ([`XmlMapped`]).
//!
//! `<configuration>` blocks stay raw XML and are edited through path
//! helpers on [`Configuration`]. [`read_pom`] and [`write_pom`] convert
//! whole documents.
//!
//! ```
//! use pom_model::{read_pom, write_pom};
//!
//! let root = read_pom("<project><artifactId>demo</artifactId></project>").unwrap();
//! assert_eq!(root.project().and_then(|p| p.artifact_id()), Some("demo"));
//! assert!(write_pom(&root).unwrap().contains("<artifactId>demo</artifactId>"));
//! ```

#[macro_use]
mod macros;

pub mod configuration;
pub mod document_root;
pub mod elements;
pub mod error;
pub mod list;
pub mod notify;
pub mod pom;
pub mod reflect;
pub mod value;
pub mod xml_map;

pub use configuration::Configuration;
pub use document_root::{DocumentRoot, POM_NAMESPACE, XSI_NAMESPACE};
pub use elements::*;
pub use error::{PomError, Result};
pub use list::ListEdit;
pub use notify::{ChangeLog, Notification, NotificationKind, Notifier, Notifying, Observer};
pub use pom::{read_pom, read_pom_file, read_pom_with, write_pom, write_pom_file, write_pom_with};
pub use reflect::{FeatureId, FeatureInfo, FeatureKind, Reflective};
pub use value::{ModelValue, PomNode, Value};
pub use xml_map::XmlMapped;

pub use pom_xml::{ReadOptions, WriteOptions, XmlElement, XmlNode};
