//! Mapping between model values and `pom_xml` elements.

use pom_xml::XmlElement;

pub trait XmlMapped: Sized {
    /// Builds the value from an element. Unknown children are skipped.
    fn from_xml(element: &XmlElement) -> Self;

    /// Renders the value as an element called `name`.
    fn to_xml(&self, name: &str) -> XmlElement;
}

impl XmlMapped for String {
    fn from_xml(element: &XmlElement) -> Self {
        element.text()
    }

    fn to_xml(&self, name: &str) -> XmlElement {
        XmlElement::with_text(name, self.as_str())
    }
}
