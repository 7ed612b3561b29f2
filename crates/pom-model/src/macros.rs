//! Declarative generator for POM element types.
//!
//! Every element of the model has the same shape: optional text fields,
//! optional contained children and ordered lists. `pom_element!` expands a
//! feature table into the struct, its typed accessors, and the
//! `Reflective`, `Notifying`, `ModelValue`, `XmlMapped` and `Display`
//! implementations.
//!
//! ```ignore
//! pom_element! {
//!     /// Coordinates of the parent project.
//!     Parent : "parent" {
//!         text {
//!             ARTIFACT_ID = 0 => artifact_id, set_artifact_id, unset_artifact_id, is_artifact_id_set : "artifactId";
//!         }
//!         child {}
//!         list {}
//!     }
//! }
//! ```
//!
//! A trailing `unsettable` on a text entry marks the feature as tracked by
//! an explicit is-set flag in the feature table.

macro_rules! pom_element {
    (@unsettable) => { false };
    (@unsettable unsettable) => { true };

    (
        $(#[$meta:meta])*
        $name:ident : $tag:literal {
            text {
                $(
                    $(#[$tmeta:meta])*
                    $tconst:ident = $tcode:literal => $tfield:ident, $tset:ident, $tunset:ident, $tis:ident : $txml:literal $($tflag:ident)?;
                )*
            }
            child {
                $(
                    $(#[$cmeta:meta])*
                    $cconst:ident = $ccode:literal => $cfield:ident, $cmut:ident, $cset:ident, $cunset:ident, $cis:ident : $cty:ty, $cxml:literal;
                )*
            }
            list {
                $(
                    $(#[$lmeta:meta])*
                    $lconst:ident = $lcode:literal => $lfield:ident, $lmut:ident : $lty:ty, $lxml:literal / $litem:literal;
                )*
            }
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            $(
                #[serde(default, skip_serializing_if = "Option::is_none")]
                $tfield: Option<String>,
            )*
            $(
                #[serde(default, skip_serializing_if = "Option::is_none")]
                $cfield: Option<$cty>,
            )*
            $(
                #[serde(default, skip_serializing_if = "Vec::is_empty")]
                $lfield: Vec<$lty>,
            )*
            #[serde(skip)]
            notifier: $crate::notify::Notifier,
        }

        impl $name {
            pub const XML_TAG: &'static str = $tag;
            $( pub const $tconst: $crate::reflect::FeatureId = $tcode; )*
            $( pub const $cconst: $crate::reflect::FeatureId = $ccode; )*
            $( pub const $lconst: $crate::reflect::FeatureId = $lcode; )*

            pub fn new() -> Self {
                Self::default()
            }

            #[allow(dead_code)]
            fn fire(
                &self,
                kind: $crate::notify::NotificationKind,
                code: $crate::reflect::FeatureId,
                feature_name: &'static str,
                old_value: $crate::value::Value,
                new_value: $crate::value::Value,
            ) {
                self.notifier.notify(&$crate::notify::Notification::new(
                    kind,
                    <Self as $crate::reflect::Reflective>::ELEMENT,
                    code,
                    feature_name,
                    old_value,
                    new_value,
                ));
            }

            $(
                $(#[$tmeta])*
                pub fn $tfield(&self) -> Option<&str> {
                    self.$tfield.as_deref()
                }

                pub fn $tset(&mut self, value: impl Into<String>) {
                    let old = self.$tfield.replace(value.into());
                    if self.notifier.is_required() {
                        self.fire(
                            $crate::notify::NotificationKind::Set,
                            $tcode,
                            $txml,
                            $crate::value::Value::from(old),
                            $crate::value::optional_value(&self.$tfield),
                        );
                    }
                }

                pub fn $tunset(&mut self) {
                    let old = self.$tfield.take();
                    if self.notifier.is_required() {
                        self.fire(
                            $crate::notify::NotificationKind::Unset,
                            $tcode,
                            $txml,
                            $crate::value::Value::from(old),
                            $crate::value::Value::Null,
                        );
                    }
                }

                pub fn $tis(&self) -> bool {
                    self.$tfield.is_some()
                }
            )*

            $(
                $(#[$cmeta])*
                pub fn $cfield(&self) -> Option<&$cty> {
                    self.$cfield.as_ref()
                }

                pub fn $cmut(&mut self) -> Option<&mut $cty> {
                    self.$cfield.as_mut()
                }

                /// Attaches `value`, returning the previously contained child.
                pub fn $cset(&mut self, value: $cty) -> Option<$cty> {
                    let old = self.$cfield.replace(value);
                    if self.notifier.is_required() {
                        self.fire(
                            $crate::notify::NotificationKind::Set,
                            $ccode,
                            $cxml,
                            $crate::value::optional_value(&old),
                            $crate::value::optional_value(&self.$cfield),
                        );
                    }
                    old
                }

                /// Detaches and returns the contained child.
                pub fn $cunset(&mut self) -> Option<$cty> {
                    let old = self.$cfield.take();
                    if self.notifier.is_required() {
                        self.fire(
                            $crate::notify::NotificationKind::Unset,
                            $ccode,
                            $cxml,
                            $crate::value::optional_value(&old),
                            $crate::value::Value::Null,
                        );
                    }
                    old
                }

                pub fn $cis(&self) -> bool {
                    self.$cfield.is_some()
                }
            )*

            $(
                $(#[$lmeta])*
                pub fn $lfield(&self) -> &[$lty] {
                    &self.$lfield
                }

                pub fn $lmut(&mut self) -> $crate::list::ListEdit<'_, $lty> {
                    $crate::list::ListEdit::new(
                        &mut self.$lfield,
                        &self.notifier,
                        <Self as $crate::reflect::Reflective>::ELEMENT,
                        $lcode,
                        $lxml,
                    )
                }
            )*
        }

        impl $crate::reflect::Reflective for $name {
            const ELEMENT: &'static str = stringify!($name);

            const FEATURES: &'static [$crate::reflect::FeatureInfo] = &[
                $(
                    $crate::reflect::FeatureInfo {
                        code: $tcode,
                        name: $txml,
                        kind: $crate::reflect::FeatureKind::Text,
                        unsettable: pom_element!(@unsettable $($tflag)?),
                    },
                )*
                $( $crate::reflect::FeatureInfo::new($ccode, $cxml, $crate::reflect::FeatureKind::Child), )*
                $( $crate::reflect::FeatureInfo::new($lcode, $lxml, $crate::reflect::FeatureKind::List), )*
            ];

            fn get(
                &self,
                code: $crate::reflect::FeatureId,
            ) -> $crate::error::Result<$crate::value::Value> {
                match code {
                    $( $tcode => Ok($crate::value::optional_value(&self.$tfield)), )*
                    $( $ccode => Ok($crate::value::optional_value(&self.$cfield)), )*
                    $( $lcode => Ok(<$lty as $crate::value::ModelValue>::list_to_value(&self.$lfield)), )*
                    _ => Err($crate::reflect::unknown_feature(Self::ELEMENT, code)),
                }
            }

            fn set(
                &mut self,
                code: $crate::reflect::FeatureId,
                value: $crate::value::Value,
            ) -> $crate::error::Result<()> {
                match code {
                    $(
                        $tcode => match $crate::reflect::take_optional::<String>(
                            value,
                            Self::ELEMENT,
                            $txml,
                            "text",
                        )? {
                            Some(text) => self.$tset(text),
                            None => self.$tunset(),
                        },
                    )*
                    $(
                        $ccode => match $crate::reflect::take_optional::<$cty>(
                            value,
                            Self::ELEMENT,
                            $cxml,
                            stringify!($cty),
                        )? {
                            Some(child) => {
                                self.$cset(child);
                            }
                            None => {
                                self.$cunset();
                            }
                        },
                    )*
                    $(
                        $lcode => {
                            let items = $crate::reflect::take_list::<$lty>(value, Self::ELEMENT, $lxml)?;
                            self.$lmut().assign(items);
                        }
                    )*
                    _ => return Err($crate::reflect::unknown_feature(Self::ELEMENT, code)),
                }
                Ok(())
            }

            fn unset(&mut self, code: $crate::reflect::FeatureId) -> $crate::error::Result<()> {
                match code {
                    $( $tcode => self.$tunset(), )*
                    $(
                        $ccode => {
                            self.$cunset();
                        }
                    )*
                    $(
                        $lcode => {
                            self.$lmut().clear();
                        }
                    )*
                    _ => return Err($crate::reflect::unknown_feature(Self::ELEMENT, code)),
                }
                Ok(())
            }

            fn is_set(&self, code: $crate::reflect::FeatureId) -> $crate::error::Result<bool> {
                match code {
                    $( $tcode => Ok(self.$tfield.is_some()), )*
                    $( $ccode => Ok(self.$cfield.is_some()), )*
                    $( $lcode => Ok(!self.$lfield.is_empty()), )*
                    _ => Err($crate::reflect::unknown_feature(Self::ELEMENT, code)),
                }
            }
        }

        impl $crate::notify::Notifying for $name {
            fn notifier(&self) -> &$crate::notify::Notifier {
                &self.notifier
            }

            fn notifier_mut(&mut self) -> &mut $crate::notify::Notifier {
                &mut self.notifier
            }
        }

        impl $crate::value::ModelValue for $name {
            const IS_ATTRIBUTE: bool = false;

            fn to_value(&self) -> $crate::value::Value {
                $crate::value::Value::Node(Box::new($crate::value::PomNode::$name(self.clone())))
            }

            fn from_value(value: $crate::value::Value) -> Option<Self> {
                match value {
                    $crate::value::Value::Node(node) => match *node {
                        $crate::value::PomNode::$name(inner) => Some(inner),
                        _ => None,
                    },
                    _ => None,
                }
            }

            fn list_to_value(items: &[Self]) -> $crate::value::Value {
                $crate::value::Value::NodeList(
                    items.iter().cloned().map($crate::value::PomNode::$name).collect(),
                )
            }

            fn list_from_value(value: $crate::value::Value) -> Option<Vec<Self>> {
                match value {
                    $crate::value::Value::NodeList(nodes) => nodes
                        .into_iter()
                        .map(|node| match node {
                            $crate::value::PomNode::$name(inner) => Some(inner),
                            _ => None,
                        })
                        .collect(),
                    $crate::value::Value::Null => Some(Vec::new()),
                    _ => None,
                }
            }
        }

        impl From<$name> for $crate::value::PomNode {
            fn from(value: $name) -> Self {
                Self::$name(value)
            }
        }

        impl $crate::xml_map::XmlMapped for $name {
            fn from_xml(element: &::pom_xml::XmlElement) -> Self {
                let mut this = Self::default();
                for child in element.elements() {
                    match child.local_name() {
                        $( $txml => this.$tfield = Some(child.text()), )*
                        $(
                            $cxml => {
                                this.$cfield =
                                    Some(<$cty as $crate::xml_map::XmlMapped>::from_xml(child));
                            }
                        )*
                        $(
                            $lxml => {
                                this.$lfield = child
                                    .elements_named($litem)
                                    .map(<$lty as $crate::xml_map::XmlMapped>::from_xml)
                                    .collect();
                            }
                        )*
                        other => tracing::debug!("skipping <{}> inside <{}>", other, $tag),
                    }
                }
                this
            }

            fn to_xml(&self, name: &str) -> ::pom_xml::XmlElement {
                let mut element = ::pom_xml::XmlElement::new(name);
                $(
                    if let Some(value) = &self.$tfield {
                        element.append_child(::pom_xml::XmlElement::with_text($txml, value.as_str()));
                    }
                )*
                $(
                    if let Some(child) = &self.$cfield {
                        element.append_child($crate::xml_map::XmlMapped::to_xml(child, $cxml));
                    }
                )*
                $(
                    if !self.$lfield.is_empty() {
                        let container = element.append_child(::pom_xml::XmlElement::new($lxml));
                        for item in &self.$lfield {
                            container.append_child($crate::xml_map::XmlMapped::to_xml(item, $litem));
                        }
                    }
                )*
                element
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                let mut parts: Vec<String> = Vec::new();
                $(
                    parts.push(format!("{}: {}", $txml, self.$tfield.as_deref().unwrap_or("null")));
                )*
                $(
                    if <$lty as $crate::value::ModelValue>::IS_ATTRIBUTE {
                        let items: Vec<&str> = self
                            .$lfield
                            .iter()
                            .filter_map(<$lty as $crate::value::ModelValue>::attribute_text)
                            .collect();
                        parts.push(format!("{}: [{}]", $lxml, items.join(", ")));
                    }
                )*
                if parts.is_empty() {
                    f.write_str(stringify!($name))
                } else {
                    write!(f, "{} ({})", stringify!($name), parts.join(", "))
                }
            }
        }
    };
}
