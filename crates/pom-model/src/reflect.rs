//! Reflective access by integer feature code.
//!
//! Each element publishes a static feature table and answers `get`, `set`,
//! `unset` and `is_set` by code. Unknown codes fail with
//! [`PomError::UnknownFeature`]; a value of the wrong kind fails with
//! [`PomError::TypeMismatch`]. Setting `Value::Null` is the same as unsetting.

use crate::error::{PomError, Result};
use crate::value::{ModelValue, Value};

pub type FeatureId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    /// Optional scalar text.
    Text,
    /// Single contained element.
    Child,
    /// Ordered list of values or contained elements.
    List,
    /// Opaque generic structure (XML subtree, maps, mixed content).
    Opaque,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureInfo {
    pub code: FeatureId,
    /// XML name of the feature.
    pub name: &'static str,
    pub kind: FeatureKind,
    /// Absence and an explicit value are reported separately for this feature.
    pub unsettable: bool,
}

impl FeatureInfo {
    pub const fn new(code: FeatureId, name: &'static str, kind: FeatureKind) -> Self {
        Self {
            code,
            name,
            kind,
            unsettable: false,
        }
    }

    pub const fn unsettable(mut self) -> Self {
        self.unsettable = true;
        self
    }
}

pub trait Reflective {
    /// Element type name.
    const ELEMENT: &'static str;

    const FEATURES: &'static [FeatureInfo];

    fn features() -> &'static [FeatureInfo] {
        Self::FEATURES
    }

    fn feature(code: FeatureId) -> Result<&'static FeatureInfo> {
        Self::FEATURES
            .iter()
            .find(|f| f.code == code)
            .ok_or(PomError::UnknownFeature {
                element: Self::ELEMENT,
                code,
            })
    }

    fn feature_by_name(name: &str) -> Option<&'static FeatureInfo> {
        Self::FEATURES.iter().find(|f| f.name == name)
    }

    fn get(&self, code: FeatureId) -> Result<Value>;

    fn set(&mut self, code: FeatureId, value: Value) -> Result<()>;

    fn unset(&mut self, code: FeatureId) -> Result<()>;

    fn is_set(&self, code: FeatureId) -> Result<bool>;
}

pub(crate) fn unknown_feature(element: &'static str, code: FeatureId) -> PomError {
    PomError::UnknownFeature { element, code }
}

pub(crate) fn type_mismatch(
    element: &'static str,
    feature: &'static str,
    expected: &'static str,
    found: &Value,
) -> PomError {
    PomError::TypeMismatch {
        element,
        feature,
        expected,
        found: found.kind(),
    }
}

/// Converts a reflective value for an optional slot. `Null` yields `None`.
pub(crate) fn take_optional<T: ModelValue>(
    value: Value,
    element: &'static str,
    feature: &'static str,
    expected: &'static str,
) -> Result<Option<T>> {
    if value.is_null() {
        return Ok(None);
    }
    let error = type_mismatch(element, feature, expected, &value);
    T::from_value(value).map(Some).ok_or(error)
}

pub(crate) fn take_list<T: ModelValue>(
    value: Value,
    element: &'static str,
    feature: &'static str,
) -> Result<Vec<T>> {
    let error = type_mismatch(element, feature, "list", &value);
    T::list_from_value(value).ok_or(error)
}
