//! Type description model.
//!
//! A [`TypeDescription`] is the closed, language-agnostic tree that captures the
//! runtime shape of a type: primitive leaves, arrays, tuples, enum-like literal
//! sets, methods and ordered member lists. It is produced once by the solver's
//! description generator and consumed by the runtime specimen factory, so it is
//! the wire contract between the two halves and must round-trip through serde.
//!
//! ## Wire format
//!
//! | Rust | JSON |
//! |------|------|
//! | `Primitive::String` | `"string"` |
//! | `PropertyDescriptor` | `{"key":"a","flag":"array","description":"number"}` |
//! | `Members(..)` | `[{"key":"a","description":"string"}, ...]` |
//! | `LiteralValue` | `"red"`, `3`, `true` |

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Leaf kinds a description can bottom out in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    String,
    Number,
    Boolean,
    Function,
    Date,
    Object,
    Unknown,
    Null,
    Undefined,
}

impl Primitive {
    pub const fn as_str(self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
            Primitive::Function => "function",
            Primitive::Date => "date",
            Primitive::Object => "object",
            Primitive::Unknown => "unknown",
            Primitive::Null => "null",
            Primitive::Undefined => "undefined",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marks how a [`PropertyDescriptor`]'s `description` is to be interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptionFlag {
    /// `description` is the element description.
    Array,
    /// `description` is a member sequence with one un-keyed entry per position.
    Tuple,
    /// `description` is the return shape; parameters are not modeled.
    Method,
    /// `possible_values` holds the literal set; `description` is empty.
    Enum,
}

/// A literal value from a literal type, enum member or literal union.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Boolean(bool),
    Number(OrderedFloat<f64>),
    String(String),
}

impl LiteralValue {
    pub fn number(value: f64) -> Self {
        LiteralValue::Number(OrderedFloat(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        LiteralValue::String(value.into())
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Boolean(b) => write!(f, "{b}"),
            LiteralValue::Number(n) => write!(f, "{}", n.0),
            LiteralValue::String(s) => write!(f, "{s:?}"),
        }
    }
}

/// A named or positional entry in a description, optionally flagged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    /// Present exactly when the node is a named member.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<DescriptionFlag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub possible_values: Option<Vec<LiteralValue>>,
    #[serde(default)]
    pub description: TypeDescription,
}

impl PropertyDescriptor {
    /// An un-keyed, un-flagged wrapper around `description`.
    pub fn new(description: TypeDescription) -> Self {
        PropertyDescriptor {
            key: None,
            flag: None,
            possible_values: None,
            description,
        }
    }

    pub fn flagged(flag: DescriptionFlag, description: TypeDescription) -> Self {
        PropertyDescriptor {
            flag: Some(flag),
            ..PropertyDescriptor::new(description)
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// The key when it is present and non-empty.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref().filter(|k| !k.is_empty())
    }
}

/// One element of an object's member sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DescriptionEntry {
    Primitive(Primitive),
    Property(PropertyDescriptor),
}

impl From<PropertyDescriptor> for DescriptionEntry {
    fn from(value: PropertyDescriptor) -> Self {
        DescriptionEntry::Property(value)
    }
}

/// The recursive, serializable shape description.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeDescription {
    Primitive(Primitive),
    /// Ordered member list of an object; order is declaration order.
    ///
    /// Listed before `Property` so an empty JSON array never deserializes as a
    /// defaulted descriptor.
    Members(Vec<DescriptionEntry>),
    Property(Box<PropertyDescriptor>),
}

impl Default for TypeDescription {
    fn default() -> Self {
        TypeDescription::Members(Vec::new())
    }
}

impl From<Primitive> for TypeDescription {
    fn from(value: Primitive) -> Self {
        TypeDescription::Primitive(value)
    }
}

impl From<PropertyDescriptor> for TypeDescription {
    fn from(value: PropertyDescriptor) -> Self {
        TypeDescription::Property(Box::new(value))
    }
}

impl TypeDescription {
    pub const UNKNOWN: TypeDescription = TypeDescription::Primitive(Primitive::Unknown);

    /// `{flag: Array, description: element}`
    pub fn array(element: TypeDescription) -> Self {
        PropertyDescriptor::flagged(DescriptionFlag::Array, element).into()
    }

    /// `{flag: Tuple, description: [{description: p0}, ...]}`
    pub fn tuple(positions: impl IntoIterator<Item = TypeDescription>) -> Self {
        let slots = positions
            .into_iter()
            .map(|p| DescriptionEntry::Property(PropertyDescriptor::new(p)))
            .collect();
        PropertyDescriptor::flagged(DescriptionFlag::Tuple, TypeDescription::Members(slots)).into()
    }

    /// `{flag: Method, description: return_shape}`
    pub fn method(return_shape: TypeDescription) -> Self {
        PropertyDescriptor::flagged(DescriptionFlag::Method, return_shape).into()
    }

    /// `{flag: Enum, possibleValues: values, description: []}`
    pub fn enumeration(values: Vec<LiteralValue>) -> Self {
        PropertyDescriptor {
            possible_values: Some(values),
            ..PropertyDescriptor::flagged(DescriptionFlag::Enum, TypeDescription::default())
        }
        .into()
    }

    pub fn members(entries: impl IntoIterator<Item = DescriptionEntry>) -> Self {
        TypeDescription::Members(entries.into_iter().collect())
    }

    /// Attach a member key.
    ///
    /// A flagged, un-keyed descriptor takes the key directly (`{key, flag, ...}`);
    /// anything else is wrapped as `{key, description: self}`.
    pub fn keyed(self, key: impl Into<String>) -> Self {
        match self {
            TypeDescription::Property(mut descriptor)
                if descriptor.key.is_none() && descriptor.flag.is_some() =>
            {
                descriptor.key = Some(key.into());
                TypeDescription::Property(descriptor)
            }
            other => PropertyDescriptor::new(other).with_key(key).into(),
        }
    }

    pub fn as_primitive(&self) -> Option<Primitive> {
        match self {
            TypeDescription::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_property(&self) -> Option<&PropertyDescriptor> {
        match self {
            TypeDescription::Property(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_members(&self) -> Option<&[DescriptionEntry]> {
        match self {
            TypeDescription::Members(m) => Some(m),
            _ => None,
        }
    }

    /// Find a keyed member of an object description.
    pub fn member(&self, key: &str) -> Option<&PropertyDescriptor> {
        self.as_members()?.iter().find_map(|entry| match entry {
            DescriptionEntry::Property(p) if p.key() == Some(key) => Some(p),
            _ => None,
        })
    }

    /// Serialize as a JSON literal, suitable for embedding in generated code.
    pub fn to_literal(&self) -> String {
        // A tree of strings, bools and finite-or-not floats always serializes.
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn from_literal(literal: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(literal)
    }
}

#[cfg(test)]
#[path = "../tests/description_tests.rs"]
mod tests;
