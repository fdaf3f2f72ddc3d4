//! The generated value tree.
//!
//! `Specimen` mirrors a `TypeDescription` shape for shape, with every leaf
//! replaced by a concrete value. It indexes like `serde_json::Value`:
//!
//! ```ignore
//! let mut account = factory.create();
//! account["owner"]["name"] = "Ada".into();
//! let first_tag = &account["tags"][0];
//! ```
//!
//! Indexing a missing key or position panics, the way map and slice
//! indexing does; use [`Specimen::get`] to probe. Assigning through a
//! missing key inserts it.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::rc::Rc;

/// Largest integer an `f64` holds exactly (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A generated zero-argument function.
///
/// Method specimens regenerate their return value on every call.
#[derive(Clone)]
pub struct Callable {
    body: Rc<dyn Fn() -> Specimen>,
}

impl Callable {
    pub fn new(body: impl Fn() -> Specimen + 'static) -> Self {
        Callable {
            body: Rc::new(body),
        }
    }

    /// A callable with no meaningful body; returns `undefined`.
    pub fn placeholder() -> Self {
        Callable::new(|| Specimen::Undefined)
    }

    pub fn call(&self) -> Specimen {
        (self.body)()
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callable")
    }
}

/// Callables compare by identity.
impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.body, &other.body)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Specimen {
    Null,
    #[default]
    Undefined,
    Bool(bool),
    Number(f64),
    String(String),
    Date(DateTime<Utc>),
    Array(Vec<Specimen>),
    /// Keys in declaration order.
    Object(IndexMap<String, Specimen>),
    Function(Callable),
}

impl Specimen {
    pub fn object() -> Self {
        Specimen::Object(IndexMap::new())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Specimen::Null)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Specimen::Undefined)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Specimen::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Specimen::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Specimen::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Specimen::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Specimen]> {
        match self {
            Specimen::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Specimen>> {
        match self {
            Specimen::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_callable(&self) -> Option<&Callable> {
        match self {
            Specimen::Function(callable) => Some(callable),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Specimen> {
        self.as_object()?.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Specimen> {
        match self {
            Specimen::Object(map) => map.get_mut(key),
            _ => None,
        }
    }

    /// Call a function specimen; anything else yields `None`.
    pub fn call(&self) -> Option<Specimen> {
        self.as_callable().map(Callable::call)
    }

    pub fn to_json(&self) -> serde_json::Value {
        // Every variant has a JSON form.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Convert into a typed value through its JSON form.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(serde_json::to_value(self)?)
    }

    fn kind(&self) -> &'static str {
        match self {
            Specimen::Null => "null",
            Specimen::Undefined => "undefined",
            Specimen::Bool(_) => "boolean",
            Specimen::Number(_) => "number",
            Specimen::String(_) => "string",
            Specimen::Date(_) => "date",
            Specimen::Array(_) => "array",
            Specimen::Object(_) => "object",
            Specimen::Function(_) => "function",
        }
    }
}

impl Index<&str> for Specimen {
    type Output = Specimen;

    fn index(&self, key: &str) -> &Specimen {
        match self {
            Specimen::Object(map) => match map.get(key) {
                Some(value) => value,
                None => panic!("no key {key:?} in specimen object"),
            },
            other => panic!("cannot index {} specimen with {key:?}", other.kind()),
        }
    }
}

impl IndexMut<&str> for Specimen {
    /// A `null` or `undefined` specimen becomes an empty object first, and a
    /// missing key is inserted as `undefined`.
    fn index_mut(&mut self, key: &str) -> &mut Specimen {
        if matches!(self, Specimen::Null | Specimen::Undefined) {
            *self = Specimen::object();
        }
        match self {
            Specimen::Object(map) => map.entry(key.to_string()).or_default(),
            other => panic!("cannot index {} specimen with {key:?}", other.kind()),
        }
    }
}

impl Index<usize> for Specimen {
    type Output = Specimen;

    fn index(&self, index: usize) -> &Specimen {
        match self {
            Specimen::Array(items) => &items[index],
            other => panic!("cannot index {} specimen with {index}", other.kind()),
        }
    }
}

impl IndexMut<usize> for Specimen {
    fn index_mut(&mut self, index: usize) -> &mut Specimen {
        match self {
            Specimen::Array(items) => &mut items[index],
            other => panic!("cannot index {} specimen with {index}", other.kind()),
        }
    }
}

impl From<bool> for Specimen {
    fn from(value: bool) -> Self {
        Specimen::Bool(value)
    }
}

impl From<f64> for Specimen {
    fn from(value: f64) -> Self {
        Specimen::Number(value)
    }
}

impl From<i64> for Specimen {
    fn from(value: i64) -> Self {
        Specimen::Number(value as f64)
    }
}

impl From<&str> for Specimen {
    fn from(value: &str) -> Self {
        Specimen::String(value.to_string())
    }
}

impl From<String> for Specimen {
    fn from(value: String) -> Self {
        Specimen::String(value)
    }
}

impl From<DateTime<Utc>> for Specimen {
    fn from(value: DateTime<Utc>) -> Self {
        Specimen::Date(value)
    }
}

impl From<Vec<Specimen>> for Specimen {
    fn from(value: Vec<Specimen>) -> Self {
        Specimen::Array(value)
    }
}

impl From<IndexMap<String, Specimen>> for Specimen {
    fn from(value: IndexMap<String, Specimen>) -> Self {
        Specimen::Object(value)
    }
}

/// `undefined` and functions serialize as `null`, dates as RFC 3339 and
/// integral numbers as integers.
impl Serialize for Specimen {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Specimen::Null | Specimen::Undefined | Specimen::Function(_) => serializer.serialize_unit(),
            Specimen::Bool(b) => serializer.serialize_bool(*b),
            Specimen::Number(n) => {
                if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            Specimen::String(s) => serializer.serialize_str(s),
            Specimen::Date(d) => serializer.serialize_str(&d.to_rfc3339()),
            Specimen::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Specimen::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/specimen_tests.rs"]
mod tests;
