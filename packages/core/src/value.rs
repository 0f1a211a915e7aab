//! The Value type - a node of the configuration tree.
//!
//! A configuration document decodes into nested mappings of strings to
//! scalars, sequences and further mappings. `Value` is that shape, independent
//! of the text format it came from.

use std::collections::BTreeMap;

use crate::Path;

/// A node of the configuration tree.
///
/// # Design Notes
///
/// - Uses `BTreeMap` for deterministic ordering (comparison, display)
/// - Uses `i64` for integers and `f64` for everything else numeric
/// - `Clone` is a full structural copy, so a cloned subtree never shares
///   state with the tree it came from
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// An explicitly empty value (`key:` with nothing after it in YAML).
    /// Distinct from "path doesn't exist".
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed 64-bit integer.
    Integer(i64),
    /// 64-bit floating point.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Ordered sequence of values. Always replaced wholesale, never merged.
    Array(Vec<Value>),
    /// Key-value mapping with string keys: a branch of the tree.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Create an empty map.
    pub fn map() -> Self {
        Value::Map(BTreeMap::new())
    }

    /// Check if this value is a map (a branch).
    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Name of the variant, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Get a reference to a nested value by path.
    ///
    /// Returns `None` if the path doesn't exist or runs into a non-map value
    /// before its last segment. The empty path resolves to `self`.
    pub fn get(&self, path: &Path) -> Option<&Value> {
        let mut current = self;
        for component in path.iter() {
            current = match current {
                Value::Map(map) => map.get(component)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Place a value at exactly `path`, creating intermediate maps as needed.
    ///
    /// Any non-map value found where a branch is needed is replaced by a map,
    /// and whatever was at `path` is overwritten, never merged. Setting the
    /// empty path replaces `self`.
    pub fn set(&mut self, path: &Path, value: Value) {
        let mut current = self;
        for component in path.iter() {
            current = current.branch_mut().entry(component.clone()).or_default();
        }
        *current = value;
    }

    /// Borrow this node as a map, replacing it with an empty one first if it
    /// is anything else.
    fn branch_mut(&mut self) -> &mut BTreeMap<String, Value> {
        if !self.is_map() {
            *self = Value::map();
        }
        match self {
            Value::Map(map) => map,
            _ => unreachable!("non-map nodes are replaced above"),
        }
    }
}

// Floats compare by value, except that NaN equals NaN so a tree holding a
// YAML `.nan` still compares equal to a copy of itself.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

// Conversion from common types

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(v: BTreeMap<String, Value>) -> Self {
        Value::Map(v)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
