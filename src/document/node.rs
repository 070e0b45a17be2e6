//! Generic document tree produced by decoding YAML or JSON.
//!
//! Every decoder in this crate produces a [`Value`]. Mappings come in two
//! flavours: ordered ones (YAML, order-preserving JSON) are stored as a
//! [`Mapping`], which keeps insertion order, while plain JSON objects carry no
//! order and are stored as [`Value::Unordered`] until they are normalized.
//!
//! # Example
//!
//! ```
//! use yamlgrab::document::node::{Mapping, Scalar, Value};
//!
//! let mut map = Mapping::new();
//! map.insert("name".to_string(), Value::from("yamlgrab"));
//! map.insert("version".to_string(), Value::Scalar(Scalar::Int(1)));
//!
//! let root = Value::Mapping(map);
//! assert!(root.is_mapping());
//! assert_eq!(root.kind().to_string(), "mapping");
//! ```

use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;

/// An ordered key/value sequence, the canonical mapping representation.
pub type Mapping = IndexMap<String, Value>;

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    /// Integers above `i64::MAX`
    UInt(u64),
    Float(f64),
    String(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::UInt(u) => write!(f, "{}", u),
            // Debug keeps the fraction of whole floats: 1.0 stays "1.0"
            Scalar::Float(fl) => write!(f, "{:?}", fl),
            Scalar::String(s) => write!(f, "{}", s),
        }
    }
}

impl Scalar {
    /// Returns true if this scalar identifies a record by the given text.
    ///
    /// Strings compare verbatim; numbers and booleans compare by their
    /// rendered form so that `id=1` finds `id: 1`. Floats render with their
    /// fraction, so `v=1.0` finds `v: 1.0` but `v=1` does not. Null never
    /// matches.
    pub fn matches_text(&self, text: &str) -> bool {
        match self {
            Scalar::Null => false,
            Scalar::String(s) => s == text,
            Scalar::Bool(_) | Scalar::Int(_) | Scalar::UInt(_) | Scalar::Float(_) => {
                self.to_string() == text
            }
        }
    }
}

/// A node of a decoded document.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A mapping whose key order is meaningful
    Mapping(Mapping),
    /// A mapping decoded without any key order (plain JSON objects)
    Unordered(HashMap<String, Value>),
    /// A list of arbitrary values
    Sequence(Vec<Value>),
    /// A list whose entries are all mappings, addressable by field value
    Records(Vec<Mapping>),
    /// A leaf value
    Scalar(Scalar),
}

/// The structural kind of a value, as reported in traversal errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Mapping,
    ComplexList,
    SimpleList,
    String,
    Integer,
    Float,
    Boolean,
    Null,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Mapping => "mapping",
            Kind::ComplexList => "complex list",
            Kind::SimpleList => "simple list",
            Kind::String => "string",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::Boolean => "boolean",
            Kind::Null => "null",
        };
        f.write_str(name)
    }
}

impl Kind {
    pub fn is_list(&self) -> bool {
        matches!(self, Kind::SimpleList | Kind::ComplexList)
    }
}

impl Value {
    /// Returns the structural kind of this value.
    ///
    /// A plain [`Value::Sequence`] reports `simple list` even when every
    /// element is a mapping; only classified record lists report
    /// `complex list`.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Mapping(_) | Value::Unordered(_) => Kind::Mapping,
            Value::Records(_) => Kind::ComplexList,
            Value::Sequence(_) => Kind::SimpleList,
            Value::Scalar(scalar) => match scalar {
                Scalar::Null => Kind::Null,
                Scalar::Bool(_) => Kind::Boolean,
                Scalar::Int(_) | Scalar::UInt(_) => Kind::Integer,
                Scalar::Float(_) => Kind::Float,
                Scalar::String(_) => Kind::String,
            },
        }
    }

    /// Returns true for both ordered and unordered mappings.
    ///
    /// ```
    /// use yamlgrab::document::node::{Mapping, Value};
    /// use std::collections::HashMap;
    ///
    /// assert!(Value::Mapping(Mapping::new()).is_mapping());
    /// assert!(Value::Unordered(HashMap::new()).is_mapping());
    /// assert!(!Value::Sequence(vec![]).is_mapping());
    /// ```
    pub fn is_mapping(&self) -> bool {
        matches!(self, Value::Mapping(_) | Value::Unordered(_))
    }

    /// Returns true for plain sequences and record sequences.
    pub fn is_list(&self) -> bool {
        matches!(self, Value::Sequence(_) | Value::Records(_))
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Looks up `key` in a mapping-shaped value.
    ///
    /// Returns `None` for a missing key and for values that are not mappings.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Mapping(map) => map.get(key),
            Value::Unordered(map) => map.get(key),
            _ => None,
        }
    }

    /// Returns the keys of a mapping-shaped value.
    ///
    /// Ordered mappings yield their own order; unordered mappings yield keys
    /// sorted ascending so the result is stable.
    pub fn keys(&self) -> Vec<&str> {
        match self {
            Value::Mapping(map) => map.keys().map(String::as_str).collect(),
            Value::Unordered(map) => {
                let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
                keys.sort_unstable();
                keys
            }
            _ => Vec::new(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(Scalar::String(s))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Scalar(Scalar::Int(i))
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Scalar(Scalar::Int(i64::from(i)))
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        match i64::try_from(u) {
            Ok(i) => Value::Scalar(Scalar::Int(i)),
            Err(_) => Value::Scalar(Scalar::UInt(u)),
        }
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Scalar(Scalar::Float(f))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Scalar(Scalar::Bool(b))
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Value::Scalar(scalar)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Mapping(map)
    }
}
