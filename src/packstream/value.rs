//! The value tree PackStream encodes and decodes.

use super::bigint::BigInt;
use super::graph::{Node, Path, Relationship, UnboundRelationship};

/// Generic tagged record: a one-byte signature and a fixed field
/// list. Used both for Bolt protocol messages and for any domain
/// object the decoder doesn't recognize by signature.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    pub signature: u8,
    pub fields: Vec<Value>,
}

impl Structure {
    pub fn new(signature: u8, fields: Vec<Value>) -> Self {
        Structure { signature, fields }
    }
}

/// An ordered string-keyed map. Insertion order is preserved on
/// encode; [`Map::insert`] implements decode's "last write wins" rule
/// for duplicate keys by overwriting in place rather than appending.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Map {
    entries: Vec<(String, Value)>,
}

impl Map {
    pub fn new() -> Self {
        Map {
            entries: Vec::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if let Some(existing) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            existing.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Value)> for Map {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        let mut map = Map::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// The dynamically typed value tree PackStream moves across the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(BigInt),
    Float(f64),
    String(String),
    Bytes(bytes::Bytes),
    List(Vec<Value>),
    Map(Map),
    Structure(Structure),
    Node(Node),
    Relationship(Relationship),
    UnboundRelationship(UnboundRelationship),
    Path(Path),
}

impl Value {
    pub fn int(value: i64) -> Value {
        Value::Int(BigInt::new(value))
    }

    pub fn string(value: impl Into<String>) -> Value {
        Value::String(value.into())
    }

    pub fn list(values: Vec<Value>) -> Value {
        Value::List(values)
    }

    /// Names the handful of value-tree variants that are never valid
    /// to appear inside request parameters (graph entities are only
    /// ever produced by the Unpacker, never accepted from the caller).
    pub fn forbidden_in_parameters(&self) -> Option<&'static str> {
        match self {
            Value::Node(_) => Some("Node"),
            Value::Relationship(_) => Some("Relationship"),
            Value::UnboundRelationship(_) => Some("UnboundRelationship"),
            Value::Path(_) => Some("Path"),
            _ => None,
        }
    }
}
