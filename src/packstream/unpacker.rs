//! The recursive decoder from PackStream bytes back to a [`Value`]
//! tree, including rehydration of graph-domain structures.
//!
//! Dispatch is a single exhaustive `match` on the marker byte (the
//! "polymorphic encoder dispatch" redesign note applies symmetrically
//! to decoding): there's no probing of "is this marker mine?" sentinel
//! returns the way a dynamically typed host language needs, since
//! Rust's `match` already picks exactly one arm.

use super::bigint::BigInt;
use super::channel::PackStreamReader;
use super::graph::{self, Node, Path, PathSegment, Relationship, UnboundRelationship};
use super::markers;
use super::value::{Map, Structure, Value};
use crate::error::{ProtocolError, Result};
use std::collections::HashMap;

/// A short, stable name for a decoded value's variant, used in
/// [`ProtocolError::TypeMismatch`] messages instead of dumping the
/// full `Debug` output (which could be arbitrarily large for a nested
/// `List`/`Map`).
fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "Null",
        Value::Bool(_) => "Bool",
        Value::Int(_) => "Int",
        Value::Float(_) => "Float",
        Value::String(_) => "String",
        Value::Bytes(_) => "Bytes",
        Value::List(_) => "List",
        Value::Map(_) => "Map",
        Value::Structure(_) => "Structure",
        Value::Node(_) => "Node",
        Value::Relationship(_) => "Relationship",
        Value::UnboundRelationship(_) => "UnboundRelationship",
        Value::Path(_) => "Path",
    }
}

/// Recursive decoder. `disable_lossless_integers`, when set, converts
/// decoded integers to native `f64` on the way out instead of keeping
/// full 64-bit precision — useful for host environments without a
/// 64-bit integer type, a no-op for correctness here since `i64`
/// always fits in an `f64`'s range (just not always exactly).
#[derive(Debug, Clone, Copy)]
pub struct Unpacker {
    disable_lossless_integers: bool,
}

impl Default for Unpacker {
    fn default() -> Self {
        Unpacker {
            disable_lossless_integers: false,
        }
    }
}

impl Unpacker {
    pub fn new(disable_lossless_integers: bool) -> Self {
        Unpacker {
            disable_lossless_integers,
        }
    }

    pub fn unpack<R: PackStreamReader>(&self, reader: &mut R) -> Result<Value> {
        let marker = reader.read_u8().map_err(Into::into)?;
        self.unpack_from_marker(marker, reader)
    }

    fn unpack_from_marker<R: PackStreamReader>(&self, marker: u8, reader: &mut R) -> Result<Value> {
        match marker {
            markers::NULL => Ok(Value::Null),
            markers::TRUE => Ok(Value::Bool(true)),
            markers::FALSE => Ok(Value::Bool(false)),
            markers::FLOAT_64 => Ok(Value::Float(reader.read_f64().map_err(Into::into)?)),
            0x00..=0x7F => Ok(self.finish_int(marker as i64)),
            0xF0..=0xFF => Ok(self.finish_int(marker as i64 - 256)),
            markers::INT_8 => {
                let v = reader.read_i8().map_err(Into::into)?;
                Ok(self.finish_int(v as i64))
            }
            markers::INT_16 => {
                let v = reader.read_i16().map_err(Into::into)?;
                Ok(self.finish_int(v as i64))
            }
            markers::INT_32 => {
                let v = reader.read_i32().map_err(Into::into)?;
                Ok(self.finish_int(v as i64))
            }
            markers::INT_64 => {
                let v = reader.read_i64().map_err(Into::into)?;
                Ok(self.finish_int(v))
            }
            0x80..=0x8F => {
                let len = (marker & 0x0F) as usize;
                self.read_string_body(reader, len)
            }
            markers::STRING_8 => {
                let len = reader.read_u8().map_err(Into::into)? as usize;
                self.read_string_body(reader, len)
            }
            markers::STRING_16 => {
                let len = reader.read_u16().map_err(Into::into)? as usize;
                self.read_string_body(reader, len)
            }
            markers::STRING_32 => {
                let len = reader.read_u32().map_err(Into::into)? as usize;
                self.read_string_body(reader, len)
            }
            0x90..=0x9F => {
                let len = (marker & 0x0F) as usize;
                self.read_list_body(reader, len)
            }
            markers::LIST_8 => {
                let len = reader.read_u8().map_err(Into::into)? as usize;
                self.read_list_body(reader, len)
            }
            markers::LIST_16 => {
                let len = reader.read_u16().map_err(Into::into)? as usize;
                self.read_list_body(reader, len)
            }
            markers::LIST_32 => {
                let len = reader.read_u32().map_err(Into::into)? as usize;
                self.read_list_body(reader, len)
            }
            markers::BYTES_8 => {
                let len = reader.read_u8().map_err(Into::into)? as usize;
                self.read_bytes_body(reader, len)
            }
            markers::BYTES_16 => {
                let len = reader.read_u16().map_err(Into::into)? as usize;
                self.read_bytes_body(reader, len)
            }
            markers::BYTES_32 => {
                let len = reader.read_u32().map_err(Into::into)? as usize;
                self.read_bytes_body(reader, len)
            }
            0xA0..=0xAF => {
                let len = (marker & 0x0F) as usize;
                self.read_map_body(reader, len)
            }
            markers::MAP_8 => {
                let len = reader.read_u8().map_err(Into::into)? as usize;
                self.read_map_body(reader, len)
            }
            markers::MAP_16 => {
                let len = reader.read_u16().map_err(Into::into)? as usize;
                self.read_map_body(reader, len)
            }
            markers::MAP_32 => {
                let len = reader.read_u32().map_err(Into::into)? as usize;
                self.read_map_body(reader, len)
            }
            0xB0..=0xBF => {
                let len = (marker & 0x0F) as usize;
                self.read_struct_body(reader, len)
            }
            markers::STRUCT_8 => {
                let len = reader.read_u8().map_err(Into::into)? as usize;
                self.read_struct_body(reader, len)
            }
            markers::STRUCT_16 => {
                let len = reader.read_u16().map_err(Into::into)? as usize;
                self.read_struct_body(reader, len)
            }
            other => Err(ProtocolError::UnknownMarker { marker: other }.into()),
        }
    }

    fn finish_int(&self, value: i64) -> Value {
        if self.disable_lossless_integers {
            Value::Float(BigInt::new(value).to_f64_lossy())
        } else {
            Value::Int(BigInt::new(value))
        }
    }

    fn read_string_body<R: PackStreamReader>(&self, reader: &mut R, len: usize) -> Result<Value> {
        let bytes = reader
            .read_exact_bytes(len)
            .map_err(Into::into)?;
        let s = String::from_utf8(bytes)
            .map_err(|e| ProtocolError::InvalidUtf8 { reason: e.to_string() })?;
        Ok(Value::String(s))
    }

    fn read_bytes_body<R: PackStreamReader>(&self, reader: &mut R, len: usize) -> Result<Value> {
        let bytes = reader
            .read_exact_bytes(len)
            .map_err(Into::into)?;
        Ok(Value::Bytes(bytes::Bytes::from(bytes)))
    }

    fn read_list_body<R: PackStreamReader>(&self, reader: &mut R, len: usize) -> Result<Value> {
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(self.unpack(reader)?);
        }
        Ok(Value::List(items))
    }

    fn read_map_body<R: PackStreamReader>(&self, reader: &mut R, len: usize) -> Result<Value> {
        let mut map = Map::new();
        for _ in 0..len {
            let key = match self.unpack(reader)? {
                Value::String(s) => s,
                other => {
                    return Err(ProtocolError::TypeMismatch {
                        expected: "map key to be a string",
                        actual: value_kind(&other),
                    }
                    .into());
                }
            };
            let value = self.unpack(reader)?;
            map.insert(key, value);
        }
        Ok(Value::Map(map))
    }

    fn read_struct_body<R: PackStreamReader>(&self, reader: &mut R, size: usize) -> Result<Value> {
        let signature = reader.read_u8().map_err(Into::into)?;
        match signature {
            graph::signature::NODE => self.read_node(reader, size),
            graph::signature::RELATIONSHIP => self.read_relationship(reader, size),
            graph::signature::UNBOUND_RELATIONSHIP => self.read_unbound_relationship(reader, size),
            graph::signature::PATH => self.read_path(reader, size),
            _ => {
                let mut fields = Vec::with_capacity(size);
                for _ in 0..size {
                    fields.push(self.unpack(reader)?);
                }
                Ok(Value::Structure(Structure::new(signature, fields)))
            }
        }
    }

    fn expect_size(name: &'static str, signature: u8, expected: usize, actual: usize) -> Result<()> {
        if expected != actual {
            return Err(ProtocolError::WrongStructSize {
                struct_name: name,
                signature,
                expected,
                actual,
            }
            .into());
        }
        Ok(())
    }

    fn read_node<R: PackStreamReader>(&self, reader: &mut R, size: usize) -> Result<Value> {
        Self::expect_size("Node", graph::signature::NODE, 3, size)?;
        let identity = self.expect_int(reader)?;
        let labels = self.expect_string_list(reader)?;
        let properties = self.expect_map(reader)?;
        Ok(Value::Node(Node {
            identity,
            labels,
            properties,
        }))
    }

    fn read_relationship<R: PackStreamReader>(&self, reader: &mut R, size: usize) -> Result<Value> {
        Self::expect_size("Relationship", graph::signature::RELATIONSHIP, 5, size)?;
        let identity = self.expect_int(reader)?;
        let start_node_id = self.expect_int(reader)?;
        let end_node_id = self.expect_int(reader)?;
        let rel_type = self.expect_string(reader)?;
        let properties = self.expect_map(reader)?;
        Ok(Value::Relationship(Relationship {
            identity,
            start_node_id,
            end_node_id,
            rel_type,
            properties,
        }))
    }

    fn read_unbound_relationship<R: PackStreamReader>(
        &self,
        reader: &mut R,
        size: usize,
    ) -> Result<Value> {
        Self::expect_size(
            "UnboundRelationship",
            graph::signature::UNBOUND_RELATIONSHIP,
            3,
            size,
        )?;
        let identity = self.expect_int(reader)?;
        let rel_type = self.expect_string(reader)?;
        let properties = self.expect_map(reader)?;
        Ok(Value::UnboundRelationship(UnboundRelationship {
            identity,
            rel_type,
            properties,
        }))
    }

    /// Rehydrates a path from `nodes`, `rels`, and a flat `sequence` of
    /// `(relIndex, nodeIndex)` pairs. Each unbound relationship is
    /// materialized into a bound [`Relationship`] at most once, cached
    /// by its original index in `rels` — the immutable-data-model
    /// counterpart of the reference implementation's in-place mutation
    /// of the unbound slot, so repeated references to the same
    /// relationship resolve to the same cached instance.
    fn read_path<R: PackStreamReader>(&self, reader: &mut R, size: usize) -> Result<Value> {
        Self::expect_size("Path", graph::signature::PATH, 3, size)?;

        let nodes = self.expect_node_list(reader)?;
        let rels = self.expect_unbound_relationship_list(reader)?;
        let sequence = self.expect_int_list(reader)?;

        if nodes.is_empty() {
            return Err(ProtocolError::InvalidPathSequence {
                reason: "path has no nodes",
            }
            .into());
        }
        if sequence.len() % 2 != 0 {
            return Err(ProtocolError::InvalidPathSequence {
                reason: "path sequence has an odd length",
            }
            .into());
        }

        let mut bound_cache: HashMap<usize, Relationship> = HashMap::new();
        let mut prev = nodes[0].clone();
        let mut segments = Vec::with_capacity(sequence.len() / 2);

        for pair in sequence.chunks(2) {
            let (rel_idx, node_idx) = (pair[0], pair[1]);
            let next = nodes.get(node_idx as usize).cloned().ok_or_else(|| {
                ProtocolError::InvalidPathSequence {
                    reason: "path node index out of range",
                }
            })?;

            let rel = if rel_idx > 0 {
                let idx = (rel_idx - 1) as usize;
                let unbound = rels.get(idx).ok_or_else(|| ProtocolError::InvalidPathSequence {
                    reason: "path rel index out of range",
                })?;
                bound_cache
                    .entry(idx)
                    .or_insert_with(|| unbound.bind(prev.identity, next.identity))
                    .clone()
            } else if rel_idx < 0 {
                let idx = (-rel_idx - 1) as usize;
                let unbound = rels.get(idx).ok_or_else(|| ProtocolError::InvalidPathSequence {
                    reason: "path rel index out of range",
                })?;
                bound_cache
                    .entry(idx)
                    .or_insert_with(|| unbound.bind(next.identity, prev.identity))
                    .clone()
            } else {
                return Err(ProtocolError::InvalidPathSequence {
                    reason: "path rel index of zero is invalid",
                }
                .into());
            };

            segments.push(PathSegment {
                start: prev.clone(),
                rel,
                end: next.clone(),
            });
            prev = next;
        }

        Ok(Value::Path(Path {
            start: nodes[0].clone(),
            end: prev,
            segments,
        }))
    }

    fn expect_int<R: PackStreamReader>(&self, reader: &mut R) -> Result<BigInt> {
        match self.unpack(reader)? {
            Value::Int(i) => Ok(i),
            other => Err(ProtocolError::TypeMismatch {
                expected: "integer",
                actual: value_kind(&other),
            }
            .into()),
        }
    }

    fn expect_string<R: PackStreamReader>(&self, reader: &mut R) -> Result<String> {
        match self.unpack(reader)? {
            Value::String(s) => Ok(s),
            other => Err(ProtocolError::TypeMismatch {
                expected: "string",
                actual: value_kind(&other),
            }
            .into()),
        }
    }

    fn expect_map<R: PackStreamReader>(&self, reader: &mut R) -> Result<Map> {
        match self.unpack(reader)? {
            Value::Map(m) => Ok(m),
            other => Err(ProtocolError::TypeMismatch {
                expected: "map",
                actual: value_kind(&other),
            }
            .into()),
        }
    }

    fn expect_string_list<R: PackStreamReader>(&self, reader: &mut R) -> Result<Vec<String>> {
        match self.unpack(reader)? {
            Value::List(items) => items
                .into_iter()
                .map(|v| match v {
                    Value::String(s) => Ok(s),
                    other => Err(ProtocolError::TypeMismatch {
                        expected: "string in list",
                        actual: value_kind(&other),
                    }
                    .into()),
                })
                .collect(),
            other => Err(ProtocolError::TypeMismatch {
                expected: "list",
                actual: value_kind(&other),
            }
            .into()),
        }
    }

    fn expect_node_list<R: PackStreamReader>(&self, reader: &mut R) -> Result<Vec<Node>> {
        match self.unpack(reader)? {
            Value::List(items) => items
                .into_iter()
                .map(|v| match v {
                    Value::Node(n) => Ok(n),
                    other => Err(ProtocolError::TypeMismatch {
                        expected: "Node",
                        actual: value_kind(&other),
                    }
                    .into()),
                })
                .collect(),
            other => Err(ProtocolError::TypeMismatch {
                expected: "list",
                actual: value_kind(&other),
            }
            .into()),
        }
    }

    fn expect_unbound_relationship_list<R: PackStreamReader>(
        &self,
        reader: &mut R,
    ) -> Result<Vec<UnboundRelationship>> {
        match self.unpack(reader)? {
            Value::List(items) => items
                .into_iter()
                .map(|v| match v {
                    Value::UnboundRelationship(r) => Ok(r),
                    other => Err(ProtocolError::TypeMismatch {
                        expected: "UnboundRelationship",
                        actual: value_kind(&other),
                    }
                    .into()),
                })
                .collect(),
            other => Err(ProtocolError::TypeMismatch {
                expected: "list",
                actual: value_kind(&other),
            }
            .into()),
        }
    }

    fn expect_int_list<R: PackStreamReader>(&self, reader: &mut R) -> Result<Vec<i64>> {
        match self.unpack(reader)? {
            Value::List(items) => items
                .into_iter()
                .map(|v| match v {
                    Value::Int(i) => Ok(i.value()),
                    other => Err(ProtocolError::TypeMismatch {
                        expected: "integer in list",
                        actual: value_kind(&other),
                    }
                    .into()),
                })
                .collect(),
            other => Err(ProtocolError::TypeMismatch {
                expected: "list",
                actual: value_kind(&other),
            }
            .into()),
        }
    }
}
