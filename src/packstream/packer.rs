//! The recursive encoder from a [`Value`] tree to PackStream bytes.
//!
//! Per the "callback-style packer" design note, `pack` returns a
//! `Result` directly instead of taking an `onError` callback and
//! returning a no-op continuation — size prefixes are always known up
//! front from the value tree, so there's nothing a thunk would buy us.
//! The caller (the Bolt façade) decides what to do with an `Err`: stop
//! writing, don't flush, and forward it to the observer.

use super::channel::PackStreamWriter;
use super::markers;
use super::value::{Map, Structure, Value};
use crate::error::{CapabilityError, ProtocolError, Result, UsageError};

/// Recursive encoder. The only piece of state is whether the peer has
/// advertised byte-array support; per the shared-resource policy this
/// is set once after handshake and never mutated again during a
/// `pack` call.
#[derive(Debug, Clone, Copy)]
pub struct Packer {
    byte_arrays_supported: bool,
}

impl Packer {
    pub fn new(byte_arrays_supported: bool) -> Self {
        Packer {
            byte_arrays_supported,
        }
    }

    pub fn pack<W: PackStreamWriter>(&self, value: &Value, writer: &mut W) -> Result<()> {
        match value {
            Value::Null => writer.write_u8(markers::NULL).map_err(Into::into),
            Value::Bool(true) => writer.write_u8(markers::TRUE).map_err(Into::into),
            Value::Bool(false) => writer.write_u8(markers::FALSE).map_err(Into::into),
            Value::Int(i) => self.pack_int(i.value(), writer),
            Value::Float(f) => {
                writer.write_u8(markers::FLOAT_64)?;
                writer.write_f64(*f).map_err(Into::into)
            }
            Value::String(s) => self.pack_string(s, writer),
            Value::Bytes(b) => self.pack_bytes(b, writer),
            Value::List(items) => self.pack_list(items, writer),
            Value::Map(map) => self.pack_map(map, writer),
            Value::Structure(s) => self.pack_structure(s, writer),
            Value::Node(_) => Err(UsageError::GraphEntityInParameters { kind: "Node" }.into()),
            Value::Relationship(_) => {
                Err(UsageError::GraphEntityInParameters { kind: "Relationship" }.into())
            }
            Value::UnboundRelationship(_) => Err(UsageError::GraphEntityInParameters {
                kind: "UnboundRelationship",
            }
            .into()),
            Value::Path(_) => Err(UsageError::GraphEntityInParameters { kind: "Path" }.into()),
        }
    }

    /// Chooses the narrowest integer marker whose signed range
    /// contains `value`: TinyInt for `[-16, 127]`, then Int8/16/32/64.
    fn pack_int<W: PackStreamWriter>(&self, value: i64, writer: &mut W) -> Result<()> {
        if (-16..=127).contains(&value) {
            writer.write_i8(value as i8).map_err(Into::into)
        } else if (i8::MIN as i64..=i8::MAX as i64).contains(&value) {
            writer.write_u8(markers::INT_8)?;
            writer.write_i8(value as i8).map_err(Into::into)
        } else if (i16::MIN as i64..=i16::MAX as i64).contains(&value) {
            writer.write_u8(markers::INT_16)?;
            writer.write_i16(value as i16).map_err(Into::into)
        } else if (i32::MIN as i64..=i32::MAX as i64).contains(&value) {
            writer.write_u8(markers::INT_32)?;
            writer.write_i32(value as i32).map_err(Into::into)
        } else {
            writer.write_u8(markers::INT_64)?;
            writer.write_i64(value).map_err(Into::into)
        }
    }

    fn pack_string<W: PackStreamWriter>(&self, value: &str, writer: &mut W) -> Result<()> {
        let bytes = value.as_bytes();
        write_sized_header(
            writer,
            bytes.len(),
            markers::TINY_STRING,
            markers::STRING_8,
            markers::STRING_16,
            markers::STRING_32,
        )?;
        writer.write_bytes(bytes).map_err(Into::into)
    }

    fn pack_bytes<W: PackStreamWriter>(&self, value: &[u8], writer: &mut W) -> Result<()> {
        if !self.byte_arrays_supported {
            return Err(CapabilityError::ByteArraysUnsupported.into());
        }
        let (marker, width) = size_class(value.len(), markers::BYTES_8, markers::BYTES_16, markers::BYTES_32)?;
        writer.write_u8(marker)?;
        write_size(writer, value.len(), width)?;
        writer.write_bytes(value).map_err(Into::into)
    }

    fn pack_list<W: PackStreamWriter>(&self, items: &[Value], writer: &mut W) -> Result<()> {
        write_sized_header(
            writer,
            items.len(),
            markers::TINY_LIST,
            markers::LIST_8,
            markers::LIST_16,
            markers::LIST_32,
        )?;
        for item in items {
            self.pack(item, writer)?;
        }
        Ok(())
    }

    /// Iterates keys in insertion order; absent-sentinel skipping lives
    /// one layer up (at the façade, which builds the `Map` it hands to
    /// the Packer), so by the time a `Map` reaches here every entry is
    /// written and the header count always matches what's emitted.
    fn pack_map<W: PackStreamWriter>(&self, map: &Map, writer: &mut W) -> Result<()> {
        write_sized_header(
            writer,
            map.len(),
            markers::TINY_MAP,
            markers::MAP_8,
            markers::MAP_16,
            markers::MAP_32,
        )?;
        for (key, value) in map.iter() {
            self.pack_string(key, writer)?;
            self.pack(value, writer)?;
        }
        Ok(())
    }

    /// Struct sizes only go up to `Struct16` (65535 fields) — v1 never
    /// needs `Struct32`, so unlike lists/maps/strings/bytes this has no
    /// 32-bit branch (see the "open questions" note on `STRUCT_32`).
    fn pack_structure<W: PackStreamWriter>(&self, s: &Structure, writer: &mut W) -> Result<()> {
        let size = s.fields.len();
        if size <= markers::TINY_SIZE_LIMIT {
            writer.write_u8(markers::TINY_STRUCT | size as u8)?;
        } else if size <= markers::SIZE_8_LIMIT {
            writer.write_u8(markers::STRUCT_8)?;
            writer.write_u8(size as u8)?;
        } else if size <= markers::SIZE_16_LIMIT {
            writer.write_u8(markers::STRUCT_16)?;
            writer.write_u16(size as u16)?;
        } else {
            return Err(ProtocolError::ValueTooLarge {
                len: size,
                max: markers::SIZE_16_LIMIT,
            }
            .into());
        }
        // Signature always follows the length, in every branch — the
        // teacher's vendored encoder drops it in the Struct16 branch,
        // which spec.md calls out as a bug to fix here, not repeat.
        writer.write_u8(s.signature)?;
        for field in &s.fields {
            self.pack(field, writer)?;
        }
        Ok(())
    }
}

enum SizeWidth {
    W8,
    W16,
    W32,
}

fn size_class(len: usize, m8: u8, m16: u8, m32: u8) -> Result<(u8, SizeWidth)> {
    if len <= markers::SIZE_8_LIMIT {
        Ok((m8, SizeWidth::W8))
    } else if len <= markers::SIZE_16_LIMIT {
        Ok((m16, SizeWidth::W16))
    } else if len <= markers::SIZE_32_LIMIT {
        Ok((m32, SizeWidth::W32))
    } else {
        Err(ProtocolError::ValueTooLarge {
            len,
            max: markers::SIZE_32_LIMIT,
        }
        .into())
    }
}

fn write_size<W: PackStreamWriter>(writer: &mut W, len: usize, width: SizeWidth) -> Result<()> {
    match width {
        SizeWidth::W8 => writer.write_u8(len as u8).map_err(Into::into),
        SizeWidth::W16 => writer.write_u16(len as u16).map_err(Into::into),
        SizeWidth::W32 => writer.write_u32(len as u32).map_err(Into::into),
    }
}

/// Shared header-writing logic for strings/lists/maps: Tiny* markers
/// fold the count into the low nibble of the marker byte itself; the
/// wider classes emit a separate marker then a fixed-width count.
fn write_sized_header<W: PackStreamWriter>(
    writer: &mut W,
    len: usize,
    tiny_base: u8,
    m8: u8,
    m16: u8,
    m32: u8,
) -> Result<()> {
    if len <= markers::TINY_SIZE_LIMIT {
        writer.write_u8(tiny_base | len as u8).map_err(Into::into)
    } else {
        let (marker, width) = size_class(len, m8, m16, m32)?;
        writer.write_u8(marker)?;
        write_size(writer, len, width)
    }
}
