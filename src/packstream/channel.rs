//! The byte-channel contract the Packer/Unpacker are generic over.
//!
//! The socket/chunking transport itself is an external collaborator —
//! this module only names the typed read/write primitives the codec
//! consumes, and provides blanket impls over `std::io::Write`/`Read`
//! so any chunker/dechunker built on a standard stream works for free.
//! The codec is synchronous throughout (see the concurrency model in
//! the design docs), so these traits are deliberately not `async`.

use crate::error::ProtocolError;
use std::io::{self, Read, Write};

/// Write side of the channel contract: `writeUInt8/16/32`,
/// `writeInt8/16/32`, `writeFloat64`, `writeBytes`.
pub trait PackStreamWriter {
    fn write_u8(&mut self, value: u8) -> Result<(), ProtocolError>;
    fn write_u16(&mut self, value: u16) -> Result<(), ProtocolError>;
    fn write_u32(&mut self, value: u32) -> Result<(), ProtocolError>;
    fn write_i8(&mut self, value: i8) -> Result<(), ProtocolError>;
    fn write_i16(&mut self, value: i16) -> Result<(), ProtocolError>;
    fn write_i32(&mut self, value: i32) -> Result<(), ProtocolError>;
    fn write_i64(&mut self, value: i64) -> Result<(), ProtocolError>;
    fn write_f64(&mut self, value: f64) -> Result<(), ProtocolError>;
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), ProtocolError>;
}

/// Read side of the channel contract: `readUInt8/16/32`,
/// `readInt8/16/32/64`, `readFloat64`, plus a raw byte read used by
/// string/bytes decoding.
pub trait PackStreamReader {
    fn read_u8(&mut self) -> Result<u8, ProtocolError>;
    fn read_u16(&mut self) -> Result<u16, ProtocolError>;
    fn read_u32(&mut self) -> Result<u32, ProtocolError>;
    fn read_i8(&mut self) -> Result<i8, ProtocolError>;
    fn read_i16(&mut self) -> Result<i16, ProtocolError>;
    fn read_i32(&mut self) -> Result<i32, ProtocolError>;
    fn read_i64(&mut self) -> Result<i64, ProtocolError>;
    fn read_f64(&mut self) -> Result<f64, ProtocolError>;
    fn read_exact_bytes(&mut self, len: usize) -> Result<Vec<u8>, ProtocolError>;
}

/// Lets the façade ask the channel to flush buffered bytes after a
/// request (or a pair of requests) without the Packer/Unpacker
/// themselves needing to know about flushing at all — flush timing is
/// a façade-level concern (see §4.5's "flush now" flag), not a codec
/// one.
pub trait Flush {
    fn flush(&mut self) -> Result<(), ProtocolError>;
}

impl<W: Write> Flush for W {
    fn flush(&mut self) -> Result<(), ProtocolError> {
        Write::flush(self).map_err(|e| io_err("flush", e))
    }
}

fn io_err(context: &'static str, _err: io::Error) -> ProtocolError {
    ProtocolError::UnexpectedEof { context }
}

impl<W: Write> PackStreamWriter for W {
    fn write_u8(&mut self, value: u8) -> Result<(), ProtocolError> {
        self.write_all(&[value]).map_err(|e| io_err("u8", e))
    }

    fn write_u16(&mut self, value: u16) -> Result<(), ProtocolError> {
        self.write_all(&value.to_be_bytes())
            .map_err(|e| io_err("u16", e))
    }

    fn write_u32(&mut self, value: u32) -> Result<(), ProtocolError> {
        self.write_all(&value.to_be_bytes())
            .map_err(|e| io_err("u32", e))
    }

    fn write_i8(&mut self, value: i8) -> Result<(), ProtocolError> {
        self.write_all(&value.to_be_bytes())
            .map_err(|e| io_err("i8", e))
    }

    fn write_i16(&mut self, value: i16) -> Result<(), ProtocolError> {
        self.write_all(&value.to_be_bytes())
            .map_err(|e| io_err("i16", e))
    }

    fn write_i32(&mut self, value: i32) -> Result<(), ProtocolError> {
        self.write_all(&value.to_be_bytes())
            .map_err(|e| io_err("i32", e))
    }

    fn write_i64(&mut self, value: i64) -> Result<(), ProtocolError> {
        self.write_all(&value.to_be_bytes())
            .map_err(|e| io_err("i64", e))
    }

    fn write_f64(&mut self, value: f64) -> Result<(), ProtocolError> {
        self.write_all(&value.to_be_bytes())
            .map_err(|e| io_err("f64", e))
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), ProtocolError> {
        self.write_all(bytes).map_err(|e| io_err("bytes", e))
    }
}

impl<R: Read> PackStreamReader for R {
    fn read_u8(&mut self) -> Result<u8, ProtocolError> {
        let mut buf = [0u8; 1];
        self.read_exact(&mut buf).map_err(|e| io_err("u8", e))?;
        Ok(buf[0])
    }

    fn read_u16(&mut self) -> Result<u16, ProtocolError> {
        let mut buf = [0u8; 2];
        self.read_exact(&mut buf).map_err(|e| io_err("u16", e))?;
        Ok(u16::from_be_bytes(buf))
    }

    fn read_u32(&mut self) -> Result<u32, ProtocolError> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf).map_err(|e| io_err("u32", e))?;
        Ok(u32::from_be_bytes(buf))
    }

    fn read_i8(&mut self) -> Result<i8, ProtocolError> {
        let mut buf = [0u8; 1];
        self.read_exact(&mut buf).map_err(|e| io_err("i8", e))?;
        Ok(i8::from_be_bytes(buf))
    }

    fn read_i16(&mut self) -> Result<i16, ProtocolError> {
        let mut buf = [0u8; 2];
        self.read_exact(&mut buf).map_err(|e| io_err("i16", e))?;
        Ok(i16::from_be_bytes(buf))
    }

    fn read_i32(&mut self) -> Result<i32, ProtocolError> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf).map_err(|e| io_err("i32", e))?;
        Ok(i32::from_be_bytes(buf))
    }

    fn read_i64(&mut self) -> Result<i64, ProtocolError> {
        let mut buf = [0u8; 8];
        self.read_exact(&mut buf).map_err(|e| io_err("i64", e))?;
        Ok(i64::from_be_bytes(buf))
    }

    fn read_f64(&mut self) -> Result<f64, ProtocolError> {
        let mut buf = [0u8; 8];
        self.read_exact(&mut buf).map_err(|e| io_err("f64", e))?;
        Ok(f64::from_be_bytes(buf))
    }

    fn read_exact_bytes(&mut self, len: usize) -> Result<Vec<u8>, ProtocolError> {
        let mut buf = vec![0u8; len];
        self.read_exact(&mut buf).map_err(|e| io_err("bytes", e))?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_round_trips_over_a_vec_cursor() {
        let mut buf: Vec<u8> = Vec::new();
        buf.write_u16(0xCAFE).unwrap();
        buf.write_i32(-12345).unwrap();
        buf.write_f64(3.5).unwrap();
        buf.write_bytes(b"hi").unwrap();

        let mut cursor = io::Cursor::new(buf);
        assert_eq!(cursor.read_u16().unwrap(), 0xCAFE);
        assert_eq!(cursor.read_i32().unwrap(), -12345);
        assert_eq!(cursor.read_f64().unwrap(), 3.5);
        assert_eq!(cursor.read_exact_bytes(2).unwrap(), b"hi");
    }

    #[test]
    fn short_read_reports_unexpected_eof() {
        let mut cursor = io::Cursor::new(vec![0u8; 1]);
        let err = cursor.read_u32().unwrap_err();
        assert_eq!(err, ProtocolError::UnexpectedEof { context: "u32" });
    }
}
