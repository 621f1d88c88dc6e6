//! PackStream v1 marker bytes (spec.md §4.1's marker table).

pub const NULL: u8 = 0xC0;
pub const FLOAT_64: u8 = 0xC1;
pub const FALSE: u8 = 0xC2;
pub const TRUE: u8 = 0xC3;

pub const INT_8: u8 = 0xC8;
pub const INT_16: u8 = 0xC9;
pub const INT_32: u8 = 0xCA;
pub const INT_64: u8 = 0xCB;

pub const BYTES_8: u8 = 0xCC;
pub const BYTES_16: u8 = 0xCD;
pub const BYTES_32: u8 = 0xCE;

pub const TINY_STRING: u8 = 0x80;
pub const STRING_8: u8 = 0xD0;
pub const STRING_16: u8 = 0xD1;
pub const STRING_32: u8 = 0xD2;

pub const TINY_LIST: u8 = 0x90;
pub const LIST_8: u8 = 0xD4;
pub const LIST_16: u8 = 0xD5;
pub const LIST_32: u8 = 0xD6;

pub const TINY_MAP: u8 = 0xA0;
pub const MAP_8: u8 = 0xD8;
pub const MAP_16: u8 = 0xD9;
pub const MAP_32: u8 = 0xDA;

pub const TINY_STRUCT: u8 = 0xB0;
pub const STRUCT_8: u8 = 0xDC;
pub const STRUCT_16: u8 = 0xDD;

/// TinyInt covers `-16..=127`; high nibble of the marker byte
/// distinguishes it from tiny string/list/map/struct markers.
pub const TINY_INT_NEGATIVE_BASE: u8 = 0xF0;

/// Smallest size that no longer fits a Tiny* marker's 4-bit count.
pub const TINY_SIZE_LIMIT: usize = 0x0F;
pub const SIZE_8_LIMIT: usize = 0xFF;
pub const SIZE_16_LIMIT: usize = 0xFFFF;
pub const SIZE_32_LIMIT: usize = 0xFFFF_FFFF;
