//! PackStream v1: the binary serialization codec between a host value
//! tree and a byte channel, including graph-domain and temporal
//! structure rehydration.

pub mod bigint;
pub mod channel;
pub mod graph;
pub mod markers;
pub mod packer;
pub mod temporal;
pub mod unpacker;
pub mod value;

pub use bigint::BigInt;
pub use packer::Packer;
pub use unpacker::Unpacker;
pub use value::{Map, Structure, Value};
