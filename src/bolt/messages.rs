//! Bolt v1 request message constructors.
//!
//! Every request is itself a PackStream structure: a one-byte
//! signature followed by a fixed field list (§6's request-signature
//! table). Building a [`Structure`] here rather than writing fields
//! directly keeps message construction symmetric with how the
//! Unpacker decodes a response, and lets the façade hand the Packer a
//! single `Value` per request.

use crate::packstream::value::{Map, Structure, Value};

pub mod signatures {
    pub const INIT: u8 = 0x01;
    pub const RUN: u8 = 0x10;
    pub const PULL_ALL: u8 = 0x3F;
    pub const RESET: u8 = 0x0F;
}

/// `INIT(clientName, authToken)`.
pub fn init(client_name: impl Into<String>, auth_token: Map) -> Structure {
    Structure::new(
        signatures::INIT,
        vec![Value::string(client_name), Value::Map(auth_token)],
    )
}

/// `RUN(statement, parameters)`. `parameters` already carries any
/// bookmark the caller wants threaded through in v1's RUN path, since
/// v1 otherwise ignores bookmarks outside `beginTransaction`.
pub fn run(statement: impl Into<String>, parameters: Map) -> Structure {
    Structure::new(
        signatures::RUN,
        vec![Value::string(statement), Value::Map(parameters)],
    )
}

/// `PULL_ALL()` — no fields.
pub fn pull_all() -> Structure {
    Structure::new(signatures::PULL_ALL, Vec::new())
}

/// `RESET()` — no fields.
pub fn reset() -> Structure {
    Structure::new(signatures::RESET, Vec::new())
}

/// Human-readable name for a request signature, used in log lines.
pub fn type_name(signature: u8) -> &'static str {
    match signature {
        signatures::INIT => "INIT",
        signatures::RUN => "RUN",
        signatures::PULL_ALL => "PULL_ALL",
        signatures::RESET => "RESET",
        _ => "UNKNOWN",
    }
}
