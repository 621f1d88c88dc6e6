//! Error taxonomy for the PackStream codec and Bolt v1 façade.
//!
//! Mirrors the three error kinds from the wire-protocol design: a
//! [`ProtocolError`] is a wire-level violation and is fatal to the
//! connection, a [`UsageError`] means the caller handed the encoder a
//! value it cannot represent, and a [`CapabilityError`] means the peer
//! (or protocol version) doesn't support something the caller asked
//! for — fatal when it's a transaction-config violation, reported like
//! a usage error (connection continues) when it's an unsupported byte
//! array, per spec.md §7.

use thiserror::Error;

/// Tag used to classify a [`BoltStreamError`] the way the wire
/// protocol classifies failures, so callers that need to distinguish
/// "this connection is dead" from "this one value didn't encode"
/// don't have to match on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Wire-level violation: unknown marker, wrong struct size,
    /// oversize value, type mismatch while decoding. Fatal to the
    /// connection.
    Protocol,
    /// User-supplied value is not packable. Reported to the observer;
    /// the encoder emits nothing for the offending value.
    Usage,
    /// A peer or protocol-version capability mismatch. Fatal or not
    /// depending on which one — see [`CapabilityError::is_fatal`].
    Capability,
}

/// Wire-level violations: unknown marker, wrong struct size, oversize
/// value, malformed decoded data. Always fatal to the connection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("unknown PackStream marker: 0x{marker:02X}")]
    UnknownMarker { marker: u8 },

    #[error("expected {expected} fields for struct {struct_name} (signature 0x{signature:02X}), got {actual}")]
    WrongStructSize {
        struct_name: &'static str,
        signature: u8,
        expected: usize,
        actual: usize,
    },

    #[error("value too large to encode: {len} bytes exceeds the maximum of {max} bytes")]
    ValueTooLarge { len: usize, max: usize },

    /// A decoded value is not the type the caller (or the decoder's
    /// own structure-field reader) expected — e.g. a map key that
    /// isn't a string, or a `Node` field the wire marked as something
    /// other than an integer.
    #[error("expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// A decoded string's bytes are not valid UTF-8.
    #[error("invalid UTF-8 in decoded string: {reason}")]
    InvalidUtf8 { reason: String },

    /// A `PATH` structure's `nodes`/`rels`/`sequence` triple fails one
    /// of the structural invariants §4.2 requires (non-empty nodes,
    /// even-length sequence, in-range indices, a non-zero `relIndex`).
    #[error("invalid path sequence: {reason}")]
    InvalidPathSequence { reason: &'static str },

    #[error("unexpected end of input while reading {context}")]
    UnexpectedEof { context: &'static str },

    #[error("io error: {0}")]
    Io(String),
}

/// A user-supplied value is not packable: a graph entity handed to
/// the encoder as a request parameter (the only unpackable case this
/// codec's `Value` tree can actually represent, since encoding matches
/// exhaustively over every other variant).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("{kind} instances cannot be packed as request parameters")]
    GraphEntityInParameters { kind: &'static str },
}

/// Peer or protocol-version capability mismatch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    #[error("byte arrays are not supported by the peer")]
    ByteArraysUnsupported,
    #[error("Bolt v1 does not support transaction configuration")]
    TransactionConfigUnsupportedInV1,
}

impl CapabilityError {
    /// Per spec.md §7: a transaction-config violation on a v1
    /// connection is fatal (the façade marks the connection dead and
    /// notifies the observer); an unsupported byte array is reported
    /// to the observer like a usage error and the connection
    /// continues — the encoder just emits nothing for that value.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CapabilityError::TransactionConfigUnsupportedInV1)
    }
}

/// Crate-wide error type composing the three kinds above.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoltStreamError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error(transparent)]
    Usage(#[from] UsageError),
    #[error(transparent)]
    Capability(#[from] CapabilityError),
}

impl BoltStreamError {
    /// Classify this error the way the wire protocol does, for callers
    /// that need to decide whether to tear down the connection.
    pub fn classification(&self) -> ErrorClass {
        match self {
            BoltStreamError::Protocol(_) => ErrorClass::Protocol,
            BoltStreamError::Usage(_) => ErrorClass::Usage,
            BoltStreamError::Capability(_) => ErrorClass::Capability,
        }
    }

    /// Whether this error is fatal to the connection: every protocol
    /// error is, usage errors never are, and capability errors depend
    /// on which one (see [`CapabilityError::is_fatal`]).
    pub fn is_fatal(&self) -> bool {
        match self {
            BoltStreamError::Protocol(_) => true,
            BoltStreamError::Usage(_) => false,
            BoltStreamError::Capability(err) => err.is_fatal(),
        }
    }
}

impl From<std::io::Error> for BoltStreamError {
    fn from(err: std::io::Error) -> Self {
        BoltStreamError::Protocol(ProtocolError::Io(err.to_string()))
    }
}

pub type Result<T> = std::result::Result<T, BoltStreamError>;
