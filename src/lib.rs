//! boltwire - PackStream v1 codec and Bolt v1 client-driver façade
//!
//! This crate provides the wire-level core of a graph-database client
//! driver through:
//! - A PackStream v1 binary codec (Packer/Unpacker) over a
//!   caller-supplied byte channel
//! - Graph-domain value types (Node, Relationship, Path) and their
//!   rehydration from the wire
//! - Proleptic-Gregorian temporal conversions and ISO-8601 formatting
//! - A thin Bolt v1 request/response façade (INIT/RUN/PULL_ALL/RESET)
//!
//! The library itself never installs a logger; it only calls
//! `log::debug!`/`log::warn!` at the call sites on
//! [`bolt::facade::BoltV1`]. An embedding application wires up a
//! subscriber the same way the reference driver's own binary does:
//!
//! ```
//! env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
//!
//! let mut facade = boltwire::bolt::BoltV1::new(Vec::<u8>::new(), true);
//! let mut observer = boltwire::bolt::NullObserver;
//! facade
//!     .initialize("boltwire-client/0.1", boltwire::packstream::Map::new(), &mut observer)
//!     .unwrap();
//! ```

pub mod bolt;
pub mod error;
pub mod packstream;

pub use error::{BoltStreamError, Result};
