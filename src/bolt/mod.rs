//! Bolt v1 request/response façade: message construction, the
//! observer contract, and the thin connection-facing API.

pub mod facade;
pub mod messages;
pub mod observer;

pub use facade::{BoltV1, RunOptions};
pub use observer::{NullObserver, Observer};
