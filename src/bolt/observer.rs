//! The observer contract the façade notifies as a request's response
//! arrives: a `RECORD` per result row, one `SUCCESS`'s metadata on
//! completion, or a single `onError` if the connection reports a
//! failure. Analogous to a `StreamingResponseHandler` in a
//! subscription-style driver, kept deliberately minimal since framing
//! and dispatch of `SUCCESS`/`RECORD`/`IGNORED`/`FAILURE` live in the
//! connection, not in this façade.

use crate::error::BoltStreamError;
use crate::packstream::value::{Map, Value};

/// Implemented by whatever collects a request's results. The façade
/// calls these synchronously as it learns about each outcome; it never
/// buffers a response on the observer's behalf.
pub trait Observer {
    /// A single result row.
    fn on_next(&mut self, record: Vec<Value>);

    /// The request completed successfully; `metadata` is the `SUCCESS`
    /// message's field map after [`transform_metadata`] has run.
    fn on_completed(&mut self, metadata: Map);

    /// The request failed, or a precondition the façade enforces
    /// itself (e.g. a non-empty `txConfig`) was violated.
    fn on_error(&mut self, error: &BoltStreamError);
}

/// An [`Observer`] that discards every notification. Useful for
/// fire-and-forget requests (e.g. a `RESET` the caller doesn't care to
/// watch) where constructing a bespoke observer would be pure
/// ceremony.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl Observer for NullObserver {
    fn on_next(&mut self, _record: Vec<Value>) {}
    fn on_completed(&mut self, _metadata: Map) {}
    fn on_error(&mut self, _error: &BoltStreamError) {}
}
