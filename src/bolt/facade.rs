//! The thin Bolt v1 request/response façade: builds request messages
//! and forwards them to the connection with the correct flush timing,
//! enforcing the one precondition v1 has (no transaction config).

use super::messages;
use super::observer::Observer;
use crate::error::{BoltStreamError, CapabilityError, Result};
use crate::packstream::channel::{Flush, PackStreamWriter};
use crate::packstream::packer::Packer;
use crate::packstream::value::{Map, Value};

/// Bookmark and transaction-config parameters a caller threads through
/// `run`/`beginTransaction`. `tx_config` is only ever valid when empty
/// in v1 — see [`BoltV1::check_tx_config`].
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub bookmark: Option<String>,
    pub tx_config: Map,
}

/// Bolt v1 connection façade, generic over the channel the caller
/// already owns. One façade wraps one connection; it holds no
/// transport-level state of its own beyond the "this connection is
/// dead" flag a fatal error sets.
pub struct BoltV1<W> {
    writer: W,
    packer: Packer,
    fatal: bool,
}

impl<W: PackStreamWriter + Flush> BoltV1<W> {
    pub fn new(writer: W, byte_arrays_supported: bool) -> Self {
        BoltV1 {
            writer,
            packer: Packer::new(byte_arrays_supported),
            fatal: false,
        }
    }

    /// Whether a prior fatal error has already torn this connection
    /// down; once true no further request should be sent on it.
    pub fn is_fatal(&self) -> bool {
        self.fatal
    }

    /// Identity in v1; later protocol versions override this to
    /// reshape a `SUCCESS` message's metadata before it reaches the
    /// observer (e.g. renaming fields introduced in later Bolt
    /// versions).
    pub fn transform_metadata(&self, metadata: Map) -> Map {
        metadata
    }

    pub fn initialize(
        &mut self,
        client_name: impl Into<String>,
        auth_token: Map,
        observer: &mut dyn Observer,
    ) -> Result<()> {
        let message = messages::init(client_name, auth_token);
        self.send(&message, true, observer)
    }

    /// `RUN(statement, parameters)` followed by `PULL_ALL`, enforcing
    /// the transaction-config precondition first. The `RUN` write does
    /// not flush; the `PULL_ALL` write does.
    pub fn run(
        &mut self,
        statement: impl Into<String>,
        parameters: Map,
        options: RunOptions,
        observer: &mut dyn Observer,
    ) -> Result<()> {
        self.check_tx_config(&options.tx_config, observer)?;
        // v1's RUN path ignores bookmarks outside beginTransaction;
        // accepted syntactically so callers don't need a version
        // switch just to pass one through.
        let _ = options.bookmark;

        let run_message = messages::run(statement, parameters);
        self.send(&run_message, false, observer)?;
        let pull_all_message = messages::pull_all();
        self.send(&pull_all_message, true, observer)
    }

    /// `RUN "BEGIN" {bookmark-params}` followed by `PULL_ALL`, both
    /// non-flushing — the subsequent first statement's write carries
    /// the flush, per §4.5.
    pub fn begin_transaction(
        &mut self,
        bookmark: Option<String>,
        tx_config: Map,
        observer: &mut dyn Observer,
    ) -> Result<()> {
        self.check_tx_config(&tx_config, observer)?;

        let mut params = Map::new();
        if let Some(bookmark) = bookmark {
            params.insert("bookmark", Value::string(bookmark));
        }

        let run_message = messages::run("BEGIN", params);
        self.send(&run_message, false, observer)?;
        let pull_all_message = messages::pull_all();
        self.send(&pull_all_message, false, observer)
    }

    pub fn commit_transaction(&mut self, observer: &mut dyn Observer) -> Result<()> {
        let run_message = messages::run("COMMIT", Map::new());
        self.send(&run_message, false, observer)?;
        let pull_all_message = messages::pull_all();
        self.send(&pull_all_message, true, observer)
    }

    pub fn rollback_transaction(&mut self, observer: &mut dyn Observer) -> Result<()> {
        let run_message = messages::run("ROLLBACK", Map::new());
        self.send(&run_message, false, observer)?;
        let pull_all_message = messages::pull_all();
        self.send(&pull_all_message, true, observer)
    }

    pub fn reset(&mut self, observer: &mut dyn Observer) -> Result<()> {
        let message = messages::reset();
        self.send(&message, true, observer)
    }

    /// v1 does not support transaction configuration. A non-empty
    /// `tx_config` is a fatal error: mark the connection, notify the
    /// observer exactly once, then surface it to the caller.
    fn check_tx_config(&mut self, tx_config: &Map, observer: &mut dyn Observer) -> Result<()> {
        if tx_config.is_empty() {
            return Ok(());
        }
        let err: BoltStreamError = CapabilityError::TransactionConfigUnsupportedInV1.into();
        self.fatal = true;
        log::warn!("rejecting non-empty transaction config on a Bolt v1 connection");
        observer.on_error(&err);
        Err(err)
    }

    /// Encodes `message` and writes it to the channel, flushing only
    /// when `flush` is set. A failed encode writes nothing further and
    /// is reported to the observer instead of being surfaced as a
    /// partial message on the wire.
    fn send(
        &mut self,
        message: &crate::packstream::value::Structure,
        flush: bool,
        observer: &mut dyn Observer,
    ) -> Result<()> {
        log::debug!("sending {}", messages::type_name(message.signature));
        let value = Value::Structure(message.clone());
        if let Err(err) = self.packer.pack(&value, &mut self.writer) {
            observer.on_error(&err);
            return Err(err);
        }
        if flush {
            self.writer.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packstream::unpacker::Unpacker;
    use crate::packstream::value::Structure;

    #[derive(Default)]
    struct RecordingObserver {
        errors: usize,
    }

    impl Observer for RecordingObserver {
        fn on_next(&mut self, _record: Vec<Value>) {}
        fn on_completed(&mut self, _metadata: Map) {}
        fn on_error(&mut self, _error: &BoltStreamError) {
            self.errors += 1;
        }
    }

    fn decode_structure(bytes: &[u8]) -> Structure {
        let mut cursor = std::io::Cursor::new(bytes.to_vec());
        match Unpacker::default().unpack(&mut cursor).unwrap() {
            Value::Structure(s) => s,
            other => panic!("expected Structure, got {:?}", other),
        }
    }

    #[test]
    fn initialize_writes_a_flushing_init_message() {
        let mut facade = BoltV1::new(Vec::<u8>::new(), true);
        let mut observer = RecordingObserver::default();
        facade
            .initialize("x", Map::new(), &mut observer)
            .unwrap();

        let written = facade.writer.clone();
        let structure = decode_structure(&written);
        assert_eq!(structure.signature, messages::signatures::INIT);
        assert_eq!(observer.errors, 0);
    }

    #[test]
    fn run_rejects_a_non_empty_transaction_config() {
        let mut facade = BoltV1::new(Vec::<u8>::new(), true);
        let mut observer = RecordingObserver::default();
        let mut tx_config = Map::new();
        tx_config.insert("timeout", Value::int(5));

        let options = RunOptions {
            bookmark: None,
            tx_config,
        };
        let err = facade
            .run("RETURN 1", Map::new(), options, &mut observer)
            .unwrap_err();

        assert!(facade.is_fatal());
        assert_eq!(observer.errors, 1);
        assert_eq!(err.classification(), crate::error::ErrorClass::Capability);
    }

    #[test]
    fn run_with_empty_tx_config_writes_run_then_pull_all() {
        let mut facade = BoltV1::new(Vec::<u8>::new(), true);
        let mut observer = RecordingObserver::default();
        facade
            .run("RETURN 1", Map::new(), RunOptions::default(), &mut observer)
            .unwrap();

        let written = facade.writer.clone();
        let mut cursor = std::io::Cursor::new(written);
        let unpacker = Unpacker::default();
        let first = unpacker.unpack(&mut cursor).unwrap();
        let second = unpacker.unpack(&mut cursor).unwrap();
        match (first, second) {
            (Value::Structure(run), Value::Structure(pull)) => {
                assert_eq!(run.signature, messages::signatures::RUN);
                assert_eq!(pull.signature, messages::signatures::PULL_ALL);
            }
            other => panic!("unexpected decode: {:?}", other),
        }
        assert_eq!(observer.errors, 0);
    }

    #[test]
    fn begin_transaction_carries_the_bookmark_in_run_parameters() {
        let mut facade = BoltV1::new(Vec::<u8>::new(), true);
        let mut observer = RecordingObserver::default();
        facade
            .begin_transaction(Some("bk:1".to_string()), Map::new(), &mut observer)
            .unwrap();

        let written = facade.writer.clone();
        let mut cursor = std::io::Cursor::new(written);
        let unpacker = Unpacker::default();
        match unpacker.unpack(&mut cursor).unwrap() {
            Value::Structure(run) => {
                assert_eq!(run.signature, messages::signatures::RUN);
                match &run.fields[1] {
                    Value::Map(params) => {
                        assert_eq!(params.get("bookmark"), Some(&Value::string("bk:1")));
                    }
                    other => panic!("expected Map, got {:?}", other),
                }
            }
            other => panic!("unexpected decode: {:?}", other),
        }
    }
}
