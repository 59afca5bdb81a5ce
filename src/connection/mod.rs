pub mod http;
#[cfg(test)]
pub(crate) mod recording;

use crate::reporter::{
    ItemId, KeywordSession, Launch, LaunchId, LogEntry, Status, SuiteSession, TestSession,
};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportErrorKind {
    /// Connection could not be established or timed out.
    Connection,
    /// Protocol level failure or a server side (5xx) error.
    Http,
    /// Response body was not what the API promises.
    Response,
    /// Outgoing payload could not be encoded.
    Encoding,
    /// The request was refused (4xx) or could not be built at all.
    Rejected,
    /// Client used before `initialize` or after `terminate`.
    Closed,
}

impl TransportErrorKind {
    /// Kinds retried by default.
    pub const TRANSIENT: [TransportErrorKind; 4] = [
        TransportErrorKind::Connection,
        TransportErrorKind::Http,
        TransportErrorKind::Response,
        TransportErrorKind::Encoding,
    ];
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TransportErrorKind::Connection => "connection",
            TransportErrorKind::Http => "http",
            TransportErrorKind::Response => "response",
            TransportErrorKind::Encoding => "encoding",
            TransportErrorKind::Rejected => "rejected",
            TransportErrorKind::Closed => "closed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} failure: {message}")]
pub struct TransportError {
    kind: TransportErrorKind,
    message: String,
}

impl TransportError {
    pub fn new<S: Into<String>>(kind: TransportErrorKind, message: S) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> TransportErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub type TransportResult<T> = Result<T, TransportError>;

/// Remote session lifecycle operations.
///
/// Implementations are expected to accept a repeated create call after a
/// failed attempt; the listener retries single calls, never whole hooks.
pub trait ReportingClient {
    fn initialize(&mut self, endpoint: &str, project: &str, credential: &str)
        -> TransportResult<()>;
    fn start_launch(&mut self, launch: &Launch) -> TransportResult<LaunchId>;
    fn finish_launch(&mut self, launch: &LaunchId, status: Status) -> TransportResult<()>;
    fn start_suite(
        &mut self,
        launch: &LaunchId,
        suite: &SuiteSession,
        parent: Option<&ItemId>,
    ) -> TransportResult<ItemId>;
    fn finish_suite(&mut self, launch: &LaunchId, id: &ItemId, status: Status)
        -> TransportResult<()>;
    fn start_test(
        &mut self,
        launch: &LaunchId,
        test: &TestSession,
        parent: Option<&ItemId>,
    ) -> TransportResult<ItemId>;
    fn finish_test(&mut self, launch: &LaunchId, id: &ItemId, status: Status)
        -> TransportResult<()>;
    fn start_step(
        &mut self,
        launch: &LaunchId,
        keyword: &KeywordSession,
        parent: Option<&ItemId>,
    ) -> TransportResult<ItemId>;
    fn finish_step(&mut self, launch: &LaunchId, id: &ItemId, status: Status)
        -> TransportResult<()>;
    fn log(
        &mut self,
        launch: &LaunchId,
        item: Option<&ItemId>,
        entry: &LogEntry,
    ) -> TransportResult<()>;
    fn terminate(&mut self) -> TransportResult<()>;
}
