use crate::connection::TransportError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Problems that retrying can never fix.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("parallel execution detected but no launch id was provided, initialize the listener with the shared launch id")]
    LaunchIdRequired,
    #[error("'{hook}' received invalid attributes: {reason}")]
    InvalidAttributes { hook: &'static str, reason: String },
    #[error("required setting {0} is not set")]
    MissingSetting(&'static str),
    #[error("cannot load settings: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Error)]
pub enum ListenerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("giving up after {attempts} attempts: {source}")]
    FatalTransport {
        attempts: u32,
        #[source]
        source: TransportError,
    },
    #[error("reporting call failed: {0}")]
    NonRetryable(#[source] TransportError),
    #[error("{0}")]
    State(&'static str),
    #[error("cannot attach {}: {source}", .path.display())]
    Attachment {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type ListenerResult<T> = Result<T, ListenerError>;
