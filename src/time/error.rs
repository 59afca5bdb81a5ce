use thiserror::Error;

/// Failure to read a human readable duration such as `"2s"` or `"500ms"`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("'{0}' is not a duration, expected <number><unit> like 2s or 500ms")]
    Syntax(String),
    #[error("unit '{0}' not supported")]
    UnitNotSupported(String),
    #[error("duration '{0}' is too large")]
    Overflow(String),
}
