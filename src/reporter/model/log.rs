use crate::reporter::model::attachment::Attachment;
use serde_derive::Deserialize;

/// Severity of a log record, named the way the host runner names it.
///
/// Levels the listener has no special handling for are kept as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Html,
    Warn,
    Error,
    Fail,
    Skip,
    Other(String),
}

impl From<String> for LogLevel {
    fn from(level: String) -> Self {
        match level.to_uppercase().as_str() {
            "TRACE" => LogLevel::Trace,
            "DEBUG" => LogLevel::Debug,
            "INFO" => LogLevel::Info,
            "HTML" => LogLevel::Html,
            "WARN" => LogLevel::Warn,
            "ERROR" => LogLevel::Error,
            "FAIL" => LogLevel::Fail,
            "SKIP" => LogLevel::Skip,
            _ => LogLevel::Other(level),
        }
    }
}

impl LogLevel {
    /// Level name understood by the reporting API.
    pub fn as_wire(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info | LogLevel::Html | LogLevel::Skip | LogLevel::Other(_) => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error | LogLevel::Fail => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub message: String,
    pub level: LogLevel,
    pub attachment: Option<Attachment>,
}

impl LogEntry {
    pub fn new<S: Into<String>>(level: LogLevel, message: S) -> Self {
        Self {
            message: message.into(),
            level,
            attachment: None,
        }
    }

    pub fn info<S: Into<String>>(message: S) -> Self {
        Self::new(LogLevel::Info, message)
    }

    pub fn with_attachment(mut self, attachment: Option<Attachment>) -> Self {
        self.attachment = attachment;
        self
    }
}

#[cfg(test)]
mod test {
    use super::LogLevel;

    #[test]
    fn test_reading_runner_levels() {
        let read = |s: &str| serde_json::from_value::<LogLevel>(serde_json::json!(s)).unwrap();
        assert_eq!(read("FAIL"), LogLevel::Fail);
        assert_eq!(read("SKIP"), LogLevel::Skip);
        assert_eq!(read("NONE"), LogLevel::Other("NONE".to_owned()));
        assert_eq!(read("NONE").as_wire(), "info");
        assert_eq!(read("SKIP").as_wire(), "info");
        assert_eq!(read("FAIL").as_wire(), "error");
    }
}
