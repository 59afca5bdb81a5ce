pub mod error;
pub mod timeunit;

pub use self::timeunit::parse_duration;

/// Milliseconds since the unix epoch, the timestamp format of the reporting API.
pub fn timestamp() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
