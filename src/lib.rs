#[macro_use]
extern crate log;

pub mod app;
pub mod configuration;
pub mod connection;
pub mod reporter;
pub mod time;

pub use self::app::{ConfigError, Listener, ListenerError, RetryPolicy};
pub use self::configuration::settings::Settings;
pub use self::connection::{http::HttpReportingClient, ReportingClient};
