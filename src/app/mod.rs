pub mod attributes;
pub mod environment;
pub mod error;
pub mod listener;
pub mod mapper;
pub mod message;
pub mod propagation;
pub mod replay;
pub mod retry;
pub mod scope;

pub use self::error::{ConfigError, ListenerError};
pub use self::listener::Listener;
pub use self::retry::{with_retry, RetryPolicy};
