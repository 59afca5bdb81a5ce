use crate::app::error::{ListenerError, ListenerResult};
use crate::configuration::settings::Settings;
use crate::connection::{TransportErrorKind, TransportResult};
use std::thread::sleep;
use std::time::Duration;

/// Re-invokes a reporting call while it fails with a transient kind.
///
/// The delay between attempts is fixed and blocks the calling thread, which
/// holds the host runner back until reporting catches up. After `max_retries`
/// retries the last failure is returned as [`ListenerError::FatalTransport`];
/// kinds outside the transient set are returned at once as
/// [`ListenerError::NonRetryable`].
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    transient: Vec<TransportErrorKind>,
    wait: Duration,
    max_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(&TransportErrorKind::TRANSIENT, Duration::from_secs(2), 3)
    }
}

impl RetryPolicy {
    pub fn new(transient: &[TransportErrorKind], wait: Duration, max_retries: u32) -> Self {
        Self {
            transient: transient.to_vec(),
            wait,
            max_retries,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            &TransportErrorKind::TRANSIENT,
            settings.retry_wait,
            settings.retry_attempts,
        )
    }

    pub fn is_transient(&self, kind: TransportErrorKind) -> bool {
        self.transient.contains(&kind)
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn execute<T, F>(&self, mut operation: F) -> ListenerResult<T>
    where
        F: FnMut() -> TransportResult<T>,
    {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match operation() {
                Ok(value) => return Ok(value),
                Err(e) if !self.is_transient(e.kind()) => {
                    return Err(ListenerError::NonRetryable(e));
                }
                Err(e) if attempt > self.max_retries => {
                    error!("No more retries after {} attempts: {}", attempt, e);
                    return Err(ListenerError::FatalTransport {
                        attempts: attempt,
                        source: e,
                    });
                }
                Err(e) => {
                    warn!(
                        "{}, retrying in {:?} (attempt {} of {})",
                        e,
                        self.wait,
                        attempt,
                        self.max_retries + 1
                    );
                    sleep(self.wait);
                }
            }
        }
    }
}

/// Runs `operation` under `policy`.
pub fn with_retry<T, F>(policy: &RetryPolicy, operation: F) -> ListenerResult<T>
where
    F: FnMut() -> TransportResult<T>,
{
    policy.execute(operation)
}
