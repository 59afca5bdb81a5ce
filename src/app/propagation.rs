use crate::app::attributes::{LogMessage, TestAttributes};
use crate::reporter::{LogLevel, Status};

pub const SUITE_SETUP_FAILED: &str = "[ERROR] Suite Setup failed!";

/// Remembers whether the latest suite setup or teardown failed.
///
/// The flag is sticky: once set it marks every following test end until the
/// next suite-level setup or teardown starts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuiteFailurePropagator {
    failed: bool,
}

impl SuiteFailurePropagator {
    pub fn on_suite_keyword_start(&mut self) {
        self.failed = false;
    }

    pub fn on_suite_keyword_end(&mut self, status: Status) {
        if status.is_failed() {
            debug!("Suite fixture failed, following tests will be annotated");
            self.failed = true;
        }
    }

    pub fn should_annotate_test(&self) -> bool {
        self.failed
    }

    /// FAIL message to submit before a test closes, if the suite fixture failed.
    pub fn annotation(&self, test: &TestAttributes) -> Option<LogMessage> {
        if !self.failed {
            return None;
        }
        let text = test.failure_message().unwrap_or(SUITE_SETUP_FAILED);
        Some(LogMessage::new(LogLevel::Fail, text))
    }
}
