use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// Final state of a launch or item.
///
/// Read from the host runner's `PASS`/`FAIL`/`SKIP`/`NOT RUN` and written
/// in the reporting API's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename(serialize = "PASSED", deserialize = "PASS"))]
    Passed,
    #[serde(rename(serialize = "FAILED", deserialize = "FAIL"))]
    Failed,
    #[serde(
        rename(serialize = "SKIPPED", deserialize = "SKIP"),
        alias = "NOT RUN",
        alias = "NOT_RUN"
    )]
    Skipped,
}

impl Status {
    pub fn is_failed(self) -> bool {
        self == Status::Failed
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Status::Passed => write!(f, "PASS"),
            Status::Failed => write!(f, "FAIL"),
            Status::Skipped => write!(f, "SKIP"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Status;

    #[test]
    fn test_reading_runner_statuses() {
        let read = |s: &str| serde_json::from_value::<Status>(serde_json::json!(s)).unwrap();
        assert_eq!(read("PASS"), Status::Passed);
        assert_eq!(read("FAIL"), Status::Failed);
        assert_eq!(read("SKIP"), Status::Skipped);
        assert_eq!(read("NOT RUN"), Status::Skipped);
    }

    #[test]
    fn test_writing_reporting_statuses() {
        assert_eq!(serde_json::to_string(&Status::Passed).unwrap(), "\"PASSED\"");
        assert_eq!(serde_json::to_string(&Status::Failed).unwrap(), "\"FAILED\"");
        assert_eq!(serde_json::to_string(&Status::Skipped).unwrap(), "\"SKIPPED\"");
    }
}
