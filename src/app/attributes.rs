use crate::app::error::ConfigError;
use crate::reporter::{LogLevel, Status};
use serde::de::{DeserializeOwned, Deserializer};
use serde_derive::Deserialize;
use serde_json::{Map, Value};

/// Id the host runner gives the outermost suite of a run.
pub const OUTERMOST_SUITE_ID: &str = "s1";

pub type Attributes = Map<String, Value>;

pub fn parse<T: DeserializeOwned>(hook: &'static str, attributes: &Attributes) -> Result<T, ConfigError> {
    serde_json::from_value(Value::Object(attributes.clone())).map_err(|e| {
        ConfigError::InvalidAttributes {
            hook,
            reason: e.to_string(),
        }
    })
}

fn required_status(hook: &'static str, status: Option<Status>) -> Result<Status, ConfigError> {
    status.ok_or_else(|| ConfigError::InvalidAttributes {
        hook,
        reason: "missing field `status`".to_owned(),
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuiteAttributes {
    pub id: String,
    pub longname: String,
    #[serde(default)]
    pub doc: String,
    pub tests: Vec<String>,
    #[serde(default)]
    pub status: Option<Status>,
}

impl SuiteAttributes {
    pub fn is_outermost(&self) -> bool {
        self.id == OUTERMOST_SUITE_ID
    }

    pub fn has_tests(&self) -> bool {
        !self.tests.is_empty()
    }

    pub fn status(&self, hook: &'static str) -> Result<Status, ConfigError> {
        required_status(hook, self.status)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestAttributes {
    #[serde(default)]
    pub doc: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub message: Option<String>,
}

impl TestAttributes {
    pub fn status(&self, hook: &'static str) -> Result<Status, ConfigError> {
        required_status(hook, self.status)
    }

    /// The test's own failure message, if it carries a non-empty one.
    pub fn failure_message(&self) -> Option<&str> {
        self.message.as_deref().filter(|message| !message.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum KeywordKind {
    Setup,
    Teardown,
    Other(String),
}

impl From<String> for KeywordKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "Setup" | "SETUP" => KeywordKind::Setup,
            "Teardown" | "TEARDOWN" => KeywordKind::Teardown,
            _ => KeywordKind::Other(kind),
        }
    }
}

impl KeywordKind {
    pub fn is_fixture(&self) -> bool {
        matches!(self, KeywordKind::Setup | KeywordKind::Teardown)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeywordAttributes {
    #[serde(rename = "type")]
    pub kind: KeywordKind,
    #[serde(default)]
    pub doc: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub assign: Vec<String>,
    #[serde(default)]
    pub status: Option<Status>,
}

impl KeywordAttributes {
    pub fn status(&self, hook: &'static str) -> Result<Status, ConfigError> {
        required_status(hook, self.status)
    }
}

/// A message logged by a running keyword.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogMessage {
    pub message: String,
    pub level: LogLevel,
    #[serde(default, deserialize_with = "flag")]
    pub html: bool,
}

impl LogMessage {
    pub fn new<S: Into<String>>(level: LogLevel, message: S) -> Self {
        Self {
            message: message.into(),
            level,
            html: false,
        }
    }
}

/// Accepts `true`/`false` as well as the runner's `"yes"`/`"no"`.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match <Flag as serde::Deserialize>::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Text(text) => matches!(text.to_lowercase().as_str(), "yes" | "true"),
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn attributes(value: Value) -> Attributes {
        match value {
            Value::Object(map) => map,
            _ => panic!("attributes must be an object"),
        }
    }

    #[test]
    fn test_parsing_suite_attributes() {
        let suite: SuiteAttributes = parse(
            "start_suite",
            &attributes(json!({"id": "s1", "longname": "Root", "tests": [], "source": "/tmp"})),
        )
        .unwrap();
        assert!(suite.is_outermost());
        assert!(!suite.has_tests());
        assert!(suite.status("end_suite").is_err());
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let result = parse::<SuiteAttributes>("start_suite", &attributes(json!({"id": "s1-s1"})));
        match result {
            Err(ConfigError::InvalidAttributes { hook, reason }) => {
                assert_eq!(hook, "start_suite");
                assert!(reason.contains("longname"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parsing_keyword_kinds() {
        let keyword: KeywordAttributes = parse(
            "start_keyword",
            &attributes(json!({"type": "Teardown", "args": ["a"], "assign": []})),
        )
        .unwrap();
        assert_eq!(keyword.kind, KeywordKind::Teardown);
        assert!(keyword.kind.is_fixture());

        let keyword: KeywordAttributes =
            parse("start_keyword", &attributes(json!({"type": "Keyword"}))).unwrap();
        assert_eq!(keyword.kind, KeywordKind::Other("Keyword".to_owned()));
        assert!(keyword.args.is_empty());
    }

    #[test]
    fn test_empty_test_message_is_no_failure_message() {
        let test: TestAttributes = parse(
            "end_test",
            &attributes(json!({"status": "PASS", "message": ""})),
        )
        .unwrap();
        assert_eq!(test.failure_message(), None);
        assert_eq!(test.status("end_test").unwrap(), Status::Passed);
    }

    #[test]
    fn test_html_flag_accepts_runner_strings() {
        let message: LogMessage = parse(
            "log_message",
            &attributes(json!({"message": "<img>", "level": "FAIL", "html": "yes"})),
        )
        .unwrap();
        assert!(message.html);
        assert_eq!(message.level, LogLevel::Fail);

        let message: LogMessage =
            parse("log_message", &attributes(json!({"message": "x", "level": "INFO"}))).unwrap();
        assert!(!message.html);
    }
}
