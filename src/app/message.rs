use crate::app::attributes::{KeywordKind, LogMessage};
use crate::reporter::LogEntry;
use lazy_static::*;
use regex::Regex;

/// Tells the reporting UI to render the message as markdown.
pub const MARKDOWN_MODE: &str = "!!!MARKDOWN_MODE!!!";

/// FAIL messages containing one of these are expected noise and stay as they are.
const BENIGN_FAILURES: [&str; 3] = [
    "check_completed",
    "'\"running\"==\"failed\" or \"running\"==\"success\"'",
    "Connection with ID default does not exist",
];

/// Keywords that are never summarised.
const SILENT_KEYWORDS: [&str; 2] = ["${INDEX} = ", "BuiltIn.Log"];

lazy_static! {
    /// Screenshot files embedded by browser libraries, e.g. `selenium-screenshot-12.png`.
    static ref SCREENSHOT_REGEX: Regex =
        Regex::new(r"[a-z]+-[a-z]+-[0-9]+\.png").expect("Regex compilation error");
}

pub fn is_benign_failure(text: &str) -> bool {
    BENIGN_FAILURES.iter().any(|benign| text.contains(benign))
}

/// First screenshot file name mentioned in `text`.
pub fn screenshot_name(text: &str) -> Option<&str> {
    SCREENSHOT_REGEX.find(text).map(|found| found.as_str())
}

/// A log entry ready to send, and the screenshot it should carry, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMessage {
    pub entry: LogEntry,
    pub screenshot: Option<String>,
}

pub fn render(message: &LogMessage) -> RenderedMessage {
    if message.level != crate::reporter::LogLevel::Fail || is_benign_failure(&message.message) {
        return RenderedMessage {
            entry: LogEntry::new(message.level.clone(), message.message.as_str()),
            screenshot: None,
        };
    }
    let text = format!("{} **[FAIL]**\n```\n{}\n```", MARKDOWN_MODE, message.message);
    let screenshot = if message.html {
        screenshot_name(&message.message).map(str::to_owned)
    } else {
        None
    };
    RenderedMessage {
        entry: LogEntry::new(message.level.clone(), text),
        screenshot,
    }
}

/// Test names read better without the underscores some suites use instead of spaces.
pub fn pretty_test_name(name: &str) -> String {
    name.replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn test_header(name: &str) -> String {
    format!("{}## [Test-case] {}", MARKDOWN_MODE, pretty_test_name(name))
}

fn display_type(kind: &KeywordKind) -> &'static str {
    match kind {
        KeywordKind::Setup => "Test Setup",
        KeywordKind::Teardown => "Test Teardown",
        KeywordKind::Other(_) => "Step",
    }
}

/// Last dot separated segment, `Library.Keyword` becomes `Keyword`.
pub fn leaf_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// One line describing a top-level keyword, `None` for noise keywords.
pub fn keyword_summary(
    name: &str,
    kind: &KeywordKind,
    args: &[String],
    assign: &[String],
) -> Option<String> {
    if SILENT_KEYWORDS.iter().any(|silent| name.contains(silent)) {
        return None;
    }
    let input = if args.is_empty() {
        String::new()
    } else {
        format!(" [Input data] {}", args.join(", "))
    };
    let output = if assign.is_empty() {
        String::new()
    } else {
        format!(" [Expected result] Get output {}", assign.join(", "))
    };
    Some(format!(
        "{}**[{}]** {}{}{}",
        MARKDOWN_MODE,
        display_type(kind),
        leaf_name(name),
        input,
        output
    ))
}
