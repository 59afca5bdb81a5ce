use crate::app::attributes::KeywordKind;

/// Where execution currently is: between tests of a suite, or inside a test body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Suite,
    Test,
}

/// What a keyword start or end means for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordRole {
    /// Setup or teardown of a suite, reported as its own item.
    SuiteFixture,
    /// Outermost step of the current body, summarised as one log line.
    TopLevel,
    /// Anything below the top-level keyword.
    Nested,
}

/// Current scope plus the marker naming the open top-level keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeTracker {
    current: Scope,
    top_level_keyword: Option<String>,
}

impl Default for ScopeTracker {
    fn default() -> Self {
        Self {
            current: Scope::Suite,
            top_level_keyword: None,
        }
    }
}

impl ScopeTracker {
    pub fn current(&self) -> Scope {
        self.current
    }

    pub fn top_level_keyword(&self) -> Option<&str> {
        self.top_level_keyword.as_deref()
    }

    pub fn enter_suite(&mut self) {
        self.current = Scope::Suite;
    }

    pub fn enter_test(&mut self) {
        self.current = Scope::Test;
    }

    pub fn leave_test(&mut self) {
        self.current = Scope::Suite;
    }

    fn is_suite_fixture(&self, kind: &KeywordKind) -> bool {
        self.current == Scope::Suite && kind.is_fixture()
    }

    pub fn keyword_started(&mut self, name: &str, kind: &KeywordKind) -> KeywordRole {
        if self.is_suite_fixture(kind) {
            return KeywordRole::SuiteFixture;
        }
        if self.top_level_keyword.is_none() {
            trace!("Top-level keyword '{}' opened", name);
            self.top_level_keyword = Some(name.to_owned());
            KeywordRole::TopLevel
        } else {
            KeywordRole::Nested
        }
    }

    /// Clearing an unset marker, or ending a keyword that never set it, is a no-op.
    pub fn keyword_ended(&mut self, name: &str, kind: &KeywordKind) -> KeywordRole {
        if self.is_suite_fixture(kind) {
            return KeywordRole::SuiteFixture;
        }
        if self.top_level_keyword.as_deref() == Some(name) {
            trace!("Top-level keyword '{}' closed", name);
            self.top_level_keyword = None;
            KeywordRole::TopLevel
        } else {
            KeywordRole::Nested
        }
    }
}
