use crate::app::scope::Scope;
use std::fmt;

/// Identifier of a suite, test or step item inside a launch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemId(String);

impl ItemId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        ItemId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuiteSession {
    pub name: String,
    pub doc: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TestSession {
    pub name: String,
    pub doc: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepType {
    Setup,
    Teardown,
    Step,
}

/// A keyword reported as its own remote item.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordSession {
    pub name: String,
    pub doc: String,
    pub args: Vec<String>,
    pub parent: Scope,
    pub step_type: StepType,
}

impl KeywordSession {
    /// Item type the reporting service files this keyword under.
    pub fn item_type(&self) -> &'static str {
        match (self.parent, self.step_type) {
            (Scope::Suite, StepType::Setup) => "BEFORE_SUITE",
            (Scope::Suite, StepType::Teardown) => "AFTER_SUITE",
            (Scope::Test, StepType::Setup) => "BEFORE_TEST",
            (Scope::Test, StepType::Teardown) => "AFTER_TEST",
            (_, StepType::Step) => "STEP",
        }
    }
}
