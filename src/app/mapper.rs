use crate::app::attributes::{KeywordAttributes, KeywordKind, LogMessage, SuiteAttributes, TestAttributes};
use crate::app::error::ConfigError;
use crate::app::message::{self, RenderedMessage};
use crate::app::scope::{KeywordRole, Scope};
use crate::configuration::settings::Settings;
use crate::reporter::{
    KeywordSession, Launch, LaunchId, LogEntry, Status, StepType, SuiteSession, TestSession,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Initialize,
    AdoptLaunch(LaunchId),
    StartLaunch(Launch),
    FinishLaunch(Status),
    Terminate,
    StartSuite(SuiteSession),
    FinishSuite(Status),
    StartTest(TestSession),
    FinishTest(Status),
    StartStep(KeywordSession),
    FinishStep(Status),
    Log(RenderedMessage),
}

/// What the outermost suite needs to know to open the launch.
#[derive(Debug, Clone, Copy)]
pub struct LaunchPlan<'a> {
    pub external_id: Option<&'a LaunchId>,
    pub parallel: bool,
    pub settings: &'a Settings,
}

fn log(entry: LogEntry) -> Operation {
    Operation::Log(RenderedMessage {
        entry,
        screenshot: None,
    })
}

pub fn suite_start(
    suite: &SuiteAttributes,
    plan: &LaunchPlan<'_>,
) -> Result<Vec<Operation>, ConfigError> {
    let mut operations = vec![];
    if suite.is_outermost() {
        plan.settings.check()?;
        operations.push(Operation::Initialize);
        match plan.external_id {
            Some(id) => operations.push(Operation::AdoptLaunch(id.clone())),
            None if plan.parallel => return Err(ConfigError::LaunchIdRequired),
            None => operations.push(Operation::StartLaunch(Launch {
                name: plan.settings.launch_name.clone(),
                doc: plan.settings.launch_doc.clone(),
            })),
        }
    }
    if suite.has_tests() {
        operations.push(Operation::StartSuite(SuiteSession {
            name: suite.longname.clone(),
            doc: suite.doc.clone(),
        }));
    }
    Ok(operations)
}

/// `launch_auto_created` is false when the launch id came from outside; such
/// a launch is left open for whoever created it.
pub fn suite_end(suite: &SuiteAttributes, status: Status, launch_auto_created: bool) -> Vec<Operation> {
    let mut operations = vec![];
    if suite.has_tests() {
        operations.push(Operation::FinishSuite(status));
    }
    if suite.is_outermost() {
        if launch_auto_created {
            operations.push(Operation::FinishLaunch(status));
        }
        operations.push(Operation::Terminate);
    }
    operations
}

pub fn test_start(name: &str, test: &TestAttributes) -> Vec<Operation> {
    vec![
        Operation::StartTest(TestSession {
            name: name.to_owned(),
            doc: test.doc.clone(),
            tags: test.tags.clone(),
        }),
        log(LogEntry::info(message::test_header(name))),
    ]
}

pub fn test_end(status: Status, annotation: Option<LogMessage>) -> Vec<Operation> {
    let mut operations = vec![];
    if let Some(note) = annotation {
        operations.push(Operation::Log(message::render(&note)));
    }
    operations.push(Operation::FinishTest(status));
    operations
}

fn step_type(kind: &KeywordKind) -> StepType {
    match kind {
        KeywordKind::Setup => StepType::Setup,
        KeywordKind::Teardown => StepType::Teardown,
        KeywordKind::Other(_) => StepType::Step,
    }
}

pub fn keyword_start(name: &str, keyword: &KeywordAttributes, role: KeywordRole) -> Vec<Operation> {
    match role {
        KeywordRole::SuiteFixture => vec![Operation::StartStep(KeywordSession {
            name: name.to_owned(),
            doc: keyword.doc.clone(),
            args: keyword.args.clone(),
            parent: Scope::Suite,
            step_type: step_type(&keyword.kind),
        })],
        KeywordRole::TopLevel => {
            message::keyword_summary(name, &keyword.kind, &keyword.args, &keyword.assign)
                .map(|summary| vec![log(LogEntry::info(summary))])
                .unwrap_or_default()
        }
        KeywordRole::Nested => vec![],
    }
}

pub fn keyword_end(role: KeywordRole, status: Status) -> Vec<Operation> {
    match role {
        KeywordRole::SuiteFixture => vec![Operation::FinishStep(status)],
        KeywordRole::TopLevel | KeywordRole::Nested => vec![],
    }
}

pub fn log_message(message: &LogMessage) -> Vec<Operation> {
    vec![Operation::Log(message::render(message))]
}
