use crate::connection::{ReportingClient, TransportError, TransportErrorKind, TransportResult};
use crate::reporter::{
    ItemId, KeywordSession, Launch, LaunchId, LogEntry, Status, SuiteSession, TestSession,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// One remote call as seen by [`RecordingClient`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Initialize(String),
    StartLaunch(Launch),
    FinishLaunch(LaunchId, Status),
    StartSuite(SuiteSession, Option<ItemId>),
    FinishSuite(ItemId, Status),
    StartTest(TestSession, Option<ItemId>),
    FinishTest(ItemId, Status),
    StartStep(KeywordSession, Option<ItemId>),
    FinishStep(ItemId, Status),
    Log(Option<ItemId>, LogEntry),
    Terminate,
}

#[derive(Debug, Default)]
struct Journal {
    calls: Vec<Call>,
    failures: VecDeque<TransportErrorKind>,
    attempts: usize,
    next_id: usize,
}

/// In-memory client that records successful calls and can be told to fail.
///
/// Clones share one journal, so a test keeps a handle while the listener owns
/// the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingClient {
    journal: Rc<RefCell<Journal>>,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.journal.borrow().calls.clone()
    }

    pub fn logs(&self) -> Vec<LogEntry> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Log(_, entry) => Some(entry),
                _ => None,
            })
            .collect()
    }

    /// Number of calls made, failed ones included.
    pub fn attempts(&self) -> usize {
        self.journal.borrow().attempts
    }

    /// Makes the next `times` calls fail with `kind`.
    pub fn fail_next(&self, kind: TransportErrorKind, times: usize) {
        let mut journal = self.journal.borrow_mut();
        journal.failures.extend(std::iter::repeat(kind).take(times));
    }

    fn record(&mut self, call: Call) -> TransportResult<()> {
        let mut journal = self.journal.borrow_mut();
        journal.attempts += 1;
        if let Some(kind) = journal.failures.pop_front() {
            return Err(TransportError::new(kind, format!("injected failure of {:?}", call)));
        }
        journal.calls.push(call);
        Ok(())
    }

    fn record_item(&mut self, call: Call) -> TransportResult<ItemId> {
        self.record(call)?;
        let mut journal = self.journal.borrow_mut();
        journal.next_id += 1;
        Ok(ItemId::new(format!("item-{}", journal.next_id)))
    }
}

impl ReportingClient for RecordingClient {
    fn initialize(&mut self, endpoint: &str, _project: &str, _credential: &str) -> TransportResult<()> {
        self.record(Call::Initialize(endpoint.to_owned()))
    }

    fn start_launch(&mut self, launch: &Launch) -> TransportResult<LaunchId> {
        self.record(Call::StartLaunch(launch.clone()))?;
        Ok(LaunchId::new("launch-auto"))
    }

    fn finish_launch(&mut self, launch: &LaunchId, status: Status) -> TransportResult<()> {
        self.record(Call::FinishLaunch(launch.clone(), status))
    }

    fn start_suite(
        &mut self,
        _launch: &LaunchId,
        suite: &SuiteSession,
        parent: Option<&ItemId>,
    ) -> TransportResult<ItemId> {
        self.record_item(Call::StartSuite(suite.clone(), parent.cloned()))
    }

    fn finish_suite(&mut self, _launch: &LaunchId, id: &ItemId, status: Status) -> TransportResult<()> {
        self.record(Call::FinishSuite(id.clone(), status))
    }

    fn start_test(
        &mut self,
        _launch: &LaunchId,
        test: &TestSession,
        parent: Option<&ItemId>,
    ) -> TransportResult<ItemId> {
        self.record_item(Call::StartTest(test.clone(), parent.cloned()))
    }

    fn finish_test(&mut self, _launch: &LaunchId, id: &ItemId, status: Status) -> TransportResult<()> {
        self.record(Call::FinishTest(id.clone(), status))
    }

    fn start_step(
        &mut self,
        _launch: &LaunchId,
        keyword: &KeywordSession,
        parent: Option<&ItemId>,
    ) -> TransportResult<ItemId> {
        self.record_item(Call::StartStep(keyword.clone(), parent.cloned()))
    }

    fn finish_step(&mut self, _launch: &LaunchId, id: &ItemId, status: Status) -> TransportResult<()> {
        self.record(Call::FinishStep(id.clone(), status))
    }

    fn log(&mut self, _launch: &LaunchId, item: Option<&ItemId>, entry: &LogEntry) -> TransportResult<()> {
        self.record(Call::Log(item.cloned(), entry.clone()))
    }

    fn terminate(&mut self) -> TransportResult<()> {
        self.record(Call::Terminate)
    }
}
