use crate::app::attributes::{
    self, Attributes, KeywordAttributes, LogMessage, SuiteAttributes, TestAttributes,
};
use crate::app::environment::{load_attachment, RunEnvironment};
use crate::app::error::{ListenerError, ListenerResult};
use crate::app::mapper::{self, LaunchPlan, Operation};
use crate::app::propagation::SuiteFailurePropagator;
use crate::app::retry::RetryPolicy;
use crate::app::scope::{KeywordRole, ScopeTracker};
use crate::configuration::settings::Settings;
use crate::connection::ReportingClient;
use crate::reporter::{ItemId, LaunchId};
use derivative::*;

#[derive(Debug, Clone, PartialEq)]
struct ActiveLaunch {
    id: LaunchId,
    auto_created: bool,
}

/// Mutable state of one run, touched only by the hooks in arrival order.
#[derive(Debug, Clone, Default)]
pub struct RunState {
    pub scope: ScopeTracker,
    pub failures: SuiteFailurePropagator,
    launch: Option<ActiveLaunch>,
    items: Vec<ItemId>,
}

impl RunState {
    pub fn launch_id(&self) -> Option<&LaunchId> {
        self.launch.as_ref().map(|launch| &launch.id)
    }

    fn active_launch(&self) -> ListenerResult<LaunchId> {
        self.launch_id()
            .cloned()
            .ok_or(ListenerError::State("no launch is active, the outermost suite has not started"))
    }

    fn launch_auto_created(&self) -> bool {
        self.launch.as_ref().map_or(false, |launch| launch.auto_created)
    }

    pub fn current_item(&self) -> Option<&ItemId> {
        self.items.last()
    }

    pub fn depth(&self) -> usize {
        self.items.len()
    }

    fn open_item(&self) -> ListenerResult<ItemId> {
        self.current_item()
            .cloned()
            .ok_or(ListenerError::State("no remote item is open"))
    }
}

/// Mirrors host runner hooks onto the reporting service.
#[derive(Derivative)]
#[derivative(Debug(bound = ""))]
pub struct Listener<C: ReportingClient, E: RunEnvironment> {
    settings: Settings,
    retry: RetryPolicy,
    launch_id: Option<LaunchId>,
    #[derivative(Debug = "ignore")]
    client: C,
    #[derivative(Debug = "ignore")]
    environment: E,
    state: RunState,
}

impl<C: ReportingClient, E: RunEnvironment> Listener<C, E> {
    pub fn new(settings: Settings, client: C, environment: E) -> Self {
        Self {
            retry: RetryPolicy::from_settings(&settings),
            settings,
            launch_id: None,
            client,
            environment,
            state: RunState::default(),
        }
    }

    /// Reports into an existing launch instead of creating and finishing one.
    pub fn with_launch_id(mut self, launch_id: LaunchId) -> Self {
        self.launch_id = Some(launch_id);
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn start_suite(&mut self, name: &str, attributes: &Attributes) -> ListenerResult<()> {
        let suite: SuiteAttributes = attributes::parse("start_suite", attributes)?;
        debug!("Suite '{}' ({}) started", name, suite.id);
        self.state.scope.enter_suite();
        let parallel = suite.is_outermost()
            && self.launch_id.is_none()
            && self.environment.parallel_rendezvous().is_some();
        let plan = LaunchPlan {
            external_id: self.launch_id.as_ref(),
            parallel,
            settings: &self.settings,
        };
        let operations = mapper::suite_start(&suite, &plan)?;
        self.perform(operations)
    }

    pub fn end_suite(&mut self, name: &str, attributes: &Attributes) -> ListenerResult<()> {
        let suite: SuiteAttributes = attributes::parse("end_suite", attributes)?;
        let status = suite.status("end_suite")?;
        debug!("Suite '{}' ({}) ended with {}", name, suite.id, status);
        self.state.scope.enter_suite();
        let operations = mapper::suite_end(&suite, status, self.state.launch_auto_created());
        self.perform(operations)
    }

    pub fn start_test(&mut self, name: &str, attributes: &Attributes) -> ListenerResult<()> {
        let test: TestAttributes = attributes::parse("start_test", attributes)?;
        debug!("Test '{}' started", name);
        self.state.scope.enter_test();
        self.perform(mapper::test_start(name, &test))
    }

    pub fn end_test(&mut self, name: &str, attributes: &Attributes) -> ListenerResult<()> {
        let test: TestAttributes = attributes::parse("end_test", attributes)?;
        let status = test.status("end_test")?;
        debug!("Test '{}' ended with {}", name, status);
        self.state.scope.leave_test();
        let annotation = self.state.failures.annotation(&test);
        self.perform(mapper::test_end(status, annotation))
    }

    pub fn start_keyword(&mut self, name: &str, attributes: &Attributes) -> ListenerResult<()> {
        let keyword: KeywordAttributes = attributes::parse("start_keyword", attributes)?;
        let role = self.state.scope.keyword_started(name, &keyword.kind);
        trace!("Keyword '{}' started as {:?}", name, role);
        if role == KeywordRole::SuiteFixture {
            self.state.failures.on_suite_keyword_start();
        }
        self.perform(mapper::keyword_start(name, &keyword, role))
    }

    pub fn end_keyword(&mut self, name: &str, attributes: &Attributes) -> ListenerResult<()> {
        let keyword: KeywordAttributes = attributes::parse("end_keyword", attributes)?;
        let status = keyword.status("end_keyword")?;
        let role = self.state.scope.keyword_ended(name, &keyword.kind);
        trace!("Keyword '{}' ended as {:?} with {}", name, role, status);
        if role == KeywordRole::SuiteFixture {
            self.state.failures.on_suite_keyword_end(status);
        }
        self.perform(mapper::keyword_end(role, status))
    }

    pub fn log_message(&mut self, message: &Attributes) -> ListenerResult<()> {
        let message: LogMessage = attributes::parse("log_message", message)?;
        self.perform(mapper::log_message(&message))
    }

    fn perform(&mut self, operations: Vec<Operation>) -> ListenerResult<()> {
        for operation in operations {
            self.perform_one(operation)?;
        }
        Ok(())
    }

    fn perform_one(&mut self, operation: Operation) -> ListenerResult<()> {
        let Listener {
            settings,
            retry,
            client,
            environment,
            state,
            ..
        } = self;
        match operation {
            Operation::Initialize => retry.execute(|| {
                client.initialize(&settings.endpoint, &settings.project, &settings.uuid)
            }),
            Operation::AdoptLaunch(id) => {
                info!("Reporting into existing launch {}", id);
                state.launch = Some(ActiveLaunch {
                    id,
                    auto_created: false,
                });
                Ok(())
            }
            Operation::StartLaunch(launch) => {
                let id = retry.execute(|| client.start_launch(&launch))?;
                state.launch = Some(ActiveLaunch {
                    id,
                    auto_created: true,
                });
                Ok(())
            }
            Operation::FinishLaunch(status) => {
                let launch = state.active_launch()?;
                retry.execute(|| client.finish_launch(&launch, status))
            }
            Operation::Terminate => {
                retry.execute(|| client.terminate())?;
                if !state.items.is_empty() {
                    warn!("Run ended with {} remote items still open", state.items.len());
                }
                state.launch = None;
                state.items.clear();
                Ok(())
            }
            Operation::StartSuite(suite) => {
                let launch = state.active_launch()?;
                let parent = state.current_item().cloned();
                let id = retry.execute(|| client.start_suite(&launch, &suite, parent.as_ref()))?;
                state.items.push(id);
                Ok(())
            }
            Operation::FinishSuite(status) => {
                let launch = state.active_launch()?;
                let id = state.open_item()?;
                retry.execute(|| client.finish_suite(&launch, &id, status))?;
                state.items.pop();
                Ok(())
            }
            Operation::StartTest(test) => {
                let launch = state.active_launch()?;
                let parent = state.current_item().cloned();
                let id = retry.execute(|| client.start_test(&launch, &test, parent.as_ref()))?;
                state.items.push(id);
                Ok(())
            }
            Operation::FinishTest(status) => {
                let launch = state.active_launch()?;
                let id = state.open_item()?;
                retry.execute(|| client.finish_test(&launch, &id, status))?;
                state.items.pop();
                Ok(())
            }
            Operation::StartStep(keyword) => {
                let launch = state.active_launch()?;
                let parent = state.current_item().cloned();
                let id = retry.execute(|| client.start_step(&launch, &keyword, parent.as_ref()))?;
                state.items.push(id);
                Ok(())
            }
            Operation::FinishStep(status) => {
                let launch = state.active_launch()?;
                let id = state.open_item()?;
                retry.execute(|| client.finish_step(&launch, &id, status))?;
                state.items.pop();
                Ok(())
            }
            Operation::Log(rendered) => {
                let launch = state.active_launch()?;
                let attachment = match &rendered.screenshot {
                    Some(name) => Some(load_attachment(&*environment, name)?),
                    None => None,
                };
                let entry = rendered.entry.with_attachment(attachment);
                let item = state.current_item();
                retry.execute(|| client.log(&launch, item, &entry))
            }
        }
    }
}
