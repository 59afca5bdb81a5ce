//! Each line of the stream is one JSON object tagged by `hook`, e.g.
//! `{"hook":"start_suite","name":"Root","attributes":{...}}` or
//! `{"hook":"log_message","message":{...}}`.

use crate::app::attributes::Attributes;
use crate::app::environment::RunEnvironment;
use crate::app::error::ListenerError;
use crate::app::listener::Listener;
use crate::connection::ReportingClient;
use serde_derive::Deserialize;
use std::io::{self, BufRead};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "hook", rename_all = "snake_case")]
pub enum HookEvent {
    StartSuite { name: String, attributes: Attributes },
    EndSuite { name: String, attributes: Attributes },
    StartTest { name: String, attributes: Attributes },
    EndTest { name: String, attributes: Attributes },
    StartKeyword { name: String, attributes: Attributes },
    EndKeyword { name: String, attributes: Attributes },
    LogMessage { message: Attributes },
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("cannot read events: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: malformed event: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("line {line}: {source}")]
    Hook {
        line: usize,
        #[source]
        source: ListenerError,
    },
}

pub fn dispatch<C, E>(listener: &mut Listener<C, E>, event: &HookEvent) -> Result<(), ListenerError>
where
    C: ReportingClient,
    E: RunEnvironment,
{
    match event {
        HookEvent::StartSuite { name, attributes } => listener.start_suite(name, attributes),
        HookEvent::EndSuite { name, attributes } => listener.end_suite(name, attributes),
        HookEvent::StartTest { name, attributes } => listener.start_test(name, attributes),
        HookEvent::EndTest { name, attributes } => listener.end_test(name, attributes),
        HookEvent::StartKeyword { name, attributes } => listener.start_keyword(name, attributes),
        HookEvent::EndKeyword { name, attributes } => listener.end_keyword(name, attributes),
        HookEvent::LogMessage { message } => listener.log_message(message),
    }
}

/// Dispatches every event of `reader` in order, stopping at the first error.
/// Blank lines are skipped. Returns the number of events dispatched.
pub fn replay<C, E, R>(listener: &mut Listener<C, E>, reader: R) -> Result<usize, ReplayError>
where
    C: ReportingClient,
    E: RunEnvironment,
    R: BufRead,
{
    let mut dispatched = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let number = index + 1;
        let event: HookEvent = serde_json::from_str(&line).map_err(|source| ReplayError::Malformed {
            line: number,
            source,
        })?;
        dispatch(listener, &event).map_err(|source| ReplayError::Hook {
            line: number,
            source,
        })?;
        dispatched += 1;
    }
    Ok(dispatched)
}
