pub mod model;

pub use self::model::{
    attachment::Attachment,
    item::{ItemId, KeywordSession, StepType, SuiteSession, TestSession},
    launch::{Launch, LaunchId},
    log::{LogEntry, LogLevel},
    status::Status,
};
