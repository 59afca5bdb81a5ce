pub mod attachment;
pub mod item;
pub mod launch;
pub mod log;
pub mod status;
