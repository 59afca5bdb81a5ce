use crate::configuration::constants::cargo_env::CARGO_PKG_NAME;
use clap::arg_enum;
use log::LevelFilter;
use std::path::PathBuf;
use structopt::StructOpt;

arg_enum! {
    #[derive(Debug)]
    pub enum LogLevel {
        Off, Error, Warn, Info, Debug, Trace,
    }
}

/// Replays a recorded stream of listener hooks against a reporting service.
#[derive(StructOpt, Debug)]
#[structopt(name = CARGO_PKG_NAME)]
pub struct Opt {
    /// JSON lines file, one hook call per line
    #[structopt(parse(from_os_str))]
    pub events: PathBuf,

    /// Settings file. Supported: YAML, JSON, TOML, HJSON. RP_* variables override it
    #[structopt(long, short = "c", parse(from_os_str), env = "RP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Report into an existing launch instead of creating one
    #[structopt(long, env = "RP_LAUNCH_ID")]
    pub launch_id: Option<String>,

    /// Sets a logging level
    #[structopt(case_insensitive = true, long, short = "L", possible_values = &LogLevel::variants(), env = "LOG_LEVEL")]
    pub logging: Option<LogLevel>,

    /// File to which application will write logs
    #[structopt(long, short = "O", env = "LOG_OUTPUT_FILE")]
    pub log_output_file: Option<PathBuf>,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parsing_replay_options() {
        let opt = Opt::from_iter(&[
            "rp-listener",
            "--launch-id",
            "abc",
            "-L",
            "debug",
            "events.jsonl",
        ]);
        assert_eq!(opt.events, PathBuf::from("events.jsonl"));
        assert_eq!(opt.launch_id.as_deref(), Some("abc"));
        assert_eq!(LevelFilter::from(opt.logging.unwrap()), LevelFilter::Debug);
    }
}
