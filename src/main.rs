// #![forbid(unsafe_code)]
// #![deny(unused_imports)]

#[macro_use]
extern crate log;

use log::LevelFilter;
use std::fs::File;
use std::io::BufReader;
use std::{path::PathBuf, process::exit};
use structopt::StructOpt;

use rp_listener::app::environment::ProcessEnvironment;
use rp_listener::app::replay::replay;
use rp_listener::configuration::command_line::{LogLevel, Opt};
use rp_listener::reporter::LaunchId;
use rp_listener::{HttpReportingClient, Listener, Settings};

fn main() {
    let options = Opt::from_args();

    if let Err(e) = init_logging(
        options.logging.unwrap_or(LogLevel::Info).into(),
        &options.log_output_file,
    ) {
        eprintln!("Failed to initialize logging: {}", e);
        exit(2);
    }

    let settings = match Settings::load(options.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to load settings: {}", e);
            exit(2);
        }
    };
    debug!("Reporting to {} (project {})", settings.endpoint, settings.project);

    let events = match File::open(&options.events) {
        Ok(file) => BufReader::new(file),
        Err(e) => {
            error!("Cannot open {}: {}", options.events.display(), e);
            exit(2);
        }
    };

    let client = HttpReportingClient::new(settings.timeout);
    let environment = ProcessEnvironment::new(settings.output_dir.clone());
    let mut listener = Listener::new(settings, client, environment);
    if let Some(id) = options.launch_id {
        listener = listener.with_launch_id(LaunchId::new(id));
    }

    match replay(&mut listener, events) {
        Ok(count) => info!("Replayed {} events", count),
        Err(e) => {
            error!("Replay stopped: {}", e);
            exit(1);
        }
    }
}

fn init_logging(level: LevelFilter, output: &Option<PathBuf>) -> Result<(), fern::InitError> {
    let mut dispatcher = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}:{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record
                    .line()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "".to_owned()),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr());

    if let Some(log_file) = output {
        dispatcher = dispatcher.chain(fern::log_file(log_file)?)
    }
    dispatcher.apply()?;
    info!("Logging level {} enabled", level);
    Ok(())
}
