use crate::app::error::ConfigError;
use crate::configuration::constants::{defaults, env::SETTINGS_PREFIX};
use config::{Config, Environment, File};
use serde_derive::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Everything the listener needs to know about the reporting service and the run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub project: String,
    /// API token of the reporting user.
    #[serde(default)]
    pub uuid: String,
    pub launch_name: String,
    #[serde(default)]
    pub launch_doc: String,
    #[serde(with = "crate::configuration::deserialize::duration")]
    pub retry_wait: Duration,
    pub retry_attempts: u32,
    #[serde(with = "crate::configuration::deserialize::duration")]
    pub timeout: Duration,
    pub output_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            project: String::new(),
            uuid: String::new(),
            launch_name: defaults::LAUNCH_NAME.to_owned(),
            launch_doc: String::new(),
            retry_wait: Duration::from_secs(2),
            retry_attempts: defaults::RETRY_ATTEMPTS as u32,
            timeout: Duration::from_secs(10),
            output_dir: PathBuf::from(defaults::OUTPUT_DIR),
        }
    }
}

impl Settings {
    /// Reads the optional settings file, then `RP_*` environment variables on top of it.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_from(file, Environment::with_prefix(SETTINGS_PREFIX))
    }

    fn load_from(file: Option<&Path>, environment: Environment) -> Result<Self, ConfigError> {
        let mut config = Config::new();
        config
            .set_default("launch_name", defaults::LAUNCH_NAME)?
            .set_default("retry_wait", defaults::RETRY_WAIT)?
            .set_default("retry_attempts", defaults::RETRY_ATTEMPTS)?
            .set_default("timeout", defaults::REQUEST_TIMEOUT)?
            .set_default("output_dir", defaults::OUTPUT_DIR)?;
        if let Some(path) = file {
            debug!("Loading settings from {}", path.display());
            config.merge(File::from(path))?;
        }
        config.merge(environment)?;
        let settings: Settings = config.try_into()?;
        Ok(settings)
    }

    /// Fails on the first connection setting that is left empty.
    pub fn check(&self) -> Result<(), ConfigError> {
        let required = [
            ("RP_ENDPOINT", &self.endpoint),
            ("RP_PROJECT", &self.project),
            ("RP_UUID", &self.uuid),
        ];
        for &(name, value) in required.iter() {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingSetting(name));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    fn isolated_env() -> Environment {
        Environment::with_prefix("RP_LISTENER_TEST_UNSET")
    }

    #[test]
    fn test_defaults_without_sources() {
        let settings = Settings::load_from(None, isolated_env()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_loading_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
endpoint = "http://rp.local:8080"
project = "demo"
uuid = "secret"
launch_doc = "nightly"
retry_wait = "250ms"
retry_attempts = 5
"#
        )
        .unwrap();

        let settings = Settings::load_from(Some(file.path()), isolated_env()).unwrap();
        assert_eq!(settings.endpoint, "http://rp.local:8080");
        assert_eq!(settings.project, "demo");
        assert_eq!(settings.launch_doc, "nightly");
        assert_eq!(settings.launch_name, defaults::LAUNCH_NAME);
        assert_eq!(settings.retry_wait, Duration::from_millis(250));
        assert_eq!(settings.retry_attempts, 5);
        assert!(settings.check().is_ok());
    }

    #[test]
    fn test_check_names_missing_setting() {
        let settings = Settings {
            endpoint: "http://rp.local".to_owned(),
            project: "demo".to_owned(),
            ..Settings::default()
        };
        match settings.check() {
            Err(ConfigError::MissingSetting(name)) => assert_eq!(name, "RP_UUID"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
