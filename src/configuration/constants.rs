pub mod cargo_env {
    pub const CARGO_PKG_NAME: &str = env!("CARGO_PKG_NAME");
}

pub mod env {
    /// Prefix of every environment variable read into [`Settings`](super::super::settings::Settings).
    pub const SETTINGS_PREFIX: &str = "RP";
    /// Set by the parallel executor in every worker process.
    pub const PARALLEL_RENDEZVOUS: &str = "PABOTLIBURI";
}

pub mod defaults {
    pub const LAUNCH_NAME: &str = "Robot Framework";
    pub const RETRY_WAIT: &str = "2s";
    pub const RETRY_ATTEMPTS: i64 = 3;
    pub const REQUEST_TIMEOUT: &str = "10s";
    pub const OUTPUT_DIR: &str = ".";
}
