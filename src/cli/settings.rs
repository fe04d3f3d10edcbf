use crate::system::System;
use std::path::PathBuf;

/// Path of the runner file
pub const CONFIG_ENV: &str = "CMDRUNNER_CONFIG";

/// `1`, `true`, `yes` or `on` switches the default log level to debug
pub const VERBOSE_ENV: &str = "CMDRUNNER_VERBOSE";

pub const DEFAULT_CONFIG_PATH: &str = "cmdrunner.yaml";

/// Settings of the `cmdrunner` binary
///
/// The whole argument vector belongs to the dispatcher, so the binary's own
/// knobs come from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub config_path: PathBuf,
    pub verbose: bool,
}

impl Settings {
    /// Read settings from the environment
    #[must_use]
    pub fn from_system(system: &dyn System) -> Self {
        let config_path = system
            .env_var(CONFIG_ENV)
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);

        let verbose = system
            .env_var(VERBOSE_ENV)
            .is_ok_and(|value| is_truthy(&value));

        Self {
            config_path,
            verbose,
        }
    }

    /// Default log filter when `RUST_LOG` is not set
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
