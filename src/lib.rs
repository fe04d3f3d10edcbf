//! `cmdrunner` - run named management commands from the command line
//!
//! A host registers [`command::Command`]s and [`command::CommandGroupSpec`]s
//! once at startup, then hands the raw argument vector to a
//! [`dispatch::Dispatcher`]:
//!
//! ```sh
//! app --migrate --seed 100 --setup
//! ```
//!
//! Every `--name` starts a command and the words after it are its arguments.
//! Groups expand to their member commands, all receiving the group's
//! arguments. Commands run strictly in order and the first non-zero exit code
//! stops the line.
//!
//! The `cmdrunner` binary hosts the library over a YAML file of shell-backed
//! commands (see [`config::RunnerConfig`]).

pub mod cli;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod operations;
pub mod registry;
pub mod system;

use anyhow::{Context as _, Result};
use cli::Settings;
use command::CommandContext;
use config::RunnerConfig;
use dispatch::{DEFAULT_APPLICATION_NAME, DEFAULT_PROGRAM_NAME, Dispatcher};
use std::path::{Path, PathBuf};
use system::System;

/// Main entry point for the cmdrunner binary
///
/// Loads the runner file named by `settings`, registers its commands and
/// groups, and dispatches `args`. Returns the exit code of the dispatch.
pub fn run<S: AsRef<str>>(args: &[S], settings: &Settings, system: &dyn System) -> Result<i32> {
    let config = RunnerConfig::load_from_file(system, &settings.config_path)?;
    let base_dir = config_base_dir(system, &settings.config_path)?;

    config
        .validate(system, &base_dir)
        .context("Configuration validation failed")?;

    let registry = config.build_registry(&base_dir)?;

    let dispatcher = Dispatcher::new(&registry)
        .with_application_name(
            config
                .application
                .as_deref()
                .unwrap_or(DEFAULT_APPLICATION_NAME),
        )
        .with_program_name(config.program.as_deref().unwrap_or(DEFAULT_PROGRAM_NAME));

    let ctx = CommandContext::new(system).with_service(settings.clone());

    Ok(dispatcher.dispatch(args, &ctx))
}

/// Directory that relative working directories in the runner file resolve against
fn config_base_dir(system: &dyn System, config_path: &Path) -> Result<PathBuf> {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(parent.to_path_buf()),
        _ => system
            .current_dir()
            .context("Failed to determine the current directory"),
    }
}
