//! Configuration management module
//!
//! Handles the YAML runner file: parsing, JSON schema validation, semantic
//! validation, and turning the declared commands and groups into a registry.

pub mod schema;
pub mod validation;
pub mod yaml;

use crate::command::CommandGroupSpec;
use crate::error::RunnerError;
use crate::operations::shell::ShellCommand;
use crate::registry::Registry;
use crate::system::System;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Runner file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Name shown in the usage header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application: Option<String>,

    /// Program name shown in usage lines
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,

    /// Shell-backed commands
    #[serde(default)]
    pub commands: Vec<CommandConfig>,

    /// Command groups over the declared commands
    #[serde(default)]
    pub groups: Vec<CommandGroupSpec>,
}

/// A command that runs a shell command line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandConfig {
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Command line handed to the platform shell
    pub run: String,

    /// Working directory, relative to the runner file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,
}

impl RunnerConfig {
    /// Load configuration from file
    pub fn load_from_file(system: &dyn System, path: &Path) -> anyhow::Result<Self> {
        yaml::load_config(system, path)
    }

    /// Validate the configuration; relative `cwd` values are checked against `base_dir`
    pub fn validate(&self, system: &dyn System, base_dir: &Path) -> anyhow::Result<()> {
        validation::validate_config(system, self, base_dir)
    }

    /// Register every declared command and group
    ///
    /// # Errors
    ///
    /// Returns a registration error for duplicate or colliding names
    pub fn build_registry(&self, base_dir: &Path) -> Result<Registry, RunnerError> {
        let mut builder = Registry::builder();

        for command in &self.commands {
            let working_dir = command.cwd.as_ref().map(|cwd| base_dir.join(cwd));
            builder = builder.command(ShellCommand::new(
                &command.name,
                &command.description,
                &command.run,
                working_dir,
            ))?;
        }

        for group in &self.groups {
            builder = builder.group(group.clone())?;
        }

        Ok(builder.build())
    }
}
