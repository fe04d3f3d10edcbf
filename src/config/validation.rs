//! Configuration validation logic

use crate::config::{CommandConfig, RunnerConfig};
use crate::registry::{NAME_PATTERN, is_help, normalize_name};
use crate::system::System;
use anyhow::{Result, anyhow};
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;

/// Validate a complete configuration
///
/// # Errors
///
/// Returns an error if:
/// - The configuration declares no command
/// - A command or group name is invalid, reserved or declared twice
/// - A command has an empty command line or a missing working directory
/// - A group is empty or references a command that is not declared
#[inline]
pub fn validate_config(system: &dyn System, config: &RunnerConfig, base_dir: &Path) -> Result<()> {
    if config.commands.is_empty() {
        return Err(anyhow!(
            "Configuration must declare at least one command"
        ));
    }

    let mut names = HashSet::new();

    for (index, command) in config.commands.iter().enumerate() {
        validate_command_config(system, command, index, base_dir)?;
        if !names.insert(normalize_name(&command.name)) {
            return Err(anyhow!(
                "Command #{}: name '{}' is declared more than once",
                index + 1,
                command.name
            ));
        }
    }

    let command_names = names.clone();

    for (index, group) in config.groups.iter().enumerate() {
        let context = format!("Group #{} ({})", index + 1, group.name);

        validate_name(&group.name).map_err(|e| anyhow!("{context}: {e}"))?;

        if !names.insert(normalize_name(&group.name)) {
            return Err(anyhow!(
                "{context}: name is already used by another command or group"
            ));
        }

        if group.commands.is_empty() {
            return Err(anyhow!("{context}: must list at least one command"));
        }

        for member in &group.commands {
            if !command_names.contains(&normalize_name(member)) {
                return Err(anyhow!(
                    "{context}: references unknown command '{member}'"
                ));
            }
        }
    }

    Ok(())
}

/// Validate a single command declaration
fn validate_command_config(
    system: &dyn System,
    command: &CommandConfig,
    index: usize,
    base_dir: &Path,
) -> Result<()> {
    let context = format!("Command #{}", index + 1);

    validate_name(&command.name).map_err(|e| anyhow!("{context}: {e}"))?;

    if command.run.trim().is_empty() {
        return Err(anyhow!(
            "{}: command line for '{}' cannot be empty",
            context,
            command.name
        ));
    }

    if let Some(cwd) = command.cwd.as_ref() {
        let dir = base_dir.join(cwd);
        if !system.is_dir(&dir) {
            return Err(anyhow!(
                "{}: working directory does not exist: {}",
                context,
                dir.display()
            ));
        }
    }

    Ok(())
}

/// Validate a command or group name
pub fn validate_name(name: &str) -> Result<()> {
    let name_regex = Regex::new(NAME_PATTERN)?;

    if !name_regex.is_match(name) {
        return Err(anyhow!(
            "Invalid name '{name}': names must be non-empty, contain no whitespace and not start with '-'"
        ));
    }

    if is_help(name) {
        return Err(anyhow!("The name '{name}' is reserved"));
    }

    Ok(())
}
