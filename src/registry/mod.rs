//! Command and group registry
//!
//! Built once at startup through [`RegistryBuilder`], then handed by reference
//! to the dispatcher. Names are matched case-insensitively.

use crate::command::{Command, CommandGroupSpec};
use crate::error::RunnerError;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

/// Name reserved for the usage listing
pub const HELP_COMMAND: &str = "help";

/// Non-empty, no whitespace, must not start with a dash
pub(crate) const NAME_PATTERN: &str = r"^[^\s-]\S*$";

/// Normalize a command or group name for lookup
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
}

/// Whether `name` is the reserved help command (any case)
#[must_use]
pub fn is_help(name: &str) -> bool {
    name.eq_ignore_ascii_case(HELP_COMMAND)
}

/// Immutable set of registered commands and groups
#[derive(Default)]
pub struct Registry {
    commands: HashMap<String, Box<dyn Command>>,
    groups: HashMap<String, CommandGroupSpec>,
}

impl Registry {
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Look up a command by name (case-insensitive)
    #[must_use]
    pub fn command(&self, name: &str) -> Option<&dyn Command> {
        self.commands
            .get(&normalize_name(name))
            .map(|command| &**command)
    }

    /// Look up a group by name (case-insensitive)
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&CommandGroupSpec> {
        self.groups.get(&normalize_name(name))
    }

    /// All commands ordered by name, ignoring case
    #[must_use]
    pub fn commands(&self) -> Vec<&dyn Command> {
        let mut entries: Vec<(&String, &dyn Command)> = self
            .commands
            .iter()
            .map(|(key, command)| (key, &**command))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter().map(|(_, command)| command).collect()
    }

    /// All groups ordered by priority, then by name ignoring case
    #[must_use]
    pub fn groups(&self) -> Vec<&CommandGroupSpec> {
        let mut entries: Vec<(&String, &CommandGroupSpec)> = self.groups.iter().collect();
        entries.sort_by(|a, b| a.1.priority.cmp(&b.1.priority).then_with(|| a.0.cmp(b.0)));
        entries.into_iter().map(|(_, group)| group).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.groups.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut commands: Vec<&String> = self.commands.keys().collect();
        commands.sort();
        f.debug_struct("Registry")
            .field("commands", &commands)
            .field("groups", &self.groups())
            .finish()
    }
}

/// Collects commands and groups, rejecting invalid or conflicting names
#[derive(Default)]
pub struct RegistryBuilder {
    commands: HashMap<String, Box<dyn Command>>,
    groups: HashMap<String, CommandGroupSpec>,
}

impl RegistryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command
    ///
    /// # Errors
    ///
    /// Returns a registration error if:
    /// - The name is empty, contains whitespace, starts with `-`, or is `help`
    /// - A command or group with the same name (ignoring case) already exists
    pub fn command<C: Command + 'static>(self, command: C) -> Result<Self, RunnerError> {
        self.boxed_command(Box::new(command))
    }

    /// Register an already boxed command
    ///
    /// # Errors
    ///
    /// Same conditions as [`RegistryBuilder::command`]
    pub fn boxed_command(mut self, command: Box<dyn Command>) -> Result<Self, RunnerError> {
        let key = self.check_name("command", command.name())?;
        debug!("Registered command: {}", command.name());
        self.commands.insert(key, command);
        Ok(self)
    }

    /// Register a command group
    ///
    /// Members are not checked here; they are resolved at dispatch time.
    ///
    /// # Errors
    ///
    /// Same conditions as [`RegistryBuilder::command`]
    pub fn group(mut self, group: CommandGroupSpec) -> Result<Self, RunnerError> {
        let key = self.check_name("group", &group.name)?;
        debug!("Registered command group: {}", group.name);
        self.groups.insert(key, group);
        Ok(self)
    }

    /// Freeze the registry
    #[must_use]
    pub fn build(self) -> Registry {
        for group in self.groups.values() {
            for member in &group.commands {
                if !self.commands.contains_key(&normalize_name(member)) {
                    warn!(
                        "Command group {} references unregistered command {}",
                        group.name, member
                    );
                }
            }
        }

        Registry {
            commands: self.commands,
            groups: self.groups,
        }
    }

    fn check_name(&self, kind: &str, name: &str) -> Result<String, RunnerError> {
        let pattern = Regex::new(NAME_PATTERN)
            .map_err(|e| RunnerError::registration(format!("Invalid name pattern: {e}")))?;

        if !pattern.is_match(name) {
            return Err(RunnerError::registration(format!(
                "Invalid {kind} name '{name}': names must be non-empty, contain no whitespace and not start with '-'"
            )));
        }

        if is_help(name) {
            return Err(RunnerError::registration(format!(
                "The {kind} name '{name}' is reserved"
            )));
        }

        let key = normalize_name(name);
        if self.commands.contains_key(&key) {
            return Err(RunnerError::registration(format!(
                "Cannot register {kind} '{name}': a command with that name already exists"
            )));
        }
        if self.groups.contains_key(&key) {
            return Err(RunnerError::registration(format!(
                "Cannot register {kind} '{name}': a command group with that name already exists"
            )));
        }

        Ok(key)
    }
}
