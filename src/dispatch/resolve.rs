//! Turns invocations into an execution plan
//!
//! Every name on the line is validated before anything runs, so a typo at the
//! end of the line never leaves earlier commands half applied.

use super::tokenize::Invocation;
use crate::command::Command;
use crate::error::RunnerError;
use crate::registry::{Registry, is_help};
use std::fmt;
use tracing::debug;

/// One step of an execution plan
pub enum Step<'r> {
    /// Run a registered command with the given arguments
    Run {
        command: &'r dyn Command,
        args: Vec<String>,
    },
    /// Print the usage listing at this point of the sequence
    Usage,
}

impl Step<'_> {
    /// Name of the command this step runs, `help` for usage steps
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Run { command, .. } => command.name(),
            Self::Usage => crate::registry::HELP_COMMAND,
        }
    }
}

impl fmt::Debug for Step<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Run { command, args } => f
                .debug_struct("Run")
                .field("command", &command.name())
                .field("args", args)
                .finish(),
            Self::Usage => f.write_str("Usage"),
        }
    }
}

/// Resolve invocations against the registry
///
/// Groups expand in place to one step per member, each receiving the group's
/// own arguments. `help` becomes an inline usage step.
///
/// A group member that is not a registered command fails the whole line
/// instead of being skipped, so a group never runs only part of its members.
///
/// # Errors
///
/// Returns an error if:
/// - An invocation names neither a group, `help`, nor a command
/// - A group expands to a command that is not registered
pub fn resolve<'r>(
    invocations: &[Invocation],
    registry: &'r Registry,
) -> Result<Vec<Step<'r>>, RunnerError> {
    let mut plan = Vec::new();

    for invocation in invocations {
        if let Some(group) = registry.group(&invocation.name) {
            debug!("Expanding command group: {}", group.name);
            for member in &group.commands {
                let command =
                    registry
                        .command(member)
                        .ok_or_else(|| RunnerError::UnknownGroupMember {
                            group: group.name.clone(),
                            member: member.clone(),
                        })?;
                plan.push(Step::Run {
                    command,
                    args: invocation.args.clone(),
                });
            }
        } else if is_help(&invocation.name) {
            plan.push(Step::Usage);
        } else if let Some(command) = registry.command(&invocation.name) {
            plan.push(Step::Run {
                command,
                args: invocation.args.clone(),
            });
        } else {
            return Err(RunnerError::unknown_command(invocation.name.clone()));
        }
    }

    Ok(plan)
}
