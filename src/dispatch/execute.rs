//! Runs a resolved plan in order, stopping at the first failure

use super::resolve::Step;
use super::usage::UsagePrinter;
use crate::command::{Command, CommandContext};
use crate::error::RunnerError;
use std::io::Write;
use tracing::{error, info, warn};

/// Execute every step of the plan in order
///
/// The first command whose effective exit code is non-zero stops the plan;
/// later steps never run.
///
/// # Errors
///
/// Returns an error if:
/// - A command returns a non-zero exit code (`CommandFailed`)
/// - A command returns an error (`CommandFault`), which is also written to `err`
/// - The cancellation token fired before a command started (`Cancelled`)
/// - An output stream cannot be written
pub fn execute(
    plan: &[Step<'_>],
    ctx: &CommandContext<'_>,
    usage: &UsagePrinter<'_>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), RunnerError> {
    for step in plan {
        match step {
            Step::Usage => {
                usage.write(out)?;
                writeln!(out)?;
            }
            Step::Run { command, args } => run_command(*command, args, ctx, err)?,
        }
    }

    Ok(())
}

fn run_command(
    command: &dyn Command,
    args: &[String],
    ctx: &CommandContext<'_>,
    err: &mut dyn Write,
) -> Result<(), RunnerError> {
    let name = command.name();

    if ctx.cancellation().is_cancelled() {
        warn!("Cancellation requested, not starting command {}", name);
        return Err(RunnerError::Cancelled {
            name: name.to_owned(),
        });
    }

    info!("=== Starting {} Command ===", name);

    match command.execute(ctx, args) {
        Ok(0) => {
            info!("=== {} Command Completed Successfully ===", name);
            Ok(())
        }
        Ok(code) => {
            warn!("=== {} Command Completed with Exit Code {} ===", name, code);
            Err(RunnerError::CommandFailed {
                name: name.to_owned(),
                code,
            })
        }
        Err(fault) => {
            error!("=== {} Command Failed ===: {:?}", name, fault);
            writeln!(err, "Error: {fault:#}")?;
            Err(RunnerError::CommandFault {
                name: name.to_owned(),
                message: format!("{fault:#}"),
            })
        }
    }
}
