//! Commands backed by a shell command line

use crate::command::{Command, CommandContext, CommandResult};
use crate::error::RunnerError;
use anyhow::Context as _;
use std::path::PathBuf;
use std::process::Command as Process;
use tracing::debug;

/// Runs a configured command line through the platform shell
///
/// Invocation arguments become positional parameters (`$1`, `$@`) on Unix and
/// follow the command line as separate arguments of `cmd /C` on Windows. The
/// exit status of the shell is the command's exit code.
#[derive(Debug, Clone)]
pub struct ShellCommand {
    name: String,
    description: String,
    script: String,
    working_dir: Option<PathBuf>,
}

impl ShellCommand {
    pub fn new<N, D, S>(name: N, description: D, script: S, working_dir: Option<PathBuf>) -> Self
    where
        N: Into<String>,
        D: Into<String>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            description: description.into(),
            script: script.into(),
            working_dir,
        }
    }

    #[must_use]
    pub fn script(&self) -> &str {
        &self.script
    }
}

impl Command for ShellCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn execute(&self, ctx: &CommandContext<'_>, args: &[String]) -> CommandResult {
        let (shell, shell_args) = shell_invocation(&self.name, &self.script, args);

        let mut process = Process::new(&shell);
        process.args(&shell_args);

        if let Some(dir) = self.working_dir.as_ref() {
            if !ctx.system().is_dir(dir) {
                return Err(RunnerError::configuration(format!(
                    "Working directory does not exist: {}",
                    dir.display()
                ))
                .into());
            }
            process.current_dir(dir);
        }

        debug!("Running {}: {} {:?}", self.name, shell, shell_args);

        let status = process
            .status()
            .with_context(|| format!("Failed to execute {}: {}", self.name, self.script))?;

        // Terminated by a signal
        Ok(status.code().unwrap_or(1))
    }
}

/// Shell program and its arguments for the current platform
fn shell_invocation(name: &str, script: &str, args: &[String]) -> (String, Vec<String>) {
    if cfg!(target_os = "windows") {
        let mut shell_args = vec!["/C".to_owned(), script.to_owned()];
        shell_args.extend(args.iter().cloned());
        return ("cmd".to_owned(), shell_args);
    } else {
        let mut shell_args = vec!["-c".to_owned(), script.to_owned(), name.to_owned()];
        shell_args.extend(args.iter().cloned());
        return ("sh".to_owned(), shell_args);
    }
}
