//! Command dispatcher
//!
//! Parses `--name [arg]*` sequences, expands command groups, validates every
//! name and runs the resolved commands strictly in order:
//!
//! ```text
//! no invocations            -> usage, exit 1
//! a single `help`           -> usage, exit 0
//! unknown name anywhere     -> error + usage, exit 1, nothing runs
//! all known                 -> run in order, stop at the first non-zero code
//! ```

pub mod execute;
pub mod resolve;
pub mod tokenize;
pub mod usage;

pub use resolve::{Step, resolve};
pub use tokenize::{Invocation, has_command, tokenize};
pub use usage::UsagePrinter;

use crate::command::CommandContext;
use crate::error::RunnerError;
use crate::registry::{Registry, is_help};
use std::io::{self, Write};
use tracing::{debug, error};

/// Header name used when the host does not set one
pub const DEFAULT_APPLICATION_NAME: &str = "Application";

/// Program name used in usage lines when the host does not set one
pub const DEFAULT_PROGRAM_NAME: &str = "cmdrunner";

/// Runs command lines against a registry
#[derive(Debug, Clone)]
pub struct Dispatcher<'r> {
    registry: &'r Registry,
    application_name: String,
    program_name: String,
}

impl<'r> Dispatcher<'r> {
    #[must_use]
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            application_name: DEFAULT_APPLICATION_NAME.to_owned(),
            program_name: DEFAULT_PROGRAM_NAME.to_owned(),
        }
    }

    /// Name shown in the usage header (builder pattern)
    #[must_use]
    pub fn with_application_name<S: Into<String>>(mut self, name: S) -> Self {
        self.application_name = name.into();
        self
    }

    /// Program name shown in usage lines (builder pattern)
    #[must_use]
    pub fn with_program_name<S: Into<String>>(mut self, name: S) -> Self {
        self.program_name = name.into();
        self
    }

    #[must_use]
    pub const fn registry(&self) -> &'r Registry {
        self.registry
    }

    #[must_use]
    pub fn usage(&self) -> UsagePrinter<'_> {
        UsagePrinter::new(self.registry, &self.application_name, &self.program_name)
    }

    /// Dispatch against stdout/stderr and return the process exit code
    pub fn dispatch<S: AsRef<str>>(&self, args: &[S], ctx: &CommandContext<'_>) -> i32 {
        let mut out = io::stdout();
        let mut err = io::stderr();

        match self.dispatch_with(args, ctx, &mut out, &mut err) {
            Ok(()) => 0,
            Err(e) => {
                debug!("Dispatch finished with error: {}", e);
                e.exit_code()
            }
        }
    }

    /// Dispatch only when the first argument is a command flag
    ///
    /// Returns `None` when the host should continue its normal startup.
    pub fn dispatch_if_present<S: AsRef<str>>(
        &self,
        args: &[S],
        ctx: &CommandContext<'_>,
    ) -> Option<i32> {
        has_command(args).then(|| self.dispatch(args, ctx))
    }

    /// Dispatch with explicit output streams
    ///
    /// Usage text goes to `out`; unknown-command and fault messages go to `err`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No invocation could be parsed (`Usage`)
    /// - A name is unknown or a group member is unregistered; nothing runs
    /// - A command fails, faults, or is cancelled (see [`execute::execute`])
    /// - An output stream cannot be written
    pub fn dispatch_with<S: AsRef<str>>(
        &self,
        args: &[S],
        ctx: &CommandContext<'_>,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<(), RunnerError> {
        let usage = self.usage();
        let invocations = tokenize(args);

        if invocations.is_empty() {
            usage.write(out)?;
            return Err(RunnerError::Usage);
        }

        if let [only] = invocations.as_slice()
            && is_help(&only.name)
        {
            usage.write(out)?;
            return Ok(());
        }

        let plan = match resolve(&invocations, self.registry) {
            Ok(plan) => plan,
            Err(e) => {
                error!("{}", e);
                writeln!(err, "{e}")?;
                writeln!(err)?;
                usage.write(out)?;
                return Err(e);
            }
        };

        debug!("Resolved plan: {:?}", plan);
        execute::execute(&plan, ctx, &usage, out, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::FnCommand;
    use crate::system::MockSystem;

    fn dispatch(registry: &Registry, args: &[&str]) -> (i32, String, String) {
        let system = MockSystem::new();
        let ctx = CommandContext::new(&system);
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = Dispatcher::new(registry)
            .dispatch_with(args, &ctx, &mut out, &mut err)
            .map_or_else(|e| e.exit_code(), |()| 0);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn bare_words_only_behave_like_empty_input() {
        let registry = Registry::builder()
            .command(FnCommand::new("migrate", "Run migrations", |_, _| Ok(0)))
            .unwrap()
            .build();

        let (code, out, _) = dispatch(&registry, &["migrate"]);
        assert_eq!(code, 1);
        assert!(out.contains("Available Commands:"));
    }

    #[test]
    fn unknown_command_message_goes_to_the_error_stream() {
        let registry = Registry::default();

        let (code, out, err) = dispatch(&registry, &["--nope"]);
        assert_eq!(code, 1);
        assert!(err.starts_with("Unknown command: nope\n\n"));
        assert!(out.contains("Management Commands"));
    }

    #[test]
    fn usage_uses_configured_names() {
        let registry = Registry::default();
        let dispatcher = Dispatcher::new(&registry)
            .with_application_name("Acme")
            .with_program_name("acme");

        let text = dispatcher.usage().render();
        assert!(text.contains("Acme - Management Commands"));
        assert!(text.contains("Usage: acme --<command>"));
    }
}
