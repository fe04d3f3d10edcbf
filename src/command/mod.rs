//! Command abstractions
//!
//! A [`Command`] is a named unit of executable behavior; a
//! [`CommandGroupSpec`] is a named alias that expands to an ordered list of
//! command names at dispatch time.

pub mod context;
pub mod group;

pub use context::{CancellationToken, CommandContext};
pub use group::{CommandGroupSpec, DEFAULT_GROUP_PRIORITY};

use std::fmt;

/// Result of running a command: `Ok(code)` is the exit code the command
/// reports (0 = success), `Err` is a fault.
pub type CommandResult = anyhow::Result<i32>;

/// A management command that can be invoked as `--<name> [args]`
pub trait Command: Send + Sync {
    /// Name used on the command line (matched case-insensitively)
    fn name(&self) -> &str;

    /// One-line description shown in the usage listing
    fn description(&self) -> &str;

    /// Run the command with its own argument slice
    ///
    /// Long-running commands should poll `ctx.cancellation()` and stop early
    /// once it fires.
    fn execute(&self, ctx: &CommandContext<'_>, args: &[String]) -> CommandResult;
}

type Handler = dyn Fn(&CommandContext<'_>, &[String]) -> CommandResult + Send + Sync;

/// Command backed by a closure
///
/// # Example
/// ```
/// use cmdrunner::command::{Command, CommandContext, FnCommand};
/// use cmdrunner::system::MockSystem;
///
/// let greet = FnCommand::new("greet", "Say hello", |_ctx, args| {
///     println!("hello {}", args.join(" "));
///     Ok(0)
/// });
///
/// let system = MockSystem::new();
/// let ctx = CommandContext::new(&system);
/// assert_eq!(greet.execute(&ctx, &["world".to_owned()]).unwrap(), 0);
/// ```
pub struct FnCommand {
    name: String,
    description: String,
    handler: Box<Handler>,
}

impl FnCommand {
    /// Create a command from a name, a description and a handler
    pub fn new<N, D, F>(name: N, description: D, handler: F) -> Self
    where
        N: Into<String>,
        D: Into<String>,
        F: Fn(&CommandContext<'_>, &[String]) -> CommandResult + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            handler: Box::new(handler),
        }
    }
}

impl Command for FnCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn execute(&self, ctx: &CommandContext<'_>, args: &[String]) -> CommandResult {
        (self.handler)(ctx, args)
    }
}

impl fmt::Debug for FnCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCommand")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
