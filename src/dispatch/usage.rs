//! Usage listing

use crate::registry::Registry;
use std::io::{self, Write};
use tracing::debug;

const HEADER_SEPARATOR: &str = "==========================================================";
const HEADER_TITLE: &str = "Management Commands";

/// Writes the help text for a registry
///
/// Output depends only on the registry and the two names; the examples
/// section is fixed text.
#[derive(Debug, Clone, Copy)]
pub struct UsagePrinter<'a> {
    registry: &'a Registry,
    application: &'a str,
    program: &'a str,
}

impl<'a> UsagePrinter<'a> {
    #[must_use]
    pub const fn new(registry: &'a Registry, application: &'a str, program: &'a str) -> Self {
        Self {
            registry,
            application,
            program,
        }
    }

    /// Write the full listing
    ///
    /// # Errors
    ///
    /// Returns an error if the output stream cannot be written
    pub fn write(&self, out: &mut dyn Write) -> io::Result<()> {
        let program = self.program;

        writeln!(out, "{HEADER_SEPARATOR}")?;
        writeln!(out, "           {} - {HEADER_TITLE}", self.application)?;
        writeln!(out, "{HEADER_SEPARATOR}")?;
        writeln!(out)?;
        writeln!(out, "Usage: {program} --<command> [arguments]")?;
        writeln!(out, "           {program} --command1 [args] --command2 [args] ...")?;
        writeln!(out)?;
        writeln!(out, "Available Commands:")?;
        writeln!(out, "-------------------")?;

        for command in self.registry.commands() {
            writeln!(out, "  --{:<15} {}", command.name(), command.description())?;
        }

        let groups = self.registry.groups();
        if !groups.is_empty() {
            writeln!(out)?;
            writeln!(out, "Command Groups:")?;
            writeln!(out, "---------------")?;
            for group in groups {
                writeln!(
                    out,
                    "  --{:<15} {} (expands to: {})",
                    group.name,
                    group.description,
                    group.commands.join(", ")
                )?;
            }
        }

        writeln!(out)?;
        writeln!(out, "Examples:")?;
        writeln!(out, "---------")?;
        writeln!(out, "  {program} --help                    # Show this help message")?;
        writeln!(out, "  {program} --migrate                 # Run database migrations")?;
        writeln!(out, "  {program} --migrate --seed          # Run migrations then seed")?;
        writeln!(out, "  {program} --setup                   # Run setup group (if defined)")?;
        writeln!(out)?;
        writeln!(out, "{HEADER_SEPARATOR}")?;

        Ok(())
    }

    /// Render the listing into a string
    #[must_use]
    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        if let Err(e) = self.write(&mut buffer) {
            debug!("Failed to render usage: {}", e);
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandGroupSpec, FnCommand};

    #[test]
    fn lists_commands_and_groups() {
        let registry = Registry::builder()
            .command(FnCommand::new("seed", "Seed the database", |_, _| Ok(0)))
            .unwrap()
            .command(FnCommand::new("migrate", "Run migrations", |_, _| Ok(0)))
            .unwrap()
            .group(CommandGroupSpec::new(
                "setup",
                "Prepare a fresh database",
                ["migrate", "seed"],
            ))
            .unwrap()
            .build();

        let text = UsagePrinter::new(&registry, "Acme", "acme").render();

        assert!(text.contains("Acme - Management Commands"));
        assert!(text.contains("  --migrate         Run migrations\n"));
        assert!(
            text.contains("  --setup           Prepare a fresh database (expands to: migrate, seed)")
        );
        assert!(text.find("--migrate ").unwrap() < text.find("--seed ").unwrap());
        assert!(text.contains("  acme --help"));
    }

    #[test]
    fn group_section_is_omitted_without_groups() {
        let registry = Registry::builder()
            .command(FnCommand::new("migrate", "Run migrations", |_, _| Ok(0)))
            .unwrap()
            .build();

        let text = UsagePrinter::new(&registry, "Application", "cmdrunner").render();

        assert!(!text.contains("Command Groups:"));
        assert!(text.contains("Examples:"));
    }

    #[test]
    fn empty_registry_still_prints_the_frame() {
        let registry = Registry::default();
        let text = UsagePrinter::new(&registry, "Application", "cmdrunner").render();

        assert!(text.starts_with(HEADER_SEPARATOR));
        assert!(text.contains("Available Commands:"));
        assert!(text.trim_end().ends_with(HEADER_SEPARATOR));
    }

    #[test]
    fn render_matches_what_write_produces() {
        let registry = Registry::builder()
            .command(FnCommand::new("seed", "Seed data", |_, _| Ok(0)))
            .unwrap()
            .build();
        let printer = UsagePrinter::new(&registry, "Acme", "acme");

        let mut written = Vec::new();
        printer.write(&mut written).unwrap();

        assert_eq!(printer.render(), String::from_utf8(written).unwrap());
    }
}
