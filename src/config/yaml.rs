//! YAML configuration loading and parsing

use crate::config::RunnerConfig;
use crate::error::RunnerError;
use crate::system::System;
use anyhow::{Context as _, Result};
use serde_json::Value;
use std::path::Path;

/// Load, schema-check and parse the runner file
///
/// The raw document is checked against the JSON schema before it is
/// deserialized, so misspelled keys are reported instead of ignored.
pub fn load_config(system: &dyn System, path: &Path) -> Result<RunnerConfig> {
    if !system.exists(path) {
        return Err(RunnerError::configuration(format!(
            "Configuration file not found: {}\n\
            Create a cmdrunner.yaml file or point CMDRUNNER_CONFIG at one",
            path.display()
        ))
        .into());
    }

    let content = system
        .read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

    parse_config(&content)
        .with_context(|| format!("Invalid configuration file: {}", path.display()))
}

/// Parse and schema-check runner file contents
pub fn parse_config(content: &str) -> Result<RunnerConfig> {
    let raw: Value = serde_yaml::from_str(content).map_err(|e| {
        if let Some(location) = e.location() {
            anyhow::anyhow!(
                "Failed to parse YAML at line {}, column {}: {}",
                location.line(),
                location.column(),
                e
            )
        } else {
            anyhow::anyhow!("Failed to parse YAML: {}", e)
        }
    })?;

    // An empty document parses as null
    let raw = if raw.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        raw
    };

    crate::config::schema::validate_against_schema(&raw)?;

    serde_json::from_value(raw).context("Failed to read configuration structure")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::MockSystem;

    #[test]
    fn parses_commands_and_groups() {
        let config = parse_config(
            r#"
application: Acme
commands:
  - name: migrate
    description: Run migrations
    run: ./migrate.sh
  - name: seed
    run: ./seed.sh
    cwd: db
groups:
  - name: setup
    commands: [migrate, seed]
    priority: 5
"#,
        )
        .unwrap();

        assert_eq!(config.application.as_deref(), Some("Acme"));
        assert_eq!(config.commands.len(), 2);
        assert_eq!(config.commands[1].cwd.as_deref(), Some("db"));
        assert_eq!(config.commands[1].description, "");
        assert_eq!(config.groups[0].priority, 5);
    }

    #[test]
    fn reports_yaml_syntax_errors_with_location() {
        let err = parse_config("commands: [\n").unwrap_err();
        assert!(err.to_string().contains("Failed to parse YAML"));
    }

    #[test]
    fn misspelled_keys_fail_schema_validation() {
        let err = parse_config(
            r#"
commands:
  - name: migrate
    runn: ./migrate.sh
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Configuration validation failed"));
    }

    #[test]
    fn missing_file_is_a_configuration_error() {
        let system = MockSystem::new();
        let err = load_config(&system, Path::new("/nope/cmdrunner.yaml")).unwrap_err();

        let runner_error = err.downcast_ref::<RunnerError>().unwrap();
        assert!(matches!(runner_error, RunnerError::Configuration { .. }));
        assert!(err.to_string().contains("Configuration file not found"));
    }

    #[test]
    fn loads_through_the_system() {
        let system = MockSystem::new()
            .with_file(
                "/app/cmdrunner.yaml",
                b"commands:\n  - name: migrate\n    run: 'true'\n",
            )
            .unwrap();

        let config = load_config(&system, Path::new("/app/cmdrunner.yaml")).unwrap();
        assert_eq!(config.commands[0].name, "migrate");
    }
}
