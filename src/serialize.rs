// ABOUTME: Renders a migration configuration into the executor's argument vector
// ABOUTME: Deterministic: flag codes and ordering come from the flag schema

use crate::config::MigrationConfiguration;
use crate::locator::ExecutorArtifact;
use crate::schema::{FlagValue, FLAG_SCHEMA};

/// Tells the launcher that the next argument is the artifact to run.
pub const ARTIFACT_MARKER: &str = "-jar";

/// Index of the access token in the rendered arguments.
pub const TOKEN_POSITION: usize = 4;

/// Build the argument vector for the executor.
///
/// Layout: `-jar <artifact> <url> <plan> <token>`, followed by each schema
/// flag in schema order. Boolean flags contribute their code only when
/// true; integer flags always contribute `<code> <value>`.
pub fn executor_args(artifact: &ExecutorArtifact, config: &MigrationConfiguration) -> Vec<String> {
    let mut args = vec![
        ARTIFACT_MARKER.to_string(),
        artifact.as_str().to_string(),
        config.url().to_string(),
        config.plan().as_str().to_string(),
        config.token().to_string(),
    ];

    for spec in FLAG_SCHEMA.iter() {
        match config.flag(spec.id) {
            FlagValue::Bool(true) => args.push(spec.code.to_string()),
            FlagValue::Bool(false) => {}
            FlagValue::Int(value) => {
                args.push(spec.code.to_string());
                args.push(value.to_string());
            }
        }
    }

    args
}

/// Single-line rendering of the command for logs, with the token masked.
/// Not shell-escaped; the process itself receives the discrete arguments.
pub fn display_command(program: &str, args: &[String], config: &MigrationConfiguration) -> String {
    let masked = config.masked_token();
    let mut line = String::from(program);
    for (idx, arg) in args.iter().enumerate() {
        line.push(' ');
        if idx == TOKEN_POSITION {
            line.push_str(&masked);
        } else {
            line.push_str(arg);
        }
    }
    line
}
