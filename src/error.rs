//! Error types for argument dispatch
//!
//! Dispatch failures are typed so callers (and tests) can tell a missing
//! command from a clap parse error. Everything past dispatch propagates as
//! `anyhow::Error`.

use thiserror::Error;

/// Failures raised while turning raw arguments into a validated invocation
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No command was supplied and no default command is registered
    #[error("A command is required!")]
    CommandRequired,

    /// More than one command word was supplied
    #[error("At most one command can be used!")]
    TooManyCommands,

    /// A command word matched no registered command
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// clap rejected the arguments (bad value for an option, env var not boolish, ...)
    #[error("{}", render_clap_error(.0))]
    Parse(#[from] clap::Error),
}

/// First line of a clap error without the `error: ` prefix and usage footer
fn render_clap_error(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}
