//! Default command
//!
//! Computes the response for an invocation and writes it; exiting the
//! process is left to the caller, which reads the returned [`Outcome`].

use anyhow::Result;
use clap_complete::Shell;

use super::dispatch::Dispatcher;
use super::schema::GlobalOptions;
use crate::output::{Output, Sink};
use crate::{COPYRIGHT, PKG_NAME, VERSION};

pub const GREETING: &str = "Hello from precommit-hook!";
pub const VERBOSE_GREETING: &str = "Verbose output enabled, hello again!";

/// What the default command produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Help,
    Version,
    Completion,
    Greeting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub kind: OutcomeKind,
    pub exit_code: u8,
}

impl Outcome {
    pub fn success(kind: OutcomeKind) -> Self {
        Self { kind, exit_code: 0 }
    }
}

/// Output context shared by every invocation of the handler
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub sink: Sink,
    pub color: bool,
    /// Shell to generate completions for; detected from `$SHELL` when unset
    pub shell: Option<Shell>,
}

/// Execute the default command
pub async fn execute(
    options: GlobalOptions,
    dispatcher: &Dispatcher,
    context: &Context,
) -> Result<Outcome> {
    let output = Output::new(context.sink.clone(), options.verbose, context.color);

    if options.help {
        output.raw(&dispatcher.render_help(context.color)).await;
        return Ok(Outcome::success(OutcomeKind::Help));
    }

    if options.version {
        output.raw(&format!("{PKG_NAME} {VERSION}")).await;
        output.raw(COPYRIGHT).await;
        return Ok(Outcome::success(OutcomeKind::Version));
    }

    if options.completion_script {
        let shell = context
            .shell
            .or_else(Shell::from_env)
            .unwrap_or(Shell::Bash);
        tracing::debug!(%shell, "generating completion script");
        output.raw(&dispatcher.completion_script(shell)?).await;
        return Ok(Outcome::success(OutcomeKind::Completion));
    }

    crate::emit_async!(output, crate::output::Level::Info, GREETING).await;
    crate::emit_async!(output, crate::output::Level::Verbose, VERBOSE_GREETING).await;
    Ok(Outcome::success(OutcomeKind::Greeting))
}
