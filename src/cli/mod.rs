//! Command-line interface for precommit-hook
//!
//! Wires the option table, the dispatcher, the default command and the
//! failure report together. [`run`] never exits the process; it returns the
//! exit code for `main` to use.

use std::ffi::OsString;

pub mod dispatch;
pub mod failure;
pub mod handler;
pub mod schema;

pub use dispatch::{Dispatcher, Invocation};
pub use handler::{Context, Outcome, OutcomeKind};
pub use schema::{GLOBAL_OPTIONS, GlobalOptions, OptionDescriptor};

use crate::output::Output;
use crate::{PKG_DESCRIPTION, PKG_NAME};

/// Exit code used when dispatch or the handler fails
pub const FAILURE_EXIT_CODE: u8 = 1;

/// The application's dispatcher: global flags plus the default command
pub fn dispatcher() -> Dispatcher {
    Dispatcher::new(PKG_NAME, PKG_DESCRIPTION, &GLOBAL_OPTIONS).with_default_command()
}

/// Parse `args`, run the default command and report any failure
pub async fn run<I, T>(args: I, context: &Context) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let dispatcher = dispatcher();
    let result = dispatcher
        .dispatch(args, |invocation| {
            handler::execute(invocation.options, &dispatcher, context)
        })
        .await;

    match result {
        Ok(outcome) => outcome.exit_code,
        Err(err) => {
            tracing::debug!(error = ?err, "invocation failed");
            let output = Output::new(context.sink.clone(), false, context.color);
            failure::report_async(&output, &err.to_string(), Some(&err)).await;
            FAILURE_EXIT_CODE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{Level, Sink};

    fn context() -> Context {
        Context {
            sink: Sink::memory(),
            color: false,
            shell: None,
        }
    }

    #[tokio::test]
    async fn test_run_greets() {
        let context = context();
        let code = run(["precommit-hook"], &context).await;
        assert_eq!(code, 0);
        assert_eq!(
            context.sink.contents().unwrap(),
            format!("ℹ info {}\n", handler::GREETING)
        );
    }

    #[tokio::test]
    async fn test_run_reports_too_many_commands() {
        let context = context();
        let code = run(["precommit-hook", "one", "two"], &context).await;
        assert_eq!(code, FAILURE_EXIT_CODE);
        let text = context.sink.contents().unwrap();
        assert!(text.contains(failure::FATAL_HEADER));
        assert!(text.contains("Message: \"At most one command can be used!\""));
    }

    #[tokio::test]
    async fn test_run_reports_unknown_command() {
        let context = context();
        let code = run(["precommit-hook", "install"], &context).await;
        assert_eq!(code, FAILURE_EXIT_CODE);
        assert!(
            context
                .sink
                .contents()
                .unwrap()
                .contains("Unknown command: install")
        );
    }

    #[tokio::test]
    async fn test_failure_report_ignores_verbose_flag() {
        let context = context();
        run(["precommit-hook", "--verbose", "a", "b"], &context).await;
        let contents = context.sink.contents().unwrap();
        assert!(!contents.contains(Level::Verbose.label()));
        let header = format!("{} {}\n", Level::Error.label(), failure::FATAL_HEADER);
        assert!(contents.starts_with(&header));
    }
}
