use std::process::ExitCode;

use precommit_hook::cli::{self, Context, failure};
use precommit_hook::{Output, Settings, Sink};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(err) => {
            let output = Output::new(Sink::Stdout, false, console::colors_enabled());
            failure::report_async(&output, &format!("{err:#}"), Some(&err)).await;
            return ExitCode::from(cli::FAILURE_EXIT_CODE);
        }
    };

    let context = Context {
        sink: Sink::Stdout,
        color: settings.color.enabled(),
        shell: None,
    };

    ExitCode::from(cli::run(std::env::args_os(), &context).await)
}
