//! Failure reporting
//!
//! Turns a dispatch or handler failure into a fixed diagnostic block. The
//! block is written through the regular [`Output`], so it lands on stdout
//! like every other line. Nothing here exits or panics.

use std::backtrace::{Backtrace, BacktraceStatus};

use crate::output::{Level, Output};

pub const FATAL_HEADER: &str = "Fatal error while running script!";
pub const NO_STACK_TRACE: &str = "No stack trace available.";

fn lines(message: &str, backtrace: Option<&Backtrace>) -> [String; 3] {
    let trace = match backtrace {
        Some(backtrace) if backtrace.status() == BacktraceStatus::Captured => {
            format!("Stack trace:\n{backtrace}")
        }
        _ => NO_STACK_TRACE.to_string(),
    };
    [
        FATAL_HEADER.to_string(),
        format!("Message: \"{message}\""),
        trace,
    ]
}

/// Report a failure
pub fn report(output: &Output, message: &str, error: Option<&anyhow::Error>) {
    for line in lines(message, error.map(anyhow::Error::backtrace)) {
        output.log(Level::Error, &[&line]);
    }
}

/// Report a failure through the async writer
pub async fn report_async(output: &Output, message: &str, error: Option<&anyhow::Error>) {
    for line in lines(message, error.map(anyhow::Error::backtrace)) {
        output.log_async(Level::Error, &[&line]).await;
    }
}
