//! Leveled output for precommit-hook
//!
//! Status lines come in four levels (error, warning, info, verbose), each with
//! a fixed label and color. Verbosity and color are fixed when the handler
//! builds its `Output`; nothing here reads global state.

use console::Style;
use std::fmt::{self, Display, Write as _};

mod sink;

pub use sink::Sink;

/// Severity of a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
    Info,
    Verbose,
}

impl Level {
    /// Fixed label printed in front of the message
    pub fn label(self) -> &'static str {
        match self {
            Level::Error => "✖ error",
            Level::Warning => "⚠ warning",
            Level::Info => "ℹ info",
            Level::Verbose => "… verbose",
        }
    }

    fn style(self) -> Style {
        let style = Style::new().force_styling(true);
        match self {
            Level::Error => style.red().bold(),
            Level::Warning => style.yellow(),
            Level::Info => style.blue(),
            Level::Verbose => style.dim(),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Join values with single spaces.
///
/// A value whose `Display` impl fails contributes whatever it wrote before
/// failing; the rest of the line is still produced.
pub fn join_parts(parts: &[&dyn Display]) -> String {
    let mut joined = String::new();
    for (index, part) in parts.iter().enumerate() {
        if index > 0 {
            joined.push(' ');
        }
        if write!(joined, "{part}").is_err() {
            tracing::debug!("value failed to format, keeping partial text");
        }
    }
    joined
}

/// Output handler for leveled status lines
#[derive(Debug, Clone)]
pub struct Output {
    sink: Sink,
    verbose: bool,
    color: bool,
}

impl Output {
    /// Create a new output handler
    pub fn new(sink: Sink, verbose: bool, color: bool) -> Self {
        Self {
            sink,
            verbose,
            color,
        }
    }

    /// Get verbose mode status
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn sink(&self) -> &Sink {
        &self.sink
    }

    /// Render a status line, or `None` when the level is gated off
    pub fn render(&self, level: Level, parts: &[&dyn Display]) -> Option<String> {
        if level == Level::Verbose && !self.verbose {
            return None;
        }

        let message = join_parts(parts);
        if !self.color {
            return Some(format!("{} {}", level.label(), message));
        }

        let label = level.style().apply_to(level.label());
        let line = if level == Level::Verbose {
            format!("{} {}", label, level.style().apply_to(&message))
        } else {
            format!("{label} {message}")
        };
        Some(line)
    }

    /// Emit a status line; write failures are swallowed
    pub fn log(&self, level: Level, parts: &[&dyn Display]) {
        if let Some(line) = self.render(level, parts) {
            if let Err(err) = self.sink.write_line(&line) {
                tracing::warn!(%err, "failed to write status line");
            }
        }
    }

    /// Emit a status line through the async writer; write failures are swallowed
    pub async fn log_async(&self, level: Level, parts: &[&dyn Display]) {
        if let Some(line) = self.render(level, parts) {
            if let Err(err) = self.sink.write_line_async(&line).await {
                tracing::warn!(%err, "failed to write status line");
            }
        }
    }

    /// Write a line verbatim (help text, completion scripts)
    pub async fn raw(&self, text: &str) {
        if let Err(err) = self.sink.write_line_async(text).await {
            tracing::warn!(%err, "failed to write output");
        }
    }

    /// Print an error message
    pub fn error(&self, message: impl Display) {
        self.log(Level::Error, &[&message]);
    }

    /// Print a warning message
    pub fn warning(&self, message: impl Display) {
        self.log(Level::Warning, &[&message]);
    }

    /// Print an info message
    pub fn info(&self, message: impl Display) {
        self.log(Level::Info, &[&message]);
    }

    /// Print a verbose message (only if verbose mode is enabled)
    pub fn verbose(&self, message: impl Display) {
        self.log(Level::Verbose, &[&message]);
    }
}

/// Emit a status line from any number of `Display` values.
///
/// ```
/// use precommit_hook::output::{Level, Output, Sink};
/// use precommit_hook::emit;
///
/// let output = Output::new(Sink::memory(), false, false);
/// emit!(output, Level::Info, "scanned", 3, "files");
/// assert_eq!(output.sink().contents().unwrap(), "ℹ info scanned 3 files\n");
/// ```
#[macro_export]
macro_rules! emit {
    ($output:expr, $level:expr, $($part:expr),+ $(,)?) => {
        $output.log($level, &[$(&$part as &dyn ::std::fmt::Display),+])
    };
}

/// Async twin of [`emit!`]
#[macro_export]
macro_rules! emit_async {
    ($output:expr, $level:expr, $($part:expr),+ $(,)?) => {
        $output.log_async($level, &[$(&$part as &dyn ::std::fmt::Display),+])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl fmt::Display for Broken {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("half")?;
            Err(fmt::Error)
        }
    }

    fn plain(verbose: bool) -> Output {
        Output::new(Sink::memory(), verbose, false)
    }

    #[test]
    fn test_levels_have_fixed_labels() {
        let output = plain(true);
        output.error("e");
        output.warning("w");
        output.info("i");
        output.verbose("v");
        assert_eq!(
            output.sink().contents().unwrap(),
            "✖ error e\n⚠ warning w\nℹ info i\n… verbose v\n"
        );
    }

    #[test]
    fn test_verbose_is_noop_when_disabled() {
        let output = plain(false);
        output.verbose("hidden");
        emit!(output, Level::Verbose, "also", "hidden");
        assert_eq!(output.sink().contents().unwrap(), "");
    }

    #[test]
    fn test_parts_joined_with_single_spaces() {
        let output = plain(false);
        emit!(output, Level::Warning, "found", 2, "issues in", "src/main.rs");
        assert_eq!(
            output.sink().contents().unwrap(),
            "⚠ warning found 2 issues in src/main.rs\n"
        );
    }

    #[test]
    fn test_exactly_one_trailing_newline() {
        let output = plain(false);
        output.info("ends with newline\n");
        assert_eq!(
            output.sink().contents().unwrap(),
            "ℹ info ends with newline\n"
        );
    }

    #[test]
    fn test_formatting_failure_degrades_to_raw_text() {
        let output = plain(false);
        emit!(output, Level::Error, "before", Broken, "after");
        assert_eq!(
            output.sink().contents().unwrap(),
            "✖ error before half after\n"
        );
    }

    #[test]
    fn test_color_wraps_label_in_ansi() {
        let output = Output::new(Sink::memory(), false, true);
        output.error("boom");
        let contents = output.sink().contents().unwrap();
        assert!(contents.contains("\u{1b}["));
        assert!(contents.contains("boom"));
        assert_eq!(console::strip_ansi_codes(&contents), "✖ error boom\n");
    }

    #[test]
    fn test_no_color_has_no_escapes() {
        let output = plain(false);
        output.error("boom");
        assert!(!output.sink().contents().unwrap().contains('\u{1b}'));
    }

    #[tokio::test]
    async fn test_async_logging_respects_verbosity() {
        let output = plain(false);
        emit_async!(output, Level::Verbose, "quiet").await;
        emit_async!(output, Level::Info, "loud").await;
        assert_eq!(output.sink().contents().unwrap(), "ℹ info loud\n");
    }
}
