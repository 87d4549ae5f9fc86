//! Line-oriented output sink
//!
//! Every user-facing line ends up here. Standard output is the real target;
//! the in-memory variant captures lines so handlers can be exercised without
//! spawning a process.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::io::AsyncWriteExt;

/// Destination for rendered lines
#[derive(Debug, Clone, Default)]
pub enum Sink {
    /// Process standard output
    #[default]
    Stdout,
    /// Shared in-memory buffer
    Memory(Arc<Mutex<String>>),
}

impl Sink {
    /// Create an empty in-memory sink
    pub fn memory() -> Self {
        Sink::Memory(Arc::new(Mutex::new(String::new())))
    }

    /// Everything written so far, for in-memory sinks
    pub fn contents(&self) -> Option<String> {
        match self {
            Sink::Stdout => None,
            Sink::Memory(buffer) => Some(
                buffer
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .clone(),
            ),
        }
    }

    /// Write one line, blocking until it is flushed
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let line = terminate(line);
        match self {
            Sink::Stdout => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(line.as_bytes())?;
                stdout.flush()
            }
            Sink::Memory(buffer) => {
                buffer
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push_str(&line);
                Ok(())
            }
        }
    }

    /// Write one line through tokio's stdout handle
    pub async fn write_line_async(&self, line: &str) -> io::Result<()> {
        match self {
            Sink::Stdout => {
                let line = terminate(line);
                let mut stdout = tokio::io::stdout();
                stdout.write_all(line.as_bytes()).await?;
                stdout.flush().await
            }
            Sink::Memory(_) => self.write_line(line),
        }
    }
}

/// Strip trailing newlines and append exactly one
fn terminate(line: &str) -> String {
    let mut line = line.trim_end_matches(['\n', '\r']).to_string();
    line.push('\n');
    line
}
