//! # precommit-hook
//!
//! Command-line entry point for managing pre-commit hooks. Today it parses the
//! global flags and runs a single default command that greets the user.
//!
//! ## Quick Start
//!
//! ```bash
//! precommit-hook                      # greet
//! precommit-hook --verbose            # greet twice
//! precommit-hook --completion-script  # print a completion script for $SHELL
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Context, Outcome, OutcomeKind};
pub use config::Settings;
pub use error::DispatchError;
pub use output::{Output, Sink};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
pub const COPYRIGHT: &str = concat!("Copyright (c) 2025 ", env!("CARGO_PKG_AUTHORS"));
