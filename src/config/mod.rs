//! Settings for precommit-hook
//!
//! Output settings are layered with figment: built-in defaults, then
//! `precommit-hook.toml` in the working directory, then `PRECOMMIT_HOOK_*`
//! environment variables. Command-line flags are not part of this layer;
//! clap resolves those (including their environment overrides) itself.

mod core;


pub use self::core::{CONFIG_FILE, ColorChoice, ENV_PREFIX, Settings};
