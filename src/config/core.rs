use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings file looked up in the working directory
pub const CONFIG_FILE: &str = "precommit-hook.toml";

/// Prefix shared by every environment override
pub const ENV_PREFIX: &str = "PRECOMMIT_HOOK_";

/// When status lines are colorized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Follow the terminal (`NO_COLOR`, `CLICOLOR_FORCE`, tty detection)
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn enabled(self) -> bool {
        match self {
            ColorChoice::Auto => console::colors_enabled(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

/// Settings that shape output but are not command-line flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub color: ColorChoice,
}

impl Settings {
    /// Load settings relative to the current directory
    pub fn load() -> Result<Self> {
        Self::figment(Path::new("."))
            .extract()
            .context("Failed to load settings")
    }

    /// Load settings from `dir`
    pub fn load_from(dir: &Path) -> Result<Self> {
        Self::figment(dir)
            .extract()
            .with_context(|| format!("Failed to load settings from {}", dir.display()))
    }

    /// Defaults, then the settings file, then environment variables
    pub fn figment(dir: &Path) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(dir.join(CONFIG_FILE)))
            .merge(Env::prefixed(ENV_PREFIX).only(&["color"]))
    }
}
