//! Runtime settings for a `RootedFS`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::core::Result;

/// Environment variable that turns on verbose operation tracing.
pub const ENV_DEBUG: &str = "VROOT_DEBUG";
/// Environment variable that overrides the detected home directory.
pub const ENV_HOME: &str = "VROOT_HOME";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Log entry and success of every operation, not only failures.
    pub debug: bool,
    /// Directory used for `~` instead of the one reported by the OS.
    pub home: Option<PathBuf>,
}

impl Settings {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid settings")
    }

    /// Reads settings from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("unable to read settings from {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Defaults overridden by `VROOT_DEBUG` / `VROOT_HOME`.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_DEBUG) {
            self.debug = parse_flag(&value);
        }
        if let Some(value) = lookup(ENV_HOME) {
            if !value.is_empty() {
                self.home = Some(PathBuf::from(value));
            }
        }
        self
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
