//! Environment fallback read from `$HOME/.disclosure-audit/settings.json`.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config::CONFIG_DIR;

/// Settings loaded from `$HOME/.disclosure-audit/settings.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// Values used when the variable is absent from the environment.
    #[serde(default)]
    pub env: HashMap<String, String>,
}

impl Settings {
    /// Loads settings from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from_path(Self::settings_path()?)
    }

    /// Loads settings from a specific path; a missing file yields no values.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    /// Returns the default settings path.
    pub fn settings_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to determine home directory")?;
        Ok(home_dir.join(CONFIG_DIR).join("settings.json"))
    }

    /// Returns an environment variable, falling back to these settings.
    pub fn get_env_var(&self, key: &str) -> Option<String> {
        env::var(key).ok().or_else(|| self.env.get(key).cloned())
    }
}
