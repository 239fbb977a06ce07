//! Configuration: file-backed defaults with environment overrides.
//!
//! Precedence, lowest first: built-in defaults, `~/.disclosure-audit/config.yaml`,
//! environment variables (falling back to `~/.disclosure-audit/settings.json`),
//! then command-line flags applied by the caller.

pub mod settings;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifier::{CollectionIndicators, DEFAULT_MIN_CONFIDENCE};
use crate::error::{validate_min_confidence, AuditError};
use crate::taxonomy::{FuzzyMatchPolicy, PatternTable};

pub use settings::Settings;

/// Directory holding the tool's configuration files.
pub const CONFIG_DIR: &str = ".disclosure-audit";
/// Overrides [`AuditConfig::min_confidence`].
pub const MIN_CONFIDENCE_ENV: &str = "DISCLOSURE_AUDIT_MIN_CONFIDENCE";
/// Overrides [`AuditConfig::fuzzy_match`].
pub const FUZZY_MATCH_ENV: &str = "DISCLOSURE_AUDIT_FUZZY_MATCH";

fn default_min_confidence() -> f32 {
    DEFAULT_MIN_CONFIDENCE
}

/// Classifier and lookup settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Threshold applied to classifier matches.
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f32,
    /// Fuzzy step used when mapping graph terms.
    #[serde(default)]
    pub fuzzy_match: FuzzyMatchPolicy,
    /// Collection-indicator patterns added to the built-in set.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_collection_indicators: Vec<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            fuzzy_match: FuzzyMatchPolicy::default(),
            extra_collection_indicators: Vec::new(),
        }
    }
}

impl AuditConfig {
    /// Rejects out-of-range thresholds and indicators that do not compile.
    pub fn validate(&self) -> Result<(), AuditError> {
        validate_min_confidence(self.min_confidence)?;
        CollectionIndicators::new(&self.extra_collection_indicators)?;
        Ok(())
    }

    /// Applies overrides from `lookup`, usually the environment.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(MIN_CONFIDENCE_ENV) {
            self.min_confidence = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid {MIN_CONFIDENCE_ENV}: {value:?}"))?;
            debug!(min_confidence = self.min_confidence, "Threshold overridden");
        }
        if let Some(value) = lookup(FUZZY_MATCH_ENV) {
            self.fuzzy_match = value
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))
                .with_context(|| format!("Invalid {FUZZY_MATCH_ENV}"))?;
            debug!(fuzzy_match = %self.fuzzy_match, "Fuzzy policy overridden");
        }
        Ok(self)
    }

    /// Built-in collection indicators extended with the configured extras.
    pub fn collection_indicators(
        &self,
        table: &PatternTable,
    ) -> Result<CollectionIndicators, AuditError> {
        table
            .collection_indicators()
            .clone()
            .with_extra(&self.extra_collection_indicators)
    }
}

/// Loads and saves [`AuditConfig`].
pub struct ConfigManager {
    config_path: PathBuf,
    settings: Settings,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self {
            config_path: Self::default_config_path(),
            settings: Settings::load().unwrap_or_default(),
        }
    }
}

impl ConfigManager {
    /// Creates a manager for the default locations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a manager with a custom config path and no settings fallback.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config_path: path,
            settings: Settings::default(),
        }
    }

    /// Replaces the settings used as environment fallback.
    #[must_use]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Returns the default config path (`~/.disclosure-audit/config.yaml`).
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR)
            .join("config.yaml")
    }

    /// Path this manager reads from.
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Loads the config file; a missing file yields defaults.
    pub fn load_config(&self) -> Result<AuditConfig> {
        if !self.config_path.exists() {
            debug!(path = %self.config_path.display(), "No config file, using defaults");
            return Ok(AuditConfig::default());
        }

        let content = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        serde_yaml::from_str(&content).with_context(|| {
            format!("Failed to parse config file: {}", self.config_path.display())
        })
    }

    /// Saves a config file, creating its directory.
    pub fn save_config(&self, config: &AuditConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = serde_yaml::to_string(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, content).with_context(|| {
            format!("Failed to write config file: {}", self.config_path.display())
        })?;

        Ok(())
    }

    /// Loads the config, applies environment overrides and validates.
    pub fn effective_config(&self) -> Result<AuditConfig> {
        let config = self
            .load_config()?
            .with_overrides(|key| self.settings.get_env_var(key))?;
        config.validate()?;
        Ok(config)
    }
}
