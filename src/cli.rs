//! CLI interface for disclosure-audit.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::config::{AuditConfig, ConfigManager};
use crate::data::{to_json, to_yaml, OutputFormat};

pub mod analyze;
pub mod batch;
pub mod compare;
pub mod config;
pub mod formatting;
pub mod taxonomy;

/// disclosure-audit: compares what privacy policies say against store disclosures.
#[derive(Parser)]
#[command(name = "disclosure-audit")]
#[command(
    about = "Classifies privacy text into data categories and compares policies with disclosures",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// The main command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Main command categories.
#[derive(Subcommand)]
pub enum Commands {
    /// Classifies a policy or disclosure text.
    Analyze(analyze::AnalyzeCommand),
    /// Compares two category lists for one subject.
    Compare(compare::CompareCommand),
    /// Runs the subject pipeline over a subjects file.
    Batch(batch::BatchCommand),
    /// Inspects the built-in taxonomy.
    Taxonomy(taxonomy::TaxonomyCommand),
    /// Shows or initializes configuration.
    Config(config::ConfigCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Analyze(analyze_cmd) => analyze_cmd.execute(),
            Commands::Compare(compare_cmd) => compare_cmd.execute(),
            Commands::Batch(batch_cmd) => batch_cmd.execute(),
            Commands::Taxonomy(taxonomy_cmd) => taxonomy_cmd.execute(),
            Commands::Config(config_cmd) => config_cmd.execute(),
        }
    }
}

/// Parses a `--format` value.
pub(crate) fn parse_format(format: &str) -> Result<OutputFormat> {
    format.parse().map_err(|e: String| anyhow::anyhow!(e))
}

/// Loads the effective configuration, applying a `--min-confidence` flag.
pub(crate) fn load_config(min_confidence: Option<f32>) -> Result<AuditConfig> {
    let mut config = ConfigManager::new()
        .effective_config()
        .context("Failed to load configuration")?;
    if let Some(min_confidence) = min_confidence {
        config.min_confidence = min_confidence;
        config.validate()?;
    }
    Ok(config)
}

/// Renders a value in the requested format; `text` supplies the text form.
pub(crate) fn render<T: Serialize>(
    value: &T,
    format: OutputFormat,
    text: impl FnOnce() -> String,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text()),
        OutputFormat::Json => to_json(value),
        OutputFormat::Yaml => to_yaml(value),
    }
}
