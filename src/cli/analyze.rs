//! Analyze command: classifies one text.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::classifier::PatternClassifier;
use crate::cli::formatting::{format_categories_text, format_matches_text};
use crate::cli::{load_config, parse_format, render};
use crate::taxonomy::{parse_disclosure_labels, PatternTable, Vocabulary};
use crate::utils::read_text_source;

/// Classifies a policy or disclosure text into data categories.
#[derive(Parser)]
pub struct AnalyzeCommand {
    /// Text or HTML file; reads stdin when omitted.
    pub path: Option<PathBuf>,

    /// Minimum confidence for a match to count (0.0 to 1.0).
    #[arg(long)]
    pub min_confidence: Option<f32>,

    /// Prints only the detected categories.
    #[arg(long)]
    pub categories_only: bool,

    /// Reads store-disclosure section labels instead of classifying.
    #[arg(long, conflicts_with = "min_confidence")]
    pub labels: bool,

    /// Output format: text (default), json, yaml.
    #[arg(long, default_value = "text")]
    pub format: String,
}

impl AnalyzeCommand {
    /// Executes the analyze command.
    pub fn execute(self) -> Result<()> {
        let format = parse_format(&self.format)?;
        let text = self.read_input()?;

        if self.labels {
            let categories = parse_disclosure_labels(Vocabulary::builtin()?, &text);
            let output = render(&categories, format, || format_categories_text(&categories))?;
            print!("{output}");
            return Ok(());
        }

        let config = load_config(self.min_confidence)?;
        let table = PatternTable::builtin()?;
        let classifier = PatternClassifier::new(table, config.collection_indicators(table)?);
        let matches = classifier.analyze(&text, config.min_confidence)?;
        info!(
            chars = text.chars().count(),
            categories = matches.len(),
            min_confidence = config.min_confidence,
            "Analyzed text"
        );

        let output = if self.categories_only {
            let categories: Vec<_> = matches.keys().copied().collect();
            render(&categories, format, || format_categories_text(&categories))?
        } else {
            render(&matches, format, || format_matches_text(&matches))?
        };
        print!("{output}");
        Ok(())
    }

    fn read_input(&self) -> Result<String> {
        match &self.path {
            Some(path) => read_text_source(path),
            None => io::read_to_string(io::stdin()).context("Failed to read text from stdin"),
        }
    }
}
