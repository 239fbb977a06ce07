//! Batch command: runs the subject pipeline over a subjects file.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::classifier::PatternClassifier;
use crate::cli::formatting::{format_comparison_text, format_summary_text};
use crate::cli::{load_config, parse_format, render};
use crate::data::{ComparisonReport, SubjectsFile};
use crate::pipeline::SubjectPipeline;
use crate::taxonomy::{FuzzyMatchPolicy, PatternTable, Vocabulary};

/// Compares every subject listed in a YAML subjects file.
#[derive(Parser)]
pub struct BatchCommand {
    /// Subjects file (YAML).
    pub subjects: PathBuf,

    /// Writes the report to a file instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Minimum confidence for a match to count (0.0 to 1.0).
    #[arg(long)]
    pub min_confidence: Option<f32>,

    /// Fuzzy policy for graph terms: exact, whole_word[:N], substring[:N].
    #[arg(long)]
    pub fuzzy: Option<String>,

    /// Output format: text (default), json, yaml.
    #[arg(long, default_value = "text")]
    pub format: String,
}

impl BatchCommand {
    /// Executes the batch command.
    pub fn execute(self) -> Result<()> {
        let format = parse_format(&self.format)?;
        let mut config = load_config(self.min_confidence)?;
        if let Some(fuzzy) = &self.fuzzy {
            config.fuzzy_match = fuzzy
                .parse::<FuzzyMatchPolicy>()
                .map_err(|e| anyhow::anyhow!(e))?;
        }

        let table = PatternTable::builtin()?;
        let vocabulary = Vocabulary::builtin()?;
        let sources = SubjectsFile::load_sources(&self.subjects, vocabulary, config.fuzzy_match)?;
        info!(subjects = sources.len(), path = %self.subjects.display(), "Loaded subjects");

        let classifier = PatternClassifier::new(table, config.collection_indicators(table)?);
        let pipeline = SubjectPipeline::new(classifier, vocabulary, config.min_confidence)?;
        let records = pipeline.run_batch(&sources)?;
        let report = ComparisonReport::new(records, config.min_confidence, config.fuzzy_match);

        let output = render(&report, format, || format_report_text(&report))?;
        match &self.output {
            Some(path) => {
                fs::write(path, output)
                    .with_context(|| format!("Failed to write report: {}", path.display()))?;
                info!(path = %path.display(), "Wrote report");
            }
            None => print!("{output}"),
        }
        Ok(())
    }
}

fn format_report_text(report: &ComparisonReport) -> String {
    let mut out = String::new();
    for record in &report.subjects {
        out.push_str(&format_comparison_text(record));
        out.push('\n');
    }
    out.push_str(&format_summary_text(&report.summary));
    out
}
