//! Compare command: verdicts for two category lists.

use std::collections::BTreeSet;

use anyhow::Result;
use clap::Parser;

use crate::cli::formatting::format_comparison_text;
use crate::cli::{parse_format, render};
use crate::comparison::{ComparisonEngine, Subject};
use crate::pipeline::availability_notes;
use crate::taxonomy::{parse_category_list, DataCategory};

/// Compares policy categories against disclosure categories for one subject.
#[derive(Parser)]
pub struct CompareCommand {
    /// Subject identifier.
    #[arg(long)]
    pub id: String,

    /// Subject display name; defaults to the id.
    #[arg(long)]
    pub name: Option<String>,

    /// Comma-separated policy categories (e.g. "pii,location").
    #[arg(long, default_value = "")]
    pub policy: String,

    /// Comma-separated disclosure categories.
    #[arg(long, default_value = "")]
    pub disclosure: String,

    /// Marks the policy as not analyzed.
    #[arg(long)]
    pub policy_unanalyzed: bool,

    /// Marks the disclosure as not analyzed.
    #[arg(long)]
    pub disclosure_unanalyzed: bool,

    /// Output format: text (default), json, yaml.
    #[arg(long, default_value = "text")]
    pub format: String,
}

impl CompareCommand {
    /// Executes the compare command.
    pub fn execute(self) -> Result<()> {
        let format = parse_format(&self.format)?;
        let policy: BTreeSet<DataCategory> = parse_category_list(&self.policy)?.into_iter().collect();
        let disclosure: BTreeSet<DataCategory> =
            parse_category_list(&self.disclosure)?.into_iter().collect();

        let policy_analyzed = !self.policy_unanalyzed;
        let disclosure_analyzed = !self.disclosure_unanalyzed;
        let subject = Subject::new(&self.id, self.name.as_deref().unwrap_or(&self.id));

        let record = ComparisonEngine::compare(
            &subject,
            &policy,
            &disclosure,
            policy_analyzed,
            disclosure_analyzed,
        )
        .with_notes(availability_notes(policy_analyzed, disclosure_analyzed));

        let output = render(&record, format, || format_comparison_text(&record))?;
        print!("{output}");
        Ok(())
    }
}
