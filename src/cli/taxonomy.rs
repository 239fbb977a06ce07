//! Taxonomy inspection commands.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::taxonomy::{DataCategory, FuzzyMatchPolicy, PatternKind, PatternTable, Vocabulary};

/// Taxonomy operations.
#[derive(Parser)]
pub struct TaxonomyCommand {
    /// Taxonomy subcommand to execute.
    #[command(subcommand)]
    pub command: TaxonomySubcommands,
}

/// Taxonomy subcommands.
#[derive(Subcommand)]
pub enum TaxonomySubcommands {
    /// Lists the data categories.
    List(ListCommand),
    /// Maps a datatype term to its category.
    Lookup(LookupCommand),
}

/// List command options.
#[derive(Parser)]
pub struct ListCommand {
    /// Also prints every pattern.
    #[arg(long)]
    pub patterns: bool,
}

/// Lookup command options.
#[derive(Parser)]
pub struct LookupCommand {
    /// Datatype term, e.g. "credit card number".
    pub term: String,

    /// Fuzzy policy: exact, whole_word[:N], substring[:N].
    #[arg(long, default_value = "whole_word:4")]
    pub fuzzy: String,
}

impl TaxonomyCommand {
    /// Executes the taxonomy command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            TaxonomySubcommands::List(list_cmd) => list_cmd.execute(),
            TaxonomySubcommands::Lookup(lookup_cmd) => lookup_cmd.execute(),
        }
    }
}

impl ListCommand {
    /// Executes the list command.
    pub fn execute(self) -> Result<()> {
        let table = PatternTable::builtin()?;
        let vocabulary = Vocabulary::builtin()?;

        for category in DataCategory::ALL {
            println!(
                "{:<16} {:<20} {} datatype terms",
                category.id(),
                category.display_name(),
                vocabulary.terms(category).len()
            );
            if self.patterns {
                let groups = table.groups(category);
                for kind in [PatternKind::Category, PatternKind::DataType, PatternKind::Context] {
                    for pattern in groups.patterns(kind) {
                        println!("   [{kind}] {}", pattern.as_str());
                    }
                }
            }
        }

        if self.patterns {
            println!("collection indicators:");
            for source in table.collection_indicators().sources() {
                println!("   {source}");
            }
        }
        Ok(())
    }
}

impl LookupCommand {
    /// Executes the lookup command.
    pub fn execute(self) -> Result<()> {
        let policy: FuzzyMatchPolicy = self.fuzzy.parse().map_err(|e: String| anyhow::anyhow!(e))?;
        match Vocabulary::builtin()?.lookup(&self.term, policy) {
            Some(category) => println!("{category}"),
            None => println!("No category for {:?} ({policy})", self.term),
        }
        Ok(())
    }
}
