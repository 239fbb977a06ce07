//! Configuration-related CLI commands.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use crate::config::{AuditConfig, ConfigManager};
use crate::data::to_yaml;

/// Configuration operations.
#[derive(Parser)]
pub struct ConfigCommand {
    /// Configuration subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigSubcommands,
}

/// Configuration subcommands.
#[derive(Subcommand)]
pub enum ConfigSubcommands {
    /// Shows the effective configuration.
    Show(ShowCommand),
    /// Writes a default config file.
    Init(InitCommand),
}

/// Show command options.
#[derive(Parser)]
pub struct ShowCommand {}

/// Init command options.
#[derive(Parser)]
pub struct InitCommand {
    /// Overwrites an existing config file.
    #[arg(long)]
    pub force: bool,
}

impl ConfigCommand {
    /// Executes the config command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            ConfigSubcommands::Show(show_cmd) => show_cmd.execute(),
            ConfigSubcommands::Init(init_cmd) => init_cmd.execute(),
        }
    }
}

impl ShowCommand {
    /// Executes the show command.
    pub fn execute(self) -> Result<()> {
        let manager = ConfigManager::new();
        let config = manager.effective_config()?;
        println!("# {}", manager.config_path().display());
        print!("{}", to_yaml(&config)?);
        Ok(())
    }
}

impl InitCommand {
    /// Executes the init command.
    pub fn execute(self) -> Result<()> {
        let manager = ConfigManager::new();
        let path = manager.config_path();
        if path.exists() && !self.force {
            bail!(
                "Config file already exists: {} (use --force to overwrite)",
                path.display()
            );
        }
        manager.save_config(&AuditConfig::default())?;
        println!("\u{2705} Wrote {}", path.display());
        Ok(())
    }
}
