//! Config command - View Gucker configuration
//!
//! Provides the `gucker config` CLI command which:
//! 1. Shows the effective configuration (YAML or JSON)
//! 2. Prints the default configuration file path

use anyhow::{Context, Result};
use clap::Subcommand;

use gucker_core::config::Config;

use crate::output::{Output, OutputFormat};

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the effective configuration
    Show,
    /// Print the default configuration file path
    Path,
}

impl ConfigCommand {
    /// Execute the config command
    pub fn execute(&self, config: &Config, format: OutputFormat) -> Result<()> {
        let out = Output::new(format);

        match self {
            ConfigCommand::Show => {
                if out.is_json() {
                    let json = serde_json::to_value(config)
                        .context("Failed to serialize configuration to JSON")?;
                    out.print_json(&json);
                } else {
                    out.success("Configuration");
                    let yaml = serde_yaml::to_string(config)
                        .context("Failed to serialize configuration to YAML")?;
                    for line in yaml.lines() {
                        out.info(line);
                    }
                }
            }
            ConfigCommand::Path => {
                let path = Config::default_path();
                if out.is_json() {
                    out.print_json(&serde_json::json!({
                        "path": path.display().to_string(),
                    }));
                } else {
                    println!("{}", path.display());
                }
            }
        }

        Ok(())
    }
}
