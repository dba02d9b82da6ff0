//! Insight commands: restock predictions and expiry alerts.

use clap::Args;

use super::{open_engine, OutputFormat};
use crate::config::Config;
use pantry_core::AlertKind;

#[derive(Args)]
pub struct RestockCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl RestockCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let engine = open_engine(config)?;
        let suggestions = engine.predict_restock();

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&suggestions)?);
            }
            OutputFormat::Table => {
                if suggestions.is_empty() {
                    println!("No restock suggestions.");
                    return Ok(());
                }
                println!("You might be running low on {} item(s):", suggestions.len());
                for suggestion in &suggestions {
                    println!("  {}", suggestion.message());
                }
                println!("\nUse `pantry add <item>` to put one back on the list.");
            }
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct ExpiryCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl ExpiryCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let engine = open_engine(config)?;
        let alerts = engine.check_expiry_alerts();

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&alerts)?);
            }
            OutputFormat::Table => {
                if alerts.is_empty() {
                    println!("All items are fresh.");
                    return Ok(());
                }
                for alert in &alerts {
                    let label = match alert.kind {
                        AlertKind::Expired => "EXPIRED ",
                        AlertKind::Critical => "CRITICAL",
                    };
                    println!("[{}] {} (record {})", label, alert.message(), alert.record_id);
                }
                println!(
                    "\nUse `pantry history-remove <id>` to drop a record, or \
                     `pantry add <item>` to restock."
                );
            }
        }
        Ok(())
    }
}
