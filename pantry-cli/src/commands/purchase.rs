//! Purchase commands: record purchases, view and prune history.

use clap::Args;
use uuid::Uuid;

use super::{open_engine, OutputFormat};
use crate::config::Config;
use pantry_core::EngineError;

#[derive(Args)]
pub struct BuyCommand {
    /// Item name
    pub name: String,

    /// Quantity purchased
    #[arg(long, short, default_value_t = 1)]
    pub qty: u32,
}

impl BuyCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let mut engine = open_engine(config)?;
        match engine.record_purchase(&self.name, self.qty) {
            Ok(outcome) => println!("{}", outcome.message()),
            Err(EngineError::EmptyInput) => println!("Warning: item name cannot be empty"),
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct HistoryCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl HistoryCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let engine = open_engine(config)?;
        let history = &engine.document().purchase_history;

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(history)?);
            }
            OutputFormat::Table => {
                if history.is_empty() {
                    println!("No purchases recorded yet.");
                    return Ok(());
                }
                println!(
                    "{:>3}  {:<20} {:>4}  {:<12} {:<15} {:<12} {}",
                    "#", "item", "qty", "purchased", "expires", "source", "id"
                );
                for (i, record) in history.iter().enumerate() {
                    println!(
                        "{:>3}  {:<20} {:>4}  {:<12} {:<15} {:<12} {}",
                        i,
                        record.item,
                        record.quantity,
                        record.purchase_date.format("%Y-%m-%d"),
                        record.expiry.to_string(),
                        record.expiry_source.to_string(),
                        record.id
                    );
                }
            }
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct HistoryRemoveCommand {
    /// Record to remove: a positional index (from `pantry history`) or a
    /// record id. Indexes shift after removals; ids do not.
    pub token: String,
}

impl HistoryRemoveCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let mut engine = open_engine(config)?;

        let removed = if let Ok(index) = self.token.parse::<usize>() {
            engine.remove_from_history(index)?
        } else if let Ok(id) = Uuid::parse_str(&self.token) {
            engine.remove_record(id)?
        } else {
            return Err(format!(
                "'{}' is neither a history index nor a record id",
                self.token
            )
            .into());
        };

        if removed {
            println!("Removed record {}", self.token);
        } else {
            println!("Warning: no record matches '{}'", self.token);
        }
        Ok(())
    }
}
