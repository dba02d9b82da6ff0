//! Want-list commands: add, remove, replace, list.

use clap::Args;

use super::{open_engine, OutputFormat};
use crate::config::Config;
use pantry_core::{rules, EngineError};

#[derive(Args)]
pub struct AddCommand {
    /// Item name (e.g., "milk", "white bread")
    pub name: String,
}

impl AddCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let mut engine = open_engine(config)?;
        match engine.add_item(&self.name) {
            Ok(outcome) => println!("{}", outcome.message()),
            Err(EngineError::EmptyInput) => println!("Warning: item name cannot be empty"),
            Err(EngineError::DuplicateItem(item)) => {
                println!("Warning: '{}' is already on your list", item)
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct RemoveCommand {
    /// Item name
    pub name: String,
}

impl RemoveCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let mut engine = open_engine(config)?;
        if engine.remove_item(&self.name)? {
            println!("Removed '{}' from your list", self.name.trim().to_lowercase());
        } else {
            println!("Warning: '{}' is not on your list", self.name);
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct ReplaceCommand {
    /// Item currently on the list
    pub old: String,

    /// Item to put in its place
    pub new: String,
}

impl ReplaceCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let mut engine = open_engine(config)?;
        match engine.replace_item(&self.old, &self.new) {
            Ok(message) => println!("{}", message),
            Err(EngineError::ItemNotFound(item)) => {
                println!("Warning: '{}' is not on your list", item)
            }
            Err(EngineError::DuplicateItem(item)) => {
                println!("Warning: '{}' is already on your list", item)
            }
            Err(EngineError::EmptyInput) => println!("Warning: item name cannot be empty"),
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct ListCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl ListCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let engine = open_engine(config)?;
        let items = &engine.document().want_list;

        match self.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "items": items.iter().map(|item| serde_json::json!({
                        "name": item,
                        "healthier_alternative": rules::healthier_alternative(item),
                    })).collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Table => {
                if items.is_empty() {
                    println!("Your list is empty.");
                    return Ok(());
                }
                println!("Grocery list ({}):", items.len());
                for (i, item) in items.iter().enumerate() {
                    match rules::healthier_alternative(item) {
                        Some(alt) => println!("{:>3}. {:<25} (consider {})", i + 1, item, alt),
                        None => println!("{:>3}. {}", i + 1, item),
                    }
                }
            }
        }
        Ok(())
    }
}
