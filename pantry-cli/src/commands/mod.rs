//! CLI commands, one module per domain area.

pub mod advisor;
pub mod insights;
pub mod items;
pub mod purchase;
pub mod settings;

pub use advisor::{CategorizeCommand, RecipesCommand, TipsCommand};
pub use insights::{ExpiryCommand, RestockCommand};
pub use items::{AddCommand, ListCommand, RemoveCommand, ReplaceCommand};
pub use purchase::{BuyCommand, HistoryCommand, HistoryRemoveCommand};
pub use settings::{ConfigCommand, DietCommand, ResetCommand};

use clap::ValueEnum;

use crate::config::Config;
use pantry_core::{GroceryEngine, JsonStore};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Build an engine over the configured store, with the oracle when one
/// is configured.
pub fn open_engine(config: &Config) -> Result<GroceryEngine, Box<dyn std::error::Error>> {
    let store = JsonStore::new(config.data_path.value.clone());
    Ok(GroceryEngine::open(store, config.build_oracle())?)
}
