//! Oracle-backed advisory commands. Best-effort: these never mutate the
//! document and fall back to fixed text when the oracle is unavailable.

use clap::Args;

use super::open_engine;
use crate::config::Config;

#[derive(Args)]
pub struct RecipesCommand {}

impl RecipesCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let engine = open_engine(config)?;
        println!("{}", engine.suggest_recipes());
        Ok(())
    }
}

#[derive(Args)]
pub struct CategorizeCommand {}

impl CategorizeCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let engine = open_engine(config)?;
        println!("{}", engine.categorize_list());
        Ok(())
    }
}

#[derive(Args)]
pub struct TipsCommand {}

impl TipsCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let engine = open_engine(config)?;
        println!("{}", engine.shopping_tips());
        Ok(())
    }
}
