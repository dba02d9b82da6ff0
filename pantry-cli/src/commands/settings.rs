//! Settings commands: dietary preference, configuration, data reset.

use clap::{Args, Subcommand};

use super::open_engine;
use crate::config::Config;
use pantry_core::Diet;

#[derive(Args)]
pub struct DietCommand {
    #[command(subcommand)]
    pub command: DietSubcommand,
}

#[derive(Subcommand)]
pub enum DietSubcommand {
    /// Show the current dietary preference
    Show,

    /// Set the dietary preference
    Set {
        /// One of: none, vegan, vegetarian, gluten-free, halal
        diet: String,
    },
}

impl DietCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            DietSubcommand::Show => {
                let engine = open_engine(config)?;
                println!("Dietary preference: {}", engine.preferences().diet);
            }
            DietSubcommand::Set { diet } => {
                let diet: Diet = diet.parse()?;
                let mut engine = open_engine(config)?;
                engine.set_diet(diet)?;
                println!("Dietary preference set to {}", diet);
            }
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct ConfigCommand {}

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        println!(
            "data_path: {} ({})",
            config.data_path.value.display(),
            config.data_path.source
        );
        match &config.config_file {
            Some(path) => println!("config_file: {}", path.display()),
            None => println!("config_file: (none)"),
        }
        if config.oracle.is_configured() {
            println!("oracle.url: {}", config.oracle.url.as_deref().unwrap_or(""));
            println!(
                "oracle.model: {}",
                config.oracle.model.as_deref().unwrap_or("(endpoint default)")
            );
            println!(
                "oracle.api_key: {}",
                if config.oracle.api_key.is_some() {
                    "(set)"
                } else {
                    "(not set)"
                }
            );
            println!("oracle.timeout_secs: {}", config.oracle.timeout_secs.unwrap_or(15));
        } else {
            println!("oracle: not configured");
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct ResetCommand {}

impl ResetCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let mut engine = open_engine(config)?;
        engine.reset()?;
        println!("All data cleared.");
        Ok(())
    }
}
