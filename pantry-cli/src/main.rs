use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{
    AddCommand, BuyCommand, CategorizeCommand, ConfigCommand, DietCommand, ExpiryCommand,
    HistoryCommand, HistoryRemoveCommand, ListCommand, RecipesCommand, RemoveCommand,
    ReplaceCommand, ResetCommand, RestockCommand, TipsCommand,
};
use config::Config;

#[derive(Parser)]
#[command(name = "pantry")]
#[command(version)]
#[command(about = "A household grocery list assistant", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add an item to the grocery list
    Add(AddCommand),

    /// Remove an item from the grocery list
    Remove(RemoveCommand),

    /// Swap one list item for another, keeping its position
    Replace(ReplaceCommand),

    /// Show the grocery list
    List(ListCommand),

    /// Record a purchase
    Buy(BuyCommand),

    /// Show items that are likely running low
    Restock(RestockCommand),

    /// Show expiry alerts
    Expiry(ExpiryCommand),

    /// Show the purchase history
    History(HistoryCommand),

    /// Remove a purchase record by index or id
    HistoryRemove(HistoryRemoveCommand),

    /// Suggest recipes from current items
    Recipes(RecipesCommand),

    /// Sort the list into store aisles
    Categorize(CategorizeCommand),

    /// Get a shopping tip for the current list
    Tips(TipsCommand),

    /// Show or set the dietary preference
    Diet(DietCommand),

    /// Show the resolved configuration
    Config(ConfigCommand),

    /// Clear all stored data
    Reset(ResetCommand),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(cli.config)?;

    match &cli.command {
        Some(Commands::Add(cmd)) => cmd.run(&config),
        Some(Commands::Remove(cmd)) => cmd.run(&config),
        Some(Commands::Replace(cmd)) => cmd.run(&config),
        Some(Commands::List(cmd)) => cmd.run(&config),
        Some(Commands::Buy(cmd)) => cmd.run(&config),
        Some(Commands::Restock(cmd)) => cmd.run(&config),
        Some(Commands::Expiry(cmd)) => cmd.run(&config),
        Some(Commands::History(cmd)) => cmd.run(&config),
        Some(Commands::HistoryRemove(cmd)) => cmd.run(&config),
        Some(Commands::Recipes(cmd)) => cmd.run(&config),
        Some(Commands::Categorize(cmd)) => cmd.run(&config),
        Some(Commands::Tips(cmd)) => cmd.run(&config),
        Some(Commands::Diet(cmd)) => cmd.run(&config),
        Some(Commands::Config(cmd)) => cmd.run(&config),
        Some(Commands::Reset(cmd)) => cmd.run(&config),
        None => {
            println!("Use --help to see available commands");
            Ok(())
        }
    }
}
