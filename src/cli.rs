mod sort;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
pub use sort::SortOrder;
use std::path::PathBuf;

/// A command-line client for a pantry/grocery inventory REST API
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the pantry API, overriding the config file
    #[arg(long, env = "PANTRY_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// When to use colored output
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, global = true)]
    pub color: ColorMode,

    /// Increase diagnostic verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse and manage the product catalog
    Product {
        #[command(subcommand)]
        action: ResourceAction,
    },
    /// Browse and manage what is currently in the pantry
    Pantry {
        #[command(subcommand)]
        action: ResourceAction,
    },
    /// Browse and manage the shopping list
    #[command(name = "shopping-list")]
    ShoppingList {
        #[command(subcommand)]
        action: ResourceAction,
    },
    /// Browse and manage user accounts
    User {
        #[command(subcommand)]
        action: ResourceAction,
    },
}

/// The operations every resource supports.
#[derive(Subcommand)]
pub enum ResourceAction {
    /// List entries, filtered on the server and refined locally
    List {
        /// Filter expression, e.g. 'name:chicken brand:kfc'
        #[arg(short, long)]
        filter: Option<String>,

        /// Field the server should sort by
        #[arg(long)]
        sort_by: Option<String>,

        /// Sort direction, used together with --sort-by
        #[arg(long, value_enum, default_value_t = SortOrder::Asc)]
        sort_order: SortOrder,
    },
    /// Fetch a single entry by its id
    Get {
        /// Server-assigned id of the entry
        id: String,
    },
    /// Create a new entry from a JSON file
    Add {
        /// Path to a JSON file holding the new entry
        file: PathBuf,
    },
    /// Delete an entry by its id
    Remove {
        /// Server-assigned id of the entry
        id: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
