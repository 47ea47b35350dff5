pub mod cli;
pub mod client;
pub mod config;
pub mod filter;
pub mod models;
pub mod output;
pub mod session;

use crate::filter::matcher;
use crate::filter::{FilterExpression, FilterParseError};
use crate::output::TableRow;
use anyhow::Context;
use colored::Colorize;

pub use cli::{Cli, ColorMode, Commands, OutputFormat, ResourceAction, SortOrder, cli_parse};
pub use client::{ApiClient, ApiError, ListOptions};
pub use filter::{EntityFilter, Query, apply};
pub use models::{
    Entity, PantryFilter, PantryItem, Product, ProductCategory, ProductFilter, ShoppingListEntry,
    ShoppingListFilter, User, UserFilter, UserRole, ValidationError,
};
pub use session::{FetchTicket, ListSession};

/// Build a typed resource filter from the --filter expression
fn build_filter<F: Default>(
    filter_expr: &Option<String>,
    convert: fn(&FilterExpression) -> Result<F, FilterParseError>,
) -> Result<F, FilterParseError> {
    if let Some(expr_str) = filter_expr {
        let expr = FilterExpression::parse(expr_str)?;
        convert(&expr)
    } else {
        Ok(F::default())
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_directive = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub async fn run() -> anyhow::Result<()> {
    let cli = cli_parse();
    init_tracing(cli.verbose, cli.quiet);

    // Set up color handling based on user preference
    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }

    let mut config = config::load_config(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(api_url) = &cli.api_url {
        config.api_url = api_url.clone();
    }

    // If in verbose mode, display some diagnostic information
    if cli.verbose > 0 && !cli.quiet {
        eprintln!("Verbosity level: {}", cli.verbose);
        eprintln!("API base URL: {}", config.api_url);
        if let Some(config_path) = &cli.config {
            eprintln!("Config file: {}", config_path.display());
        }
    }

    let client = ApiClient::new(&config)?;

    match &cli.command {
        Commands::Product { action } => {
            run_resource::<Product>(&client, action, matcher::to_product_filter, cli.format).await
        }
        Commands::Pantry { action } => {
            run_resource::<PantryItem>(&client, action, matcher::to_pantry_filter, cli.format).await
        }
        Commands::ShoppingList { action } => {
            run_resource::<ShoppingListEntry>(
                &client,
                action,
                matcher::to_shopping_list_filter,
                cli.format,
            )
            .await
        }
        Commands::User { action } => {
            run_resource::<User>(&client, action, matcher::to_user_filter, cli.format).await
        }
    }
}

/// Execute one resource action. The four resources share every operation;
/// only the entity type and the filter conversion differ.
async fn run_resource<E>(
    client: &ApiClient,
    action: &ResourceAction,
    convert: fn(&FilterExpression) -> Result<E::Filter, FilterParseError>,
    format: OutputFormat,
) -> anyhow::Result<()>
where
    E: Entity + TableRow,
{
    match action {
        ResourceAction::List {
            filter,
            sort_by,
            sort_order,
        } => {
            let parsed = build_filter(filter, convert)?;
            let options = ListOptions {
                sort_by: sort_by.clone(),
                sort_order: *sort_order,
            };

            let session: ListSession<E> = ListSession::new();
            session
                .refresh(client, &parsed, &options)
                .await
                .with_context(|| format!("Failed to fetch {}s", E::KIND))?;

            // Refining with the same filter mirrors what the server already
            // did and keeps the output correct against lenient servers that
            // ignore unknown query parameters.
            let visible = session.refine(&parsed);

            match format {
                OutputFormat::Text => print!("{}", output::format_table(&visible)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&visible)?),
            }
            Ok(())
        }
        ResourceAction::Get { id } => {
            let entity = client
                .get_by_id::<E>(id)
                .await?
                .with_context(|| format!("No {} with id '{}' was found", E::KIND, id))?;

            match format {
                OutputFormat::Text => print!("{}", output::format_detail(&entity)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entity)?),
            }
            Ok(())
        }
        ResourceAction::Add { file } => {
            let raw = std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read '{}'", file.display()))?;
            let mut entity: E = serde_json::from_str(&raw)
                .with_context(|| format!("'{}' does not hold a valid {}", file.display(), E::KIND))?;
            entity.apply_defaults();

            let id = client.add(&entity).await?;
            match format {
                OutputFormat::Text => {
                    println!("{} {} with id {}", "Added".green().bold(), E::KIND, id)
                }
                OutputFormat::Json => println!("{}", serde_json::json!({ "id": id })),
            }
            Ok(())
        }
        ResourceAction::Remove { id } => {
            if client.remove::<E>(id).await? {
                println!("{} {} {}", "Removed".green().bold(), E::KIND, id);
                Ok(())
            } else {
                anyhow::bail!("No {} with id '{}' was found", E::KIND, id)
            }
        }
    }
}
