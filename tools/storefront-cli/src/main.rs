//! Storefront CLI - Browse the catalog and build orders from the terminal.
//!
//! Commands:
//! - `storefront list` - List products with filters and sorting
//! - `storefront categories` - List categories
//! - `storefront suppliers` - List suppliers
//! - `storefront price` - Volume pricing for a product and quantity
//! - `storefront quote` - Prepare a quote for a buyer
//! - `storefront cart` - Price a cart of several lines
//! - `storefront config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CartArgs, ConfigArgs, ListArgs, PriceArgs, QuoteArgs};

/// Storefront CLI - Promotional products catalog, pricing and quotes
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    List(ListArgs),

    /// List product categories
    Categories,

    /// List suppliers
    Suppliers,

    /// Show volume pricing for a quantity
    Price(PriceArgs),

    /// Prepare a quote for a buyer
    Quote(QuoteArgs),

    /// Price a cart built from --item lines
    Cart(CartArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::List(args) => commands::list::run(args, &ctx),
        Commands::Categories => commands::catalog::categories(&ctx),
        Commands::Suppliers => commands::catalog::suppliers(&ctx),
        Commands::Price(args) => commands::price::run(args, &ctx),
        Commands::Quote(args) => commands::quote::run(args, &ctx),
        Commands::Cart(args) => commands::cart::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default: warn, or info with --verbose).
fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
