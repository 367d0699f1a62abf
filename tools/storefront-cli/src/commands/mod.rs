//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod list;
pub mod price;
pub mod quote;

use clap::{Args, Subcommand};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Category id, or "all".
    #[arg(short, long, default_value = "all")]
    pub category: String,

    /// Case-insensitive text matched against name and SKU.
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Supplier id, or "all".
    #[arg(long, default_value = "all")]
    pub supplier: String,

    /// Minimum base price in minor units (0 = no minimum).
    #[arg(long, default_value_t = 0)]
    pub min_price: i64,

    /// Maximum base price in minor units (0 = no maximum).
    #[arg(long, default_value_t = 0)]
    pub max_price: i64,

    /// Sort key: name, price, stock (default: from config).
    #[arg(long)]
    pub sort: Option<String>,
}

/// Arguments for the price command.
#[derive(Args)]
pub struct PriceArgs {
    /// Product id.
    pub product: String,

    /// Quantity to price.
    #[arg(default_value_t = 1)]
    pub quantity: i64,
}

/// Arguments for the quote command.
#[derive(Args)]
pub struct QuoteArgs {
    /// Product id.
    pub product: String,

    /// Quantity to quote.
    pub quantity: i64,

    /// Buyer company name.
    #[arg(long)]
    pub company: Option<String>,

    /// Buyer email.
    #[arg(long)]
    pub email: Option<String>,

    /// Buyer phone.
    #[arg(long)]
    pub phone: Option<String>,

    /// Delivery address.
    #[arg(long)]
    pub address: Option<String>,

    /// Write the quote as JSON to this file.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Never prompt; fail if contact details are missing.
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    /// Line to add: id:qty[:color[:size]]. Repeatable.
    #[arg(short, long = "item", value_name = "ITEM")]
    pub items: Vec<String>,

    /// Line to remove afterwards: id[:color[:size]]. Repeatable.
    #[arg(short, long = "remove", value_name = "KEY")]
    pub removals: Vec<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file and the catalog it points to.
    Validate,
}
