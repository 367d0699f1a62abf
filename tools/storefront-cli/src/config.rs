//! CLI configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::catalog::{DEFAULT_QUANTITY_CEILING, LOW_STOCK_THRESHOLD};
use storefront_commerce::search::SortOption;
use storefront_commerce::StorefrontSettings;

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorefrontConfig {
    /// Where the catalog comes from.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Session tunables.
    #[serde(default)]
    pub session: SessionConfig,
}

impl StorefrontConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Session settings for the library.
    pub fn settings(&self) -> StorefrontSettings {
        StorefrontSettings {
            toast_ttl: Duration::from_millis(self.session.toast_ttl_ms),
            low_stock_threshold: self.session.low_stock_threshold,
            default_quantity_ceiling: self.session.default_quantity_ceiling,
            default_sort: SortOption::from_key(&self.session.default_sort),
        }
    }
}

/// Catalog source.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// Catalog JSON file. The built-in catalog is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Session configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    /// Toast lifetime in milliseconds (default: 3000).
    #[serde(default = "default_toast_ttl_ms")]
    pub toast_ttl_ms: u64,

    /// Stock below this is shown as low.
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i64,

    /// Quantity ceiling when a product has neither cap nor stock.
    #[serde(default = "default_quantity_ceiling")]
    pub default_quantity_ceiling: i64,

    /// Listing sort key: name, price, stock.
    #[serde(default = "default_sort")]
    pub default_sort: String,
}

fn default_toast_ttl_ms() -> u64 {
    3000
}

fn default_low_stock_threshold() -> i64 {
    LOW_STOCK_THRESHOLD
}

fn default_quantity_ceiling() -> i64 {
    DEFAULT_QUANTITY_CEILING
}

fn default_sort() -> String {
    "name".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            toast_ttl_ms: default_toast_ttl_ms(),
            low_stock_threshold: default_low_stock_threshold(),
            default_quantity_ceiling: default_quantity_ceiling(),
            default_sort: default_sort(),
        }
    }
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Storefront configuration

[catalog]
# path = "catalog.json"

[session]
toast_ttl_ms = {ttl}
low_stock_threshold = {low}
default_quantity_ceiling = {ceiling}
default_sort = "name"
"#,
        ttl = default_toast_ttl_ms(),
        low = LOW_STOCK_THRESHOLD,
        ceiling = DEFAULT_QUANTITY_CEILING,
    )
}
