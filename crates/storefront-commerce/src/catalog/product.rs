//! Product types.

use crate::ids::{CategoryId, ProductId, SupplierId};
use crate::money::Money;
use crate::pricing::PriceBreaks;
use serde::{Deserialize, Serialize};

/// Quantity ceiling used when a product has neither a cap nor stock.
pub const DEFAULT_QUANTITY_CEILING: i64 = 10_000;

/// Stock level below which a product is flagged as running low.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Product status in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    /// Product is active and can be ordered.
    #[default]
    Active,
    /// Product is listed but cannot be ordered.
    Inactive,
    /// Product is announced and not yet available.
    Pending,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Active => "active",
            ProductStatus::Inactive => "inactive",
            ProductStatus::Pending => "pending",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(ProductStatus::Active),
            "inactive" => Some(ProductStatus::Inactive),
            "pending" => Some(ProductStatus::Pending),
            _ => None,
        }
    }

    /// Badge text for listings.
    pub fn label(&self) -> &'static str {
        match self {
            ProductStatus::Active => "Available",
            ProductStatus::Inactive => "Unavailable",
            ProductStatus::Pending => "Coming soon",
        }
    }
}

/// Stock badge shown on product cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    OutOfStock,
    Low,
    InStock,
}

impl StockStatus {
    /// Classify a stock level against a low-stock threshold.
    pub fn classify(stock: i64, low_threshold: i64) -> Self {
        if stock <= 0 {
            StockStatus::OutOfStock
        } else if stock < low_threshold {
            StockStatus::Low
        } else {
            StockStatus::InStock
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "out of stock",
            StockStatus::Low => "low stock",
            StockStatus::InStock => "in stock",
        }
    }
}

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Stock keeping unit.
    pub sku: String,
    /// Category this product is listed under.
    pub category: CategoryId,
    /// Unit price without volume discounts.
    pub base_price: Money,
    /// Units on hand.
    pub stock: i64,
    /// Product visibility status.
    pub status: ProductStatus,
    /// Volume pricing tiers.
    pub price_breaks: PriceBreaks,
    /// Selectable colors.
    pub colors: Vec<String>,
    /// Selectable sizes.
    pub sizes: Vec<String>,
    /// Feature tags shown on the card.
    pub features: Vec<String>,
    /// Supplier, if known.
    pub supplier: Option<SupplierId>,
    /// Per-order quantity cap.
    pub max_quantity: Option<i64>,
    /// Longer description.
    pub description: Option<String>,
}

impl Product {
    /// Create an active product with no stock, tiers or options.
    pub fn new(
        id: impl Into<ProductId>,
        sku: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<CategoryId>,
        base_price: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sku: sku.into(),
            category: category.into(),
            base_price,
            stock: 0,
            status: ProductStatus::Active,
            price_breaks: PriceBreaks::empty(),
            colors: Vec::new(),
            sizes: Vec::new(),
            features: Vec::new(),
            supplier: None,
            max_quantity: None,
            description: None,
        }
    }

    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_status(mut self, status: ProductStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_price_breaks(mut self, breaks: PriceBreaks) -> Self {
        self.price_breaks = breaks;
        self
    }

    pub fn with_supplier(mut self, supplier: impl Into<SupplierId>) -> Self {
        self.supplier = Some(supplier.into());
        self
    }

    pub fn with_max_quantity(mut self, max: i64) -> Self {
        self.max_quantity = Some(max);
        self
    }

    pub fn with_colors(mut self, colors: Vec<String>) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_sizes(mut self, sizes: Vec<String>) -> Self {
        self.sizes = sizes;
        self
    }

    /// Check if the product can be ordered.
    pub fn is_available(&self) -> bool {
        self.status == ProductStatus::Active
    }

    /// Check if the product has volume pricing.
    pub fn has_price_breaks(&self) -> bool {
        !self.price_breaks.is_empty()
    }

    /// Largest quantity a buyer may select.
    ///
    /// The explicit cap wins, then stock, then [`DEFAULT_QUANTITY_CEILING`].
    /// Zero counts as unset for both the cap and stock.
    pub fn quantity_ceiling(&self) -> i64 {
        self.quantity_ceiling_or(DEFAULT_QUANTITY_CEILING)
    }

    /// Like [`quantity_ceiling`](Self::quantity_ceiling) with a caller-chosen fallback.
    pub fn quantity_ceiling_or(&self, fallback: i64) -> i64 {
        self.max_quantity
            .filter(|&max| max > 0)
            .or_else(|| Some(self.stock).filter(|&stock| stock > 0))
            .unwrap_or(fallback)
    }

    /// Clamp a requested quantity into `1..=quantity_ceiling()`.
    pub fn clamp_quantity(&self, requested: i64) -> i64 {
        requested.max(1).min(self.quantity_ceiling())
    }

    /// Stock badge using [`LOW_STOCK_THRESHOLD`].
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::classify(self.stock, LOW_STOCK_THRESHOLD)
    }

    /// Case-insensitive substring match on name or SKU.
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn matches_text(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.sku.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn pen() -> Product {
        Product::new(
            "7",
            "PEN-BLU-01",
            "Metal Pen",
            "writing",
            Money::new(450, Currency::CLP),
        )
    }

    #[test]
    fn test_product_creation() {
        let product = pen();
        assert_eq!(product.sku, "PEN-BLU-01");
        assert!(product.is_available());
        assert!(!product.has_price_breaks());
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(ProductStatus::from_str("Pending"), Some(ProductStatus::Pending));
        assert_eq!(ProductStatus::from_str("archived"), None);
        assert!(!pen().with_status(ProductStatus::Inactive).is_available());
    }

    #[test]
    fn test_quantity_ceiling_prefers_cap() {
        let product = pen().with_stock(300).with_max_quantity(50);
        assert_eq!(product.quantity_ceiling(), 50);
        assert_eq!(product.clamp_quantity(80), 50);
    }

    #[test]
    fn test_quantity_ceiling_falls_back_to_stock() {
        let product = pen().with_stock(300);
        assert_eq!(product.quantity_ceiling(), 300);

        let product = pen().with_stock(300).with_max_quantity(0);
        assert_eq!(product.quantity_ceiling(), 300);
    }

    #[test]
    fn test_quantity_ceiling_default() {
        assert_eq!(pen().quantity_ceiling(), DEFAULT_QUANTITY_CEILING);
    }

    #[test]
    fn test_clamp_raises_to_one() {
        let product = pen().with_stock(20);
        assert_eq!(product.clamp_quantity(0), 1);
        assert_eq!(product.clamp_quantity(-4), 1);
        assert_eq!(product.clamp_quantity(12), 12);
    }

    #[test]
    fn test_stock_status() {
        assert_eq!(pen().stock_status(), StockStatus::OutOfStock);
        assert_eq!(pen().with_stock(9).stock_status(), StockStatus::Low);
        assert_eq!(pen().with_stock(10).stock_status(), StockStatus::InStock);
    }

    #[test]
    fn test_text_match() {
        let product = pen();
        assert!(product.matches_text("metal"));
        assert!(product.matches_text("blu-01"));
        assert!(!product.matches_text("mug"));
    }
}
