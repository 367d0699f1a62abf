//! Volume pricing calculations.
//!
//! All functions are pure and total: they fall back to the base price
//! when no tier applies and report a 0% discount whenever the ratio
//! would be undefined.

use crate::catalog::Product;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Unit price for `quantity`, taken from the applicable tier or the base price.
pub fn price_for_quantity(product: &Product, quantity: i64) -> Money {
    product
        .price_breaks
        .applicable(quantity)
        .map(|b| b.price)
        .unwrap_or(product.base_price)
}

/// Tiered unit price times quantity.
pub fn line_total(product: &Product, quantity: i64) -> Money {
    price_for_quantity(product, quantity).multiply(quantity)
}

/// Percentage saved against paying the base price for every unit.
///
/// Returns 0 for products without tiers, for a zero base price and for
/// non-positive quantities.
pub fn discount_percent(product: &Product, quantity: i64) -> f64 {
    if product.price_breaks.is_empty() || quantity <= 0 {
        return 0.0;
    }
    let base_total = product.base_price.multiply(quantity).amount_minor;
    if base_total <= 0 {
        return 0.0;
    }
    let savings = base_total.saturating_sub(line_total(product, quantity).amount_minor);
    (savings as f64 * 100.0) / base_total as f64
}

/// Format a discount percentage with one decimal place (e.g., "12.5%").
pub fn format_percent(percent: f64) -> String {
    format!("{:.1}%", percent)
}

/// Everything the calculator shows for one product and quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSummary {
    /// Quantity priced.
    pub quantity: i64,
    /// Unit price after tiers.
    pub unit_price: Money,
    /// What the quantity would cost at base price.
    pub base_total: Money,
    /// Line total after tiers.
    pub total: Money,
    /// `base_total - total`.
    pub savings: Money,
    /// Savings as a percentage of `base_total`.
    pub discount_percent: f64,
    /// Threshold of the tier in effect, if any.
    pub tier_min_qty: Option<i64>,
}

impl PriceSummary {
    /// Compute the summary for `product` at `quantity`.
    pub fn compute(product: &Product, quantity: i64) -> Self {
        let unit_price = price_for_quantity(product, quantity);
        let total = unit_price.multiply(quantity);
        let base_total = product.base_price.multiply(quantity);
        let savings = Money::new(
            base_total.amount_minor.saturating_sub(total.amount_minor),
            total.currency,
        );
        let summary = Self {
            quantity,
            unit_price,
            base_total,
            total,
            savings,
            discount_percent: discount_percent(product, quantity),
            tier_min_qty: product.price_breaks.applicable(quantity).map(|b| b.min_qty),
        };
        debug!(
            product = %product.id,
            quantity,
            unit_price = summary.unit_price.amount_minor,
            "priced product"
        );
        summary
    }

    /// Whether any volume discount is in effect.
    pub fn has_discount(&self) -> bool {
        self.discount_percent > 0.0
    }
}

impl Product {
    /// See [`price_for_quantity`].
    pub fn unit_price(&self, quantity: i64) -> Money {
        price_for_quantity(self, quantity)
    }

    /// See [`line_total`].
    pub fn line_total(&self, quantity: i64) -> Money {
        line_total(self, quantity)
    }

    /// See [`discount_percent`].
    pub fn discount_percent(&self, quantity: i64) -> f64 {
        discount_percent(self, quantity)
    }

    pub fn price_summary(&self, quantity: i64) -> PriceSummary {
        PriceSummary::compute(self, quantity)
    }

    /// Price of the top tier, shown as the "from" price on listings.
    pub fn best_tier_price(&self) -> Option<Money> {
        self.price_breaks.highest().map(|b| b.price)
    }
}
