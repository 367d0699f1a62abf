//! Cart pricing breakdown.

use crate::cart::CartLine;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Every line at base price.
    pub subtotal: Money,
    /// Volume discounts across lines.
    pub discount_total: Money,
    /// Amount due (subtotal - discounts).
    pub grand_total: Money,
    /// Per-line breakdown.
    pub lines: Vec<LinePricing>,
}

impl CartPricing {
    /// Check if any tier applies.
    pub fn has_discounts(&self) -> bool {
        self.discount_total.amount_minor > 0
    }

    /// Get discount percentage of subtotal.
    pub fn discount_percentage(&self) -> f64 {
        if self.subtotal.amount_minor == 0 {
            return 0.0;
        }
        (self.discount_total.amount_minor as f64 / self.subtotal.amount_minor as f64) * 100.0
    }
}

/// Pricing breakdown for a single cart line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinePricing {
    pub product_id: ProductId,
    pub product_name: String,
    pub color: Option<String>,
    pub size: Option<String>,
    pub quantity: i64,
    /// Tiered unit price.
    pub unit_price: Money,
    /// Quantity at base price.
    pub base_total: Money,
    /// Quantity at tiered price.
    pub total: Money,
    pub discount_percent: f64,
}

impl LinePricing {
    pub(crate) fn for_line(line: &CartLine) -> Self {
        let summary = line.product.price_summary(line.quantity);
        Self {
            product_id: line.product.id.clone(),
            product_name: line.product.name.clone(),
            color: line.color.clone(),
            size: line.size.clone(),
            quantity: line.quantity,
            unit_price: summary.unit_price,
            base_total: summary.base_total,
            total: summary.total,
            discount_percent: summary.discount_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_discount_percentage() {
        let pricing = CartPricing {
            subtotal: Money::new(10000, Currency::CLP),
            discount_total: Money::new(1000, Currency::CLP),
            grand_total: Money::new(9000, Currency::CLP),
            lines: vec![],
        };

        assert!(pricing.has_discounts());
        assert!((pricing.discount_percentage() - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_empty_cart_percentage() {
        let pricing = CartPricing {
            subtotal: Money::zero(Currency::CLP),
            discount_total: Money::zero(Currency::CLP),
            grand_total: Money::zero(Currency::CLP),
            lines: vec![],
        };
        assert_eq!(pricing.discount_percentage(), 0.0);
        assert!(!pricing.has_discounts());
    }
}
