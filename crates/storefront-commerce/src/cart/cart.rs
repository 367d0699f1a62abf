//! Cart and cart line types.

use std::sync::Arc;

use crate::cart::{CartPricing, LinePricing};
use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::Serialize;
use tracing::{info, warn};

/// A line in the cart.
///
/// Identified by product id plus the selected color and size; two lines
/// with the same key are merged on add.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CartLine {
    /// The product, shared with the catalog.
    pub product: Arc<Product>,
    /// Units ordered. Callers clamp this before adding.
    pub quantity: i64,
    /// Selected color, if the product offers colors.
    pub color: Option<String>,
    /// Selected size, if the product offers sizes.
    pub size: Option<String>,
}

impl CartLine {
    /// Create a line without color or size selection.
    pub fn new(product: Arc<Product>, quantity: i64) -> Self {
        Self {
            product,
            quantity,
            color: None,
            size: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Whether this line has the given identity key.
    pub fn matches(&self, product_id: &ProductId, color: Option<&str>, size: Option<&str>) -> bool {
        &self.product.id == product_id
            && self.color.as_deref() == color
            && self.size.as_deref() == size
    }

    fn same_key(&self, other: &CartLine) -> bool {
        self.matches(&other.product.id, other.color.as_deref(), other.size.as_deref())
    }

    /// Tiered unit price at this line's quantity.
    pub fn unit_price(&self) -> Money {
        self.product.unit_price(self.quantity)
    }

    /// Tiered line total at this line's quantity.
    pub fn total(&self) -> Money {
        self.product.line_total(self.quantity)
    }

    /// Variant label such as "Navy / L".
    pub fn variant_label(&self) -> Option<String> {
        match (&self.color, &self.size) {
            (Some(c), Some(s)) => Some(format!("{} / {}", c, s)),
            (Some(c), None) => Some(c.clone()),
            (None, Some(s)) => Some(s.clone()),
            (None, None) => None,
        }
    }
}

/// A shopping cart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Cart {
    /// Lines in insertion order.
    lines: Vec<CartLine>,
    /// Currency totals are reported in. An empty cart takes the currency
    /// of the first line added.
    currency: Currency,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            lines: Vec::new(),
            currency,
        }
    }

    /// Add a line, merging it into an existing line with the same key.
    ///
    /// No upper bound is enforced here. A line priced in another currency
    /// than the cart's existing lines is rejected and `false` is returned.
    pub fn add(&mut self, line: CartLine) -> bool {
        let line_currency = line.product.base_price.currency;
        if self.lines.is_empty() {
            self.currency = line_currency;
        } else if line_currency != self.currency {
            warn!(
                product = %line.product.id,
                line_currency = %line_currency,
                cart_currency = %self.currency,
                "cart line rejected: currency mismatch"
            );
            return false;
        }

        if let Some(existing) = self.lines.iter_mut().find(|l| l.same_key(&line)) {
            existing.quantity = existing.quantity.saturating_add(line.quantity);
            info!(
                product = %existing.product.id,
                quantity = existing.quantity,
                "cart line increased"
            );
            return true;
        }

        info!(product = %line.product.id, quantity = line.quantity, "cart line added");
        self.lines.push(line);
        true
    }

    /// Remove the line with exactly this key. Returns whether one was removed.
    pub fn remove(&mut self, product_id: &ProductId, color: Option<&str>, size: Option<&str>) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| !l.matches(product_id, color, size));
        let removed = self.lines.len() < len_before;
        if removed {
            info!(product = %product_id, "cart line removed");
        }
        removed
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
        info!("cart cleared");
    }

    /// Sum of every line priced at its own quantity.
    pub fn total(&self) -> Money {
        let totals: Vec<Money> = self.lines.iter().map(CartLine::total).collect();
        Money::sum(totals.iter(), self.currency)
    }

    /// Per-line and cart-wide pricing breakdown.
    pub fn pricing(&self) -> CartPricing {
        let lines: Vec<LinePricing> = self.lines.iter().map(LinePricing::for_line).collect();
        let subtotal = Money::sum(lines.iter().map(|l| &l.base_total), self.currency);
        let grand_total = Money::sum(lines.iter().map(|l| &l.total), self.currency);
        CartPricing {
            discount_total: Money::new(
                subtotal.amount_minor.saturating_sub(grand_total.amount_minor),
                self.currency,
            ),
            subtotal,
            grand_total,
            lines,
        }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Find the line with this key.
    pub fn get(&self, product_id: &ProductId, color: Option<&str>, size: Option<&str>) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.matches(product_id, color, size))
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Total units across lines.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}
