//! Quantity price breaks.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A quantity threshold at which a different unit price applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreak {
    /// Smallest quantity that unlocks this tier.
    pub min_qty: i64,
    /// Unit price inside this tier.
    pub price: Money,
    /// Discount percentage advertised next to the tier, if any.
    ///
    /// Display only; the computed discount comes from the prices.
    pub advertised_discount: Option<f64>,
}

impl PriceBreak {
    pub fn new(min_qty: i64, price: Money) -> Self {
        Self {
            min_qty,
            price,
            advertised_discount: None,
        }
    }

    /// Attach the advertised discount label.
    pub fn with_advertised_discount(mut self, percent: f64) -> Self {
        self.advertised_discount = Some(percent);
        self
    }
}

/// The price breaks of one product, held sorted by ascending `min_qty`.
///
/// Thresholds are unique and at least one unit; both are checked on
/// construction so selection never has to break ties.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct PriceBreaks(Vec<PriceBreak>);

impl PriceBreaks {
    /// A product without volume pricing.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Validate and sort the breaks of `product_id`.
    pub fn new(product_id: &ProductId, mut breaks: Vec<PriceBreak>) -> Result<Self, CommerceError> {
        breaks.sort_by_key(|b| b.min_qty);

        if let Some(b) = breaks.iter().find(|b| b.min_qty < 1) {
            return Err(CommerceError::InvalidPriceBreak {
                product_id: product_id.to_string(),
                min_qty: b.min_qty,
            });
        }
        if let Some(b) = breaks.iter().find(|b| b.price.is_negative()) {
            return Err(CommerceError::ValidationError(format!(
                "Product {} has a negative price at quantity {}",
                product_id, b.min_qty
            )));
        }
        if let Some(pair) = breaks.windows(2).find(|w| w[0].min_qty == w[1].min_qty) {
            return Err(CommerceError::DuplicatePriceBreak {
                product_id: product_id.to_string(),
                min_qty: pair[0].min_qty,
            });
        }

        Ok(Self(breaks))
    }

    /// The tier that applies to `quantity`: the largest `min_qty <= quantity`.
    pub fn applicable(&self, quantity: i64) -> Option<&PriceBreak> {
        self.0.iter().rev().find(|b| b.min_qty <= quantity)
    }

    /// Every tier whose threshold `quantity` has reached.
    pub fn reached(&self, quantity: i64) -> impl Iterator<Item = &PriceBreak> {
        self.0.iter().take_while(move |b| b.min_qty <= quantity)
    }

    /// The tier with the largest threshold.
    pub fn highest(&self) -> Option<&PriceBreak> {
        self.0.last()
    }

    /// The next tier above `quantity`, if one exists.
    pub fn next_after(&self, quantity: i64) -> Option<&PriceBreak> {
        self.0.iter().find(|b| b.min_qty > quantity)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PriceBreak> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
