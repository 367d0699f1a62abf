//! Volume pricing module.
//!
//! Contains price break tiers and the pure pricing functions.

mod engine;
mod tiers;

pub use engine::{discount_percent, format_percent, line_total, price_for_quantity, PriceSummary};
pub use tiers::{PriceBreak, PriceBreaks};
