//! Quote snapshots for the document export collaborator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::Money;
use crate::pricing::format_percent;

/// Who the quote is for.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuyerContact {
    pub company: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl BuyerContact {
    /// Whether every required field is filled in.
    pub fn is_complete(&self) -> bool {
        [&self.company, &self.email, &self.phone]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

/// Computed values for one product at one quantity, plus the buyer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Quote {
    pub product_id: ProductId,
    pub product_name: String,
    pub sku: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub discount_percent: f64,
    pub total: Money,
    pub buyer: BuyerContact,
    pub issued_at: DateTime<Utc>,
}

impl Quote {
    /// Price `product` at `quantity` for `buyer`.
    pub fn new(product: &Product, quantity: i64, buyer: BuyerContact, issued_at: DateTime<Utc>) -> Self {
        let summary = product.price_summary(quantity);
        Self {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            sku: product.sku.clone(),
            quantity,
            unit_price: summary.unit_price,
            discount_percent: summary.discount_percent,
            total: summary.total,
            buyer,
            issued_at,
        }
    }

    /// Human-readable rows, in the order they appear on the document.
    ///
    /// The address and discount rows are omitted when empty.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Quote for {}", self.buyer.company),
            format!("Email: {}", self.buyer.email),
            format!("Phone: {}", self.buyer.phone),
        ];
        if let Some(address) = self.buyer.address.as_deref().filter(|a| !a.is_empty()) {
            lines.push(format!("Address: {}", address));
        }
        lines.push(format!("Product: {}", self.product_name));
        lines.push(format!("Quantity: {} units", self.quantity));
        lines.push(format!("Unit price: {}", self.unit_price.display()));
        if self.discount_percent > 0.0 {
            lines.push(format!("Discount: {}", format_percent(self.discount_percent)));
        }
        lines.push(format!("Total: {}", self.total.display()));
        lines.push(format!("Issued: {}", self.issued_at.format("%Y-%m-%d")));
        lines
    }
}
