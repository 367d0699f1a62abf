//! Search filter types.

use crate::catalog::Product;
use crate::ids::{CategoryId, SupplierId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A single product predicate. Filters of a query combine with AND.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Filter {
    /// Exact category match.
    Category(CategoryId),
    /// Exact supplier match.
    Supplier(SupplierId),
    /// Case-insensitive substring of name or SKU. Empty text matches all.
    Text(String),
    /// Base price range. A missing or zero `max` leaves the range open.
    PriceRange {
        min: Option<Money>,
        max: Option<Money>,
    },
}

impl Filter {
    /// Create a category filter.
    pub fn category(id: impl Into<CategoryId>) -> Self {
        Filter::Category(id.into())
    }

    /// Create a supplier filter.
    pub fn supplier(id: impl Into<SupplierId>) -> Self {
        Filter::Supplier(id.into())
    }

    /// Create a text search filter.
    pub fn text(query: impl Into<String>) -> Self {
        Filter::Text(query.into())
    }

    /// Create a price range filter.
    pub fn price_range(min: Option<Money>, max: Option<Money>) -> Self {
        Filter::PriceRange { min, max }
    }

    /// Whether `product` passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Category(id) => &product.category == id,
            Filter::Supplier(id) => product.supplier.as_ref() == Some(id),
            Filter::Text(query) => {
                query.is_empty() || product.matches_text(&query.to_lowercase())
            }
            Filter::PriceRange { min, max } => {
                let price = product.base_price.amount_minor;
                let above_min = min.map_or(true, |m| price >= m.amount_minor);
                let below_max = max
                    .filter(|m| !m.is_zero())
                    .map_or(true, |m| price <= m.amount_minor);
                above_min && below_max
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn clp(amount: i64) -> Money {
        Money::new(amount, Currency::CLP)
    }

    fn cap() -> Product {
        Product::new("3", "CAP-RED-07", "Baseball Cap", "textiles", clp(3500))
            .with_supplier("sur-textil")
    }

    #[test]
    fn test_category_filter() {
        assert!(Filter::category("textiles").matches(&cap()));
        assert!(!Filter::category("bags").matches(&cap()));
    }

    #[test]
    fn test_supplier_filter() {
        assert!(Filter::supplier("sur-textil").matches(&cap()));
        assert!(!Filter::supplier("andes-promo").matches(&cap()));

        let mut no_supplier = cap();
        no_supplier.supplier = None;
        assert!(!Filter::supplier("sur-textil").matches(&no_supplier));
    }

    #[test]
    fn test_text_filter_is_case_insensitive() {
        assert!(Filter::text("BASEBALL").matches(&cap()));
        assert!(Filter::text("red-07").matches(&cap()));
        assert!(Filter::text("").matches(&cap()));
        assert!(!Filter::text("mug").matches(&cap()));
    }

    #[test]
    fn test_price_range_bounds_are_inclusive() {
        assert!(Filter::price_range(Some(clp(3500)), Some(clp(3500))).matches(&cap()));
        assert!(!Filter::price_range(Some(clp(3501)), None).matches(&cap()));
        assert!(!Filter::price_range(None, Some(clp(3499))).matches(&cap()));
    }

    #[test]
    fn test_zero_max_is_open() {
        assert!(Filter::price_range(Some(clp(1000)), Some(clp(0))).matches(&cap()));
    }
}
