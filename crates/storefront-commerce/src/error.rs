//! Commerce error types.

use thiserror::Error;

/// Errors raised at the fallible edges of the storefront: loading the
/// catalog, looking products up by id, adding to the session cart and
/// checking quote contacts. Pricing, filtering and toast operations never
/// return these.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Two products share an id.
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),

    /// Two price breaks of one product share a minimum quantity.
    #[error("Product {product_id} has more than one price break at quantity {min_qty}")]
    DuplicatePriceBreak { product_id: String, min_qty: i64 },

    /// A price break threshold below one unit.
    #[error("Product {product_id} has a price break with minimum quantity {min_qty}")]
    InvalidPriceBreak { product_id: String, min_qty: i64 },

    /// Product references a category missing from the lookup table.
    #[error("Product {product_id} references unknown category {category}")]
    UnknownCategory { product_id: String, category: String },

    /// Product references a supplier missing from the lookup table.
    #[error("Product {product_id} references unknown supplier {supplier}")]
    UnknownSupplier { product_id: String, supplier: String },

    /// Unsupported currency code.
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
