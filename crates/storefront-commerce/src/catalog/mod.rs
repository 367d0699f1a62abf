//! Product catalog module.
//!
//! Contains types for products, categories, suppliers, and the
//! read-only catalog store.

mod category;
mod product;
mod store;

pub use category::{Category, Supplier, ALL};
pub use product::{
    Product, ProductStatus, StockStatus, DEFAULT_QUANTITY_CEILING, LOW_STOCK_THRESHOLD,
};
pub use store::{Catalog, CatalogDocument, PriceBreakRecord, ProductRecord};
