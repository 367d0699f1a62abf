//! Storefront domain types and logic for a promotional-products catalog.
//!
//! - **Catalog**: Products, categories, suppliers, the read-only store
//! - **Pricing**: Volume price breaks, unit price, line totals, discounts
//! - **Search**: Category, supplier, text and price filters with sorting
//! - **Cart**: Lines keyed by product and variant, totals
//! - **Notify**: Short-lived toasts with per-toast deadlines
//! - **Quote**: Priced snapshots for document export
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use storefront_commerce::prelude::*;
//!
//! let catalog = Arc::new(Catalog::builtin().unwrap());
//! let mut store = Storefront::new(catalog);
//!
//! let tote = ProductId::new("1");
//! store.add_to_cart(&tote, 120, Some("Navy"), None).unwrap();
//!
//! println!("Total: {}", store.cart_total().display());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod notify;
pub mod pricing;
pub mod quote;
pub mod search;
pub mod storefront;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};
pub use storefront::{Storefront, StorefrontSettings};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Catalog, Category, Product, ProductStatus, StockStatus, Supplier};

    // Pricing
    pub use crate::pricing::{
        discount_percent, line_total, price_for_quantity, PriceBreak, PriceBreaks, PriceSummary,
    };

    // Search
    pub use crate::search::{Filter, SearchQuery, SortOption};

    // Cart
    pub use crate::cart::{Cart, CartLine, CartPricing, LinePricing};

    // Notifications and quotes
    pub use crate::notify::{Severity, Toast, ToastQueue};
    pub use crate::quote::{BuyerContact, Quote};

    pub use crate::storefront::{Storefront, StorefrontSettings};
}
