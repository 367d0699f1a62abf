//! Session context tying the catalog, cart and toast queue together.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::cart::{Cart, CartLine, CartPricing};
use crate::catalog::{Catalog, Product, StockStatus, DEFAULT_QUANTITY_CEILING, LOW_STOCK_THRESHOLD};
use crate::error::CommerceError;
use crate::ids::{ProductId, ToastId};
use crate::money::Money;
use crate::notify::{Severity, Toast, ToastQueue, DEFAULT_TOAST_TTL};
use crate::pricing::PriceSummary;
use crate::quote::{BuyerContact, Quote};
use crate::search::{SearchQuery, SortOption};

/// Tunables for a session.
#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontSettings {
    /// How long each toast stays visible.
    pub toast_ttl: Duration,
    /// Stock below this is flagged as low.
    pub low_stock_threshold: i64,
    /// Quantity ceiling for products with neither cap nor stock.
    pub default_quantity_ceiling: i64,
    /// Sort applied by [`Storefront::default_query`].
    pub default_sort: SortOption,
}

impl Default for StorefrontSettings {
    fn default() -> Self {
        Self {
            toast_ttl: DEFAULT_TOAST_TTL,
            low_stock_threshold: LOW_STOCK_THRESHOLD,
            default_quantity_ceiling: DEFAULT_QUANTITY_CEILING,
            default_sort: SortOption::default(),
        }
    }
}

/// One shopper's session.
#[derive(Debug)]
pub struct Storefront {
    catalog: Arc<Catalog>,
    cart: Cart,
    toasts: ToastQueue,
    settings: StorefrontSettings,
}

impl Storefront {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_settings(catalog, StorefrontSettings::default())
    }

    pub fn with_settings(catalog: Arc<Catalog>, settings: StorefrontSettings) -> Self {
        Self {
            cart: Cart::new(catalog.currency()),
            toasts: ToastQueue::with_ttl(settings.toast_ttl),
            catalog,
            settings,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn settings(&self) -> &StorefrontSettings {
        &self.settings
    }

    /// A query with no filters and the configured sort.
    pub fn default_query(&self) -> SearchQuery {
        SearchQuery::new().with_sort(self.settings.default_sort)
    }

    /// Run a query against the session's catalog.
    pub fn search(&self, query: &SearchQuery) -> Vec<&Product> {
        query.apply(&self.catalog)
    }

    /// Look up a product.
    pub fn product(&self, id: &ProductId) -> Result<&Arc<Product>, CommerceError> {
        self.catalog.get(id).ok_or_else(|| {
            warn!(product = %id, "product lookup failed");
            CommerceError::ProductNotFound(id.to_string())
        })
    }

    /// Clamp a requested quantity into `1..=ceiling` for `product`.
    ///
    /// Never returns less than one, even when the configured fallback
    /// ceiling is zero or negative.
    pub fn clamp_quantity(&self, product: &Product, requested: i64) -> i64 {
        let ceiling = product
            .quantity_ceiling_or(self.settings.default_quantity_ceiling)
            .max(1);
        requested.max(1).min(ceiling)
    }

    /// Stock badge using the configured threshold.
    pub fn stock_status(&self, product: &Product) -> StockStatus {
        StockStatus::classify(product.stock, self.settings.low_stock_threshold)
    }

    /// Pricing for `quantity` units of a product, clamped.
    pub fn price(&self, id: &ProductId, quantity: i64) -> Result<PriceSummary, CommerceError> {
        let product = self.product(id)?;
        Ok(product.price_summary(self.clamp_quantity(product, quantity)))
    }

    /// Add a product to the cart and confirm with a toast.
    ///
    /// The quantity is clamped first; the clamped value is returned. An
    /// unknown id leaves the cart untouched and queues an error toast.
    pub fn add_to_cart(
        &mut self,
        id: &ProductId,
        quantity: i64,
        color: Option<&str>,
        size: Option<&str>,
    ) -> Result<i64, CommerceError> {
        let product = match self.catalog.get(id) {
            Some(product) => Arc::clone(product),
            None => {
                warn!(product = %id, "add to cart failed: unknown product");
                self.toasts.push(format!("Product {} not found", id), Severity::Error);
                return Err(CommerceError::ProductNotFound(id.to_string()));
            }
        };

        let quantity = self.clamp_quantity(&product, quantity);
        let message = format!("{} added to cart", product.name);
        let product_name = product.name.clone();

        let mut line = CartLine::new(product, quantity);
        if let Some(color) = color {
            line = line.with_color(color);
        }
        if let Some(size) = size {
            line = line.with_size(size);
        }
        if !self.cart.add(line) {
            self.toasts.push(format!("{} cannot be added to this cart", product_name), Severity::Error);
            return Err(CommerceError::ValidationError(format!(
                "product {} is not priced in {}",
                id,
                self.cart.currency()
            )));
        }
        self.toasts.push(message, Severity::Success);
        Ok(quantity)
    }

    /// Remove the line with exactly this key.
    pub fn remove_from_cart(&mut self, id: &ProductId, color: Option<&str>, size: Option<&str>) -> bool {
        self.cart.remove(id, color, size)
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    pub fn cart_total(&self) -> Money {
        self.cart.total()
    }

    pub fn cart_pricing(&self) -> CartPricing {
        self.cart.pricing()
    }

    /// Build a quote for the export collaborator.
    pub fn quote(
        &self,
        id: &ProductId,
        quantity: i64,
        buyer: BuyerContact,
        issued_at: DateTime<Utc>,
    ) -> Result<Quote, CommerceError> {
        let product = self.product(id)?;
        if !buyer.is_complete() {
            return Err(CommerceError::ValidationError(
                "company, email and phone are required".to_string(),
            ));
        }
        let quote = Quote::new(product, self.clamp_quantity(product, quantity), buyer, issued_at);
        info!(product = %id, quantity = quote.quantity, total = %quote.total, "quote prepared");
        Ok(quote)
    }

    /// Queue a toast.
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) -> ToastId {
        self.toasts.push(message, severity)
    }

    /// Drop toasts whose deadline passed at `now`.
    pub fn expire_toasts(&mut self, now: Instant) -> Vec<Toast> {
        self.toasts.expire(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn session() -> Storefront {
        Storefront::new(Arc::new(Catalog::builtin().unwrap()))
    }

    fn id(raw: &str) -> ProductId {
        ProductId::new(raw)
    }

    fn buyer() -> BuyerContact {
        BuyerContact {
            company: "Cordillera Ltda".to_string(),
            email: "compras@cordillera.cl".to_string(),
            phone: "+56 2 2345 6789".to_string(),
            address: None,
        }
    }

    #[test]
    fn test_add_to_cart_confirms_with_toast() {
        let mut store = session();
        let added = store.add_to_cart(&id("1"), 60, Some("Navy"), None).unwrap();

        assert_eq!(added, 60);
        assert_eq!(store.cart().len(), 1);
        assert_eq!(store.cart_total().amount_minor, 60 * 2200);

        let toast = store.toasts().active().next().unwrap();
        assert_eq!(toast.message, "Cotton Tote Bag added to cart");
        assert_eq!(toast.severity, Severity::Success);
    }

    #[test]
    fn test_add_unknown_product() {
        let mut store = session();
        let err = store.add_to_cart(&id("404"), 1, None, None).unwrap_err();

        assert!(matches!(err, CommerceError::ProductNotFound(ref p) if p == "404"));
        assert!(store.cart().is_empty());
        assert_eq!(store.toasts().active().next().unwrap().severity, Severity::Error);
    }

    #[test]
    fn test_add_clamps_quantity() {
        let mut store = session();
        // Charger caps at 50 per order.
        assert_eq!(store.add_to_cart(&id("10"), 80, None, None).unwrap(), 50);
        // Bottle has 7 in stock and no cap.
        assert_eq!(store.add_to_cart(&id("4"), 20, None, None).unwrap(), 7);
        assert_eq!(store.add_to_cart(&id("4"), -3, Some("Green"), None).unwrap(), 1);
    }

    #[test]
    fn test_default_ceiling_from_settings() {
        let settings = StorefrontSettings {
            default_quantity_ceiling: 25,
            ..StorefrontSettings::default()
        };
        let store = Storefront::with_settings(Arc::new(Catalog::builtin().unwrap()), settings);
        // The notebook has neither cap nor stock.
        let notebook = store.product(&id("6")).unwrap();
        assert_eq!(store.clamp_quantity(notebook, 1000), 25);
    }

    #[test]
    fn test_non_positive_default_ceiling_still_adds_one() {
        let settings = StorefrontSettings {
            default_quantity_ceiling: 0,
            ..StorefrontSettings::default()
        };
        let mut store = Storefront::with_settings(Arc::new(Catalog::builtin().unwrap()), settings);

        assert_eq!(store.add_to_cart(&id("6"), 5, None, None).unwrap(), 1);
        assert_eq!(store.cart().lines()[0].quantity, 1);

        let notebook = store.product(&id("6")).unwrap();
        assert_eq!(store.clamp_quantity(notebook, -4), 1);
    }

    #[test]
    fn test_cart_total_in_catalog_currency() {
        let mut store = session();
        store.add_to_cart(&id("3"), 10, None, None).unwrap();
        assert_eq!(store.cart_total().currency, store.catalog().currency());
        assert!(!store.cart_total().is_zero());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut store = session();
        store.add_to_cart(&id("7"), 24, Some("Navy"), Some("L")).unwrap();
        store.add_to_cart(&id("3"), 10, None, None).unwrap();

        assert!(!store.remove_from_cart(&id("7"), Some("Navy"), Some("M")));
        assert!(store.remove_from_cart(&id("7"), Some("Navy"), Some("L")));
        assert_eq!(store.cart().len(), 1);

        store.clear_cart();
        assert!(store.cart().is_empty());
        assert!(store.cart_total().is_zero());
    }

    #[test]
    fn test_price_lookup() {
        let store = session();
        let summary = store.price(&id("5"), 1000).unwrap();
        assert_eq!(summary.unit_price.amount_minor, 480);
        assert!(store.price(&id("missing"), 1).is_err());
    }

    #[test]
    fn test_stock_status_threshold() {
        let settings = StorefrontSettings {
            low_stock_threshold: 100,
            ..StorefrontSettings::default()
        };
        let store = Storefront::with_settings(Arc::new(Catalog::builtin().unwrap()), settings);
        assert_eq!(store.stock_status(store.product(&id("10")).unwrap()), StockStatus::Low);
        assert_eq!(store.stock_status(store.product(&id("6")).unwrap()), StockStatus::OutOfStock);
        assert_eq!(store.stock_status(store.product(&id("1")).unwrap()), StockStatus::InStock);
    }

    #[test]
    fn test_quote() {
        let store = session();
        let issued = Utc.with_ymd_and_hms(2026, 5, 2, 9, 30, 0).unwrap();
        let quote = store.quote(&id("9"), 250, buyer(), issued).unwrap();
        assert_eq!(quote.unit_price.amount_minor, 4490);
        assert_eq!(quote.total.amount_minor, 250 * 4490);

        let mut incomplete = buyer();
        incomplete.email.clear();
        assert!(matches!(
            store.quote(&id("9"), 250, incomplete, issued),
            Err(CommerceError::ValidationError(_))
        ));
    }

    #[test]
    fn test_toasts_expire() {
        let mut store = session();
        store.add_to_cart(&id("1"), 1, None, None).unwrap();
        store.notify("Filters cleared", Severity::Info);
        assert_eq!(store.toasts().len(), 2);

        let later = Instant::now() + store.settings().toast_ttl;
        assert_eq!(store.expire_toasts(later).len(), 2);
        assert!(store.toasts().is_empty());
    }

    #[test]
    fn test_default_query_uses_configured_sort() {
        let settings = StorefrontSettings {
            default_sort: SortOption::Price,
            ..StorefrontSettings::default()
        };
        let store = Storefront::with_settings(Arc::new(Catalog::builtin().unwrap()), settings);
        let results = store.search(&store.default_query());
        assert_eq!(results.len(), store.catalog().len());
        assert_eq!(results[0].name, "Metal Ballpoint Pen");
    }
}
