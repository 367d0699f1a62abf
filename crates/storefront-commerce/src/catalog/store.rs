//! The read-only catalog and its JSON document format.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::{Category, Product, ProductStatus, Supplier, ALL};
use crate::error::CommerceError;
use crate::ids::{CategoryId, ProductId, SupplierId};
use crate::money::{Currency, Money};
use crate::pricing::{PriceBreak, PriceBreaks};

const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

/// Catalog file as stored on disk.
///
/// Prices are integers in the currency's minor unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDocument {
    /// Currency code every price is expressed in.
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub suppliers: Vec<Supplier>,
    pub products: Vec<ProductRecord>,
}

fn default_currency() -> String {
    Currency::CLP.code().to_string()
}

/// One product entry of a [`CatalogDocument`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub category: String,
    pub base_price: i64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default)]
    pub price_breaks: Vec<PriceBreakRecord>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub max_quantity: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
}

/// One price break entry of a [`ProductRecord`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakRecord {
    pub min_qty: i64,
    pub price: i64,
    #[serde(default)]
    pub discount: Option<f64>,
}

/// The static product catalog for a session.
///
/// Products are shared behind `Arc` so cart lines can hold them without
/// copying; the catalog itself is never mutated after construction.
#[derive(Debug, Clone)]
pub struct Catalog {
    currency: Currency,
    products: Vec<Arc<Product>>,
    categories: Vec<Category>,
    suppliers: Vec<Supplier>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog from domain values, checking references and ids.
    pub fn new(
        currency: Currency,
        categories: Vec<Category>,
        suppliers: Vec<Supplier>,
        products: Vec<Product>,
    ) -> Result<Self, CommerceError> {
        let category_ids = unique_ids(categories.iter().map(|c| c.id.as_str()), "category")?;
        let supplier_ids = unique_ids(suppliers.iter().map(|s| s.id.as_str()), "supplier")?;

        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            validate_product(product, currency, &category_ids, &supplier_ids)?;
            if index.insert(product.id.clone(), position).is_some() {
                return Err(CommerceError::DuplicateProduct(product.id.to_string()));
            }
        }

        Ok(Self {
            currency,
            products: products.into_iter().map(Arc::new).collect(),
            categories,
            suppliers,
            index,
        })
    }

    /// Parse and validate a catalog document.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    /// Convert a parsed document into a catalog.
    pub fn from_document(document: CatalogDocument) -> Result<Self, CommerceError> {
        let currency = Currency::from_code(&document.currency)
            .ok_or_else(|| CommerceError::UnsupportedCurrency(document.currency.clone()))?;

        let products = document
            .products
            .into_iter()
            .map(|record| record.into_product(currency))
            .collect::<Result<Vec<_>, _>>()?;

        let catalog = Self::new(currency, document.categories, document.suppliers, products)?;
        info!(
            products = catalog.len(),
            categories = catalog.categories.len(),
            suppliers = catalog.suppliers.len(),
            currency = %currency,
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// The catalog bundled with the crate.
    pub fn builtin() -> Result<Self, CommerceError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Arc<Product>] {
        &self.products
    }

    /// Look a product up by id.
    pub fn get(&self, id: &ProductId) -> Option<&Arc<Product>> {
        self.index.get(id).map(|&i| &self.products[i])
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn suppliers(&self) -> &[Supplier] {
        &self.suppliers
    }

    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    pub fn supplier(&self, id: &SupplierId) -> Option<&Supplier> {
        self.suppliers.iter().find(|s| &s.id == id)
    }

    /// Number of distinct categories that have at least one product.
    pub fn category_count(&self) -> usize {
        self.products
            .iter()
            .map(|p| &p.category)
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ProductRecord {
    fn into_product(self, currency: Currency) -> Result<Product, CommerceError> {
        let id = ProductId::new(self.id);
        let breaks = self
            .price_breaks
            .into_iter()
            .map(|b| {
                let tier = PriceBreak::new(b.min_qty, Money::new(b.price, currency));
                match b.discount {
                    Some(percent) => tier.with_advertised_discount(percent),
                    None => tier,
                }
            })
            .collect();
        let price_breaks = PriceBreaks::new(&id, breaks)?;

        Ok(Product {
            id,
            name: self.name,
            sku: self.sku,
            category: CategoryId::new(self.category),
            base_price: Money::new(self.base_price, currency),
            stock: self.stock,
            status: self.status,
            price_breaks,
            colors: self.colors,
            sizes: self.sizes,
            features: self.features,
            supplier: self.supplier.map(SupplierId::new),
            max_quantity: self.max_quantity,
            description: self.description,
        })
    }
}

fn unique_ids<'a>(
    ids: impl Iterator<Item = &'a str>,
    kind: &str,
) -> Result<HashSet<&'a str>, CommerceError> {
    let mut seen = HashSet::new();
    for id in ids {
        if id == ALL {
            return Err(CommerceError::ValidationError(format!(
                "\"{}\" is reserved and cannot be used as a {} id",
                ALL, kind
            )));
        }
        if !seen.insert(id) {
            return Err(CommerceError::ValidationError(format!(
                "Duplicate {} id: {}",
                kind, id
            )));
        }
    }
    Ok(seen)
}

fn validate_product(
    product: &Product,
    currency: Currency,
    categories: &HashSet<&str>,
    suppliers: &HashSet<&str>,
) -> Result<(), CommerceError> {
    let id = product.id.as_str();

    if product.base_price.is_negative() {
        return Err(CommerceError::ValidationError(format!(
            "Product {} has a negative base price",
            id
        )));
    }
    if product.base_price.currency != currency
        || product.price_breaks.iter().any(|b| b.price.currency != currency)
    {
        return Err(CommerceError::ValidationError(format!(
            "Product {} is not priced in {}",
            id, currency
        )));
    }
    if product.stock < 0 {
        return Err(CommerceError::ValidationError(format!(
            "Product {} has negative stock",
            id
        )));
    }
    if product.max_quantity.is_some_and(|max| max < 0) {
        return Err(CommerceError::ValidationError(format!(
            "Product {} has a negative quantity cap",
            id
        )));
    }
    if !categories.contains(product.category.as_str()) {
        return Err(CommerceError::UnknownCategory {
            product_id: id.to_string(),
            category: product.category.to_string(),
        });
    }
    if let Some(supplier) = &product.supplier {
        if !suppliers.contains(supplier.as_str()) {
            return Err(CommerceError::UnknownSupplier {
                product_id: id.to_string(),
                supplier: supplier.to_string(),
            });
        }
    }

    debug!(product = id, tiers = product.price_breaks.len(), "product validated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"{
        "currency": "CLP",
        "categories": [{ "id": "bags", "name": "Bags" }, { "id": "pens", "name": "Pens" }],
        "suppliers": [{ "id": "acme", "name": "Acme" }],
        "products": [
            {
                "id": "1", "name": "Tote Bag", "sku": "BAG-001", "category": "bags",
                "basePrice": 1000, "stock": 120, "status": "active",
                "priceBreaks": [{ "minQty": 50, "price": 800 }, { "minQty": 10, "price": 900, "discount": 10 }],
                "supplier": "acme"
            },
            { "id": "2", "name": "Pen", "sku": "PEN-001", "category": "pens", "basePrice": 300 }
        ]
    }"#;

    #[test]
    fn test_load_document() {
        let catalog = Catalog::from_json(SMALL).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.currency(), Currency::CLP);
        assert_eq!(catalog.category_count(), 2);

        let bag = catalog.get(&ProductId::new("1")).unwrap();
        assert_eq!(bag.base_price, Money::new(1000, Currency::CLP));
        let tiers: Vec<i64> = bag.price_breaks.iter().map(|b| b.min_qty).collect();
        assert_eq!(tiers, vec![10, 50]);
        assert_eq!(bag.price_breaks.iter().next().unwrap().advertised_discount, Some(10.0));

        let pen = catalog.get(&ProductId::new("2")).unwrap();
        assert_eq!(pen.stock, 0);
        assert!(pen.price_breaks.is_empty());
        assert!(pen.colors.is_empty());
        assert_eq!(pen.supplier, None);
    }

    #[test]
    fn test_lookup_tables() {
        let catalog = Catalog::from_json(SMALL).unwrap();
        assert_eq!(catalog.category(&CategoryId::new("pens")).unwrap().name, "Pens");
        assert_eq!(catalog.supplier(&SupplierId::new("acme")).unwrap().name, "Acme");
        assert!(catalog.get(&ProductId::new("99")).is_none());
    }

    #[test]
    fn test_duplicate_break_rejected_at_load() {
        let json = SMALL.replace(r#""minQty": 50"#, r#""minQty": 10"#);
        let err = Catalog::from_json(&json).unwrap_err();
        assert!(matches!(err, CommerceError::DuplicatePriceBreak { .. }));
    }

    #[test]
    fn test_duplicate_product_rejected() {
        let json = SMALL.replace(r#""id": "2""#, r#""id": "1""#);
        let err = Catalog::from_json(&json).unwrap_err();
        assert!(matches!(err, CommerceError::DuplicateProduct(id) if id == "1"));
    }

    #[test]
    fn test_unknown_references_rejected() {
        let json = SMALL.replace(r#""category": "pens""#, r#""category": "mugs""#);
        assert!(matches!(
            Catalog::from_json(&json).unwrap_err(),
            CommerceError::UnknownCategory { .. }
        ));

        let json = SMALL.replace(r#""supplier": "acme""#, r#""supplier": "globex""#);
        assert!(matches!(
            Catalog::from_json(&json).unwrap_err(),
            CommerceError::UnknownSupplier { .. }
        ));
    }

    #[test]
    fn test_reserved_category_id_rejected() {
        let json = SMALL.replace(r#"{ "id": "pens", "name": "Pens" }"#, r#"{ "id": "all", "name": "All" }"#);
        assert!(matches!(
            Catalog::from_json(&json).unwrap_err(),
            CommerceError::ValidationError(_)
        ));
    }

    #[test]
    fn test_negative_values_rejected() {
        let json = SMALL.replace(r#""basePrice": 300"#, r#""basePrice": -1"#);
        assert!(Catalog::from_json(&json).is_err());

        let json = SMALL.replace(r#""stock": 120"#, r#""stock": -5"#);
        assert!(Catalog::from_json(&json).is_err());
    }

    #[test]
    fn test_unsupported_currency() {
        let json = SMALL.replace(r#""currency": "CLP""#, r#""currency": "XYZ""#);
        assert!(matches!(
            Catalog::from_json(&json).unwrap_err(),
            CommerceError::UnsupportedCurrency(code) if code == "XYZ"
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Catalog::from_json("{ not json").unwrap_err(),
            CommerceError::SerializationError(_)
        ));
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.is_empty());
        assert!(catalog.products().iter().any(|p| p.has_price_breaks()));
    }
}
