//! Catalog query: filter criteria plus sort order.

use std::cmp::Reverse;

use crate::catalog::{Catalog, Product, ALL};
use crate::ids::{CategoryId, SupplierId};
use crate::money::{Currency, Money};
use crate::search::Filter;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Sort options for the product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Name A-Z, ignoring case.
    #[default]
    Name,
    /// Base price, low to high.
    Price,
    /// Stock, most available first.
    Stock,
    /// Catalog order.
    Unsorted,
}

impl SortOption {
    /// Parse the UI sort key. Unknown keys keep catalog order.
    pub fn from_key(key: &str) -> Self {
        match key {
            "name" => SortOption::Name,
            "price" => SortOption::Price,
            "stock" => SortOption::Stock,
            _ => SortOption::Unsorted,
        }
    }

    pub fn as_key(&self) -> &'static str {
        match self {
            SortOption::Name => "name",
            SortOption::Price => "price",
            SortOption::Stock => "stock",
            SortOption::Unsorted => "none",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Name => "Name: A-Z",
            SortOption::Price => "Price",
            SortOption::Stock => "Available stock",
            SortOption::Unsorted => "Catalog order",
        }
    }

    /// Stable in-place sort of `products`.
    fn sort(&self, products: &mut [&Product]) {
        match self {
            SortOption::Name => products.sort_by_cached_key(|p| p.name.to_lowercase()),
            SortOption::Price => products.sort_by_key(|p| p.base_price.amount_minor),
            SortOption::Stock => products.sort_by_key(|p| Reverse(p.stock)),
            SortOption::Unsorted => {}
        }
    }
}

/// Filter criteria and sort order for the product list.
///
/// `None` for category or supplier means "all". The default query
/// returns the whole catalog sorted by name.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SearchQuery {
    pub category: Option<CategoryId>,
    pub search: String,
    pub supplier: Option<SupplierId>,
    pub price_min: Option<Money>,
    /// Upper price bound; zero means unbounded.
    pub price_max: Option<Money>,
    pub sort: SortOption,
}

impl SearchQuery {
    /// Create a query with default criteria.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a query from the string form the filter bar uses: `"all"`
    /// selectors, price bounds in minor units with 0 meaning unset, and
    /// the sort keys accepted by [`SortOption::from_key`].
    pub fn from_params(
        category: &str,
        search: &str,
        supplier: &str,
        price_min: i64,
        price_max: i64,
        sort: &str,
        currency: Currency,
    ) -> Self {
        let bound = |amount: i64| (amount != 0).then(|| Money::new(amount, currency));
        Self {
            category: selector(category).map(CategoryId::new),
            search: search.to_string(),
            supplier: selector(supplier).map(SupplierId::new),
            price_min: bound(price_min),
            price_max: bound(price_max),
            sort: SortOption::from_key(sort),
        }
    }

    /// Restrict to one category.
    pub fn with_category(mut self, id: impl Into<CategoryId>) -> Self {
        self.category = Some(id.into());
        self
    }

    /// Set the text query.
    pub fn with_search(mut self, q: impl Into<String>) -> Self {
        self.search = q.into();
        self
    }

    /// Restrict to one supplier.
    pub fn with_supplier(mut self, id: impl Into<SupplierId>) -> Self {
        self.supplier = Some(id.into());
        self
    }

    /// Set the price range.
    pub fn with_price_range(mut self, min: Option<Money>, max: Option<Money>) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Clear every criterion and restore the default sort.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The active filters. Passthrough criteria produce no filter.
    pub fn filters(&self) -> Vec<Filter> {
        let mut filters = Vec::new();
        if let Some(category) = &self.category {
            filters.push(Filter::Category(category.clone()));
        }
        if !self.search.is_empty() {
            filters.push(Filter::Text(self.search.clone()));
        }
        if let Some(supplier) = &self.supplier {
            filters.push(Filter::Supplier(supplier.clone()));
        }
        if self.price_min.is_some() || self.price_max.is_some() {
            filters.push(Filter::price_range(self.price_min, self.price_max));
        }
        filters
    }

    /// Run the query against `catalog`, returning a freshly ordered list.
    pub fn apply<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        let filters = self.filters();
        let mut matched: Vec<&Product> = catalog
            .products()
            .iter()
            .map(|p| p.as_ref())
            .filter(|p| filters.iter().all(|f| f.matches(p)))
            .collect();
        self.sort.sort(&mut matched);

        debug!(
            filters = filters.len(),
            sort = self.sort.as_key(),
            matched = matched.len(),
            total = catalog.len(),
            "catalog filtered"
        );
        matched
    }
}

fn selector(value: &str) -> Option<&str> {
    (value != ALL).then_some(value)
}
