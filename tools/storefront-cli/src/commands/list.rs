//! Browse the catalog.

use anyhow::Result;
use serde::Serialize;
use storefront_commerce::catalog::{Product, StockStatus};
use storefront_commerce::search::{SearchQuery, SortOption};

use super::ListArgs;
use crate::context::Context;
use crate::output::{status_badge, stock_badge};

/// One listing row.
#[derive(Debug, Serialize)]
struct ListingRow {
    id: String,
    name: String,
    sku: String,
    category: String,
    price: String,
    /// Highest-tier price, if the product has tiers.
    from_price: Option<String>,
    stock: i64,
    stock_status: StockStatus,
    status: String,
}

/// Run the list command.
pub fn run(args: ListArgs, ctx: &Context) -> Result<()> {
    let store = ctx.storefront()?;
    let sort = args
        .sort
        .as_deref()
        .map(SortOption::from_key)
        .unwrap_or(store.settings().default_sort);

    let query = SearchQuery::from_params(
        &args.category,
        &args.search,
        &args.supplier,
        args.min_price,
        args.max_price,
        "",
        store.catalog().currency(),
    )
    .with_sort(sort);
    ctx.output.debug(&format!("{} active filters", query.filters().len()));

    let products = store.search(&query);
    let rows: Vec<ListingRow> = products
        .iter()
        .map(|p| listing_row(p, store.stock_status(p)))
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&rows);
        return Ok(());
    }

    ctx.output.header(&format!(
        "{} of {} products ({})",
        rows.len(),
        store.catalog().len(),
        sort.display_name()
    ));

    if rows.is_empty() {
        ctx.output.info("No products match these filters.");
        return Ok(());
    }

    let widths = [4, 24, 12, 12, 14];
    ctx.output.table_row(&["ID", "NAME", "SKU", "PRICE", "FROM"], &widths);
    for (row, product) in rows.iter().zip(products.iter()) {
        ctx.output.table_row(
            &[
                &row.id,
                &row.name,
                &row.sku,
                &row.price,
                row.from_price.as_deref().unwrap_or("-"),
            ],
            &widths,
        );
        ctx.output.kv(
            "    stock",
            &format!(
                "{} ({}) {}",
                row.stock,
                stock_badge(row.stock_status),
                status_badge(product.status)
            ),
        );
    }

    Ok(())
}

fn listing_row(product: &Product, stock_status: StockStatus) -> ListingRow {
    ListingRow {
        id: product.id.to_string(),
        name: product.name.clone(),
        sku: product.sku.clone(),
        category: product.category.to_string(),
        price: product.base_price.display(),
        from_price: product.best_tier_price().map(|m| m.display()),
        stock: product.stock,
        stock_status,
        status: product.status.as_str().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_commerce::money::{Currency, Money};
    use storefront_commerce::pricing::{PriceBreak, PriceBreaks};
    use storefront_commerce::ProductId;

    #[test]
    fn test_listing_row_shows_from_price() {
        let id = ProductId::new("1");
        let breaks = PriceBreaks::new(
            &id,
            vec![PriceBreak::new(50, Money::new(2200, Currency::CLP))],
        )
        .unwrap();
        let product = Product::new(id, "BAG-001", "Tote", "bags", Money::new(2500, Currency::CLP))
            .with_stock(4)
            .with_price_breaks(breaks);

        let row = listing_row(&product, product.stock_status());
        assert_eq!(row.price, "$2.500");
        assert_eq!(row.from_price.as_deref(), Some("$2.200"));
        assert_eq!(row.stock_status, StockStatus::Low);
        assert_eq!(row.status, "active");
    }
}
