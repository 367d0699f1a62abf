//! Volume pricing calculator.

use anyhow::Result;
use console::style;
use serde::Serialize;
use storefront_commerce::catalog::Product;
use storefront_commerce::pricing::{format_percent, PriceSummary};
use storefront_commerce::ProductId;

use super::PriceArgs;
use crate::context::Context;

/// One price break row, flagged when the quantity has reached it.
#[derive(Debug, Serialize, PartialEq)]
struct TierRow {
    min_qty: i64,
    price: String,
    reached: bool,
}

#[derive(Debug, Serialize)]
struct PriceReport<'a> {
    product: &'a str,
    requested: i64,
    #[serde(flatten)]
    summary: &'a PriceSummary,
    tiers: Vec<TierRow>,
    next_tier: Option<String>,
}

/// Run the price command.
pub fn run(args: PriceArgs, ctx: &Context) -> Result<()> {
    let store = ctx.storefront()?;
    let id = ProductId::new(args.product);
    let product = store.product(&id)?;
    let summary = store.price(&id, args.quantity)?;

    if summary.quantity != args.quantity {
        ctx.output.warn(&format!(
            "Quantity adjusted from {} to {}",
            args.quantity, summary.quantity
        ));
    }

    let report = PriceReport {
        product: &product.name,
        requested: args.quantity,
        summary: &summary,
        tiers: tier_rows(product, summary.quantity),
        next_tier: next_tier_hint(product, summary.quantity),
    };

    if ctx.output.is_json() {
        ctx.output.json(&report);
        return Ok(());
    }

    ctx.output.header(&format!("{} ({})", product.name, product.sku));
    ctx.output.kv("Quantity", &summary.quantity.to_string());
    ctx.output.kv("Unit price", &summary.unit_price.display());
    ctx.output.kv("Total", &summary.total.display());
    if summary.has_discount() {
        ctx.output.kv(
            "You save",
            &format!(
                "{} ({})",
                summary.savings.display(),
                format_percent(summary.discount_percent)
            ),
        );
    }

    if !report.tiers.is_empty() {
        ctx.output.header("Volume pricing");
        for tier in &report.tiers {
            let line = format!("{}+ units: {}", tier.min_qty, tier.price);
            if tier.reached {
                ctx.output.list_item(&style(line).green().to_string());
            } else {
                ctx.output.list_item(&line);
            }
        }
    }
    if let Some(hint) = &report.next_tier {
        ctx.output.info(hint);
    }

    Ok(())
}

fn tier_rows(product: &Product, quantity: i64) -> Vec<TierRow> {
    let reached = product.price_breaks.reached(quantity).count();
    product
        .price_breaks
        .iter()
        .enumerate()
        .map(|(i, b)| TierRow {
            min_qty: b.min_qty,
            price: b.price.display(),
            reached: i < reached,
        })
        .collect()
}

fn next_tier_hint(product: &Product, quantity: i64) -> Option<String> {
    let next = product.price_breaks.next_after(quantity)?;
    Some(format!(
        "Add {} more to pay {} per unit",
        next.min_qty - quantity,
        next.price.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_commerce::catalog::Catalog;

    fn mug() -> Product {
        let catalog = Catalog::builtin().unwrap();
        catalog.get(&ProductId::new("3")).unwrap().as_ref().clone()
    }

    #[test]
    fn test_tier_rows_mark_reached() {
        let rows = tier_rows(&mug(), 40);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].reached);
        assert!(!rows[1].reached);
        assert_eq!(rows[0].price, "$2.900");
    }

    #[test]
    fn test_next_tier_hint() {
        assert_eq!(
            next_tier_hint(&mug(), 40).as_deref(),
            Some("Add 104 more to pay $2.550 per unit")
        );
        assert_eq!(next_tier_hint(&mug(), 144), None);
    }
}
