//! Build a cart from command-line lines.

use anyhow::{bail, Context as _, Result};
use serde::Serialize;
use storefront_commerce::cart::CartPricing;
use storefront_commerce::pricing::format_percent;
use storefront_commerce::{ProductId, Storefront};
use tracing::debug;

use super::CartArgs;
use crate::context::Context;

/// A parsed `id:qty[:color[:size]]` argument.
#[derive(Debug, PartialEq)]
struct ItemSpec {
    product: ProductId,
    quantity: i64,
    color: Option<String>,
    size: Option<String>,
}

/// A parsed `id[:color[:size]]` argument.
#[derive(Debug, PartialEq)]
struct LineKey {
    product: ProductId,
    color: Option<String>,
    size: Option<String>,
}

/// A toast as it appears in JSON output.
#[derive(Debug, Serialize, PartialEq)]
struct ToastRow {
    severity: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
struct CartReport<'a> {
    #[serde(flatten)]
    pricing: &'a CartPricing,
    toasts: Vec<ToastRow>,
    warnings: Vec<String>,
}

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.storefront()?;

    if args.items.is_empty() {
        bail!("Nothing to add. Pass at least one --item id:qty[:color[:size]]");
    }

    let warnings = fill_cart(&mut store, &args)?;
    let pricing = store.cart_pricing();

    if ctx.output.is_json() {
        ctx.output.json(&CartReport {
            pricing: &pricing,
            toasts: toast_rows(&store),
            warnings,
        });
        return Ok(());
    }

    for toast in store.toasts().active() {
        ctx.output.toast(toast);
    }
    for warning in &warnings {
        ctx.output.warn(warning);
    }

    let cart = store.cart();
    ctx.output.header(&format!("Cart ({} lines, {} units)", cart.len(), cart.item_count()));
    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return Ok(());
    }

    let widths = [24, 14, 6, 10, 12, 6];
    ctx.output
        .table_row(&["PRODUCT", "VARIANT", "QTY", "UNIT", "TOTAL", "SAVE"], &widths);
    for (cart_line, line) in cart.lines().iter().zip(&pricing.lines) {
        let variant = cart_line.variant_label().unwrap_or_else(|| "-".to_string());
        let save = if line.discount_percent > 0.0 {
            format_percent(line.discount_percent)
        } else {
            String::new()
        };
        ctx.output.table_row(
            &[
                &line.product_name,
                &variant,
                &line.quantity.to_string(),
                &line.unit_price.display(),
                &line.total.display(),
                &save,
            ],
            &widths,
        );
    }

    ctx.output.kv("Subtotal", &pricing.subtotal.display());
    if pricing.has_discounts() {
        ctx.output.kv(
            "Volume discount",
            &format!(
                "-{} ({})",
                pricing.discount_total.display(),
                format_percent(pricing.discount_percentage())
            ),
        );
    }
    ctx.output.kv("Total", &store.cart_total().display());

    Ok(())
}

/// Apply the `--item` and `--remove` arguments in order.
///
/// Returns a warning for every adjusted quantity and every removal that
/// matched nothing. Failed adds are reported through the toast queue.
fn fill_cart(store: &mut Storefront, args: &CartArgs) -> Result<Vec<String>> {
    let mut warnings = Vec::new();

    for raw in &args.items {
        let item = parse_item(raw)?;
        let added = store.add_to_cart(
            &item.product,
            item.quantity,
            item.color.as_deref(),
            item.size.as_deref(),
        );
        match added {
            Ok(quantity) if quantity != item.quantity => warnings.push(format!(
                "{}: quantity adjusted from {} to {}",
                item.product, item.quantity, quantity
            )),
            Ok(_) => {}
            Err(e) => debug!(item = %raw, error = %e, "cart item skipped"),
        }
    }

    for raw in &args.removals {
        let key = parse_key(raw)?;
        if !store.remove_from_cart(&key.product, key.color.as_deref(), key.size.as_deref()) {
            warnings.push(format!("No cart line matches '{}'", raw));
        }
    }

    Ok(warnings)
}

fn toast_rows(store: &Storefront) -> Vec<ToastRow> {
    store
        .toasts()
        .active()
        .map(|t| ToastRow {
            severity: t.severity.as_str(),
            message: t.message.clone(),
        })
        .collect()
}

fn parse_item(raw: &str) -> Result<ItemSpec> {
    let mut parts = raw.splitn(4, ':');
    let product = non_empty(parts.next()).with_context(|| format!("Missing product id in '{}'", raw))?;
    let quantity = non_empty(parts.next())
        .with_context(|| format!("Missing quantity in '{}'", raw))?
        .parse::<i64>()
        .with_context(|| format!("Invalid quantity in '{}'", raw))?;

    Ok(ItemSpec {
        product: ProductId::new(product),
        quantity,
        color: non_empty(parts.next()).map(str::to_string),
        size: non_empty(parts.next()).map(str::to_string),
    })
}

fn parse_key(raw: &str) -> Result<LineKey> {
    let mut parts = raw.splitn(3, ':');
    let product = non_empty(parts.next()).with_context(|| format!("Missing product id in '{}'", raw))?;
    Ok(LineKey {
        product: ProductId::new(product),
        color: non_empty(parts.next()).map(str::to_string),
        size: non_empty(parts.next()).map(str::to_string),
    })
}

fn non_empty(part: Option<&str>) -> Option<&str> {
    part.map(str::trim).filter(|p| !p.is_empty())
}
