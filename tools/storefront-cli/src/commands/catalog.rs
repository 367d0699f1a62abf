//! Category and supplier listings.

use anyhow::Result;
use serde::Serialize;
use storefront_commerce::catalog::Catalog;

use crate::context::Context;

#[derive(Debug, Serialize, PartialEq)]
struct GroupRow {
    id: String,
    name: String,
    products: usize,
}

/// Run the categories command.
pub fn categories(ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let rows = category_rows(&catalog);
    print_groups(ctx, "Categories", &rows);
    Ok(())
}

/// Run the suppliers command.
pub fn suppliers(ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let rows = supplier_rows(&catalog);
    print_groups(ctx, "Suppliers", &rows);
    Ok(())
}

fn category_rows(catalog: &Catalog) -> Vec<GroupRow> {
    catalog
        .categories()
        .iter()
        .map(|c| GroupRow {
            id: c.id.to_string(),
            name: c.name.clone(),
            products: catalog.products().iter().filter(|p| p.category == c.id).count(),
        })
        .collect()
}

fn supplier_rows(catalog: &Catalog) -> Vec<GroupRow> {
    catalog
        .suppliers()
        .iter()
        .map(|s| GroupRow {
            id: s.id.to_string(),
            name: s.name.clone(),
            products: catalog
                .products()
                .iter()
                .filter(|p| p.supplier.as_ref() == Some(&s.id))
                .count(),
        })
        .collect()
}

fn print_groups(ctx: &Context, title: &str, rows: &[GroupRow]) {
    if ctx.output.is_json() {
        ctx.output.json(&rows);
        return;
    }

    ctx.output.header(title);
    if rows.is_empty() {
        ctx.output.info("None defined.");
        return;
    }

    let widths = [16, 24, 8];
    ctx.output.table_row(&["ID", "NAME", "PRODUCTS"], &widths);
    for row in rows {
        ctx.output
            .table_row(&[&row.id, &row.name, &row.products.to_string()], &widths);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_category_counts() {
        let catalog = Catalog::builtin().unwrap();
        let rows = category_rows(&catalog);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows.iter().map(|r| r.products).sum::<usize>(), catalog.len());
        assert_eq!(rows.iter().find(|r| r.id == "bags").unwrap().products, 2);
    }

    #[test]
    fn test_builtin_supplier_counts() {
        let catalog = Catalog::builtin().unwrap();
        let rows = supplier_rows(&catalog);
        assert_eq!(rows.len(), 3);
        // The charger has no supplier.
        assert_eq!(rows.iter().map(|r| r.products).sum::<usize>(), catalog.len() - 1);
    }
}
