//! Output formatting for the CLI.

use console::style;
use storefront_commerce::catalog::{ProductStatus, StockStatus};
use storefront_commerce::notify::{Severity, Toast};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a toast the way its severity is styled.
    pub fn toast(&self, toast: &Toast) {
        match toast.severity {
            Severity::Success => self.success(&toast.message),
            Severity::Error => self.error(&toast.message),
            Severity::Info => self.info(&toast.message),
        }
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        println!("  {}", format_row(cols, widths));
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

fn format_row(cols: &[&str], widths: &[usize]) -> String {
    cols.iter()
        .zip(widths.iter())
        .map(|(col, width)| format!("{:width$}", col, width = width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Status badge for product lifecycle states.
pub fn status_badge(status: ProductStatus) -> String {
    match status {
        ProductStatus::Active => style(status.label()).green().to_string(),
        ProductStatus::Pending => style(status.label()).yellow().to_string(),
        ProductStatus::Inactive => style(status.label()).dim().to_string(),
    }
}

/// Badge for the stock level shown next to a product.
pub fn stock_badge(status: StockStatus) -> String {
    match status {
        StockStatus::InStock => style(status.as_str()).green().to_string(),
        StockStatus::Low => style(status.as_str()).yellow().to_string(),
        StockStatus::OutOfStock => style(status.as_str()).red().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_row_pads_columns() {
        assert_eq!(format_row(&["1", "Tote", "$2.500"], &[3, 6, 8]), "1    Tote    $2.500");
    }

    #[test]
    fn test_badges_keep_label_text() {
        console::set_colors_enabled(false);
        assert_eq!(stock_badge(StockStatus::Low), "low stock");
        assert_eq!(status_badge(ProductStatus::Active), ProductStatus::Active.label());
    }
}
