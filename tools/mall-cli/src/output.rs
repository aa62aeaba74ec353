//! Output formatting for the CLI.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use mall_search::catalog::Product;
use mall_search::search::{Page, RelatedInfo};

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

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
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

    /// Create a spinner for a network call.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        // A spinner would interleave with debug logs on stderr.
        if self.json || self.verbose {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        let spinner_style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(spinner_style);
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Print a page of products.
    pub fn page(&self, page: &Page) {
        if self.json {
            self.json(page);
            return;
        }

        let info = &page.page_info;
        self.header(&format!(
            "Page {} of {} ({} matching)",
            info.number,
            info.total_pages.max(1),
            info.total_elements
        ));
        if page.is_empty() {
            self.info("No products found");
            return;
        }
        for product in &page.content {
            self.list_item(&product_line(product));
        }
        if info.has_next() {
            self.info(&format!("More results: --page {}", info.number + 1));
        }
    }

    /// Print related brands, categories and attributes.
    pub fn related(&self, related: &RelatedInfo) {
        if self.json {
            self.json(related);
            return;
        }

        self.header("Brands");
        for name in &related.brand_names {
            self.list_item(name);
        }
        self.header("Categories");
        for name in &related.product_category_names {
            self.list_item(name);
        }
        self.header("Attributes");
        for attr in &related.product_attrs {
            self.kv(
                &format!("{} (#{})", attr.attr_name, attr.attr_id),
                &attr.attr_values.join(", "),
            );
        }
    }
}

/// One-line product summary.
pub fn product_line(product: &Product) -> String {
    let mut line = format!("#{} {}", product.id, style(&product.name).bold());
    if !product.brand_name.is_empty() {
        line.push_str(&format!(" [{}]", product.brand_name));
    }
    line.push_str(&format!(" {}", style(format_price(product.price)).green()));
    line
}

/// Format a price with two decimals.
pub fn format_price(price: f64) -> String {
    format!("¥{:.2}", price)
}
