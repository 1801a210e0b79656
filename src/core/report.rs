//! Inventory summary and display formatting.
//!
//! This module turns a joined product snapshot into headline figures and
//! one-line descriptions. All functions are framework-agnostic and return plain
//! data or strings that the bot layer places into embeds.

use crate::core::{
    product::ProductRow,
    stock::{StockLevel, is_low},
};

/// Headline figures for a product snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct InventorySummary {
    /// Number of products
    pub product_count: usize,
    /// Sum of all quantities
    pub total_units: i64,
    /// Sum of quantity × price
    pub total_value: f64,
    /// Products below the threshold
    pub low_stock_count: usize,
    /// Products with no resolvable category
    pub uncategorized_count: usize,
}

/// Computes summary figures for a snapshot.
#[must_use]
pub fn summarize(rows: &[ProductRow], threshold: u32) -> InventorySummary {
    // Cast is safe for display purposes: quantities far below 2^53
    #[allow(clippy::cast_precision_loss)]
    let total_value: f64 = rows.iter().map(|r| r.quantity as f64 * r.price).sum();

    InventorySummary {
        product_count: rows.len(),
        total_units: rows
            .iter()
            .fold(0_i64, |total, r| total.saturating_add(r.quantity)),
        total_value,
        low_stock_count: rows.iter().filter(|r| is_low(r, threshold)).count(),
        uncategorized_count: rows.iter().filter(|r| r.is_uncategorized()).count(),
    }
}

/// Formats a price with two decimals.
#[must_use]
pub fn format_price(price: f64) -> String {
    format!("{price:.2}")
}

/// One-line description of a product with its stock indicator.
///
/// Looks like `🟡 **Cola** | qty 5 | price 1.50 | category: Drinks`.
#[must_use]
pub fn format_stock_line(row: &ProductRow, threshold: u32) -> String {
    format!(
        "{} **{}** | qty {} | price {} | category: {}",
        StockLevel::of(row, threshold).emoji(),
        row.name,
        row.quantity,
        format_price(row.price),
        row.category_label()
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::row;

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[], 20);
        assert_eq!(summary.product_count, 0);
        assert_eq!(summary.total_units, 0);
        assert_eq!(summary.total_value, 0.0);
        assert_eq!(summary.low_stock_count, 0);
    }

    #[test]
    fn test_summarize_rows() {
        let mut orphan = row(3, "C", 5);
        orphan.category_name = None;
        orphan.price = 2.0;
        let rows = vec![row(1, "A", 5), row(2, "B", 25), orphan];

        let summary = summarize(&rows, 20);
        assert_eq!(summary.product_count, 3);
        assert_eq!(summary.total_units, 35);
        assert_eq!(summary.total_value, 5.0 * 10.0 + 25.0 * 10.0 + 5.0 * 2.0);
        assert_eq!(summary.low_stock_count, 2);
        assert_eq!(summary.uncategorized_count, 1);
    }

    #[test]
    fn test_total_units_saturates() {
        let rows = vec![row(1, "A", i64::MAX), row(2, "B", 1)];
        assert_eq!(summarize(&rows, 20).total_units, i64::MAX);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(0.0), "0.00");
        assert_eq!(format_price(1.5), "1.50");
        assert_eq!(format_price(12.346), "12.35");
    }

    #[test]
    fn test_format_stock_line() {
        let line = format_stock_line(&row(1, "Cola", 5), 20);
        assert_eq!(
            line,
            "🟡 **Cola** | qty 5 | price 10.00 | category: Test Category"
        );

        let empty = format_stock_line(&row(2, "Tea", 0), 20);
        assert!(empty.starts_with("🔴"));
    }
}
