//! Low-stock classification.
//!
//! Two policies decide which products count as low on stock:
//!
//! - **Threshold**: quantity strictly below a bound (default 20).
//! - **Bottom percent**: the `ceil(n * p / 100)` products with the smallest
//!   quantities (default 15%), ties kept in fetch order.
//!
//! Everything here is a pure function of the snapshot it is given. Inputs are
//! never mutated, nothing is re-queried, and an empty snapshot is simply an
//! empty result.

use crate::core::product::ProductRow;
use std::fmt;

/// Threshold used when no configuration supplies one.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 20;

/// Share of products reported by the bottom-percent view when none is configured.
pub const DEFAULT_BOTTOM_PERCENT: u32 = 15;

/// Which rule decides that a product is low on stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LowStockPolicy {
    /// Quantity strictly below the bound
    Threshold(u32),
    /// Smallest-quantity share of the snapshot, in percent
    BottomPercent(u32),
}

impl Default for LowStockPolicy {
    fn default() -> Self {
        Self::Threshold(DEFAULT_LOW_STOCK_THRESHOLD)
    }
}

impl LowStockPolicy {
    /// Applies the policy to a snapshot.
    ///
    /// Threshold results keep fetch order. Bottom-percent results are ordered by
    /// ascending quantity, ties in fetch order.
    #[must_use]
    pub fn classify<'a>(&self, rows: &'a [ProductRow]) -> Vec<&'a ProductRow> {
        match *self {
            Self::Threshold(threshold) => low_stock_by_threshold(rows, threshold),
            Self::BottomPercent(percent) => bottom_by_percent(rows, percent),
        }
    }
}

impl fmt::Display for LowStockPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Threshold(threshold) => write!(f, "quantity below {threshold}"),
            Self::BottomPercent(percent) => write!(f, "lowest {percent}% by quantity"),
        }
    }
}

/// True when the row's quantity is strictly below `threshold`.
///
/// A threshold of 0 never matches.
#[must_use]
pub fn is_low(row: &ProductRow, threshold: u32) -> bool {
    row.quantity < i64::from(threshold)
}

/// Rows below `threshold`, in their original order.
#[must_use]
pub fn low_stock_by_threshold(rows: &[ProductRow], threshold: u32) -> Vec<&ProductRow> {
    rows.iter().filter(|row| is_low(row, threshold)).collect()
}

/// Number of rows the bottom-percent view reports for a snapshot of `n` rows.
///
/// `ceil(n * percent / 100)` in exact integer arithmetic, never below 1 for a
/// non-empty snapshot and never above `n`. Zero only when `n` is zero.
#[must_use]
pub fn bottom_count(n: usize, percent: u32) -> usize {
    if n == 0 {
        return 0;
    }
    let percent = usize::try_from(percent.min(100)).unwrap_or(100);
    n.saturating_mul(percent).div_ceil(100).clamp(1, n)
}

/// The [`bottom_count`] rows with the smallest quantities.
///
/// Sorting is stable, so rows with equal quantities keep their fetch order and
/// repeated runs over the same snapshot give the same answer.
#[must_use]
pub fn bottom_by_percent(rows: &[ProductRow], percent: u32) -> Vec<&ProductRow> {
    let mut ranked: Vec<&ProductRow> = rows.iter().collect();
    ranked.sort_by_key(|row| row.quantity);
    ranked.truncate(bottom_count(rows.len(), percent));
    ranked
}

/// Colour-coded stock indicator for a single product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    /// Nothing left
    Out,
    /// Below the threshold
    Low,
    /// At or above the threshold
    Ok,
}

impl StockLevel {
    /// Classifies a row against a threshold.
    #[must_use]
    pub fn of(row: &ProductRow, threshold: u32) -> Self {
        if row.quantity <= 0 {
            Self::Out
        } else if is_low(row, threshold) {
            Self::Low
        } else {
            Self::Ok
        }
    }

    /// Emoji used when rendering the level.
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Out => "🔴",
            Self::Low => "🟡",
            Self::Ok => "🟢",
        }
    }
}
