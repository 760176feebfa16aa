//! Catalog pre-filters applied before scoring.
//!
//! The scoring engine knows nothing about price; callers narrow the
//! catalog to the user's budget here first.

use specrank_model::SmartPrixRecord;
use thiserror::Error;

/// Budgets below this get the small buffer, at or above it the large one.
pub const BUFFER_THRESHOLD: f64 = 20_000.0;
pub const SMALL_BUFFER: f64 = 500.0;
pub const LARGE_BUFFER: f64 = 1_000.0;

#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("Invalid {field}: {value}")]
    InvalidAmount { field: &'static str, value: f64 },
    #[error("Minimum price {min} exceeds maximum {max}")]
    InvertedRange { min: f64, max: f64 },
}

/// Trait for record-level catalog filters.
pub trait RecordFilter {
    /// Whether the record stays in the catalog.
    fn accepts(&self, record: &SmartPrixRecord) -> bool;

    /// Keep only accepted records, preserving order.
    fn apply(&self, catalog: Vec<SmartPrixRecord>) -> Vec<SmartPrixRecord> {
        let before = catalog.len();
        let kept: Vec<SmartPrixRecord> = catalog.into_iter().filter(|r| self.accepts(r)).collect();
        tracing::debug!(before, after = kept.len(), "Applied catalog filter");
        kept
    }
}

/// Keeps records priced within `[min_price, effective_max_price]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriceFilter {
    min_price: f64,
    budget: Option<f64>,
    extension: Option<f64>,
}

fn check_amount(field: &'static str, value: f64) -> Result<f64, FilterError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(FilterError::InvalidAmount { field, value })
    }
}

/// Headroom added above a budget when the caller gives no extension.
pub fn default_extension(budget: f64) -> f64 {
    if budget < BUFFER_THRESHOLD {
        SMALL_BUFFER
    } else {
        LARGE_BUFFER
    }
}

impl PriceFilter {
    pub fn new(
        min_price: f64,
        budget: Option<f64>,
        extension: Option<f64>,
    ) -> Result<Self, FilterError> {
        let filter = Self {
            min_price: check_amount("minimum price", min_price)?,
            budget: budget.map(|b| check_amount("budget", b)).transpose()?,
            extension: extension.map(|e| check_amount("extension", e)).transpose()?,
        };

        if let Some(max) = filter.effective_max_price() {
            if filter.min_price > max {
                return Err(FilterError::InvertedRange {
                    min: filter.min_price,
                    max,
                });
            }
        }

        Ok(filter)
    }

    /// A filter that keeps every record.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Upper bound: budget plus extension, `None` without a budget.
    pub fn effective_max_price(&self) -> Option<f64> {
        self.budget
            .map(|b| b + self.extension.unwrap_or_else(|| default_extension(b)))
    }

    pub fn min_price(&self) -> f64 {
        self.min_price
    }

    pub fn is_unbounded(&self) -> bool {
        self.min_price == 0.0 && self.budget.is_none()
    }
}

impl RecordFilter for PriceFilter {
    // Unpriced records cannot be placed in a bounded range.
    fn accepts(&self, record: &SmartPrixRecord) -> bool {
        if self.is_unbounded() {
            return true;
        }

        let Some(price) = record.price.filter(|p| p.is_finite()) else {
            return false;
        };

        price >= self.min_price && self.effective_max_price().map_or(true, |max| price <= max)
    }
}
