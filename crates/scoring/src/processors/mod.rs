//! Category processors.
//!
//! Each processor owns one category: it decides whether a record carries
//! usable data for it, contributes the ranges it needs to the shared
//! context, and maps a record to a normalized [0, 1] score.

mod battery;
mod camera;
mod display;
mod memory;
mod performance;

pub use battery::BatteryEndurance;
pub use camera::{main_camera_megapixel, CameraQuality};
pub use display::DisplayQuality;
pub use memory::{RamCapacity, RomCapacity};
pub use performance::{CpuPerformance, GpuPerformance};

use specrank_model::{Category, SmartPrixRecord};

use crate::context::{NormalizationContext, PartialContext};

/// Strategy interface implemented by every scoring category.
pub trait CategoryProcessor: Send + Sync {
    /// The category this processor scores.
    fn category(&self) -> Category;

    /// Stable identifier, the same key used by weights and the registry.
    fn name(&self) -> &'static str {
        self.category().key()
    }

    /// Whether `record` carries the fields this category needs, in a
    /// parseable form. Structural only; plausibility is not checked.
    fn validate(&self, record: &SmartPrixRecord) -> bool;

    /// Ranges this processor needs, computed over validated records.
    ///
    /// Falls back to the category's default range when no record yields
    /// a usable value.
    fn prepare_context(&self, records: &[&SmartPrixRecord]) -> PartialContext;

    /// Normalized score in [0, 1] for one record.
    fn process(&self, record: &SmartPrixRecord, context: &NormalizationContext) -> f64;
}
