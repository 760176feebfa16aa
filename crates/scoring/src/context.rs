//! Normalization context: per-category {min, max} over the validated set.

use serde::Serialize;
use specrank_model::{SmartPrixRecord, ValueRange};

use crate::registry::ProcessorRegistry;

/// Ranges every processor normalizes against.
///
/// Rebuilt for every scoring call; a context from another catalog is
/// meaningless.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizationContext {
    pub battery_capacity: ValueRange,
    pub display_type: ValueRange,
    pub display_ppi: ValueRange,
    pub display_refresh_rate: ValueRange,
    pub display_brightness: ValueRange,
    pub cpu_score: ValueRange,
    pub gpu_score: ValueRange,
    pub camera_main_mp: ValueRange,
    pub ram_capacity: ValueRange,
    pub rom_capacity: ValueRange,
}

impl Default for NormalizationContext {
    fn default() -> Self {
        PartialContext::default().into_context()
    }
}

/// One processor's contribution to the context.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PartialContext {
    pub battery_capacity: Option<ValueRange>,
    pub display_type: Option<ValueRange>,
    pub display_ppi: Option<ValueRange>,
    pub display_refresh_rate: Option<ValueRange>,
    pub display_brightness: Option<ValueRange>,
    pub cpu_score: Option<ValueRange>,
    pub gpu_score: Option<ValueRange>,
    pub camera_main_mp: Option<ValueRange>,
    pub ram_capacity: Option<ValueRange>,
    pub rom_capacity: Option<ValueRange>,
}

impl PartialContext {
    /// Overlay `other` on top of `self`; fields set in `other` win.
    pub fn merge(self, other: PartialContext) -> PartialContext {
        PartialContext {
            battery_capacity: other.battery_capacity.or(self.battery_capacity),
            display_type: other.display_type.or(self.display_type),
            display_ppi: other.display_ppi.or(self.display_ppi),
            display_refresh_rate: other.display_refresh_rate.or(self.display_refresh_rate),
            display_brightness: other.display_brightness.or(self.display_brightness),
            cpu_score: other.cpu_score.or(self.cpu_score),
            gpu_score: other.gpu_score.or(self.gpu_score),
            camera_main_mp: other.camera_main_mp.or(self.camera_main_mp),
            ram_capacity: other.ram_capacity.or(self.ram_capacity),
            rom_capacity: other.rom_capacity.or(self.rom_capacity),
        }
    }

    /// Fill every absent range with its default.
    pub fn into_context(self) -> NormalizationContext {
        NormalizationContext {
            battery_capacity: self.battery_capacity.unwrap_or_else(ValueRange::unit),
            display_type: self.display_type.unwrap_or_else(ValueRange::display_type),
            display_ppi: self.display_ppi.unwrap_or_else(ValueRange::unit),
            display_refresh_rate: self.display_refresh_rate.unwrap_or_else(ValueRange::unit),
            display_brightness: self.display_brightness.unwrap_or_else(ValueRange::unit),
            cpu_score: self.cpu_score.unwrap_or_else(ValueRange::unit),
            gpu_score: self.gpu_score.unwrap_or_else(ValueRange::unit),
            camera_main_mp: self.camera_main_mp.unwrap_or_else(ValueRange::unit),
            ram_capacity: self.ram_capacity.unwrap_or_else(ValueRange::unit),
            rom_capacity: self.rom_capacity.unwrap_or_else(ValueRange::unit),
        }
    }
}

/// Build the normalization context from an already-validated catalog.
pub fn build_context(
    registry: &ProcessorRegistry,
    validated: &[&SmartPrixRecord],
) -> NormalizationContext {
    let context = registry
        .iter()
        .map(|processor| processor.prepare_context(validated))
        .fold(PartialContext::default(), PartialContext::merge)
        .into_context();

    tracing::debug!(records = validated.len(), ?context, "Built normalization context");

    context
}
