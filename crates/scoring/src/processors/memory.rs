use specrank_features::{normalize_in, parse_ram_gb, parse_storage_gb, range_of};
use specrank_model::{Category, SmartPrixRecord, ValueRange};

use super::CategoryProcessor;
use crate::context::{NormalizationContext, PartialContext};

fn ram_gb(record: &SmartPrixRecord) -> Option<f64> {
    record.ram().and_then(parse_ram_gb)
}

fn storage_gb(record: &SmartPrixRecord) -> Option<f64> {
    record.storage().and_then(parse_storage_gb)
}

/// Scores RAM size in GB.
///
/// Weights carry no RAM entry, so in practice this only gates validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RamCapacity;

impl CategoryProcessor for RamCapacity {
    fn category(&self) -> Category {
        Category::RamCapacity
    }

    fn validate(&self, record: &SmartPrixRecord) -> bool {
        ram_gb(record).is_some()
    }

    fn prepare_context(&self, records: &[&SmartPrixRecord]) -> PartialContext {
        let range = range_of(records.iter().filter_map(|r| ram_gb(r)));
        PartialContext {
            ram_capacity: Some(range.unwrap_or_else(ValueRange::unit)),
            ..Default::default()
        }
    }

    fn process(&self, record: &SmartPrixRecord, context: &NormalizationContext) -> f64 {
        normalize_in(ram_gb(record), context.ram_capacity)
    }
}

/// Scores internal storage in GB (TB converted).
///
/// Like [`RamCapacity`], a gatekeeper only.
#[derive(Debug, Clone, Copy, Default)]
pub struct RomCapacity;

impl CategoryProcessor for RomCapacity {
    fn category(&self) -> Category {
        Category::RomCapacity
    }

    fn validate(&self, record: &SmartPrixRecord) -> bool {
        storage_gb(record).is_some()
    }

    fn prepare_context(&self, records: &[&SmartPrixRecord]) -> PartialContext {
        let range = range_of(records.iter().filter_map(|r| storage_gb(r)));
        PartialContext {
            rom_capacity: Some(range.unwrap_or_else(ValueRange::unit)),
            ..Default::default()
        }
    }

    fn process(&self, record: &SmartPrixRecord, context: &NormalizationContext) -> f64 {
        normalize_in(storage_gb(record), context.rom_capacity)
    }
}
