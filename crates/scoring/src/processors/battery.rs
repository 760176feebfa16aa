use specrank_features::{normalize_in, range_of};
use specrank_model::{Category, SmartPrixRecord, ValueRange};

use super::CategoryProcessor;
use crate::context::{NormalizationContext, PartialContext};

/// Scores battery capacity (mAh).
#[derive(Debug, Clone, Copy, Default)]
pub struct BatteryEndurance;

impl CategoryProcessor for BatteryEndurance {
    fn category(&self) -> Category {
        Category::BatteryEndurance
    }

    fn validate(&self, record: &SmartPrixRecord) -> bool {
        record.battery_capacity().is_some_and(f64::is_finite)
    }

    fn prepare_context(&self, records: &[&SmartPrixRecord]) -> PartialContext {
        let range = range_of(records.iter().filter_map(|r| r.battery_capacity()));
        PartialContext {
            battery_capacity: Some(range.unwrap_or_else(ValueRange::unit)),
            ..Default::default()
        }
    }

    fn process(&self, record: &SmartPrixRecord, context: &NormalizationContext) -> f64 {
        normalize_in(record.battery_capacity(), context.battery_capacity)
    }
}
