use specrank_features::{normalize_in, range_of};
use specrank_model::{Category, SmartPrixRecord, ValueRange};

use super::CategoryProcessor;
use crate::config::DisplayBlend;
use crate::context::{NormalizationContext, PartialContext};

/// Scores the display as a blend of four independently normalized
/// sub-metrics: panel type, pixel density, refresh rate and brightness.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayQuality {
    blend: DisplayBlend,
}

impl DisplayQuality {
    pub fn new(blend: DisplayBlend) -> Self {
        Self { blend }
    }
}

impl CategoryProcessor for DisplayQuality {
    fn category(&self) -> Category {
        Category::DisplayQuality
    }

    // All four sub-metrics are required.
    fn validate(&self, record: &SmartPrixRecord) -> bool {
        [
            record.display_type_score(),
            record.display_ppi(),
            record.display_refresh_rate(),
            record.display_brightness(),
        ]
        .iter()
        .all(|v| v.is_some_and(f64::is_finite))
    }

    fn prepare_context(&self, records: &[&SmartPrixRecord]) -> PartialContext {
        let collect = |f: fn(&SmartPrixRecord) -> Option<f64>| {
            range_of(records.iter().filter_map(|r| f(*r)))
        };

        let panel_type = collect(SmartPrixRecord::display_type_score);
        let ppi = collect(SmartPrixRecord::display_ppi);
        let refresh_rate = collect(SmartPrixRecord::display_refresh_rate);
        let brightness = collect(SmartPrixRecord::display_brightness);

        PartialContext {
            display_type: Some(panel_type.unwrap_or_else(ValueRange::display_type)),
            display_ppi: Some(ppi.unwrap_or_else(ValueRange::unit)),
            display_refresh_rate: Some(refresh_rate.unwrap_or_else(ValueRange::unit)),
            display_brightness: Some(brightness.unwrap_or_else(ValueRange::unit)),
            ..Default::default()
        }
    }

    fn process(&self, record: &SmartPrixRecord, context: &NormalizationContext) -> f64 {
        let type_score = normalize_in(record.display_type_score(), context.display_type);
        let ppi_score = normalize_in(record.display_ppi(), context.display_ppi);
        let refresh_score =
            normalize_in(record.display_refresh_rate(), context.display_refresh_rate);
        let brightness_score =
            normalize_in(record.display_brightness(), context.display_brightness);

        self.blend.panel_type * type_score
            + self.blend.ppi * ppi_score
            + self.blend.refresh_rate * refresh_score
            + self.blend.brightness * brightness_score
    }
}
