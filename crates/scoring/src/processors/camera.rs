use specrank_features::{normalize_in, range_of};
use specrank_model::{Category, SmartPrixRecord, ValueRange};

use super::CategoryProcessor;
use crate::context::{NormalizationContext, PartialContext};

const MAIN_POSITION: &str = "main";

/// Megapixels of the first rear camera tagged `main` with a finite value.
pub fn main_camera_megapixel(record: &SmartPrixRecord) -> Option<f64> {
    record
        .rear_cameras()
        .iter()
        .filter(|lens| {
            lens.position
                .as_deref()
                .is_some_and(|p| p.trim().eq_ignore_ascii_case(MAIN_POSITION))
        })
        .find_map(|lens| lens.megapixel.filter(|mp| mp.is_finite()))
}

/// Scores the main rear camera's resolution.
#[derive(Debug, Clone, Copy)]
pub struct CameraQuality {
    main_weight: f64,
}

impl CameraQuality {
    pub fn new(main_weight: f64) -> Self {
        Self { main_weight }
    }
}

impl Default for CameraQuality {
    fn default() -> Self {
        Self::new(0.70)
    }
}

impl CategoryProcessor for CameraQuality {
    fn category(&self) -> Category {
        Category::CameraQuality
    }

    fn validate(&self, record: &SmartPrixRecord) -> bool {
        main_camera_megapixel(record).is_some()
    }

    fn prepare_context(&self, records: &[&SmartPrixRecord]) -> PartialContext {
        let range = range_of(records.iter().filter_map(|r| main_camera_megapixel(r)));
        PartialContext {
            camera_main_mp: Some(range.unwrap_or_else(ValueRange::unit)),
            ..Default::default()
        }
    }

    fn process(&self, record: &SmartPrixRecord, context: &NormalizationContext) -> f64 {
        self.main_weight * normalize_in(main_camera_megapixel(record), context.camera_main_mp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specrank_model::{CameraLens, CameraSpec};

    #[test]
    fn test_requires_main_camera() {
        let processor = CameraQuality::default();
        let no_main = SmartPrixRecord::new("a", "A").with_rear_camera("ultrawide", 12.0);
        let with_main = SmartPrixRecord::new("b", "B")
            .with_rear_camera("ultrawide", 12.0)
            .with_rear_camera("main", 108.0);

        assert!(!processor.validate(&no_main));
        assert!(!processor.validate(&SmartPrixRecord::new("c", "C")));
        assert!(processor.validate(&with_main));
        assert_eq!(main_camera_megapixel(&with_main), Some(108.0));
    }

    #[test]
    fn test_main_without_megapixel_is_skipped() {
        let mut record = SmartPrixRecord::new("a", "A");
        record.specs.camera = Some(CameraSpec {
            rear_camera: vec![
                CameraLens {
                    position: Some("main".into()),
                    megapixel: None,
                },
                CameraLens {
                    position: Some("Main".into()),
                    megapixel: Some(64.0),
                },
            ],
        });
        assert_eq!(main_camera_megapixel(&record), Some(64.0));
    }

    #[test]
    fn test_score_capped_by_main_weight() {
        let processor = CameraQuality::default();
        let low = SmartPrixRecord::new("low", "Low").with_rear_camera("main", 12.0);
        let high = SmartPrixRecord::new("high", "High").with_rear_camera("main", 200.0);
        let context = processor.prepare_context(&[&low, &high]).into_context();

        assert_eq!(processor.process(&low, &context), 0.0);
        assert!((processor.process(&high, &context) - 0.70).abs() < 1e-9);
    }
}
