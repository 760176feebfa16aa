//! Weighted aggregation over every processor and the end-to-end pipeline.

use specrank_model::{
    CategoryScore, CategoryWeights, ProductCategoryScores, ScoredRecord, SmartPrixRecord,
};

use crate::config::ScoringConfig;
use crate::context::{build_context, NormalizationContext};
use crate::rank::rank;
use crate::registry::ProcessorRegistry;
use crate::validate::validate_catalog;

/// Scores and ranks device catalogs.
///
/// Holds no per-call state: every call builds its own context, so one
/// engine can serve concurrent callers.
#[derive(Debug)]
pub struct ScoringEngine {
    registry: ProcessorRegistry,
    default_top_n: usize,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl ScoringEngine {
    /// Create an engine with the standard processor set.
    ///
    /// The display blend and camera weight are baked into the processors.
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            registry: ProcessorRegistry::standard(&config),
            default_top_n: config.default_top_n,
        }
    }

    /// Create an engine over a custom processor set.
    ///
    /// Processor tuning belongs to the processors themselves, so only the
    /// result count is taken here.
    pub fn with_registry(registry: ProcessorRegistry, default_top_n: usize) -> Self {
        Self {
            registry,
            default_top_n,
        }
    }

    pub fn registry(&self) -> &ProcessorRegistry {
        &self.registry
    }

    /// Result count used by [`score_and_rank_default`](Self::score_and_rank_default).
    pub fn default_top_n(&self) -> usize {
        self.default_top_n
    }

    /// Records that pass every processor's validation.
    pub fn validate<'a>(&self, catalog: &'a [SmartPrixRecord]) -> Vec<&'a SmartPrixRecord> {
        validate_catalog(&self.registry, catalog)
    }

    pub fn build_context(&self, validated: &[&SmartPrixRecord]) -> NormalizationContext {
        build_context(&self.registry, validated)
    }

    /// Score one record against a context built from its catalog.
    ///
    /// Only categories the weights cover are aggregated; RAM and ROM
    /// gate validation but never contribute to the total.
    pub fn score_product(
        &self,
        record: &SmartPrixRecord,
        context: &NormalizationContext,
        weights: &CategoryWeights,
    ) -> ProductCategoryScores {
        let categories: Vec<CategoryScore> = self
            .registry
            .iter()
            .filter_map(|processor| {
                let category = processor.category();
                let weight = weights.weight_for(category)?;
                let raw_score = processor.process(record, context);

                Some(CategoryScore {
                    category,
                    raw_score,
                    weighted_score: raw_score * weight,
                })
            })
            .collect();

        let total_weighted_score = categories.iter().map(|s| s.weighted_score).sum();

        ProductCategoryScores {
            categories,
            total_weighted_score,
        }
    }

    /// Validate, build context, score and return the best `top_n` records.
    ///
    /// An empty validated set yields an empty result.
    pub fn score_and_rank(
        &self,
        catalog: &[SmartPrixRecord],
        weights: &CategoryWeights,
        top_n: usize,
    ) -> Vec<ScoredRecord> {
        let validated = self.validate(catalog);
        if validated.is_empty() {
            tracing::debug!(total = catalog.len(), "No records survived validation");
            return Vec::new();
        }

        let context = self.build_context(&validated);

        let scored: Vec<ScoredRecord> = validated
            .iter()
            .map(|record| ScoredRecord::new(record, self.score_product(record, &context, weights)))
            .collect();

        let ranked = rank(scored, top_n);

        tracing::debug!(
            validated = validated.len(),
            returned = ranked.len(),
            top_n,
            "Ranked catalog"
        );

        ranked
    }

    /// [`score_and_rank`](Self::score_and_rank) with the configured default top-N.
    pub fn score_and_rank_default(
        &self,
        catalog: &[SmartPrixRecord],
        weights: &CategoryWeights,
    ) -> Vec<ScoredRecord> {
        self.score_and_rank(catalog, weights, self.default_top_n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::processors::BatteryEndurance;
    use specrank_model::Category;

    fn device(link: &str, battery: f64) -> SmartPrixRecord {
        SmartPrixRecord::new(link, link)
            .with_brand("Acme")
            .with_battery_capacity(battery)
            .with_display(9.0, 450.0, 120.0, 1200.0)
            .with_antutu("300000", "250000")
            .with_memory("8 GB", "256 GB")
            .with_rear_camera("main", 50.0)
    }

    fn battery_only() -> CategoryWeights {
        CategoryWeights::zero().with(Category::BatteryEndurance, 1.0)
    }

    #[test]
    fn test_missing_battery_excluded_regardless_of_weights() {
        let engine = ScoringEngine::default();
        let a = device("a", 4500.0);
        let mut b = device("b", 4000.0);
        b.specs.battery = None;
        let c = SmartPrixRecord::new("c", "C")
            .with_battery_capacity(5000.0)
            .with_display(7.0, 400.0, 90.0, 800.0)
            .with_antutu("200000", "150000")
            .with_memory("8 GB", "256 GB")
            .with_rear_camera("main", 64.0);
        let catalog = vec![a, b, c];

        let camera_only = CategoryWeights::zero().with(Category::CameraQuality, 1.0);
        for weights in [CategoryWeights::default(), battery_only(), camera_only] {
            let ranked = engine.score_and_rank(&catalog, &weights, 20);
            let mut links: Vec<&str> = ranked.iter().map(|r| r.link.as_str()).collect();
            links.sort();
            assert_eq!(links, vec!["a", "c"]);
        }
    }

    #[test]
    fn test_single_device_battery_scores_half() {
        let engine = ScoringEngine::default();
        let catalog = vec![device("solo", 5000.0)];

        for weight in [1.0, 0.3] {
            let weights = CategoryWeights::zero().with(Category::BatteryEndurance, weight);
            let ranked = engine.score_and_rank(&catalog, &weights, 20);
            let battery = ranked[0].scores.get(Category::BatteryEndurance).unwrap();
            assert_eq!(battery.raw_score, 0.5);
            assert_eq!(battery.weighted_score, 0.5 * weight);
        }
    }

    #[test]
    fn test_battery_weight_ranks_bigger_battery_first() {
        let engine = ScoringEngine::default();
        let catalog = vec![device("small", 3000.0), device("big", 5000.0)];

        let ranked = engine.score_and_rank(&catalog, &battery_only(), 20);
        assert_eq!(ranked[0].link, "big");
        assert_eq!(ranked[0].scores.get(Category::BatteryEndurance).unwrap().raw_score, 1.0);
        assert_eq!(ranked[1].link, "small");
        assert_eq!(ranked[1].scores.get(Category::BatteryEndurance).unwrap().raw_score, 0.0);
    }

    #[test]
    fn test_total_is_sum_of_parts() {
        let engine = ScoringEngine::default();
        let catalog = vec![
            device("a", 3000.0),
            device("b", 4100.0),
            SmartPrixRecord::new("c", "C")
                .with_battery_capacity(6000.0)
                .with_display(6.0, 300.0, 60.0, 600.0)
                .with_antutu("120000", "90000")
                .with_memory("4 GB", "64 GB")
                .with_rear_camera("main", 13.0),
        ];
        let weights = CategoryWeights {
            battery_endurance: 0.35,
            display_quality: 0.15,
            cpu_performance: 0.2,
            gpu_performance: 0.1,
            camera_quality: 0.2,
        };

        for record in engine.score_and_rank(&catalog, &weights, 20) {
            let sum: f64 = record.scores.categories.iter().map(|s| s.weighted_score).sum();
            assert_eq!(record.total_weighted_score(), sum);
        }
    }

    #[test]
    fn test_gatekeepers_not_in_breakdown() {
        let engine = ScoringEngine::default();
        let catalog = vec![device("a", 4000.0), device("b", 5000.0)];
        let ranked = engine.score_and_rank(&catalog, &CategoryWeights::default(), 20);

        let categories: Vec<Category> =
            ranked[0].scores.categories.iter().map(|s| s.category).collect();
        assert_eq!(
            categories,
            vec![
                Category::BatteryEndurance,
                Category::DisplayQuality,
                Category::CpuPerformance,
                Category::GpuPerformance,
                Category::CameraQuality,
            ]
        );
    }

    #[test]
    fn test_output_is_non_increasing_and_truncated() {
        let engine = ScoringEngine::default();
        let catalog: Vec<SmartPrixRecord> = (0..12)
            .map(|i| device(&format!("d{i}"), 3000.0 + ((i * 7) % 5) as f64 * 400.0))
            .collect();

        let ranked = engine.score_and_rank(&catalog, &battery_only(), 5);
        assert_eq!(ranked.len(), 5);
        for pair in ranked.windows(2) {
            assert!(pair[0].total_weighted_score() >= pair[1].total_weighted_score());
        }

        let all = engine.score_and_rank(&catalog, &battery_only(), 100);
        assert_eq!(all.len(), catalog.len());
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let engine = ScoringEngine::default();
        let catalog = vec![
            device("first", 4000.0),
            device("second", 4000.0),
            device("third", 4000.0),
        ];
        let ranked = engine.score_and_rank(&catalog, &CategoryWeights::default(), 20);
        let links: Vec<&str> = ranked.iter().map(|r| r.link.as_str()).collect();
        assert_eq!(links, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_empty_validated_catalog() {
        let engine = ScoringEngine::default();
        let catalog = vec![SmartPrixRecord::new("bare", "Bare")];
        assert!(engine.score_and_rank(&catalog, &CategoryWeights::default(), 20).is_empty());
        assert!(engine.score_and_rank(&[], &CategoryWeights::default(), 20).is_empty());
    }

    #[test]
    fn test_idempotent_output() {
        let engine = ScoringEngine::default();
        let catalog = vec![device("a", 3100.0), device("b", 4800.0), device("c", 4200.0)];
        let weights = CategoryWeights::default();

        let first = serde_json::to_string(&engine.score_and_rank(&catalog, &weights, 2)).unwrap();
        let second = serde_json::to_string(&engine.score_and_rank(&catalog, &weights, 2)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_weights_do_not_panic() {
        let engine = ScoringEngine::default();
        let catalog = vec![device("a", 3000.0), device("b", 5000.0)];
        let weights = CategoryWeights {
            battery_endurance: -2.0,
            display_quality: 7.5,
            cpu_performance: f64::NAN,
            gpu_performance: 0.0,
            camera_quality: 0.0,
        };
        assert_eq!(engine.score_and_rank(&catalog, &weights, 20).len(), 2);
    }

    #[test]
    fn test_result_carries_identity_and_specs() {
        let engine = ScoringEngine::default();
        let record = device("https://example.test/a", 4000.0).with_price(19999.0);
        let ranked = engine.score_and_rank(std::slice::from_ref(&record), &battery_only(), 20);

        assert_eq!(ranked[0].link, record.link);
        assert_eq!(ranked[0].brand, "Acme");
        assert_eq!(ranked[0].price, Some(19999.0));
        assert_eq!(ranked[0].specs, record.specs);
    }

    #[test]
    fn test_default_top_n() {
        let engine = ScoringEngine::default();
        let catalog: Vec<SmartPrixRecord> =
            (0..25).map(|i| device(&format!("d{i}"), 3000.0 + i as f64)).collect();
        assert_eq!(engine.score_and_rank_default(&catalog, &battery_only()).len(), 20);
    }

    #[test]
    fn test_scraped_nulls_still_rank() {
        let record: SmartPrixRecord = serde_json::from_value(serde_json::json!({
            "link": "scraped",
            "title": "Scraped",
            "brand": null,
            "display": {
                "type": { "score": 8 },
                "ppi": { "value": 400 },
                "refreshRate": { "value": 90 },
                "brightness": { "value": 900 }
            },
            "battery": { "capacity": { "value": 4500 } },
            "technical": {
                "benchmark": { "antutu": { "breakdown": { "CPU": "250000", "GPU": "200000" } } }
            },
            "memory": { "ram": "6 GB", "storage": "128 GB" },
            "camera": { "rearCamera": [{ "position": "main", "megapixel": 50 }, null] }
        }))
        .unwrap();
        let catalog = vec![record, device("a", 5000.0)];

        let ranked = ScoringEngine::default().score_and_rank(&catalog, &battery_only(), 20);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[1].link, "scraped");
        assert_eq!(ranked[1].brand, "");
    }

    #[test]
    fn test_configured_top_n_and_custom_registry() {
        let config = ScoringConfig {
            default_top_n: 3,
            ..Default::default()
        };
        let catalog: Vec<SmartPrixRecord> =
            (0..5).map(|i| device(&format!("d{i}"), 3000.0 + i as f64)).collect();

        let engine = ScoringEngine::new(config);
        assert_eq!(engine.default_top_n(), 3);
        assert_eq!(engine.score_and_rank_default(&catalog, &battery_only()).len(), 3);

        let registry = ProcessorRegistry::new(vec![Box::new(BatteryEndurance)]);
        let engine = ScoringEngine::with_registry(registry, 2);
        let ranked = engine.score_and_rank_default(&catalog, &CategoryWeights::default());
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].link, "d4");
        assert_eq!(ranked[0].scores.categories.len(), 1);
    }
}
