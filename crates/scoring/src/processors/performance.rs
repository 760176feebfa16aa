use specrank_features::{normalize_in, parse_benchmark, range_of};
use specrank_model::{Category, SmartPrixRecord, ValueRange};

use super::CategoryProcessor;
use crate::context::{NormalizationContext, PartialContext};

fn cpu_value(record: &SmartPrixRecord) -> Option<f64> {
    record.antutu_cpu().and_then(parse_benchmark)
}

fn gpu_value(record: &SmartPrixRecord) -> Option<f64> {
    record.antutu_gpu().and_then(parse_benchmark)
}

/// Scores the Antutu CPU sub-score.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuPerformance;

impl CategoryProcessor for CpuPerformance {
    fn category(&self) -> Category {
        Category::CpuPerformance
    }

    fn validate(&self, record: &SmartPrixRecord) -> bool {
        cpu_value(record).is_some()
    }

    fn prepare_context(&self, records: &[&SmartPrixRecord]) -> PartialContext {
        let range = range_of(records.iter().filter_map(|r| cpu_value(r)));
        PartialContext {
            cpu_score: Some(range.unwrap_or_else(ValueRange::unit)),
            ..Default::default()
        }
    }

    fn process(&self, record: &SmartPrixRecord, context: &NormalizationContext) -> f64 {
        normalize_in(cpu_value(record), context.cpu_score)
    }
}

/// Scores the Antutu GPU sub-score.
#[derive(Debug, Clone, Copy, Default)]
pub struct GpuPerformance;

impl CategoryProcessor for GpuPerformance {
    fn category(&self) -> Category {
        Category::GpuPerformance
    }

    fn validate(&self, record: &SmartPrixRecord) -> bool {
        gpu_value(record).is_some()
    }

    fn prepare_context(&self, records: &[&SmartPrixRecord]) -> PartialContext {
        let range = range_of(records.iter().filter_map(|r| gpu_value(r)));
        PartialContext {
            gpu_score: Some(range.unwrap_or_else(ValueRange::unit)),
            ..Default::default()
        }
    }

    fn process(&self, record: &SmartPrixRecord, context: &NormalizationContext) -> f64 {
        normalize_in(gpu_value(record), context.gpu_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_parses_benchmark_strings() {
        let good = SmartPrixRecord::new("a", "A").with_antutu("412000", "390000");
        let bad_cpu = SmartPrixRecord::new("b", "B").with_antutu("N/A", "390000");
        let missing = SmartPrixRecord::new("c", "C");

        assert!(CpuPerformance.validate(&good));
        assert!(GpuPerformance.validate(&good));
        assert!(!CpuPerformance.validate(&bad_cpu));
        assert!(GpuPerformance.validate(&bad_cpu));
        assert!(!CpuPerformance.validate(&missing));
        assert!(!GpuPerformance.validate(&missing));
    }

    #[test]
    fn test_cpu_and_gpu_normalize_independently() {
        let low = SmartPrixRecord::new("low", "Low").with_antutu("100000", "500000");
        let high = SmartPrixRecord::new("high", "High").with_antutu("300000", "100000");
        let records = [&low, &high];
        let context = CpuPerformance
            .prepare_context(&records)
            .merge(GpuPerformance.prepare_context(&records))
            .into_context();

        assert_eq!(CpuPerformance.process(&low, &context), 0.0);
        assert_eq!(CpuPerformance.process(&high, &context), 1.0);
        assert_eq!(GpuPerformance.process(&low, &context), 1.0);
        assert_eq!(GpuPerformance.process(&high, &context), 0.0);
    }
}
