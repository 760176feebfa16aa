//! Validation pipeline: specification completeness as a data-quality gate.

use specrank_model::SmartPrixRecord;

use crate::registry::ProcessorRegistry;

/// Whether every active processor accepts the record.
pub fn is_valid(registry: &ProcessorRegistry, record: &SmartPrixRecord) -> bool {
    registry.iter().all(|processor| processor.validate(record))
}

/// Keep only records every processor can use, in catalog order.
///
/// A record missing data for any category is dropped entirely, even if
/// the caller's weights ignore that category.
pub fn validate_catalog<'a>(
    registry: &ProcessorRegistry,
    catalog: &'a [SmartPrixRecord],
) -> Vec<&'a SmartPrixRecord> {
    let validated: Vec<&SmartPrixRecord> = catalog
        .iter()
        .filter(|record| is_valid(registry, record))
        .collect();

    tracing::debug!(
        total = catalog.len(),
        valid = validated.len(),
        dropped = catalog.len() - validated.len(),
        "Validated catalog"
    );

    validated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::BatteryEndurance;

    fn complete(link: &str) -> SmartPrixRecord {
        SmartPrixRecord::new(link, link)
            .with_battery_capacity(5000.0)
            .with_display(9.0, 450.0, 120.0, 1200.0)
            .with_antutu("300000", "250000")
            .with_memory("8 GB", "256 GB")
            .with_rear_camera("main", 50.0)
    }

    #[test]
    fn test_validation_is_conjunctive() {
        let registry = ProcessorRegistry::default();
        let mut no_storage = complete("no-storage");
        if let Some(memory) = no_storage.specs.memory.as_mut() {
            memory.storage = None;
        }
        let catalog = vec![complete("a"), no_storage, complete("b")];

        let validated = validate_catalog(&registry, &catalog);
        let links: Vec<&str> = validated.iter().map(|r| r.link.as_str()).collect();
        assert_eq!(links, vec!["a", "b"]);
    }

    #[test]
    fn test_registry_defines_the_gate() {
        let registry = ProcessorRegistry::new(vec![Box::new(BatteryEndurance)]);
        let battery_only = SmartPrixRecord::new("x", "X").with_battery_capacity(4500.0);
        assert!(is_valid(&registry, &battery_only));
        assert!(!is_valid(&ProcessorRegistry::default(), &battery_only));
    }

    #[test]
    fn test_empty_catalog() {
        let registry = ProcessorRegistry::default();
        assert!(validate_catalog(&registry, &[]).is_empty());
    }
}
