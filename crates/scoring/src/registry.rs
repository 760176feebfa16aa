//! The ordered set of active category processors.

use std::collections::HashMap;
use std::fmt;

use specrank_model::Category;

use crate::config::ScoringConfig;
use crate::processors::{
    BatteryEndurance, CameraQuality, CategoryProcessor, CpuPerformance, DisplayQuality,
    GpuPerformance, RamCapacity, RomCapacity,
};

/// Ordered list of processors plus a name-indexed lookup.
///
/// The single source of truth for which categories gate validation,
/// get a context entry and are aggregated by the scoring stage.
pub struct ProcessorRegistry {
    processors: Vec<Box<dyn CategoryProcessor>>,
    by_name: HashMap<&'static str, usize>,
}

impl ProcessorRegistry {
    /// Build a registry from processors in evaluation order.
    pub fn new(processors: Vec<Box<dyn CategoryProcessor>>) -> Self {
        let by_name = processors
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name(), i))
            .collect();

        Self { processors, by_name }
    }

    /// The standard set: battery, display, CPU, GPU, camera, RAM, ROM.
    pub fn standard(config: &ScoringConfig) -> Self {
        Self::new(vec![
            Box::new(BatteryEndurance),
            Box::new(DisplayQuality::new(config.display)),
            Box::new(CpuPerformance),
            Box::new(GpuPerformance),
            Box::new(CameraQuality::new(config.camera_main_weight)),
            Box::new(RamCapacity),
            Box::new(RomCapacity),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn CategoryProcessor> {
        self.processors.iter().map(|p| p.as_ref())
    }

    /// Look up a processor by its category key.
    pub fn get(&self, name: &str) -> Option<&dyn CategoryProcessor> {
        self.by_name
            .get(name)
            .map(|&i| self.processors[i].as_ref())
    }

    pub fn categories(&self) -> Vec<Category> {
        self.iter().map(|p| p.category()).collect()
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }
}

impl Default for ProcessorRegistry {
    fn default() -> Self {
        Self::standard(&ScoringConfig::default())
    }
}

impl fmt::Debug for ProcessorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|p| p.name()))
            .finish()
    }
}
