//! Core domain model for SpecRank device scoring.
//!
//! This crate defines the fundamental types used throughout the system:
//! - `SmartPrixRecord`: A scraped device with its specification tree
//! - `Category`: The scoring categories known to the engine
//! - `CategoryWeights`: User-priority weights per category
//! - `ProductCategoryScores` / `ScoredRecord`: Per-device score breakdowns

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

/// Accept any JSON value and keep it only if it is a number.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_f64()))
}

/// Accept any JSON value and keep it only if it is a string.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_str().map(str::to_string)))
}

/// Like [`lenient_string`], falling back to an empty string.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

/// Keep the object entries of a lens array; anything else is dropped.
fn lenient_lenses<'de, D>(deserializer: D) -> Result<Vec<CameraLens>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let Some(serde_json::Value::Array(entries)) = value else {
        return Ok(Vec::new());
    };

    Ok(entries
        .into_iter()
        .filter(serde_json::Value::is_object)
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect())
}

/// A single numeric measurement (`{ "value": 120 }`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    #[serde(
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<f64>,
}

impl Metric {
    pub fn new(value: f64) -> Self {
        Self { value: Some(value) }
    }
}

/// Display panel technology, carried as an ordinal score (0-10).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PanelType {
    #[serde(
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySpec {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub panel_type: Option<PanelType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ppi: Option<Metric>,

    /// Refresh rate in Hz
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_rate: Option<Metric>,

    /// Peak brightness in nits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brightness: Option<Metric>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatterySpec {
    /// Capacity in mAh
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<Metric>,
}

/// Antutu sub-scores. The scraper keeps them as numeric strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AntutuBreakdown {
    #[serde(
        rename = "CPU",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub cpu: Option<String>,

    #[serde(
        rename = "GPU",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub gpu: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Antutu {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<AntutuBreakdown>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Benchmarks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub antutu: Option<Antutu>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<Benchmarks>,
}

/// Memory sizes as scraped, e.g. `"12 GB"` or `"1 TB"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemorySpec {
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub ram: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub storage: Option<String>,
}

/// One rear camera module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraLens {
    /// Role tag such as `"main"`, `"ultrawide"`, `"telephoto"`
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub position: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub megapixel: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraSpec {
    #[serde(default, deserialize_with = "lenient_lenses")]
    pub rear_camera: Vec<CameraLens>,
}

/// The extracted specification subtree of a device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecSheet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplaySpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery: Option<BatterySpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical: Option<TechnicalSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<MemorySpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<CameraSpec>,
}

/// A scraped device record.
///
/// This is the canonical representation consumed by the scoring engine.
/// Produced by the scraping pipeline; the engine never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartPrixRecord {
    /// Product page URL
    pub link: String,

    /// Device name as listed
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,

    #[serde(default, deserialize_with = "lenient_text")]
    pub brand: String,

    /// Listed price in rupees
    #[serde(
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<f64>,

    #[serde(flatten)]
    pub specs: SpecSheet,
}

impl SmartPrixRecord {
    /// Create a minimal record with an empty spec sheet.
    pub fn new(link: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            title: title.into(),
            brand: String::new(),
            price: None,
            specs: SpecSheet::default(),
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_battery_capacity(mut self, mah: f64) -> Self {
        self.specs.battery = Some(BatterySpec {
            capacity: Some(Metric::new(mah)),
        });
        self
    }

    pub fn with_display(
        mut self,
        type_score: f64,
        ppi: f64,
        refresh_rate: f64,
        brightness: f64,
    ) -> Self {
        self.specs.display = Some(DisplaySpec {
            panel_type: Some(PanelType {
                score: Some(type_score),
            }),
            ppi: Some(Metric::new(ppi)),
            refresh_rate: Some(Metric::new(refresh_rate)),
            brightness: Some(Metric::new(brightness)),
        });
        self
    }

    pub fn with_antutu(mut self, cpu: impl Into<String>, gpu: impl Into<String>) -> Self {
        self.specs.technical = Some(TechnicalSpec {
            benchmark: Some(Benchmarks {
                antutu: Some(Antutu {
                    breakdown: Some(AntutuBreakdown {
                        cpu: Some(cpu.into()),
                        gpu: Some(gpu.into()),
                    }),
                }),
            }),
        });
        self
    }

    pub fn with_memory(mut self, ram: impl Into<String>, storage: impl Into<String>) -> Self {
        self.specs.memory = Some(MemorySpec {
            ram: Some(ram.into()),
            storage: Some(storage.into()),
        });
        self
    }

    pub fn with_rear_camera(mut self, position: impl Into<String>, megapixel: f64) -> Self {
        self.specs
            .camera
            .get_or_insert_with(CameraSpec::default)
            .rear_camera
            .push(CameraLens {
                position: Some(position.into()),
                megapixel: Some(megapixel),
            });
        self
    }

    pub fn battery_capacity(&self) -> Option<f64> {
        self.specs.battery.as_ref()?.capacity.as_ref()?.value
    }

    pub fn display_type_score(&self) -> Option<f64> {
        self.specs.display.as_ref()?.panel_type.as_ref()?.score
    }

    pub fn display_ppi(&self) -> Option<f64> {
        self.specs.display.as_ref()?.ppi.as_ref()?.value
    }

    pub fn display_refresh_rate(&self) -> Option<f64> {
        self.specs.display.as_ref()?.refresh_rate.as_ref()?.value
    }

    pub fn display_brightness(&self) -> Option<f64> {
        self.specs.display.as_ref()?.brightness.as_ref()?.value
    }

    fn antutu_breakdown(&self) -> Option<&AntutuBreakdown> {
        self.specs
            .technical
            .as_ref()?
            .benchmark
            .as_ref()?
            .antutu
            .as_ref()?
            .breakdown
            .as_ref()
    }

    pub fn antutu_cpu(&self) -> Option<&str> {
        self.antutu_breakdown()?.cpu.as_deref()
    }

    pub fn antutu_gpu(&self) -> Option<&str> {
        self.antutu_breakdown()?.gpu.as_deref()
    }

    pub fn ram(&self) -> Option<&str> {
        self.specs.memory.as_ref()?.ram.as_deref()
    }

    pub fn storage(&self) -> Option<&str> {
        self.specs.memory.as_ref()?.storage.as_deref()
    }

    /// Rear camera modules, empty when the record has none.
    pub fn rear_cameras(&self) -> &[CameraLens] {
        self.specs
            .camera
            .as_ref()
            .map(|c| c.rear_camera.as_slice())
            .unwrap_or(&[])
    }
}

/// Scoring categories known to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    BatteryEndurance,
    DisplayQuality,
    CpuPerformance,
    GpuPerformance,
    CameraQuality,
    RamCapacity,
    RomCapacity,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Self::BatteryEndurance,
        Self::DisplayQuality,
        Self::CpuPerformance,
        Self::GpuPerformance,
        Self::CameraQuality,
        Self::RamCapacity,
        Self::RomCapacity,
    ];

    /// Stable identifier, used as a map key everywhere.
    pub fn key(&self) -> &'static str {
        match self {
            Self::BatteryEndurance => "batteryEndurance",
            Self::DisplayQuality => "displayQuality",
            Self::CpuPerformance => "cpuPerformance",
            Self::GpuPerformance => "gpuPerformance",
            Self::CameraQuality => "cameraQuality",
            Self::RamCapacity => "ramCapacity",
            Self::RomCapacity => "romCapacity",
        }
    }

    /// Get a human-readable label for this category.
    pub fn label(&self) -> &'static str {
        match self {
            Self::BatteryEndurance => "Battery Endurance",
            Self::DisplayQuality => "Display Quality",
            Self::CpuPerformance => "CPU Performance",
            Self::GpuPerformance => "GPU Performance",
            Self::CameraQuality => "Camera Quality",
            Self::RamCapacity => "RAM Capacity",
            Self::RomCapacity => "Storage Capacity",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Errors from loading or checking a weight vector.
#[derive(Debug, Error)]
pub enum WeightsError {
    #[error("Invalid weights document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Weights document must be a JSON object")]
    NotAnObject,

    #[error("Weight for {category} is out of range: {value}")]
    OutOfRange { category: Category, value: f64 },
}

/// User-priority weights, each expected in [0, 1] and summing to 1.0.
///
/// The scoring engine does not enforce either expectation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWeights {
    #[serde(default)]
    pub battery_endurance: f64,
    #[serde(default)]
    pub display_quality: f64,
    #[serde(default)]
    pub cpu_performance: f64,
    #[serde(default)]
    pub gpu_performance: f64,
    #[serde(default)]
    pub camera_quality: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            battery_endurance: 0.2,
            display_quality: 0.2,
            cpu_performance: 0.2,
            gpu_performance: 0.2,
            camera_quality: 0.2,
        }
    }
}

impl CategoryWeights {
    /// Weights with every category at zero.
    pub fn zero() -> Self {
        Self {
            battery_endurance: 0.0,
            display_quality: 0.0,
            cpu_performance: 0.0,
            gpu_performance: 0.0,
            camera_quality: 0.0,
        }
    }

    pub fn with(mut self, category: Category, weight: f64) -> Self {
        match category {
            Category::BatteryEndurance => self.battery_endurance = weight,
            Category::DisplayQuality => self.display_quality = weight,
            Category::CpuPerformance => self.cpu_performance = weight,
            Category::GpuPerformance => self.gpu_performance = weight,
            Category::CameraQuality => self.camera_quality = weight,
            Category::RamCapacity | Category::RomCapacity => {}
        }
        self
    }

    /// Weight applied to a category, `None` for gatekeeper-only categories.
    pub fn weight_for(&self, category: Category) -> Option<f64> {
        match category {
            Category::BatteryEndurance => Some(self.battery_endurance),
            Category::DisplayQuality => Some(self.display_quality),
            Category::CpuPerformance => Some(self.cpu_performance),
            Category::GpuPerformance => Some(self.gpu_performance),
            Category::CameraQuality => Some(self.camera_quality),
            Category::RamCapacity | Category::RomCapacity => None,
        }
    }

    pub fn total(&self) -> f64 {
        Category::ALL
            .iter()
            .filter_map(|c| self.weight_for(*c))
            .sum()
    }

    /// Whether the weights sum to 1.0 (within float tolerance).
    pub fn is_normalized(&self) -> bool {
        (self.total() - 1.0).abs() < 1e-6
    }

    /// Check every weight is a finite number in [0, 1].
    pub fn check(&self) -> Result<(), WeightsError> {
        for category in Category::ALL {
            if let Some(value) = self.weight_for(category) {
                if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                    return Err(WeightsError::OutOfRange { category, value });
                }
            }
        }
        Ok(())
    }

    /// Parse weights from a JSON object with camelCase keys.
    ///
    /// Arrays are rejected rather than read positionally.
    pub fn from_json(text: &str) -> Result<Self, WeightsError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        if !value.is_object() {
            return Err(WeightsError::NotAnObject);
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// A `{min, max}` normalization range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Default range when no samples exist: {0, 1}.
    pub fn unit() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Default range for the display-type ordinal score: {0, 10}.
    pub fn display_type() -> Self {
        Self::new(0.0, 10.0)
    }
}

/// Score of one record in one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub category: Category,

    /// Normalized processor output in [0, 1]
    pub raw_score: f64,

    /// `raw_score` multiplied by the caller's weight
    pub weighted_score: f64,
}

/// Full score breakdown for one record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCategoryScores {
    pub categories: Vec<CategoryScore>,
    pub total_weighted_score: f64,
}

impl ProductCategoryScores {
    pub fn get(&self, category: Category) -> Option<&CategoryScore> {
        self.categories.iter().find(|s| s.category == category)
    }
}

/// A ranked result: identifying fields, the specification sheet and its scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredRecord {
    pub link: String,
    pub title: String,
    pub brand: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    pub specs: SpecSheet,
    pub scores: ProductCategoryScores,
}

impl ScoredRecord {
    pub fn new(record: &SmartPrixRecord, scores: ProductCategoryScores) -> Self {
        Self {
            link: record.link.clone(),
            title: record.title.clone(),
            brand: record.brand.clone(),
            price: record.price,
            specs: record.specs.clone(),
            scores,
        }
    }

    pub fn total_weighted_score(&self) -> f64 {
        self.scores.total_weighted_score
    }
}
