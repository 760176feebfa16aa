use serde::{Deserialize, Serialize};

/// Sub-metric weights blended into the display score.
///
/// The defaults sum to 0.90, so a perfect display tops out there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplayBlend {
    pub panel_type: f64,
    pub ppi: f64,
    pub refresh_rate: f64,
    pub brightness: f64,
}

impl Default for DisplayBlend {
    fn default() -> Self {
        Self {
            panel_type: 0.30,
            ppi: 0.25,
            refresh_rate: 0.20,
            brightness: 0.15,
        }
    }
}

/// Configuration for the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoringConfig {
    /// Display sub-metric blend
    pub display: DisplayBlend,
    /// Multiplier on the normalized main-camera megapixel score
    pub camera_main_weight: f64,
    /// Result count when the caller does not pick one
    pub default_top_n: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            display: DisplayBlend::default(),
            camera_main_weight: 0.70,
            default_top_n: 20,
        }
    }
}
