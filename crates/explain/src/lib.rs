//! Explanation generation for device rankings.
//!
//! Two audiences:
//! - Catalog maintainers: why validation dropped a record (the engine
//!   itself never says)
//! - End users: what a ranked device's score breakdown means

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use specrank_model::{Category, CategoryScore, ScoredRecord, SmartPrixRecord};
use specrank_scoring::ProcessorRegistry;

/// Raw score at or above which a category counts as a strength.
pub const STRONG_THRESHOLD: f64 = 0.75;

/// Raw score below which a category counts as a weakness.
pub const WEAK_THRESHOLD: f64 = 0.4;

/// Which processors rejected a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub link: String,
    pub title: String,

    /// Categories whose validator failed, in registry order
    pub failed: Vec<Category>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Validation outcome across a whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticSummary {
    pub total: usize,
    pub valid: usize,

    /// Reports for dropped records only, in catalog order
    pub dropped: Vec<ValidationReport>,

    /// How many records each category rejected
    pub failures_by_category: BTreeMap<Category, usize>,
}

/// Re-run every validator individually to attribute failures.
pub fn diagnose_record(
    registry: &ProcessorRegistry,
    record: &SmartPrixRecord,
) -> ValidationReport {
    ValidationReport {
        link: record.link.clone(),
        title: record.title.clone(),
        failed: registry
            .iter()
            .filter(|p| !p.validate(record))
            .map(|p| p.category())
            .collect(),
    }
}

pub fn diagnose_catalog(
    registry: &ProcessorRegistry,
    catalog: &[SmartPrixRecord],
) -> DiagnosticSummary {
    let mut summary = DiagnosticSummary {
        total: catalog.len(),
        ..Default::default()
    };

    for record in catalog {
        let report = diagnose_record(registry, record);
        if report.is_valid() {
            summary.valid += 1;
            continue;
        }
        for category in &report.failed {
            *summary.failures_by_category.entry(*category).or_insert(0) += 1;
        }
        summary.dropped.push(report);
    }

    summary
}

/// A structured explanation for one category score.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    /// Short summary (1 line)
    pub summary: String,

    /// Detailed explanation (1-2 sentences)
    pub detail: String,

    /// The raw score being explained (0.0 - 1.0)
    pub strength: f64,
}

/// Generate an explanation for a single category score.
pub fn explain_score(score: &CategoryScore) -> Explanation {
    let label = score.category.label();
    let band = if score.raw_score >= STRONG_THRESHOLD {
        "near the top of this catalog"
    } else if score.raw_score >= WEAK_THRESHOLD {
        "mid-range for this catalog"
    } else {
        "below most devices in this catalog"
    };

    let mut detail = format!(
        "{} scored {:.2} relative to the other devices considered, contributing {:.3} to the total.",
        label, score.raw_score, score.weighted_score
    );
    match score.category {
        Category::DisplayQuality => {
            detail.push_str(" Display blends panel type, pixel density, refresh rate and brightness.")
        }
        Category::CameraQuality => {
            detail.push_str(" Camera is judged on main sensor resolution only.")
        }
        _ => {}
    }

    Explanation {
        summary: format!("{} is {}", label, band),
        detail,
        strength: score.raw_score,
    }
}

/// Generate explanations for every weighted category of a ranked record.
pub fn explain_record(record: &ScoredRecord) -> Vec<Explanation> {
    record.scores.categories.iter().map(explain_score).collect()
}

/// Generate a one-line summary of a ranked record.
pub fn summarize_scores(record: &ScoredRecord) -> String {
    let total = record.total_weighted_score();
    let level = if total >= 0.6 {
        "STRONG MATCH"
    } else if total >= 0.35 {
        "GOOD MATCH"
    } else {
        "WEAK MATCH"
    };

    // Categories the caller zero-weighted are not worth mentioning.
    let strengths: Vec<&str> = record
        .scores
        .categories
        .iter()
        .filter(|s| s.weighted_score > 0.0 && s.raw_score >= STRONG_THRESHOLD)
        .map(|s| s.category.label())
        .collect();

    if strengths.is_empty() {
        format!("{} ({:.2}): no standout category", level, total)
    } else {
        format!("{} ({:.2}): strong {}", level, total, strengths.join(", "))
    }
}
