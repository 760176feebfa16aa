//! Feature extraction for device scoring.
//!
//! Provides pure functions shared by every category processor:
//! - Min-max normalization with the engine's edge-case rules
//! - Range accumulation over a set of samples
//! - Parsing of Antutu benchmark strings
//! - Parsing of memory capacity strings (`"12 GB"`, `"1 TB"`)

use once_cell::sync::Lazy;
use regex::Regex;
use specrank_model::ValueRange;

/// Gigabytes per terabyte when converting storage sizes.
pub const GB_PER_TB: f64 = 1024.0;

static CAPACITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(GB|TB)\b").expect("capacity regex"));

/// Min-max normalize `value` into [0, 1].
///
/// - Missing or NaN input scores 0 (worst case).
/// - A degenerate range (`min == max`) scores 0.5.
/// - Everything else is `(value - min) / (max - min)` clamped to [0, 1].
pub fn normalize(value: Option<f64>, min: f64, max: f64) -> f64 {
    let value = match value {
        Some(v) if !v.is_nan() => v,
        _ => return 0.0,
    };

    if min == max {
        return 0.5;
    }

    let scaled = (value - min) / (max - min);
    if scaled.is_nan() {
        return 0.0;
    }
    scaled.clamp(0.0, 1.0)
}

/// Normalize against a precomputed range.
pub fn normalize_in(value: Option<f64>, range: ValueRange) -> f64 {
    normalize(value, range.min, range.max)
}

/// Compute the {min, max} of the finite samples, `None` if there are none.
pub fn range_of<I>(values: I) -> Option<ValueRange>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<ValueRange>, v| match acc {
            None => Some(ValueRange::new(v, v)),
            Some(r) => Some(ValueRange::new(r.min.min(v), r.max.max(v))),
        })
}

/// Parse an Antutu breakdown string such as `"312456"` or `"1,204,332"`.
pub fn parse_benchmark(text: &str) -> Option<f64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse the first `<number> GB|TB` occurrence into gigabytes.
///
/// Only positive sizes are accepted. Terabytes are rejected unless
/// `allow_tb` is set.
fn parse_capacity_gb(text: &str, allow_tb: bool) -> Option<f64> {
    let caps = CAPACITY_RE.captures(text)?;
    let amount: f64 = caps.get(1)?.as_str().parse().ok()?;
    let unit = caps.get(2)?.as_str();

    let gigabytes = if unit.eq_ignore_ascii_case("TB") {
        if !allow_tb {
            return None;
        }
        amount * GB_PER_TB
    } else {
        amount
    };

    Some(gigabytes).filter(|v| v.is_finite() && *v > 0.0)
}

/// Parse a RAM string (`"12 GB"`) into gigabytes.
pub fn parse_ram_gb(text: &str) -> Option<f64> {
    parse_capacity_gb(text, false)
}

/// Parse a storage string (`"256 GB"`, `"1 TB"`) into gigabytes.
pub fn parse_storage_gb(text: &str) -> Option<f64> {
    parse_capacity_gb(text, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_bounds() {
        assert_eq!(normalize(Some(3000.0), 3000.0, 5000.0), 0.0);
        assert_eq!(normalize(Some(5000.0), 3000.0, 5000.0), 1.0);
        assert_eq!(normalize(Some(4000.0), 3000.0, 5000.0), 0.5);
        // out-of-range callers are clamped
        assert_eq!(normalize(Some(9000.0), 3000.0, 5000.0), 1.0);
        assert_eq!(normalize(Some(-1.0), 3000.0, 5000.0), 0.0);
    }

    #[test]
    fn test_normalize_degenerate_range() {
        assert_eq!(normalize(Some(5000.0), 5000.0, 5000.0), 0.5);
        assert_eq!(normalize(Some(1.0), 42.0, 42.0), 0.5);
    }

    #[test]
    fn test_normalize_missing_input() {
        assert_eq!(normalize(None, 0.0, 10.0), 0.0);
        assert_eq!(normalize(Some(f64::NAN), 0.0, 10.0), 0.0);
        assert_eq!(normalize(None, 3.0, 3.0), 0.0);
    }

    #[test]
    fn test_normalize_stays_in_unit_interval() {
        let samples = [-1e9, -3.5, 0.0, 0.25, 7.0, 19.99, 1e12];
        for &value in &samples {
            for &(min, max) in &[(0.0, 1.0), (-10.0, 10.0), (5.0, 6.0), (-1e6, 1e6)] {
                let n = normalize(Some(value), min, max);
                assert!((0.0..=1.0).contains(&n), "{value} in [{min}, {max}] gave {n}");
            }
        }
    }

    #[test]
    fn test_range_of() {
        assert_eq!(
            range_of([4000.0, 6000.0, 5000.0]),
            Some(ValueRange::new(4000.0, 6000.0))
        );
        assert_eq!(range_of([f64::NAN, 7.0]), Some(ValueRange::new(7.0, 7.0)));
        assert_eq!(range_of(Vec::<f64>::new()), None);
    }

    #[test]
    fn test_parse_benchmark() {
        assert_eq!(parse_benchmark("312456"), Some(312456.0));
        assert_eq!(parse_benchmark(" 1,204,332 "), Some(1204332.0));
        assert_eq!(parse_benchmark("98765.5"), Some(98765.5));
        assert_eq!(parse_benchmark("N/A"), None);
        assert_eq!(parse_benchmark(""), None);
        assert_eq!(parse_benchmark("inf"), None);
    }

    #[test]
    fn test_parse_ram() {
        assert_eq!(parse_ram_gb("12 GB"), Some(12.0));
        assert_eq!(parse_ram_gb("8GB"), Some(8.0));
        assert_eq!(parse_ram_gb("8 GB + 8 GB Virtual"), Some(8.0));
        assert_eq!(parse_ram_gb("1 TB"), None);
        assert_eq!(parse_ram_gb("0 GB"), None);
        assert_eq!(parse_ram_gb("512 MB"), None);
    }

    #[test]
    fn test_parse_storage() {
        assert_eq!(parse_storage_gb("256 GB"), Some(256.0));
        assert_eq!(parse_storage_gb("1 TB"), Some(1024.0));
        assert_eq!(parse_storage_gb("unknown"), None);
    }
}
