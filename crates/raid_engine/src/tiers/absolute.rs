//! Fixed per-metric thresholds.

use crate::config::MetricKind;
use crate::error::{EngineError, Result};
use crate::tier_tables::ABSOLUTE_TIERS;

/// Threshold rows for a metric, descending by minimum.
pub fn thresholds(metric: MetricKind) -> Result<&'static [(&'static str, f64)]> {
    ABSOLUTE_TIERS
        .get(metric.key())
        .copied()
        .ok_or_else(|| EngineError::config("metric", format!("no absolute tiers for `{}`", metric.key())))
}

/// Label of the first row whose minimum `value` reaches.
pub fn absolute_label(value: f64, rows: &[(&'static str, f64)]) -> &'static str {
    rows.iter()
        .find(|(_, min)| value >= *min)
        .or(rows.last())
        .map_or("F", |row| row.0)
}
