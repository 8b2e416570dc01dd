//! Fixed-step tiers from the ratio to the baseline.

use serde::{Deserialize, Serialize};

const BELOW_BASELINE: [&str; 4] = ["A", "B", "C", "D"];

/// Step widths of the ratio mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioPreset {
    /// S every 20 points above 100%, A-D every 10 below
    #[default]
    Standard,
    /// S every 25 points, A-D every 15
    Wide,
}

impl RatioPreset {
    /// (S step, letter step) in percentage points.
    pub const fn steps(self) -> (f64, f64) {
        match self {
            RatioPreset::Standard => (20.0, 10.0),
            RatioPreset::Wide => (25.0, 15.0),
        }
    }
}

/// Tier label for a percentage of the baseline.
pub fn ratio_label(pct: f64, preset: RatioPreset) -> String {
    let (s_step, step) = preset.steps();
    if pct >= 100.0 {
        let count = 1 + ((pct - 100.0) / s_step).floor() as usize;
        return "S".repeat(count);
    }
    let idx = ((100.0 - pct) / step).ceil() as usize;
    match idx.checked_sub(1).and_then(|i| BELOW_BASELINE.get(i)) {
        Some(label) => (*label).to_string(),
        None => "F".to_string(),
    }
}
