//! JSON deserialization structures for the static data files.

use serde::Deserialize;
use std::collections::BTreeMap;

/// One attacking type's row in `typechart.json`.
#[derive(Deserialize)]
pub struct TypeChartEntry {
    #[serde(default)]
    pub super_effective: Vec<String>,
    #[serde(default)]
    pub not_very_effective: Vec<String>,
    #[serde(default)]
    pub no_effect: Vec<String>,
}

/// `cp_multipliers.json`: one multiplier per integer level, starting at 1.
#[derive(Deserialize)]
pub struct CpMultiplierTable {
    pub max_level: u8,
    pub multipliers: Vec<f64>,
}

/// `tier_thresholds.json`: metric name -> ordered (label, minimum) pairs.
pub type TierThresholds = BTreeMap<String, Vec<(String, f64)>>;
