//! Absolute tier threshold generation.

use crate::helpers::f64_source;
use crate::models::TierThresholds;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Generate the phf map of per-metric absolute tier thresholds
pub fn generate(out_dir: &Path, data_dir: &Path) {
    let json =
        fs::read_to_string(data_dir.join("tier_thresholds.json")).expect("tier_thresholds.json");
    let thresholds: TierThresholds = serde_json::from_str(&json).expect("parse tier_thresholds");

    let mut phf_map = phf_codegen::Map::new();
    for (metric, rows) in &thresholds {
        // Rows must descend so the first matching minimum wins
        let descending = rows.windows(2).all(|w| w[0].1 > w[1].1);
        assert!(descending, "tier thresholds for `{}` must strictly descend", metric);

        let cells: Vec<String> = rows
            .iter()
            .map(|(label, min)| format!("({:?}, {})", label, f64_source(*min)))
            .collect();
        phf_map.entry(metric.as_str(), &format!("&[{}]", cells.join(", ")));
    }
    let phf_str = phf_map.build().to_string();

    let dest = out_dir.join("tiers.rs");
    let mut file = fs::File::create(&dest).expect("create tiers.rs");
    writeln!(
        file,
        "/// Absolute tier thresholds keyed by metric name: (label, minimum rating), descending"
    )
    .unwrap();
    writeln!(
        file,
        "pub static ABSOLUTE_TIERS: phf::Map<&'static str, &'static [(&'static str, f64)]> = {};",
        phf_str
    )
    .unwrap();
}
