//! Code generation helpers for raid_engine.
//!
//! This crate parses the static JSON tables under `data/` (type chart,
//! CP multipliers, absolute tier thresholds) and generates Rust source
//! for the rating engine.

mod helpers;
mod levels;
mod models;
mod tiers;
mod types;

use std::path::Path;
use std::println;

/// Generate all code from the data directory into the output directory.
///
/// This is the main entry point called from raid_engine's build.rs.
pub fn generate_all(out_dir: &Path, data_dir: &Path) {
    // Rerun if any data file changes
    for file in &["typechart.json", "cp_multipliers.json", "tier_thresholds.json"] {
        println!("cargo:rerun-if-changed={}", data_dir.join(file).display());
    }

    types::generate(out_dir, data_dir);
    levels::generate(out_dir, data_dir);
    tiers::generate(out_dir, data_dir);
}
