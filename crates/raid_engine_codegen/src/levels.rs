//! CP multiplier table generation.

use crate::helpers::f32_literal;
use crate::models::CpMultiplierTable;
use quote::quote;
use std::fs;
use std::path::Path;

/// Generate the per-level CP multiplier table
pub fn generate(out_dir: &Path, data_dir: &Path) {
    let json =
        fs::read_to_string(data_dir.join("cp_multipliers.json")).expect("cp_multipliers.json");
    let table: CpMultiplierTable = serde_json::from_str(&json).expect("parse cp_multipliers");

    assert_eq!(
        table.multipliers.len(),
        table.max_level as usize,
        "cp_multipliers.json must list exactly one multiplier per level"
    );

    let max_level = table.max_level;
    let count = table.multipliers.len();
    let cells = table.multipliers.iter().map(|&v| f32_literal(v));

    let code = quote! {
        /// Highest integer level with a table entry
        pub const MAX_LEVEL: u8 = #max_level;

        /// CP multiplier per integer level: CP_MULTIPLIERS[level - 1]
        pub static CP_MULTIPLIERS: [f32; #count] = [#(#cells),*];
    };

    let dest = out_dir.join("levels.rs");
    fs::write(&dest, code.to_string()).expect("write levels.rs");
}
