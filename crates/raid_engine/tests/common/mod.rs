//! Shared test utilities.
//!
//! Loads the fixture files under `tests/fixtures/` once per test binary and
//! offers small builders used across the integration tests.

#![allow(dead_code)]

pub mod fixtures;

use raid_engine::{GameData, Species};
use std::path::PathBuf;
use std::sync::OnceLock;

/// Absolute path of a file under `tests/fixtures/`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// The fixture roster, parsed once.
pub fn game_data() -> &'static GameData {
    static DATA: OnceLock<GameData> = OnceLock::new();
    DATA.get_or_init(|| {
        let path = fixture_path("game_data.json");
        let json = std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e));
        GameData::from_json(&json).expect("game_data.json parses")
    })
}

/// Default form of a fixture species.
pub fn species(name: &str) -> &'static Species {
    species_form(name, "Normal")
}

pub fn species_form(name: &str, form: &str) -> &'static Species {
    game_data()
        .species
        .find(name, form)
        .unwrap_or_else(|| panic!("fixture species {} ({}) missing", name, form))
}

/// Route engine logs to the test writer; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Relative comparison with an absolute floor for values near zero.
pub fn approx_eq(actual: f64, expected: f64, tolerance: f64) -> bool {
    let scale = expected.abs().max(1.0);
    (actual - expected).abs() <= tolerance * scale
}
