//! Fixture data structures for golden rate tests.
//!
//! These types are deserialized from `tests/fixtures/dps_golden.json`.

use raid_engine::{Config, Move, ResolvedY, Type};
use serde::Deserialize;

/// Root structure of the golden fixture file.
#[derive(Deserialize)]
pub struct GoldenFixture {
    pub meta: GoldenMeta,
    pub cases: Vec<GoldenCase>,
}

#[derive(Deserialize)]
pub struct GoldenMeta {
    /// Relative tolerance on every expected value
    pub tolerance: f64,
}

/// One attacker/moveset/opponent scenario with its expected scores.
#[derive(Deserialize, Debug, Clone)]
pub struct GoldenCase {
    pub id: String,
    /// Overrides on top of `Config::default()`
    pub config: Config,
    pub attacker: AttackerData,
    pub fast: Move,
    pub charged: Move,
    /// Opponent typing; effectiveness is derived from it
    pub enemy_types: Vec<Type>,
    pub enemy_def: f64,
    pub sample: Option<SampleData>,
    pub expected: Expected,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AttackerData {
    pub types: Vec<Type>,
    pub atk: f64,
    pub defense: f64,
    pub hp: f64,
}

#[derive(Deserialize, Debug, Clone, Copy)]
pub struct SampleData {
    pub y_num: Option<f64>,
    pub cm_num: Option<f64>,
}

impl SampleData {
    pub fn resolved(self) -> ResolvedY {
        ResolvedY {
            y_num: self.y_num,
            cm_num: self.cm_num,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy)]
pub struct Expected {
    pub dps: f64,
    pub tdo: f64,
    pub rating: f64,
}
