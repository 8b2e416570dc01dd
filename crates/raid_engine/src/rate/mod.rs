//! Rate engine.
//!
//! Sustained output rate (DPS), total output before fainting (TDO), and the
//! incoming-pressure estimate (Y) of a moveset used by an opponent.
//!
//! # Model
//!
//! An attacker alternates fast moves (gaining energy) and charged moves
//! (spending it) while also gaining energy from damage taken. The closed
//! form blends the two rates by their energy rates, then corrects for the
//! energy still banked when the attacker faints mid-cycle.

mod dps;
mod specific_y;

pub use dps::{compute_dps, compute_dps_detailed, compute_tdo, party_boost, DpsBreakdown, DpsQuery};
pub use specific_y::{compute_specific_y, legacy_fast_per_charged};
