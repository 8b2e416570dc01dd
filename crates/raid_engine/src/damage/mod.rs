//! Damage model.
//!
//! Pure functions for single-hit damage, move duration normalization and
//! power compensation under turn-quantized timing, plus the type
//! effectiveness helpers the rate engine feeds into the damage modifier.
//!
//! # Precision
//!
//! The game client multiplies in single precision. Every ×1.2 (STAB) and
//! ×1.6 / ×0.625 (effectiveness) step is rounded through [`fround`] so the
//! results bit-match golden values captured from the client formulas.

mod effectiveness;
mod formula;

pub use effectiveness::{multiplier_against, nominal_profile, weakness_profile, TypeMap};
pub use formula::{
    damage_modifier, fround, has_stab, hit_damage, normalize_duration, normalize_power,
    STAB_MULTIPLIER, TICK_SECONDS,
};
