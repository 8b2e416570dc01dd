//! Level → CP multiplier lookup.
//!
//! Integer levels read the generated single-precision table directly. Half
//! levels are not stored by the game; they are the quadratic mean of the two
//! neighbouring integer levels. Every half step is computed once into a
//! write-once table because the enumerator queries it for every candidate.

use crate::levels::{CP_MULTIPLIERS, MAX_LEVEL};
use std::sync::OnceLock;

/// Lowest valid level
pub const MIN_LEVEL: f64 = 1.0;

static HALF_STEPS: OnceLock<Vec<f64>> = OnceLock::new();

fn half_steps() -> &'static [f64] {
    HALF_STEPS.get_or_init(|| {
        let mut table = Vec::with_capacity(CP_MULTIPLIERS.len() * 2 - 1);
        for (i, &cpm) in CP_MULTIPLIERS.iter().enumerate() {
            let cpm = f64::from(cpm);
            table.push(cpm);
            if let Some(&next) = CP_MULTIPLIERS.get(i + 1) {
                table.push(interpolate(cpm, f64::from(next)));
            }
        }
        table
    })
}

#[inline]
fn interpolate(prev: f64, next: f64) -> f64 {
    ((prev * prev + next * next) / 2.0).sqrt()
}

/// CP multiplier for a level.
///
/// Returns 0 for levels below 1, above [`MAX_LEVEL`], or off the half-level
/// grid. Callers treat a zero multiplier as an invalid attacker.
pub fn multiplier_for_level(level: f64) -> f64 {
    let doubled = level * 2.0;
    if !doubled.is_finite() || doubled.fract() != 0.0 || level < MIN_LEVEL {
        return 0.0;
    }
    let index = doubled as usize - 2;
    half_steps().get(index).copied().unwrap_or(0.0)
}

/// Whether a level has a table entry.
pub fn is_valid_level(level: f64) -> bool {
    multiplier_for_level(level) > 0.0
}

/// Highest level as a float, for range checks in callers.
pub fn max_level() -> f64 {
    f64::from(MAX_LEVEL)
}
