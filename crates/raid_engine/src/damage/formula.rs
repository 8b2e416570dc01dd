//! Core damage formula and timing utilities.

use crate::data::{Move, MoveKind, HIDDEN_POWER};
use crate::types::Type;

/// Same-type attack bonus as stored by the client
pub const STAB_MULTIPLIER: f32 = 1.2;

/// Length of one combat tick in turn-quantized mode
pub const TICK_SECONDS: f64 = 0.5;

/// Relative duration change at which quantization compensates move power
const POWER_COMPENSATION_THRESHOLD: f64 = 0.199;

/// Round to single precision and widen back (JavaScript's `Math.fround`).
#[inline]
pub fn fround(value: f64) -> f64 {
    value as f32 as f64
}

/// Move duration in seconds.
///
/// In turn-quantized mode the duration snaps to the nearest combat tick.
#[inline]
pub fn normalize_duration(ms: u32, turn_quantized: bool) -> f64 {
    let seconds = f64::from(ms) / 1000.0;
    if turn_quantized {
        (seconds / TICK_SECONDS).round() * TICK_SECONDS
    } else {
        seconds
    }
}

/// Move power after turn-quantization compensation.
///
/// When snapping to ticks moves a duration by 19.9% or more, power shifts by
/// `(quantized - raw) / quantized` of itself: a slowed move hits harder, a
/// sped-up move hits softer.
pub fn normalize_power(mv: &Move, turn_quantized: bool) -> f64 {
    if !turn_quantized {
        return mv.power;
    }
    let raw = normalize_duration(mv.duration_ms, false);
    let quantized = normalize_duration(mv.duration_ms, true);
    if raw <= 0.0 || quantized <= 0.0 {
        return mv.power;
    }
    let shift = quantized - raw;
    if (shift / raw).abs() >= POWER_COMPENSATION_THRESHOLD {
        mv.power * (1.0 + shift / quantized)
    } else {
        mv.power
    }
}

/// Whether a move earns the same-type bonus for an attacker.
///
/// The fast move Hidden Power never does, whatever its listed type.
pub fn has_stab(mv: &Move, kind: MoveKind, attacker_types: &[Type]) -> bool {
    if kind == MoveKind::Fast && mv.name == HIDDEN_POWER {
        return false;
    }
    mv.move_type.is_some_and(|t| attacker_types.contains(&t))
}

/// Combined damage modifier: STAB × effectiveness, rounded to single precision.
#[inline]
pub fn damage_modifier(stab: bool, effectiveness: f64) -> f64 {
    if stab {
        fround(effectiveness * f64::from(STAB_MULTIPLIER))
    } else {
        effectiveness
    }
}

/// Damage of a single hit.
///
/// Continuous form: `0.5 * power * atk/def * modifier + 0.5`.
/// Exact form: `floor(f32(0.5 * power * atk/def * modifier)) + 1`.
#[inline]
pub fn hit_damage(atk: f64, def: f64, power: f64, modifier: f64, exact: bool) -> f64 {
    let raw = 0.5 * power * (atk / def) * modifier;
    if exact {
        fround(raw).floor() + 1.0
    } else {
        raw + 0.5
    }
}
