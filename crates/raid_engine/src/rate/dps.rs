//! DPS and TDO.

use crate::config::{Config, DamageModel};
use crate::damage::{damage_modifier, has_stab, hit_damage, normalize_duration, normalize_power};
use crate::data::{Move, MoveKind};
use crate::enemy::ResolvedY;
use crate::error::{ensure_finite, ensure_positive, Result};
use crate::types::Type;

/// Fast moves needed per party-power charge, indexed by party size.
const PARTY_BOOST_THRESHOLDS: [f64; 5] = [0.0, 0.0, 18.0, 9.0, 6.0];

/// Energy cost of a one-bar charged move.
const ONE_BAR_COST: i32 = -100;

/// Inputs to a single DPS evaluation.
#[derive(Clone, Copy, Debug)]
pub struct DpsQuery<'a> {
    pub types: &'a [Type],
    pub atk: f64,
    pub def: f64,
    pub hp: f64,
    pub fast: &'a Move,
    pub charged: &'a Move,
    /// Effectiveness of the fast move against the opponent
    pub fast_mult: f64,
    /// Effectiveness of the charged move against the opponent
    pub charged_mult: f64,
    pub enemy_def: f64,
    pub sample: ResolvedY,
}

impl<'a> DpsQuery<'a> {
    /// Neutral effectiveness, default enemy defense and Y.
    pub fn new(
        types: &'a [Type],
        atk: f64,
        def: f64,
        hp: f64,
        fast: &'a Move,
        charged: &'a Move,
        config: &Config,
    ) -> Self {
        Self {
            types,
            atk,
            def,
            hp,
            fast,
            charged,
            fast_mult: 1.0,
            charged_mult: 1.0,
            enemy_def: config.default_enemy_defense,
            sample: ResolvedY::default(),
        }
    }

    pub fn multipliers(mut self, fast_mult: f64, charged_mult: f64) -> Self {
        self.fast_mult = fast_mult;
        self.charged_mult = charged_mult;
        self
    }

    pub fn enemy_def(mut self, enemy_def: f64) -> Self {
        self.enemy_def = enemy_def;
        self
    }

    pub fn sample(mut self, sample: ResolvedY) -> Self {
        self.sample = sample;
        self
    }
}

/// Intermediate quantities of a DPS evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DpsBreakdown {
    pub fast_dps: f64,
    pub charged_dps: f64,
    /// Charged DPS after the party boost
    pub charged_dps_adjusted: f64,
    pub fast_eps: f64,
    pub charged_eps: f64,
    pub fast_per_charged: f64,
    pub party_boost: f64,
    /// Incoming damage rate against this attacker
    pub y: f64,
    pub dps: f64,
}

/// Fraction of charged moves that land boosted by party power.
pub fn party_boost(fast_per_charged: f64, party_size: u8) -> f64 {
    match PARTY_BOOST_THRESHOLDS.get(party_size as usize) {
        Some(&threshold) if party_size > 1 => (fast_per_charged / threshold).clamp(0.0, 1.0),
        _ => 0.0,
    }
}

/// Sustained DPS of a moveset.
pub fn compute_dps(query: &DpsQuery, config: &Config) -> Result<f64> {
    compute_dps_detailed(query, config).map(|b| b.dps)
}

/// Sustained DPS with every intermediate term.
pub fn compute_dps_detailed(query: &DpsQuery, config: &Config) -> Result<DpsBreakdown> {
    config.validate()?;
    let q = query;
    let quantized = config.turn_quantized;
    let exact = config.exact_damage;

    let def = ensure_positive(q.def, "attacker defense")?;
    let hp = ensure_positive(q.hp, "attacker HP")?;
    let enemy_def = ensure_positive(q.enemy_def, "opponent defense")?;
    ensure_finite(q.atk, "attacker attack")?;

    let y_num = q.sample.y_num.unwrap_or(config.default_y_numerator);
    let y = ensure_positive(y_num / def, "incoming damage rate")?;
    let in_cm_dmg = q.sample.cm_num.unwrap_or(config.default_cm_numerator) / def;

    let fast_energy = q.fast.energy_gain();
    let cost = q.charged.energy_cost();

    // Energy banked when the attacker faints mid-cycle
    let mut x = 0.5 * cost + 0.5 * fast_energy;
    if config.damage_model == DamageModel::EnergyBased {
        x += 0.5 * in_cm_dmg;
    }

    // Fast move
    let fast_dur = ensure_positive(normalize_duration(q.fast.duration_ms, quantized), "fast move duration")?;
    let fast_mod = damage_modifier(has_stab(q.fast, MoveKind::Fast, q.types), q.fast_mult);
    let fast_dmg = hit_damage(q.atk, enemy_def, normalize_power(q.fast, quantized), fast_mod, exact);
    let fast_dps = fast_dmg / fast_dur;
    let fast_eps = fast_energy / fast_dur;

    // Charged move
    let charged_dur = ensure_positive(
        normalize_duration(q.charged.duration_ms, quantized),
        "charged move duration",
    )?;

    // Fast moves per charged move: energy balance with 0.5 energy per HP lost
    // spread over the time to faint
    let time_to_faint = hp / y;
    let damage_energy_rate = 0.5 * hp / time_to_faint;
    let per_fast = fast_energy + damage_energy_rate * fast_dur;
    let fast_per_charged = if per_fast > 0.0 {
        ((cost - damage_energy_rate * charged_dur) / per_fast).max(0.0)
    } else {
        0.0
    };
    let boost = party_boost(fast_per_charged, config.party_size);

    let charged_mod = damage_modifier(has_stab(q.charged, MoveKind::Charged, q.types), q.charged_mult);
    let charged_dmg = hit_damage(q.atk, enemy_def, normalize_power(q.charged, quantized), charged_mod, exact);
    let charged_dps = charged_dmg / charged_dur;
    let charged_dps_adjusted = charged_dps * (1.0 + boost);

    let mut charged_energy = cost;
    if config.damage_model == DamageModel::Legacy && q.charged.energy_delta == ONE_BAR_COST {
        let window = f64::from(q.charged.damage_window_start_ms) / 1000.0;
        charged_energy += 0.5 * y * window;
    }
    let charged_eps = charged_energy / charged_dur;

    let mut breakdown = DpsBreakdown {
        fast_dps,
        charged_dps,
        charged_dps_adjusted,
        fast_eps,
        charged_eps,
        fast_per_charged,
        party_boost: boost,
        y,
        dps: fast_dps.max(0.0),
    };

    // Charged move is never worth using
    if fast_dps > charged_dps_adjusted {
        ensure_finite(breakdown.dps, "fast move DPS")?;
        return Ok(breakdown);
    }

    let eps_sum = ensure_positive(charged_eps + fast_eps, "combined energy rate")?;
    let dps0 = (fast_dps * charged_eps + charged_dps_adjusted * fast_eps) / eps_sum;
    let dps = dps0 + ((charged_dps_adjusted - fast_dps) / eps_sum) * (0.5 - x / hp) * y;

    breakdown.dps = ensure_finite(dps.max(fast_dps).max(0.0), "DPS")?;
    Ok(breakdown)
}

/// Total damage output before fainting: DPS × time to faint.
pub fn compute_tdo(dps: f64, hp: f64, def: f64, sample: &ResolvedY, config: &Config) -> Result<f64> {
    config.validate()?;
    let def = ensure_positive(def, "attacker defense")?;
    let y_num = sample.y_num.unwrap_or(config.default_y_numerator);
    let y = ensure_positive(y_num / def, "incoming damage rate")?;
    ensure_finite(dps * (hp / y), "TDO")
}
