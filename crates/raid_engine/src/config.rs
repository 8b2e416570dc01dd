//! Engine configuration.
//!
//! Every tunable that affects a score travels through [`Config`]; nothing in
//! the engine reads ambient state. The settings collaborator builds a config
//! (or deserializes one), and every public entry point calls
//! [`Config::validate`] before doing any arithmetic.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Largest supported party (raid group) size for the party boost and relobby model.
pub const MAX_PARTY_SIZE: u8 = 4;

/// Energy/damage formula variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageModel {
    /// Fixed fast-per-charged lookup for enemies, one-bar energy penalty.
    #[default]
    Legacy,
    /// Energy duty-cycle model; incoming charged bursts count as banked energy.
    EnergyBased,
}

/// Scalar score derived from a (DPS, TDO) pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Power-mean blend `dps^(1-e) * tdo^e`
    #[default]
    Rating,
    /// Multi-life raid rate with respawn and relobby overhead
    EffectiveDps,
    /// Raw DPS
    Dps,
    /// Raw TDO
    Tdo,
}

impl MetricKind {
    /// Key used by the absolute tier threshold table.
    pub const fn key(self) -> &'static str {
        match self {
            MetricKind::Rating => "rating",
            MetricKind::EffectiveDps => "edps",
            MetricKind::Dps => "dps",
            MetricKind::Tdo => "tdo",
        }
    }
}

/// Individual values applied on top of base stats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ivs {
    pub atk: u8,
    pub def: u8,
    pub hp: u8,
}

impl Default for Ivs {
    fn default() -> Self {
        Self {
            atk: 15,
            def: 15,
            hp: 15,
        }
    }
}

/// Process-wide tunables, passed explicitly into every engine call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub damage_model: DamageModel,
    /// Round move durations to 0.5 s combat ticks
    pub turn_quantized: bool,
    /// Integer (floored) hit damage instead of the continuous approximation
    pub exact_damage: bool,
    /// Numerator of the default incoming damage rate `y = num / def`
    pub default_y_numerator: f64,
    /// Numerator of the default incoming charged hit `num / def`
    pub default_cm_numerator: f64,
    /// Defense assumed for an enemy whose stats are unknown
    pub default_enemy_defense: f64,
    pub metric: MetricKind,
    /// Endurance weight `e` of the rating metric
    pub metric_exponent: f64,
    pub party_size: u8,
    pub respawn_time_s: f64,
    pub rejoin_time_s: f64,
    /// Pause an enemy takes between its own attacks
    pub enemy_attack_delay_s: f64,
    /// Chance an enemy with enough energy uses its charged move
    pub charged_trigger_probability: f64,
    pub ivs: Ivs,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damage_model: DamageModel::Legacy,
            turn_quantized: false,
            exact_damage: false,
            default_y_numerator: 900.0,
            default_cm_numerator: 12000.0,
            default_enemy_defense: 180.0,
            metric: MetricKind::Rating,
            metric_exponent: 0.25,
            party_size: 1,
            respawn_time_s: 1.0,
            rejoin_time_s: 10.0,
            enemy_attack_delay_s: 2.0,
            charged_trigger_probability: 0.5,
            ivs: Ivs::default(),
        }
    }
}

impl Config {
    /// Parse a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    pub fn damage_model(mut self, model: DamageModel) -> Self {
        self.damage_model = model;
        self
    }

    pub fn metric(mut self, metric: MetricKind) -> Self {
        self.metric = metric;
        self
    }

    pub fn party_size(mut self, size: u8) -> Self {
        self.party_size = size;
        self
    }

    pub fn turn_quantized(mut self, on: bool) -> Self {
        self.turn_quantized = on;
        self
    }

    pub fn exact_damage(mut self, on: bool) -> Self {
        self.exact_damage = on;
        self
    }

    /// Check every field against its domain.
    ///
    /// Values are never clamped here; clamping belongs to the settings UI.
    pub fn validate(&self) -> Result<()> {
        if self.party_size == 0 || self.party_size > MAX_PARTY_SIZE {
            return Err(EngineError::config(
                "party_size",
                format!("must be within 1..={}, got {}", MAX_PARTY_SIZE, self.party_size),
            ));
        }
        positive("default_y_numerator", self.default_y_numerator)?;
        non_negative("default_cm_numerator", self.default_cm_numerator)?;
        positive("default_enemy_defense", self.default_enemy_defense)?;
        if !(0.0..=1.0).contains(&self.metric_exponent) {
            return Err(EngineError::config(
                "metric_exponent",
                format!("must be within [0, 1], got {}", self.metric_exponent),
            ));
        }
        non_negative("respawn_time_s", self.respawn_time_s)?;
        non_negative("rejoin_time_s", self.rejoin_time_s)?;
        non_negative("enemy_attack_delay_s", self.enemy_attack_delay_s)?;
        let p = self.charged_trigger_probability;
        if !(p > 0.0 && p <= 1.0) {
            return Err(EngineError::config(
                "charged_trigger_probability",
                format!("must be within (0, 1], got {}", p),
            ));
        }
        for (field, iv) in [
            ("ivs.atk", self.ivs.atk),
            ("ivs.def", self.ivs.def),
            ("ivs.hp", self.ivs.hp),
        ] {
            if iv > 15 {
                return Err(EngineError::config(field, format!("must be at most 15, got {}", iv)));
            }
        }
        Ok(())
    }

    /// Hash of every field that changes a score.
    ///
    /// Memoized tier tables are keyed by this value and rebuilt when it moves.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.damage_model.hash(&mut hasher);
        self.turn_quantized.hash(&mut hasher);
        self.exact_damage.hash(&mut hasher);
        self.metric.hash(&mut hasher);
        self.party_size.hash(&mut hasher);
        self.ivs.hash(&mut hasher);
        for v in [
            self.default_y_numerator,
            self.default_cm_numerator,
            self.default_enemy_defense,
            self.metric_exponent,
            self.respawn_time_s,
            self.rejoin_time_s,
            self.enemy_attack_delay_s,
            self.charged_trigger_probability,
        ] {
            v.to_bits().hash(&mut hasher);
        }
        hasher.finish()
    }
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::config(field, format!("must be positive, got {}", value)))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(EngineError::config(field, format!("must be non-negative, got {}", value)))
    }
}
