//! Opponent profiles.
//!
//! An [`EnemyProfile`] is everything the rate engine needs to know about the
//! opponent: its typing (as a precomputed weakness map), whatever stats are
//! known, and one or more Y-samples describing the damage it deals back.

use crate::config::Config;
use crate::damage::{multiplier_against, nominal_profile, weakness_profile, TypeMap};
use crate::data::{GameData, Species};
use crate::error::{EngineError, Result};
use crate::rate::compute_specific_y;
use crate::types::Type;
use tracing::debug;

/// One typed slice of an opponent's output.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TypedRate {
    /// `None` for untyped moves and flat user-supplied values
    pub move_type: Option<Type>,
    pub value: f64,
}

/// Incoming-pressure estimate for one opponent moveset.
///
/// `y_num` is a damage-rate numerator and `cm_num` a charged-hit numerator;
/// both are divided by the attacker's defense once resolved. Values are kept
/// per attacking type so the attacker's own resistances can weight them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct YSample {
    pub y_num: Vec<TypedRate>,
    pub cm_num: Option<TypedRate>,
}

/// A Y-sample resolved against a concrete attacker typing.
///
/// `None` fields fall back to the configured defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ResolvedY {
    pub y_num: Option<f64>,
    pub cm_num: Option<f64>,
}

impl YSample {
    /// Untyped sample with fixed numerators.
    pub fn flat(y_num: f64, cm_num: Option<f64>) -> Self {
        Self {
            y_num: vec![TypedRate {
                move_type: None,
                value: y_num,
            }],
            cm_num: cm_num.map(|value| TypedRate {
                move_type: None,
                value,
            }),
        }
    }

    /// Weight each typed contribution by how it hits `defender_types`.
    pub fn resolve(&self, defender_types: &[Type]) -> ResolvedY {
        let weigh = |rate: &TypedRate| match rate.move_type {
            Some(t) => rate.value * f64::from(multiplier_against(t, defender_types)),
            None => rate.value,
        };
        ResolvedY {
            y_num: if self.y_num.is_empty() {
                None
            } else {
                Some(self.y_num.iter().map(weigh).sum())
            },
            cm_num: self.cm_num.as_ref().map(weigh),
        }
    }
}

/// Opponent stats; any of them may be unknown.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EnemyStats {
    pub atk: Option<f64>,
    pub def: Option<f64>,
    pub hp: Option<f64>,
}

/// The opponent a roster is scored against.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemyProfile {
    pub types: Vec<Type>,
    /// Attack type -> multiplier against this opponent
    pub weakness: TypeMap<f32>,
    pub stats: EnemyStats,
    pub samples: Vec<YSample>,
}

impl Default for EnemyProfile {
    fn default() -> Self {
        Self::unknown()
    }
}

impl EnemyProfile {
    /// Opponent with no known typing: every attack is neutral.
    pub fn unknown() -> Self {
        Self {
            types: Vec::new(),
            weakness: TypeMap::filled(1.0),
            stats: EnemyStats::default(),
            samples: Vec::new(),
        }
    }

    /// Stand-in opponent weak to one attacking type, used when only a type
    /// filter is known.
    pub fn nominal(attack: Type) -> Self {
        Self {
            weakness: nominal_profile(attack),
            ..Self::unknown()
        }
    }

    /// Opponent with a concrete typing.
    pub fn with_types(types: &[Type]) -> Self {
        Self {
            types: types.to_vec(),
            weakness: weakness_profile(types),
            ..Self::unknown()
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    pub fn stats(mut self, stats: EnemyStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn sample(mut self, sample: YSample) -> Self {
        self.samples.push(sample);
        self
    }

    /// Build a profile from a species record acting as the opponent.
    ///
    /// One Y-sample is estimated per listed moveset; an empty list uses every
    /// fast × charged pair in the species' pools. Attack must be known.
    pub fn from_species(
        data: &GameData,
        species: &Species,
        stats: EnemyStats,
        movesets: &[(&str, &str)],
        incoming_dps: f64,
        config: &Config,
    ) -> Result<Self> {
        config.validate()?;
        let atk = stats.atk.ok_or_else(|| {
            EngineError::invalid(format!(
                "attack of opponent {} is required to estimate its output",
                species.display_name()
            ))
        })?;

        let pairs: Vec<(String, String)> = if movesets.is_empty() {
            let fast = species.fast_pool();
            let charged = species.charged_pool(false);
            fast.iter()
                .flat_map(|(f, _)| charged.iter().map(move |(c, _)| (f.to_string(), c.to_string())))
                .collect()
        } else {
            movesets
                .iter()
                .map(|(f, c)| (f.to_string(), c.to_string()))
                .collect()
        };

        let mut profile = Self::with_types(&species.types).stats(stats);
        for (fast_name, charged_name) in &pairs {
            let fast = data.moves.fast(fast_name).ok_or_else(|| EngineError::Unknown {
                kind: "fast move",
                name: fast_name.clone(),
            })?;
            let charged = data
                .moves
                .charged(charged_name)
                .ok_or_else(|| EngineError::Unknown {
                    kind: "charged move",
                    name: charged_name.clone(),
                })?;
            let sample =
                compute_specific_y(&species.types, atk, fast, charged, incoming_dps, config)?;
            profile.samples.push(sample);
        }
        debug!(
            opponent = %species.display_name(),
            samples = profile.samples.len(),
            "built opponent profile"
        );
        Ok(profile)
    }

    /// Defense used in damage formulas.
    #[inline]
    pub fn defense(&self, config: &Config) -> f64 {
        self.stats.def.unwrap_or(config.default_enemy_defense)
    }

    /// Multiplier for a move type; untyped moves are neutral.
    #[inline]
    pub fn effectiveness(&self, move_type: Option<Type>) -> f64 {
        move_type.map_or(1.0, |t| f64::from(self.weakness[t]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_weights_by_defender_type() {
        let sample = YSample {
            y_num: vec![
                TypedRate {
                    move_type: Some(Type::Water),
                    value: 100.0,
                },
                TypedRate {
                    move_type: Some(Type::Ice),
                    value: 50.0,
                },
            ],
            cm_num: Some(TypedRate {
                move_type: Some(Type::Ice),
                value: 1000.0,
            }),
        };
        // Fire attacker: water 1.6x, ice 0.625x
        let resolved = sample.resolve(&[Type::Fire]);
        let water = 100.0 * f64::from(1.6f32);
        let ice = 50.0 * 0.625;
        assert!((resolved.y_num.unwrap() - (water + ice)).abs() < 1e-9);
        assert_eq!(resolved.cm_num, Some(625.0));
    }

    #[test]
    fn test_empty_sample_resolves_to_defaults() {
        let resolved = YSample::default().resolve(&[Type::Fire]);
        assert_eq!(resolved, ResolvedY::default());
    }

    #[test]
    fn test_flat_sample_ignores_typing() {
        let resolved = YSample::flat(900.0, Some(12000.0)).resolve(&[Type::Steel]);
        assert_eq!(resolved.y_num, Some(900.0));
        assert_eq!(resolved.cm_num, Some(12000.0));
    }

    #[test]
    fn test_nominal_and_typed_profiles() {
        let nominal = EnemyProfile::nominal(Type::Fire);
        assert_eq!(nominal.effectiveness(Some(Type::Fire)), f64::from(1.6f32));
        assert_eq!(nominal.effectiveness(Some(Type::Water)), 1.0);
        assert_eq!(nominal.effectiveness(None), 1.0);

        let typed = EnemyProfile::with_types(&[Type::Grass]);
        assert_eq!(typed.effectiveness(Some(Type::Fire)), f64::from(1.6f32));
        assert_eq!(typed.effectiveness(Some(Type::Water)), 0.625);
        assert_eq!(typed.defense(&Config::default()), 180.0);
    }
}
