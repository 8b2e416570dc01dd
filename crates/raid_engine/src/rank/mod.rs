//! Combination enumerator.
//!
//! Scores every legal fast × charged pair of an attacker instance against an
//! [`EnemyProfile`] and keeps the best in a bounded list ([`TopK`]). The
//! roster sweep in [`roster`] repeats this for every species, shadow variant
//! and level the filters admit.
//!
//! A candidate that cannot be scored (missing move, unusable level, a guard
//! tripping inside the rate engine) is dropped, never ranked with a
//! placeholder value.

pub mod roster;
pub mod top_k;

pub use roster::{
    rank_across_roster, rank_across_roster_with, rank_entries, DefaultRoster, Roster, RosterEntry,
    RosterSweep, RosterWalk,
};
pub use top_k::{Scored, TopK};

use crate::config::Config;
use crate::cpm::is_valid_level;
use crate::data::{GameData, Move, PoolFlags, Species};
use crate::enemy::{EnemyProfile, ResolvedY};
use crate::entities::{AttackerConfig, EffectiveStats, DEFAULT_LEVEL};
use crate::error::{EngineError, Result};
use crate::metric::compute_metric;
use crate::rate::{compute_dps, compute_tdo, DpsQuery};
use crate::types::Type;
use bitflags::bitflags;
use serde::Serialize;
use tracing::{debug, trace, warn};

// ============================================================================
// Candidates
// ============================================================================

/// Identity of an attacker variant: species, form and shadow flag.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CandidateKey {
    pub species_id: u16,
    pub form: String,
    pub shadow: bool,
}

impl CandidateKey {
    pub fn new(species_id: u16, form: impl Into<String>, shadow: bool) -> Self {
        Self {
            species_id,
            form: form.into(),
            shadow,
        }
    }

    pub fn of(species: &Species, shadow: bool) -> Self {
        Self::new(species.id, species.form.clone(), shadow)
    }
}

/// One rated moveset of one attacker instance.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Candidate {
    pub key: CandidateKey,
    pub name: String,
    pub level: f64,
    pub fast: String,
    pub charged: String,
    pub fast_type: Option<Type>,
    pub charged_type: Option<Type>,
    pub fast_elite: bool,
    pub charged_elite: bool,
    pub dps: f64,
    pub tdo: f64,
    pub rat: f64,
}

impl Scored for Candidate {
    #[inline]
    fn score(&self) -> f64 {
        self.rat
    }
}

// ============================================================================
// Filters
// ============================================================================

bitflags! {
    /// Which kinds of attackers and moves the enumeration admits
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Inclusion: u8 {
        const UNRELEASED = 1 << 0;
        const LEGENDARY = 1 << 1;
        const MEGA = 1 << 2;
        const SHADOW = 1 << 3;
        const ELITE = 1 << 4;
    }
}

impl Default for Inclusion {
    fn default() -> Self {
        Inclusion::LEGENDARY | Inclusion::MEGA | Inclusion::SHADOW | Inclusion::ELITE
    }
}

/// Enumeration filters supplied by the settings collaborator.
#[derive(Clone, Debug, PartialEq)]
pub struct RosterFilters {
    pub include: Inclusion,
    /// Only movesets dealing this type of damage
    pub attack_type: Option<Type>,
    /// With `attack_type`, one matching move is enough
    pub allow_mixed: bool,
    /// With `attack_type`, admit attackers not of that type themselves
    pub allow_off_type: bool,
    pub levels: Vec<f64>,
    /// Movesets kept per attacker instance
    pub movesets_per_species: usize,
}

impl Default for RosterFilters {
    fn default() -> Self {
        Self {
            include: Inclusion::default(),
            attack_type: None,
            allow_mixed: false,
            allow_off_type: true,
            levels: vec![DEFAULT_LEVEL],
            movesets_per_species: 1,
        }
    }
}

impl RosterFilters {
    // ========================================================================
    // Builder methods
    // ========================================================================

    pub fn include(mut self, include: Inclusion) -> Self {
        self.include = include;
        self
    }

    pub fn attack_type(mut self, attack_type: Option<Type>) -> Self {
        self.attack_type = attack_type;
        self
    }

    pub fn allow_mixed(mut self, on: bool) -> Self {
        self.allow_mixed = on;
        self
    }

    pub fn allow_off_type(mut self, on: bool) -> Self {
        self.allow_off_type = on;
        self
    }

    pub fn levels(mut self, levels: Vec<f64>) -> Self {
        self.levels = levels;
        self
    }

    pub fn movesets_per_species(mut self, n: usize) -> Self {
        self.movesets_per_species = n;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.levels.is_empty() {
            return Err(EngineError::config("levels", "at least one level is required"));
        }
        if let Some(bad) = self.levels.iter().find(|l| !is_valid_level(**l)) {
            return Err(EngineError::config("levels", format!("{} is not on the level grid", bad)));
        }
        if self.movesets_per_species == 0 {
            return Err(EngineError::config("movesets_per_species", "must be at least 1"));
        }
        Ok(())
    }

    /// Whether a species' variant is admitted at all.
    pub fn admits(&self, species: &Species, shadow: bool) -> bool {
        let inc = self.include;
        if !species.released && !inc.contains(Inclusion::UNRELEASED) {
            return false;
        }
        if species.is_legendary() && !inc.contains(Inclusion::LEGENDARY) {
            return false;
        }
        if species.mega && !inc.contains(Inclusion::MEGA) {
            return false;
        }
        if shadow {
            // Megas have no shadow variant
            if species.mega || !inc.contains(Inclusion::SHADOW) {
                return false;
            }
            if !species.shadow_released && !inc.contains(Inclusion::UNRELEASED) {
                return false;
            }
        }
        if let Some(t) = self.attack_type {
            if !self.allow_off_type && !species.types.contains(&t) {
                return false;
            }
        }
        true
    }

    /// Whether a moveset satisfies the attack type rule.
    pub fn admits_moveset(&self, fast: &Move, charged: &Move) -> bool {
        match self.attack_type {
            None => true,
            Some(t) => {
                let f = fast.move_type == Some(t);
                let c = charged.move_type == Some(t);
                if self.allow_mixed {
                    f || c
                } else {
                    f && c
                }
            }
        }
    }

    #[inline]
    fn admits_flags(&self, flags: PoolFlags) -> bool {
        !flags.contains(PoolFlags::ELITE) || self.include.contains(Inclusion::ELITE)
    }
}

// ============================================================================
// Scoring
// ============================================================================

/// Averaged scores of one moveset against every Y-sample of the opponent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MovesetScore {
    pub dps: f64,
    pub tdo: f64,
    pub rat: f64,
}

/// Score one moveset for an attacker with precomputed stats.
pub fn score_moveset(
    types: &[Type],
    stats: &EffectiveStats,
    fast: &Move,
    charged: &Move,
    enemy: &EnemyProfile,
    config: &Config,
) -> Result<MovesetScore> {
    let base = DpsQuery::new(types, stats.atk, stats.def, stats.hp, fast, charged, config)
        .multipliers(
            enemy.effectiveness(fast.move_type),
            enemy.effectiveness(charged.move_type),
        )
        .enemy_def(enemy.defense(config));

    let resolved: Vec<ResolvedY> = if enemy.samples.is_empty() {
        vec![ResolvedY::default()]
    } else {
        enemy.samples.iter().map(|s| s.resolve(types)).collect()
    };

    let mut total = MovesetScore::default();
    for sample in &resolved {
        let dps = compute_dps(&base.sample(*sample), config)?;
        let tdo = compute_tdo(dps, stats.hp, stats.def, sample, config)?;
        let rat = compute_metric(dps, tdo, config.metric, enemy.stats.hp, config)?;
        total.dps += dps;
        total.tdo += tdo;
        total.rat += rat;
    }
    let n = resolved.len() as f64;
    Ok(MovesetScore {
        dps: total.dps / n,
        tdo: total.tdo / n,
        rat: total.rat / n,
    })
}

/// Walk every fast × charged pair of an attacker, calling `keep` with each
/// scored candidate. Unscorable pairs are logged and skipped.
fn for_each_moveset(
    attacker: &AttackerConfig,
    enemy: &EnemyProfile,
    filters: Option<&RosterFilters>,
    config: &Config,
    data: &GameData,
    mut keep: impl FnMut(Candidate),
) -> Result<()> {
    let species = attacker.species;
    let stats = attacker.stats();
    if !stats.is_usable() {
        debug!(species = %species.display_name(), level = attacker.level, "skipping attacker with unusable stats");
        return Ok(());
    }

    let fast_pool = species.fast_pool();
    let charged_pool = species.charged_pool(attacker.shadow);
    let key = CandidateKey::of(species, attacker.shadow);
    let name = if attacker.shadow {
        format!("Shadow {}", species.display_name())
    } else {
        species.display_name()
    };

    for &(fast_name, fast_flags) in &fast_pool {
        if filters.is_some_and(|f| !f.admits_flags(fast_flags)) {
            continue;
        }
        let Some(fast) = data.moves.fast(fast_name) else {
            trace!(species = %name, fast = fast_name, "unknown fast move");
            continue;
        };
        for &(charged_name, charged_flags) in &charged_pool {
            if filters.is_some_and(|f| !f.admits_flags(charged_flags)) {
                continue;
            }
            let Some(charged) = data.moves.charged(charged_name) else {
                trace!(species = %name, charged = charged_name, "unknown charged move");
                continue;
            };
            if filters.is_some_and(|f| !f.admits_moveset(fast, charged)) {
                continue;
            }

            let score = match score_moveset(attacker.types(), &stats, fast, charged, enemy, config) {
                Ok(score) => score,
                Err(EngineError::InvalidInput(reason)) => {
                    warn!(species = %name, fast = fast_name, charged = charged_name, %reason, "skipping unscorable moveset");
                    continue;
                }
                Err(e) => return Err(e),
            };

            keep(Candidate {
                key: key.clone(),
                name: name.clone(),
                level: attacker.level,
                fast: fast.name.clone(),
                charged: charged.name.clone(),
                fast_type: fast.move_type,
                charged_type: charged.move_type,
                fast_elite: fast_flags.contains(PoolFlags::ELITE),
                charged_elite: charged_flags.contains(PoolFlags::ELITE),
                dps: score.dps,
                tdo: score.tdo,
                rat: score.rat,
            });
        }
    }
    Ok(())
}

/// Best movesets of one attacker instance, descending by rating.
///
/// Keeps `filters.movesets_per_species` entries. Zero-rated movesets are
/// excluded.
pub fn rank_against_opponent(
    attacker: &AttackerConfig,
    enemy: &EnemyProfile,
    filters: &RosterFilters,
    config: &Config,
    data: &GameData,
) -> Result<Vec<Candidate>> {
    config.validate()?;
    filters.validate()?;
    rank_instance(attacker, enemy, filters, config, data)
}

/// [`rank_against_opponent`] without revalidating inputs.
pub(crate) fn rank_instance(
    attacker: &AttackerConfig,
    enemy: &EnemyProfile,
    filters: &RosterFilters,
    config: &Config,
    data: &GameData,
) -> Result<Vec<Candidate>> {
    let mut top = TopK::new(filters.movesets_per_species);
    for_each_moveset(attacker, enemy, Some(filters), config, data, |c| {
        if c.rat > 0.0 {
            top.push(c);
        }
    })?;
    Ok(top.into_vec())
}

/// Every moveset of an attacker with its raw scores, in pool order.
///
/// No filters apply: elite moves are included and nothing is dropped for
/// rating zero.
pub fn moveset_table(
    attacker: &AttackerConfig,
    enemy: &EnemyProfile,
    config: &Config,
    data: &GameData,
) -> Result<Vec<Candidate>> {
    config.validate()?;
    let mut rows = Vec::new();
    for_each_moveset(attacker, enemy, None, config, data, |c| rows.push(c))?;
    Ok(rows)
}
