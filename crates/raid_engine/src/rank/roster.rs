//! Roster enumeration and the global sweep.

use super::{rank_instance, Candidate, RosterFilters, TopK};
use crate::config::Config;
use crate::data::{GameData, Species};
use crate::enemy::EnemyProfile;
use crate::entities::AttackerConfig;
use crate::error::Result;
use rayon::prelude::*;
use tracing::{debug, info};

/// One attacker instance the sweep will score.
#[derive(Clone, Copy, Debug)]
pub struct RosterEntry<'a> {
    pub species: &'a Species,
    pub shadow: bool,
    pub level: f64,
}

impl<'a> RosterEntry<'a> {
    pub fn attacker(&self, config: &Config) -> AttackerConfig<'a> {
        AttackerConfig::new(self.species)
            .shadow(self.shadow)
            .level(self.level)
            .ivs(config.ivs)
    }
}

/// Default roster enumeration.
///
/// Yields each admitted `(species, shadow, level)` exactly once: species in
/// table order (by id, default form first), the regular variant before the
/// shadow one, levels in the order given.
#[derive(Clone, Debug)]
pub struct RosterWalk<'a> {
    species: &'a [Species],
    filters: RosterFilters,
    species_idx: usize,
    variant: usize,
    level_idx: usize,
}

impl<'a> RosterWalk<'a> {
    pub fn new(data: &'a GameData, filters: &RosterFilters) -> Self {
        Self {
            species: data.species.as_slice(),
            filters: filters.clone(),
            species_idx: 0,
            variant: 0,
            level_idx: 0,
        }
    }
}

impl<'a> Iterator for RosterWalk<'a> {
    type Item = RosterEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let levels = &self.filters.levels;
        loop {
            let species = self.species.get(self.species_idx)?;
            if self.variant > 1 {
                self.species_idx += 1;
                self.variant = 0;
                continue;
            }
            let shadow = self.variant == 1;
            if self.level_idx >= levels.len() || !self.filters.admits(species, shadow) {
                self.variant += 1;
                self.level_idx = 0;
                continue;
            }
            let level = levels[self.level_idx];
            self.level_idx += 1;
            return Some(RosterEntry {
                species,
                shadow,
                level,
            });
        }
    }
}

/// Source of the attacker instances a sweep scores.
pub trait Roster {
    /// Every admitted `(species, shadow, level)`, each exactly once.
    fn entries<'a>(&self, data: &'a GameData, filters: &RosterFilters) -> Vec<RosterEntry<'a>>;
}

/// The full species table walked by [`RosterWalk`].
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultRoster;

impl Roster for DefaultRoster {
    fn entries<'a>(&self, data: &'a GameData, filters: &RosterFilters) -> Vec<RosterEntry<'a>> {
        RosterWalk::new(data, filters).collect()
    }
}

/// Score a list of roster entries and merge them into one bounded list.
///
/// Entries are scored in parallel; the merge runs in entry order so ties
/// resolve the same way on every run.
pub fn rank_entries(
    entries: &[RosterEntry],
    enemy: &EnemyProfile,
    filters: &RosterFilters,
    config: &Config,
    data: &GameData,
    k: usize,
) -> Result<Vec<Candidate>> {
    let per_entry: Vec<Vec<Candidate>> = entries
        .par_iter()
        .map(|entry| rank_instance(&entry.attacker(config), enemy, filters, config, data))
        .collect::<Result<_>>()?;

    let mut top = TopK::new(k);
    for candidates in per_entry {
        top.extend(candidates);
    }
    Ok(top.into_vec())
}

/// Best `k` candidates across the whole roster.
///
/// When an attack type is requested and nothing in the roster matches it,
/// the sweep is repeated without the type filter.
pub fn rank_across_roster(
    enemy: &EnemyProfile,
    filters: &RosterFilters,
    config: &Config,
    data: &GameData,
    k: usize,
) -> Result<Vec<Candidate>> {
    rank_across_roster_with(&DefaultRoster, enemy, filters, config, data, k)
}

/// [`rank_across_roster`] over a caller-supplied roster.
pub fn rank_across_roster_with<R: Roster + ?Sized>(
    roster: &R,
    enemy: &EnemyProfile,
    filters: &RosterFilters,
    config: &Config,
    data: &GameData,
    k: usize,
) -> Result<Vec<Candidate>> {
    config.validate()?;
    filters.validate()?;

    let entries = roster.entries(data, filters);
    let ranked = rank_entries(&entries, enemy, filters, config, data, k)?;
    info!(
        entries = entries.len(),
        kept = ranked.len(),
        attack_type = ?filters.attack_type.map(|t| t.name()),
        "ranked roster"
    );

    if ranked.is_empty() {
        if let Some(t) = filters.attack_type {
            debug!(attack_type = t.name(), "no attacker matches; falling back to the unfiltered roster");
            let unfiltered = filters.clone().attack_type(None);
            let entries = roster.entries(data, &unfiltered);
            return rank_entries(&entries, enemy, &unfiltered, config, data, k);
        }
    }
    Ok(ranked)
}

/// Resumable roster sweep scoring one entry per step.
///
/// Dropping the sweep between steps cancels it; [`RosterSweep::ranked`]
/// shows the partial result so far. Like [`rank_across_roster`], a typed
/// sweep that keeps nothing continues over the unfiltered roster, which
/// restarts [`RosterSweep::progress`] at zero.
pub struct RosterSweep<'a> {
    entries: Vec<RosterEntry<'a>>,
    /// Unfiltered entries, present while an attack type filter is active
    fallback: Option<Vec<RosterEntry<'a>>>,
    pos: usize,
    top: TopK<Candidate>,
    enemy: &'a EnemyProfile,
    filters: RosterFilters,
    config: &'a Config,
    data: &'a GameData,
}

impl<'a> RosterSweep<'a> {
    pub fn new(
        enemy: &'a EnemyProfile,
        filters: &'a RosterFilters,
        config: &'a Config,
        data: &'a GameData,
        k: usize,
    ) -> Result<Self> {
        Self::with_roster(&DefaultRoster, enemy, filters, config, data, k)
    }

    pub fn with_roster<R: Roster + ?Sized>(
        roster: &R,
        enemy: &'a EnemyProfile,
        filters: &'a RosterFilters,
        config: &'a Config,
        data: &'a GameData,
        k: usize,
    ) -> Result<Self> {
        config.validate()?;
        filters.validate()?;
        let fallback = filters
            .attack_type
            .map(|_| roster.entries(data, &filters.clone().attack_type(None)));
        Ok(Self {
            entries: roster.entries(data, filters),
            fallback,
            pos: 0,
            top: TopK::new(k),
            enemy,
            filters: filters.clone(),
            config,
            data,
        })
    }

    /// Entries scored so far and in total.
    pub fn progress(&self) -> (usize, usize) {
        (self.pos, self.entries.len())
    }

    pub fn ranked(&self) -> &[Candidate] {
        self.top.as_slice()
    }

    /// Run the remaining steps and return the final list.
    pub fn finish(mut self) -> Result<Vec<Candidate>> {
        while let Some(step) = self.next() {
            step?;
        }
        Ok(self.top.into_vec())
    }
}

impl<'a> Iterator for RosterSweep<'a> {
    /// Number of candidates the step contributed
    type Item = Result<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos == self.entries.len() && self.top.is_empty() {
            if let Some(unfiltered) = self.fallback.take() {
                debug!(
                    attack_type = ?self.filters.attack_type.map(|t| t.name()),
                    "no attacker matches; sweeping the unfiltered roster"
                );
                self.filters.attack_type = None;
                self.entries = unfiltered;
                self.pos = 0;
            }
        }
        let entry = *self.entries.get(self.pos)?;
        self.pos += 1;
        let attacker = entry.attacker(self.config);
        let scored = rank_instance(&attacker, self.enemy, &self.filters, self.config, self.data);
        Some(scored.map(|candidates| {
            let mut kept = 0;
            for c in candidates {
                if self.top.push(c) {
                    kept += 1;
                }
            }
            kept
        }))
    }
}
