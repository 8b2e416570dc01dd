//! raid_engine - Closed-form raid counter rating engine
//!
//! This library rates attacker movesets against an opponent profile using a
//! closed-form damage/energy model, enumerates every legal species × form ×
//! shadow × level × moveset combination into bounded top-K lists, and assigns
//! discrete tiers to the resulting rankings.
//!
//! Data flows one way: static tables → [`damage`] → [`rate`] → [`metric`] →
//! [`rank`] → [`tiers`]. Every entry point takes an explicit [`Config`].

/// Type definitions and type chart
pub mod types {
    include!(concat!(env!("OUT_DIR"), "/types.rs"));
}

/// CP multiplier table
pub mod levels {
    include!(concat!(env!("OUT_DIR"), "/levels.rs"));
}

/// Absolute tier thresholds per metric
pub mod tier_tables {
    include!(concat!(env!("OUT_DIR"), "/tiers.rs"));
}

pub mod config;
pub mod cpm;
pub mod damage;
pub mod data;
pub mod enemy;
pub mod entities;
pub mod error;
pub mod metric;
pub mod rank;
pub mod rate;
pub mod tiers;

// Re-export commonly used types
pub use config::{Config, DamageModel, Ivs, MetricKind};
pub use cpm::multiplier_for_level;
pub use damage::{hit_damage, multiplier_against, normalize_duration, normalize_power, TypeMap};
pub use data::{GameData, Move, MoveKind, MoveTable, Species, SpeciesTable};
pub use enemy::{EnemyProfile, EnemyStats, ResolvedY, YSample};
pub use entities::{AttackerConfig, EffectiveStats};
pub use error::{EngineError, Result};
pub use metric::compute_metric;
pub use rank::{
    moveset_table, rank_across_roster, rank_across_roster_with, rank_against_opponent, Candidate,
    CandidateKey, DefaultRoster, Inclusion, Roster, RosterEntry, RosterFilters, RosterSweep,
    RosterWalk,
};
pub use rate::{compute_dps, compute_specific_y, compute_tdo, DpsQuery};
pub use tiers::{
    assign_tiers, jenks_breaks, Baseline, RankedEntry, RatioPreset, TierCache, TierMode,
    TierSettings,
};
pub use types::Type;
