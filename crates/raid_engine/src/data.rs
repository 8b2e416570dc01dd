//! Species and move records supplied by the data-loading collaborator.
//!
//! The engine only reads these tables during a query. Editing (adding,
//! replacing or deleting a move) is exposed for the external move editor and
//! never performed by the engine itself.

use crate::error::Result;
use crate::types::Type;
use bitflags::bitflags;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Form tag of a species' default form.
pub const DEFAULT_FORM: &str = "Normal";

/// The fast move that never receives STAB.
pub const HIDDEN_POWER: &str = "Hidden Power";

impl<'de> Deserialize<'de> for Type {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Type::from_str(&raw).ok_or_else(|| de::Error::custom(format!("unknown type `{}`", raw)))
    }
}

impl Serialize for Type {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Move type field: a type name, `"none"`, or null.
fn deserialize_move_type<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<Type>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("none") => Ok(None),
        Some(s) => Type::from_str(s)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("unknown move type `{}`", s))),
    }
}

/// Which of the two move collections a move belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Fast,
    Charged,
}

/// Immutable move record.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Move {
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "deserialize_move_type")]
    pub move_type: Option<Type>,
    pub power: f64,
    /// Positive for fast moves (gain), negative for charged moves (cost)
    pub energy_delta: i32,
    pub duration_ms: u32,
    /// Charged moves only: offset of the damage window from move start
    #[serde(default)]
    pub damage_window_start_ms: u32,
    /// Edited by the user rather than loaded from game data
    #[serde(default)]
    pub custom: bool,
}

impl Move {
    /// Energy a charged move consumes (0 for fast moves).
    #[inline]
    pub fn energy_cost(&self) -> f64 {
        f64::from((-self.energy_delta).max(0))
    }

    /// Energy a fast move generates (0 for charged moves).
    #[inline]
    pub fn energy_gain(&self) -> f64 {
        f64::from(self.energy_delta.max(0))
    }
}

bitflags! {
    /// How a move sits in a particular species' pool
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct PoolFlags: u8 {
        /// Only obtainable through special events or items
        const ELITE = 1 << 0;
        /// Only available to the purified (non-shadow) variant
        const PURE_ONLY = 1 << 1;
        /// Only available to the shadow variant
        const SHADOW_ONLY = 1 << 2;
    }
}

/// Legendary / mythical marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeciesClass {
    Legendary,
    Mythical,
    UltraBeast,
}

fn default_form() -> String {
    DEFAULT_FORM.to_string()
}

fn default_true() -> bool {
    true
}

/// Species/form entry.
#[derive(Clone, Debug, Deserialize)]
pub struct Species {
    pub id: u16,
    pub name: String,
    #[serde(default = "default_form")]
    pub form: String,
    pub types: Vec<Type>,
    pub base_attack: u16,
    pub base_defense: u16,
    pub base_stamina: u16,
    #[serde(default = "default_true")]
    pub released: bool,
    #[serde(default)]
    pub shadow_released: bool,
    #[serde(default)]
    pub class: Option<SpeciesClass>,
    /// Mega or primal form
    #[serde(default)]
    pub mega: bool,
    #[serde(default)]
    pub fast_moves: Vec<String>,
    #[serde(default)]
    pub charged_moves: Vec<String>,
    #[serde(default)]
    pub elite_fast_moves: Vec<String>,
    #[serde(default)]
    pub elite_charged_moves: Vec<String>,
    /// Charged moves only the purified variant knows
    #[serde(default)]
    pub pure_only_moves: Vec<String>,
    /// Charged moves only the shadow variant knows
    #[serde(default)]
    pub shadow_only_moves: Vec<String>,
}

impl Species {
    #[inline]
    pub fn is_default_form(&self) -> bool {
        self.form == DEFAULT_FORM
    }

    #[inline]
    pub fn is_legendary(&self) -> bool {
        self.class.is_some()
    }

    /// One or two types, nothing else.
    #[inline]
    pub fn has_valid_types(&self) -> bool {
        matches!(self.types.len(), 1 | 2)
    }

    /// Display name including the form when it isn't the default.
    pub fn display_name(&self) -> String {
        if self.is_default_form() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.form)
        }
    }

    /// Fast moves available to this variant with their pool flags.
    pub fn fast_pool(&self) -> Vec<(&str, PoolFlags)> {
        let mut pool: Vec<(&str, PoolFlags)> = Vec::new();
        push_unique(&mut pool, &self.fast_moves, PoolFlags::empty());
        push_unique(&mut pool, &self.elite_fast_moves, PoolFlags::ELITE);
        pool
    }

    /// Charged moves available to this variant with their pool flags.
    ///
    /// Shadow variants gain shadow-only moves and lose pure-only moves;
    /// pure-only moves exist only for species that have a shadow form.
    pub fn charged_pool(&self, shadow: bool) -> Vec<(&str, PoolFlags)> {
        let mut pool: Vec<(&str, PoolFlags)> = Vec::new();
        push_unique(&mut pool, &self.charged_moves, PoolFlags::empty());
        push_unique(&mut pool, &self.elite_charged_moves, PoolFlags::ELITE);
        if shadow {
            push_unique(&mut pool, &self.shadow_only_moves, PoolFlags::SHADOW_ONLY);
        } else if self.shadow_released {
            push_unique(&mut pool, &self.pure_only_moves, PoolFlags::PURE_ONLY);
        }
        pool
    }
}

fn push_unique<'a>(pool: &mut Vec<(&'a str, PoolFlags)>, names: &'a [String], flags: PoolFlags) {
    for name in names {
        if !pool.iter().any(|(n, _)| *n == name.as_str()) {
            pool.push((name.as_str(), flags));
        }
    }
}

/// Fast and charged move collections, looked up by name.
#[derive(Clone, Debug, Default)]
pub struct MoveTable {
    fast: HashMap<String, Move>,
    charged: HashMap<String, Move>,
}

impl MoveTable {
    pub fn new(fast: Vec<Move>, charged: Vec<Move>) -> Self {
        Self {
            fast: fast.into_iter().map(|m| (m.name.clone(), m)).collect(),
            charged: charged.into_iter().map(|m| (m.name.clone(), m)).collect(),
        }
    }

    #[inline]
    pub fn fast(&self, name: &str) -> Option<&Move> {
        self.fast.get(name)
    }

    #[inline]
    pub fn charged(&self, name: &str) -> Option<&Move> {
        self.charged.get(name)
    }

    pub fn get(&self, kind: MoveKind, name: &str) -> Option<&Move> {
        match kind {
            MoveKind::Fast => self.fast(name),
            MoveKind::Charged => self.charged(name),
        }
    }

    /// Add or replace a move. Returns the previous record, if any.
    pub fn insert(&mut self, kind: MoveKind, mv: Move) -> Option<Move> {
        let table = match kind {
            MoveKind::Fast => &mut self.fast,
            MoveKind::Charged => &mut self.charged,
        };
        table.insert(mv.name.clone(), mv)
    }

    pub fn remove(&mut self, kind: MoveKind, name: &str) -> Option<Move> {
        match kind {
            MoveKind::Fast => self.fast.remove(name),
            MoveKind::Charged => self.charged.remove(name),
        }
    }

    pub fn len(&self) -> usize {
        self.fast.len() + self.charged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Species entries ordered by id, default form first.
#[derive(Clone, Debug, Default)]
pub struct SpeciesTable {
    entries: Vec<Species>,
}

impl SpeciesTable {
    pub fn new(mut entries: Vec<Species>) -> Self {
        entries.sort_by(|a, b| {
            a.id.cmp(&b.id)
                .then_with(|| b.is_default_form().cmp(&a.is_default_form()))
                .then_with(|| a.form.cmp(&b.form))
        });
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Species> {
        self.entries.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Species] {
        &self.entries
    }

    /// Look up a species by name (case-insensitive) and form.
    pub fn find(&self, name: &str, form: &str) -> Option<&Species> {
        self.entries
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name) && s.form.eq_ignore_ascii_case(form))
    }

    pub fn by_id(&self, id: u16) -> impl Iterator<Item = &Species> {
        self.entries.iter().filter(move |s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Deserialize)]
struct RawGameData {
    #[serde(default)]
    fast_moves: Vec<Move>,
    #[serde(default)]
    charged_moves: Vec<Move>,
    #[serde(default)]
    species: Vec<Species>,
}

/// Fully loaded game data: both move collections and the species table.
#[derive(Clone, Debug, Default)]
pub struct GameData {
    pub moves: MoveTable,
    pub species: SpeciesTable,
}

impl GameData {
    pub fn new(moves: MoveTable, species: SpeciesTable) -> Self {
        Self { moves, species }
    }

    /// Parse the `{ fast_moves, charged_moves, species }` JSON bundle.
    ///
    /// Species with anything other than one or two types are dropped with a
    /// warning; species with empty move pools are kept and simply produce no
    /// candidates.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawGameData = serde_json::from_str(json)?;
        let total = raw.species.len();
        let species: Vec<Species> = raw
            .species
            .into_iter()
            .filter(|s| {
                if !s.has_valid_types() {
                    warn!(species = %s.display_name(), types = s.types.len(), "dropping species with invalid typing");
                }
                s.has_valid_types()
            })
            .collect();
        for s in species.iter().filter(|s| s.fast_moves.is_empty() || s.charged_moves.is_empty()) {
            debug!(species = %s.display_name(), "species has an empty base move pool");
        }
        info!(
            fast_moves = raw.fast_moves.len(),
            charged_moves = raw.charged_moves.len(),
            species = species.len(),
            dropped = total - species.len(),
            "loaded game data"
        );
        Ok(Self {
            moves: MoveTable::new(raw.fast_moves, raw.charged_moves),
            species: SpeciesTable::new(species),
        })
    }
}
