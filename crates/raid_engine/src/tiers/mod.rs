//! Tiering engine.
//!
//! Turns a descending list of rated candidates into ranked entries with a
//! percentage of a baseline and a tier label. Three labeling modes are
//! available:
//!
//! - [`TierMode::Ratio`]: fixed steps of the percentage
//! - [`TierMode::Jenks`]: natural breaks of the top ratings
//! - [`TierMode::Absolute`]: fixed per-metric thresholds
//!
//! Grouped ranking and the exclusive top tier apply on top of any mode.

mod absolute;
mod cache;
mod grouped;
mod jenks;
mod ratio;

pub use absolute::{absolute_label, thresholds};
pub use cache::TierCache;
pub use grouped::group_ranks;
pub use jenks::{class_of, goodness_of_variance_fit, jenks_breaks};
pub use ratio::{ratio_label, RatioPreset};

use crate::config::MetricKind;
use crate::error::{EngineError, Result};
use crate::rank::{Candidate, CandidateKey};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::warn;

/// Letters below the baseline class in Jenks mode.
const JENKS_BELOW: [&str; 3] = ["B", "C", "D"];

/// Cap on the extra S tiers synthesized for the top Jenks class.
const MAX_EXTRA_S: usize = 3;

/// How tier labels are chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TierMode {
    Ratio(RatioPreset),
    Jenks,
    Absolute,
}

impl Default for TierMode {
    fn default() -> Self {
        TierMode::Ratio(RatioPreset::Standard)
    }
}

impl TierMode {
    /// Parse a settings value: `ratio`, `ratio_wide`, `jenks` or `absolute`.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "ratio" | "ratio_standard" => Ok(TierMode::Ratio(RatioPreset::Standard)),
            "ratio_wide" => Ok(TierMode::Ratio(RatioPreset::Wide)),
            "jenks" => Ok(TierMode::Jenks),
            "absolute" => Ok(TierMode::Absolute),
            _ => Err(EngineError::config("tier_mode", format!("unknown tier mode `{}`", s))),
        }
    }
}

/// The entry (or entries) percentages are relative to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Baseline {
    /// The first entry of the list
    #[default]
    TopRated,
    /// Best entry of a reference attacker
    BudgetReference(CandidateKey),
    /// Mean of the best entries of a curated set of attackers
    CuratedSet(Vec<CandidateKey>),
}

/// Label reserved for one attacker when it is strictly the best.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExclusiveTop {
    pub key: CandidateKey,
    pub label: String,
}

/// Tiering settings supplied by the settings collaborator.
#[derive(Clone, Debug, PartialEq)]
pub struct TierSettings {
    pub mode: TierMode,
    pub grouped: bool,
    pub baseline: Baseline,
    pub exclusive_top: Option<ExclusiveTop>,
    pub jenks_classes: usize,
    /// Jenks only partitions this many of the top ratings
    pub jenks_max_values: usize,
    /// Factor applied to ratings before absolute thresholds
    pub absolute_scale: f64,
    /// Which threshold table absolute mode reads
    pub metric: MetricKind,
}

impl Default for TierSettings {
    fn default() -> Self {
        Self {
            mode: TierMode::default(),
            grouped: false,
            baseline: Baseline::TopRated,
            exclusive_top: None,
            jenks_classes: 5,
            jenks_max_values: 200,
            absolute_scale: 1.0,
            metric: MetricKind::Rating,
        }
    }
}

impl TierSettings {
    // ========================================================================
    // Builder methods
    // ========================================================================

    pub fn mode(mut self, mode: TierMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn grouped(mut self, on: bool) -> Self {
        self.grouped = on;
        self
    }

    pub fn baseline(mut self, baseline: Baseline) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn exclusive_top(mut self, key: CandidateKey, label: impl Into<String>) -> Self {
        self.exclusive_top = Some(ExclusiveTop {
            key,
            label: label.into(),
        });
        self
    }

    pub fn jenks_classes(mut self, k: usize) -> Self {
        self.jenks_classes = k;
        self
    }

    pub fn absolute_scale(mut self, scale: f64) -> Self {
        self.absolute_scale = scale;
        self
    }

    pub fn metric(mut self, metric: MetricKind) -> Self {
        self.metric = metric;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.jenks_classes < 2 {
            return Err(EngineError::config("jenks_classes", format!("must be at least 2, got {}", self.jenks_classes)));
        }
        if self.jenks_max_values < self.jenks_classes {
            return Err(EngineError::config(
                "jenks_max_values",
                format!("must be at least jenks_classes ({}), got {}", self.jenks_classes, self.jenks_max_values),
            ));
        }
        if !(self.absolute_scale.is_finite() && self.absolute_scale > 0.0) {
            return Err(EngineError::config("absolute_scale", format!("must be positive, got {}", self.absolute_scale)));
        }
        Ok(())
    }

    /// Hash of every field that changes a tier table.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.mode.hash(&mut hasher);
        self.grouped.hash(&mut hasher);
        self.baseline.hash(&mut hasher);
        self.exclusive_top.hash(&mut hasher);
        self.jenks_classes.hash(&mut hasher);
        self.jenks_max_values.hash(&mut hasher);
        self.absolute_scale.to_bits().hash(&mut hasher);
        self.metric.hash(&mut hasher);
        hasher.finish()
    }
}

/// A candidate with its rank, percentage and tier.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RankedEntry {
    pub candidate: Candidate,
    /// 1-based; shared within a group in grouped mode
    pub rank: usize,
    pub pct: f64,
    pub tier: String,
}

// ============================================================================
// Baseline
// ============================================================================

fn best_of<'a>(list: &'a [Candidate], key: &CandidateKey) -> Option<&'a Candidate> {
    // List is descending, so the first match is the best
    list.iter().find(|c| &c.key == key)
}

fn baseline_value(list: &[Candidate], baseline: &Baseline) -> Result<f64> {
    let top = list[0].rat;
    let value = match baseline {
        Baseline::TopRated => top,
        Baseline::BudgetReference(key) => match best_of(list, key) {
            Some(c) => c.rat,
            None => {
                warn!(species_id = key.species_id, form = %key.form, shadow = key.shadow, "baseline attacker not ranked; using top entry");
                top
            }
        },
        Baseline::CuratedSet(keys) => {
            let found: Vec<f64> = keys.iter().filter_map(|k| best_of(list, k)).map(|c| c.rat).collect();
            if found.is_empty() {
                warn!(set = keys.len(), "no curated baseline attacker ranked; using top entry");
                top
            } else {
                found.iter().sum::<f64>() / found.len() as f64
            }
        }
    };
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::invalid(format!("baseline rating must be positive, got {}", value)))
    }
}

// ============================================================================
// Jenks labels
// ============================================================================

struct JenksTiers {
    breaks: Vec<f64>,
    baseline_class: usize,
    top_class: usize,
    min_value: f64,
    /// Average class width, used to synthesize extra S tiers
    width: f64,
}

impl JenksTiers {
    fn new(list: &[Candidate], settings: &TierSettings, baseline: f64) -> Result<Self> {
        let values: Vec<f64> = list.iter().take(settings.jenks_max_values).map(|c| c.rat).collect();
        let mut distinct = values.clone();
        distinct.dedup();
        let k = settings.jenks_classes.min(distinct.len()).max(1);

        let breaks = jenks_breaks(&values, k)?;
        let min_value = values.iter().copied().fold(f64::INFINITY, f64::min);
        let width = match breaks.last() {
            Some(top) if k > 1 => (top - min_value) / (k - 1) as f64,
            _ => 0.0,
        };
        // The top rated entry always sits in the top class; anchoring "A"
        // there would leave no room for S tiers.
        let baseline_class = match settings.baseline {
            Baseline::TopRated => k.saturating_sub(2),
            _ => class_of(baseline, &breaks),
        };
        Ok(Self {
            baseline_class,
            top_class: k - 1,
            breaks,
            min_value,
            width,
        })
    }

    fn label(&self, value: f64) -> String {
        if value < self.min_value {
            return "F".to_string();
        }
        let class = class_of(value, &self.breaks);
        if class <= self.baseline_class {
            let below = self.baseline_class - class;
            return match below {
                0 => "A".to_string(),
                n => JENKS_BELOW.get(n - 1).copied().unwrap_or("F").to_string(),
            };
        }
        let mut count = class - self.baseline_class;
        if class == self.top_class && self.width > 0.0 {
            if let Some(top_break) = self.breaks.last() {
                let extra = ((value - top_break) / self.width).floor() as usize;
                count += extra.min(MAX_EXTRA_S);
            }
        }
        "S".repeat(count)
    }
}

// ============================================================================
// Entry point
// ============================================================================

/// Rank, percentage and tier for every entry of a descending list.
///
/// The list must already be sorted by rating, highest first.
pub fn assign_tiers(list: &[Candidate], settings: &TierSettings) -> Result<Vec<RankedEntry>> {
    settings.validate()?;
    if list.is_empty() {
        return Ok(Vec::new());
    }
    if let Some(bad) = list.iter().find(|c| !c.rat.is_finite()) {
        return Err(EngineError::invalid(format!("rating of {} is not finite", bad.name)));
    }
    if list.windows(2).any(|w| w[0].rat < w[1].rat) {
        return Err(EngineError::invalid("ranked list is not in descending order"));
    }

    let baseline = baseline_value(list, &settings.baseline)?;
    let jenks = match settings.mode {
        TierMode::Jenks => Some(JenksTiers::new(list, settings, baseline)?),
        _ => None,
    };
    let absolute = match settings.mode {
        TierMode::Absolute => Some(thresholds(settings.metric)?),
        _ => None,
    };
    let groups = settings.grouped.then(|| group_ranks(list));

    let mut entries: Vec<RankedEntry> = list
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let global_pct = c.rat / baseline * 100.0;
            let tier = match settings.mode {
                TierMode::Ratio(preset) => ratio_label(global_pct, preset),
                TierMode::Jenks => jenks.as_ref().map_or_else(|| "F".to_string(), |j| j.label(c.rat)),
                TierMode::Absolute => {
                    absolute.map_or("F", |rows| absolute_label(c.rat * settings.absolute_scale, rows)).to_string()
                }
            };
            let (rank, pct) = match &groups {
                Some(groups) => {
                    let (rank, best) = groups[i];
                    if best > c.rat {
                        (rank, c.rat / best * 100.0)
                    } else {
                        (rank, global_pct)
                    }
                }
                None => (i + 1, global_pct),
            };
            RankedEntry {
                candidate: c.clone(),
                rank,
                pct,
                tier,
            }
        })
        .collect();

    if let Some(ex) = &settings.exclusive_top {
        let first = &list[0];
        let strictly_best = first.key == ex.key
            && list.iter().filter(|c| c.key != ex.key).all(|c| c.rat < first.rat);
        if strictly_best {
            entries[0].tier = ex.label.clone();
        }
    }
    Ok(entries)
}
