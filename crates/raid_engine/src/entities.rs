//! Attacker blueprints and effective stats.
//!
//! The `AttackerConfig` struct is a builder describing one concrete
//! species/form/shadow/level/IV instance. Effective stats are derived on
//! every call and never cached against the species record.

use crate::config::Ivs;
use crate::cpm::multiplier_for_level;
use crate::data::Species;
use crate::types::Type;

/// Default attacker level
pub const DEFAULT_LEVEL: f64 = 40.0;

/// Shadow attack multiplier (+20%)
pub const SHADOW_ATTACK_BONUS: f64 = 6.0 / 5.0;

/// Shadow defense multiplier (-16.7%)
pub const SHADOW_DEFENSE_PENALTY: f64 = 5.0 / 6.0;

/// Effective combat stats: `(base + IV) * cpm`, shadow-adjusted.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EffectiveStats {
    pub atk: f64,
    pub def: f64,
    pub hp: f64,
}

impl EffectiveStats {
    /// All three stats are positive and finite.
    pub fn is_usable(&self) -> bool {
        [self.atk, self.def, self.hp]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }
}

/// Blueprint for one attacker instance.
#[derive(Clone, Debug)]
pub struct AttackerConfig<'a> {
    /// Species/form record (determines base stats and types)
    pub species: &'a Species,

    /// Shadow variant
    pub shadow: bool,

    /// Level on the half-level grid (1-55)
    pub level: f64,

    /// Individual values
    pub ivs: Ivs,
}

impl<'a> AttackerConfig<'a> {
    pub fn new(species: &'a Species) -> Self {
        Self {
            species,
            shadow: false,
            level: DEFAULT_LEVEL,
            ivs: Ivs::default(),
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    pub fn shadow(mut self, shadow: bool) -> Self {
        self.shadow = shadow;
        self
    }

    /// Set level. Off-grid levels are kept and yield zero stats.
    pub fn level(mut self, level: f64) -> Self {
        self.level = level;
        self
    }

    pub fn ivs(mut self, ivs: Ivs) -> Self {
        self.ivs = ivs;
        self
    }

    #[inline]
    pub fn types(&self) -> &'a [Type] {
        &self.species.types
    }

    /// Compute effective stats for this instance.
    pub fn stats(&self) -> EffectiveStats {
        let cpm = multiplier_for_level(self.level);
        let s = self.species;
        let mut atk = (f64::from(s.base_attack) + f64::from(self.ivs.atk)) * cpm;
        let mut def = (f64::from(s.base_defense) + f64::from(self.ivs.def)) * cpm;
        let hp = (f64::from(s.base_stamina) + f64::from(self.ivs.hp)) * cpm;
        if self.shadow {
            atk *= SHADOW_ATTACK_BONUS;
            def *= SHADOW_DEFENSE_PENALTY;
        }
        EffectiveStats { atk, def, hp }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DEFAULT_FORM;

    fn machamp() -> Species {
        Species {
            id: 68,
            name: "Machamp".into(),
            form: DEFAULT_FORM.into(),
            types: vec![Type::Fighting],
            base_attack: 234,
            base_defense: 159,
            base_stamina: 207,
            released: true,
            shadow_released: true,
            class: None,
            mega: false,
            fast_moves: vec![],
            charged_moves: vec![],
            elite_fast_moves: vec![],
            elite_charged_moves: vec![],
            pure_only_moves: vec![],
            shadow_only_moves: vec![],
        }
    }

    #[test]
    fn test_stats_at_level_40() {
        let species = machamp();
        let stats = AttackerConfig::new(&species).stats();
        let cpm = f64::from(0.7903f32);
        assert_eq!(stats.atk, 249.0 * cpm);
        assert_eq!(stats.def, 174.0 * cpm);
        assert_eq!(stats.hp, 222.0 * cpm);
    }

    #[test]
    fn test_shadow_multipliers() {
        let species = machamp();
        let pure = AttackerConfig::new(&species).stats();
        let shadow = AttackerConfig::new(&species).shadow(true).stats();
        assert!((shadow.atk / pure.atk - 1.2).abs() < 1e-12);
        assert!((shadow.def / pure.def - 5.0 / 6.0).abs() < 1e-12);
        assert_eq!(shadow.hp, pure.hp);
    }

    #[test]
    fn test_invalid_level_is_unusable() {
        let species = machamp();
        let stats = AttackerConfig::new(&species).level(70.0).stats();
        assert!(!stats.is_usable());
    }

    #[test]
    fn test_ivs_applied() {
        let species = machamp();
        let zero = Ivs { atk: 0, def: 0, hp: 0 };
        let stats = AttackerConfig::new(&species).ivs(zero).level(20.0).stats();
        assert_eq!(stats.atk, 234.0 * f64::from(0.5974f32));
    }
}
