//! Memoized tier tables.

use super::{RankedEntry, TierSettings};
use crate::config::Config;
use crate::error::Result;
use crate::types::Type;
use std::collections::HashMap;
use tracing::debug;

/// Tier tables per attack type (`None` = all types), valid for one
/// combination of config and tier settings.
///
/// Any change that moves either fingerprint drops every table.
#[derive(Debug, Default)]
pub struct TierCache {
    fingerprint: Option<u64>,
    tables: HashMap<Option<Type>, Vec<RankedEntry>>,
}

impl TierCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn key_for(config: &Config, settings: &TierSettings) -> u64 {
        config.fingerprint() ^ settings.fingerprint().rotate_left(1)
    }

    /// Cached table for `attack_type`, building it with `build` on a miss.
    pub fn get_or_build<F>(
        &mut self,
        attack_type: Option<Type>,
        config: &Config,
        settings: &TierSettings,
        build: F,
    ) -> Result<&[RankedEntry]>
    where
        F: FnOnce() -> Result<Vec<RankedEntry>>,
    {
        let fingerprint = Self::key_for(config, settings);
        if self.fingerprint != Some(fingerprint) {
            if !self.tables.is_empty() {
                debug!(tables = self.tables.len(), "tier cache invalidated");
            }
            self.tables.clear();
            self.fingerprint = Some(fingerprint);
        }
        if !self.tables.contains_key(&attack_type) {
            let table = build()?;
            self.tables.insert(attack_type, table);
        }
        Ok(self.tables.get(&attack_type).map(Vec::as_slice).unwrap_or(&[]))
    }

    pub fn invalidate(&mut self) {
        self.tables.clear();
        self.fingerprint = None;
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_hits_until_config_changes() {
        let builds = Cell::new(0);
        let build = || {
            builds.set(builds.get() + 1);
            Ok(Vec::new())
        };
        let mut cache = TierCache::new();
        let settings = TierSettings::default();
        let config = Config::default();

        cache.get_or_build(Some(Type::Fire), &config, &settings, build).unwrap();
        cache.get_or_build(Some(Type::Fire), &config, &settings, build).unwrap();
        assert_eq!(builds.get(), 1);

        cache.get_or_build(Some(Type::Water), &config, &settings, build).unwrap();
        assert_eq!(cache.len(), 2);

        let party = config.clone().party_size(2);
        cache.get_or_build(Some(Type::Fire), &party, &settings, build).unwrap();
        assert_eq!(builds.get(), 3);
        assert_eq!(cache.len(), 1);

        let grouped = settings.clone().grouped(true);
        cache.get_or_build(Some(Type::Fire), &party, &grouped, build).unwrap();
        assert_eq!(builds.get(), 4);
    }

    #[test]
    fn test_build_errors_are_not_cached() {
        let mut cache = TierCache::new();
        let config = Config::default();
        let settings = TierSettings::default();
        let failed = cache.get_or_build(None, &config, &settings, || {
            Err(crate::error::EngineError::invalid("boom"))
        });
        assert!(failed.is_err());
        assert!(cache.is_empty());
    }
}
