//! Roster sweeps over the fixture game data.

mod common;

use common::{game_data, init_tracing, species, species_form};
use raid_engine::{
    moveset_table, rank_across_roster, rank_against_opponent, AttackerConfig, Config, EnemyProfile,
    EnemyStats, Inclusion, RosterFilters, RosterSweep, Type,
};
use std::collections::HashSet;

fn fire_filters() -> RosterFilters {
    RosterFilters::default().attack_type(Some(Type::Fire))
}

#[test]
fn test_fire_ranking_sorted_without_duplicates() {
    init_tracing();
    let data = game_data();
    let enemy = EnemyProfile::nominal(Type::Fire);
    let ranked = rank_across_roster(&enemy, &fire_filters(), &Config::default(), data, 20).unwrap();

    assert!(!ranked.is_empty());
    assert!(ranked.len() <= 20);
    assert!(ranked.windows(2).all(|w| w[0].rat >= w[1].rat));

    let mut seen = HashSet::new();
    for c in &ranked {
        assert!(seen.insert(c.key.clone()), "duplicate identity {}", c.name);
        assert_eq!(c.fast_type, Some(Type::Fire), "{} uses {}", c.name, c.fast);
        assert_eq!(c.charged_type, Some(Type::Fire), "{} uses {}", c.name, c.charged);
        assert!(c.rat > 0.0);
    }
}

#[test]
fn test_fire_ranking_leaders() {
    let data = game_data();
    let enemy = EnemyProfile::nominal(Type::Fire);
    let config = Config::default();

    let ranked = rank_across_roster(&enemy, &fire_filters(), &config, data, 5).unwrap();
    assert_eq!(ranked[0].name, "Charizard (Mega Y)");
    assert_eq!((ranked[0].fast.as_str(), ranked[0].charged.as_str()), ("Fire Spin", "Blast Burn"));
    assert!(ranked[0].charged_elite);

    let no_mega = fire_filters().include(Inclusion::default() - Inclusion::MEGA);
    let ranked = rank_across_roster(&enemy, &no_mega, &config, data, 5).unwrap();
    assert_eq!(ranked[0].name, "Shadow Blaziken");

    let plain = fire_filters().include(Inclusion::LEGENDARY | Inclusion::ELITE);
    let ranked = rank_across_roster(&enemy, &plain, &config, data, 5).unwrap();
    assert_eq!(ranked[0].name, "Reshiram");
    assert!(ranked.iter().all(|c| !c.key.shadow));
}

#[test]
fn test_bounded_k() {
    let data = game_data();
    let enemy = EnemyProfile::nominal(Type::Fire);
    let config = Config::default();
    let full = rank_across_roster(&enemy, &fire_filters(), &config, data, 1000).unwrap();
    for k in [0, 1, 3, 7] {
        let top = rank_across_roster(&enemy, &fire_filters(), &config, data, k).unwrap();
        assert_eq!(top.len(), k.min(full.len()));
        assert_eq!(&full[..top.len()], &top[..]);
    }
}

#[test]
fn test_unreleased_needs_opt_in() {
    let data = game_data();
    let enemy = EnemyProfile::nominal(Type::Fire);
    let config = Config::default();
    let has_volcanion = |filters: &RosterFilters| {
        rank_across_roster(&enemy, filters, &config, data, 1000)
            .unwrap()
            .iter()
            .any(|c| c.name == "Volcanion")
    };
    assert!(!has_volcanion(&fire_filters()));
    assert!(has_volcanion(&fire_filters().include(Inclusion::all())));
}

#[test]
fn test_broken_species_yield_nothing() {
    let data = game_data();
    let enemy = EnemyProfile::unknown();
    let ranked = rank_across_roster(&enemy, &RosterFilters::default(), &Config::default(), data, 1000).unwrap();
    assert!(ranked.iter().all(|c| c.name != "Placeholder" && c.name != "Glitchling"));
    // Typeless entry was dropped at load time
    assert!(data.species.find("Typeless", "Normal").is_none());
}

#[test]
fn test_unmatched_attack_type_falls_back() {
    let data = game_data();
    let enemy = EnemyProfile::nominal(Type::Ice);
    let filters = RosterFilters::default().attack_type(Some(Type::Ice));
    let ranked = rank_across_roster(&enemy, &filters, &Config::default(), data, 10).unwrap();
    assert_eq!(ranked.len(), 10);
    assert!(ranked.windows(2).all(|w| w[0].rat >= w[1].rat));
}

#[test]
fn test_unmatched_attack_type_sweep_falls_back() {
    let data = game_data();
    let enemy = EnemyProfile::nominal(Type::Ice);
    let config = Config::default();
    let filters = RosterFilters::default().attack_type(Some(Type::Ice));

    let mut sweep = RosterSweep::new(&enemy, &filters, &config, data, 10).unwrap();
    let (_, typed_total) = sweep.progress();
    for _ in 0..typed_total {
        assert_eq!(sweep.next().expect("typed entry").unwrap(), 0);
    }
    assert!(sweep.ranked().is_empty());

    // The next step starts over on the unfiltered roster
    assert!(sweep.next().is_some());
    assert_eq!(sweep.progress().0, 1);

    let swept = sweep.finish().unwrap();
    let parallel = rank_across_roster(&enemy, &filters, &config, data, 10).unwrap();
    assert_eq!(swept.len(), 10);
    assert_eq!(swept, parallel);
}

#[test]
fn test_sweep_matches_parallel_ranking() {
    let data = game_data();
    let enemy = EnemyProfile::nominal(Type::Fire);
    let config = Config::default();
    let filters = fire_filters();

    let mut sweep = RosterSweep::new(&enemy, &filters, &config, data, 8).unwrap();
    let (_, total) = sweep.progress();
    assert!(total > 0);
    let first = sweep.next().expect("at least one entry").unwrap();
    assert!(first <= 1);
    assert_eq!(sweep.progress().0, 1);

    let swept = sweep.finish().unwrap();
    let parallel = rank_across_roster(&enemy, &filters, &config, data, 8).unwrap();
    assert_eq!(swept, parallel);
}

#[test]
fn test_against_species_opponent() {
    let data = game_data();
    let config = Config::default();
    let venusaur = species("Venusaur");
    let stats = EnemyStats {
        atk: Some(180.0),
        def: Some(160.0),
        hp: Some(15000.0),
    };
    let enemy = EnemyProfile::from_species(data, venusaur, stats, &[], 10.0, &config).unwrap();
    // Vine Whip with Solar Beam, Frenzy Plant and Return
    assert_eq!(enemy.samples.len(), 3);

    let zard = AttackerConfig::new(species("Charizard")).ivs(config.ivs);
    let ranked = rank_against_opponent(
        &zard,
        &enemy,
        &RosterFilters::default().movesets_per_species(2),
        &config,
        data,
    )
    .unwrap();
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].fast, "Fire Spin");
    assert!(ranked[0].rat >= ranked[1].rat);
}

#[test]
fn test_moveset_table_shadow_pool() {
    let data = game_data();
    let config = Config::default();
    let enemy = EnemyProfile::with_types(&[Type::Grass]);
    let zard = species("Charizard");

    let pure = moveset_table(&AttackerConfig::new(zard), &enemy, &config, data).unwrap();
    let shadow = moveset_table(&AttackerConfig::new(zard).shadow(true), &enemy, &config, data).unwrap();
    assert!(pure.iter().any(|c| c.charged == "Return"));
    assert!(!pure.iter().any(|c| c.charged == "Frustration"));
    assert!(shadow.iter().any(|c| c.charged == "Frustration"));
    assert!(!shadow.iter().any(|c| c.charged == "Return"));
    // 4 fast × 5 charged
    assert_eq!(pure.len(), 20);

    let mega = species_form("Charizard", "Mega Y");
    let rows = moveset_table(&AttackerConfig::new(mega), &enemy, &config, data).unwrap();
    assert_eq!(rows.len(), 16);
}
