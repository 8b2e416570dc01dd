//! Metric engine: one scalar score from a (DPS, TDO) pair.

use crate::config::{Config, MetricKind};
use crate::error::{ensure_finite, EngineError, Result};

/// Opponent HP used for effective DPS when the opponent's HP is unknown.
///
/// Large enough that the per-life rounding vanishes and the result tends to
/// the steady-state rate including respawn overhead.
pub const PLACEHOLDER_ENEMY_HP: f64 = 1.0e7;

/// Score a candidate under `kind`.
pub fn compute_metric(
    dps: f64,
    tdo: f64,
    kind: MetricKind,
    enemy_hp: Option<f64>,
    config: &Config,
) -> Result<f64> {
    config.validate()?;
    let dps = non_negative(dps, "DPS")?;
    let tdo = non_negative(tdo, "TDO")?;

    let value = match kind {
        MetricKind::Dps => dps,
        MetricKind::Tdo => tdo,
        MetricKind::Rating => {
            let e = config.metric_exponent;
            dps.powf(1.0 - e) * tdo.powf(e)
        }
        MetricKind::EffectiveDps => effective_dps(dps, tdo, enemy_hp, config)?,
    };
    ensure_finite(value, "metric")
}

/// Opponent HP divided by the time a party of this attacker needs to deplete it.
fn effective_dps(dps: f64, tdo: f64, enemy_hp: Option<f64>, config: &Config) -> Result<f64> {
    if dps == 0.0 || tdo == 0.0 {
        return Err(EngineError::invalid(format!(
            "effective DPS needs positive DPS and TDO, got {} and {}",
            dps, tdo
        )));
    }
    let hp = match enemy_hp {
        Some(hp) if hp > 0.0 && hp.is_finite() => hp,
        Some(hp) => return Err(EngineError::invalid(format!("opponent HP must be positive, got {}", hp))),
        None => PLACEHOLDER_ENEMY_HP,
    };

    let lives = (hp / tdo).ceil();
    let deaths = lives - 1.0;
    let relobbies = (deaths / f64::from(config.party_size)).floor();
    let time = lives * (tdo / dps)
        + (deaths - relobbies) * config.respawn_time_s
        + relobbies * config.rejoin_time_s;
    Ok(hp / time)
}

fn non_negative(value: f64, what: &str) -> Result<f64> {
    let value = ensure_finite(value, what)?;
    if value < 0.0 {
        return Err(EngineError::invalid(format!("{} must not be negative, got {}", what, value)));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_is_power_mean() {
        let config = Config::default();
        let r = compute_metric(16.0, 256.0, MetricKind::Rating, None, &config).unwrap();
        // 16^0.75 * 256^0.25 = 8 * 4
        assert!((r - 32.0).abs() < 1e-9);
    }

    #[test]
    fn test_rating_exponent_extremes() {
        let mut config = Config::default();
        config.metric_exponent = 0.0;
        assert_eq!(compute_metric(12.0, 500.0, MetricKind::Rating, None, &config).unwrap(), 12.0);
        config.metric_exponent = 1.0;
        assert_eq!(compute_metric(12.0, 500.0, MetricKind::Rating, None, &config).unwrap(), 500.0);
    }

    #[test]
    fn test_pass_through_metrics() {
        let config = Config::default();
        assert_eq!(compute_metric(12.0, 500.0, MetricKind::Dps, None, &config).unwrap(), 12.0);
        assert_eq!(compute_metric(12.0, 500.0, MetricKind::Tdo, None, &config).unwrap(), 500.0);
    }

    #[test]
    fn test_effective_dps_by_hand() {
        // hp 1000, tdo 300 -> 4 lives, 3 deaths; party 2 -> 1 relobby
        let config = Config::default().party_size(2);
        let v = compute_metric(10.0, 300.0, MetricKind::EffectiveDps, Some(1000.0), &config).unwrap();
        let time = 4.0 * 30.0 + 2.0 * 1.0 + 1.0 * 10.0;
        assert!((v - 1000.0 / time).abs() < 1e-12);
    }

    #[test]
    fn test_effective_dps_single_life_has_no_overhead() {
        let config = Config::default();
        let v = compute_metric(10.0, 300.0, MetricKind::EffectiveDps, Some(250.0), &config).unwrap();
        assert!((v - 250.0 / 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_effective_dps_placeholder_hp_solo() {
        // 33334 lives; alone, every one of the 33333 deaths is a relobby
        let config = Config::default();
        let v = compute_metric(10.0, 300.0, MetricKind::EffectiveDps, None, &config).unwrap();
        let time = 33334.0 * 30.0 + 33333.0 * 10.0;
        assert!((v - PLACEHOLDER_ENEMY_HP / time).abs() < 1e-12);
        assert!((v - 7.49990625117186).abs() < 1e-9);
    }

    #[test]
    fn test_effective_dps_placeholder_hp_party_of_four() {
        // 33333 deaths: 8333 relobbies, 25000 respawns
        let config = Config::default().party_size(4);
        let v = compute_metric(10.0, 300.0, MetricKind::EffectiveDps, None, &config).unwrap();
        let time = 33334.0 * 30.0 + 25000.0 * 1.0 + 8333.0 * 10.0;
        assert!((v - PLACEHOLDER_ENEMY_HP / time).abs() < 1e-12);
        assert!((v - 9.022420715477963).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_domain_config_is_rejected() {
        let mut config = Config::default();
        config.metric_exponent = 3.0;
        assert!(matches!(
            compute_metric(10.0, 300.0, MetricKind::Rating, None, &config),
            Err(EngineError::Configuration { field: "metric_exponent", .. })
        ));
        let party = Config::default().party_size(9);
        assert!(compute_metric(10.0, 300.0, MetricKind::Dps, None, &party).is_err());
    }

    #[test]
    fn test_degenerate_inputs_are_invalid() {
        let config = Config::default();
        assert!(compute_metric(f64::NAN, 1.0, MetricKind::Rating, None, &config).is_err());
        assert!(compute_metric(-1.0, 1.0, MetricKind::Rating, None, &config).is_err());
        assert!(compute_metric(0.0, 1.0, MetricKind::EffectiveDps, None, &config).is_err());
        assert!(compute_metric(1.0, 1.0, MetricKind::EffectiveDps, Some(0.0), &config).is_err());
    }
}
