//! Incoming pressure of an opponent moveset.

use crate::config::{Config, DamageModel};
use crate::damage::{damage_modifier, has_stab, normalize_duration, normalize_power};
use crate::data::{Move, MoveKind};
use crate::enemy::{TypedRate, YSample};
use crate::error::{ensure_finite, ensure_positive, EngineError, Result};
use crate::types::Type;

/// Fast moves an enemy uses per charged move in the legacy model.
pub fn legacy_fast_per_charged(cost: f64) -> f64 {
    match cost as i32 {
        100 => 3.0,
        50 => 1.5,
        33 => 1.0,
        _ => cost * 3.0 / 100.0,
    }
}

/// Estimate the damage rate a defender using `fast`/`charged` deals back.
///
/// Values are numerators: the resolved sample is divided by the target's
/// defense by the rate engine. `incoming_dps` is the pressure on the
/// defender, which only the energy-based model uses.
pub fn compute_specific_y(
    attacker_types: &[Type],
    atk: f64,
    fast: &Move,
    charged: &Move,
    incoming_dps: f64,
    config: &Config,
) -> Result<YSample> {
    config.validate()?;
    let quantized = config.turn_quantized;
    let atk = ensure_finite(atk, "opponent attack")?;
    if !(incoming_dps >= 0.0 && incoming_dps.is_finite()) {
        return Err(EngineError::invalid(format!(
            "incoming DPS must be non-negative, got {}",
            incoming_dps
        )));
    }

    let delay = config.enemy_attack_delay_s;
    let fast_dur = normalize_duration(fast.duration_ms, quantized) + delay;
    let charged_dur = normalize_duration(charged.duration_ms, quantized) + delay;
    let fast_dur = ensure_positive(fast_dur, "opponent fast cycle")?;
    let charged_dur = ensure_positive(charged_dur, "opponent charged cycle")?;

    let fast_mod = damage_modifier(has_stab(fast, MoveKind::Fast, attacker_types), 1.0);
    let charged_mod = damage_modifier(has_stab(charged, MoveKind::Charged, attacker_types), 1.0);
    let fast_num = 0.5 * normalize_power(fast, quantized) * atk * fast_mod;
    let charged_num = 0.5 * normalize_power(charged, quantized) * atk * charged_mod;

    let cost = charged.energy_cost();
    let fast_per_charged = match config.damage_model {
        DamageModel::Legacy => legacy_fast_per_charged(cost),
        DamageModel::EnergyBased => {
            let p = config.charged_trigger_probability;
            let produced = ensure_positive(
                fast.energy_gain() + 0.5 * incoming_dps * fast_dur,
                "opponent energy rate",
            )?;
            let required = (cost - 0.5 * incoming_dps * charged_dur).max(0.0);
            required / produced + (1.0 - p) / p
        }
    };

    let cycle = ensure_positive(fast_per_charged * fast_dur + charged_dur, "opponent cycle")?;
    let fast_rate = fast_per_charged * fast_num / cycle;
    let charged_rate = charged_num / cycle;

    let y_num = if fast.move_type == charged.move_type {
        vec![TypedRate {
            move_type: fast.move_type,
            value: fast_rate + charged_rate,
        }]
    } else {
        vec![
            TypedRate {
                move_type: fast.move_type,
                value: fast_rate,
            },
            TypedRate {
                move_type: charged.move_type,
                value: charged_rate,
            },
        ]
    };

    Ok(YSample {
        y_num,
        cm_num: Some(TypedRate {
            move_type: charged.move_type,
            value: charged_num,
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(name: &str, t: Type, power: f64, energy: i32, ms: u32) -> Move {
        Move {
            name: name.into(),
            move_type: Some(t),
            power,
            energy_delta: energy,
            duration_ms: ms,
            damage_window_start_ms: 0,
            custom: false,
        }
    }

    #[test]
    fn test_legacy_lookup() {
        assert_eq!(legacy_fast_per_charged(100.0), 3.0);
        assert_eq!(legacy_fast_per_charged(50.0), 1.5);
        assert_eq!(legacy_fast_per_charged(33.0), 1.0);
        assert!((legacy_fast_per_charged(45.0) - 1.35).abs() < 1e-12);
    }

    #[test]
    fn test_same_type_combines_into_one_entry() {
        let fast = mv("Fire Spin", Type::Fire, 14.0, 10, 1100);
        let charged = mv("Overheat", Type::Fire, 160.0, -100, 4000);
        let sample =
            compute_specific_y(&[Type::Fire], 200.0, &fast, &charged, 0.0, &Config::default())
                .unwrap();
        assert_eq!(sample.y_num.len(), 1);
        assert_eq!(sample.y_num[0].move_type, Some(Type::Fire));

        // 3 fast moves per charged, each cycle padded by 2 s
        let stab = f64::from(1.2f32);
        let fast_num = 0.5 * 14.0 * 200.0 * stab;
        let charged_num = 0.5 * 160.0 * 200.0 * stab;
        let cycle = 3.0 * 3.1 + 6.0;
        let expected = (3.0 * fast_num + charged_num) / cycle;
        assert!((sample.y_num[0].value - expected).abs() < 1e-9);
        assert_eq!(sample.cm_num.unwrap().value, charged_num);
    }

    #[test]
    fn test_mixed_types_keyed_separately() {
        let fast = mv("Waterfall", Type::Water, 16.0, 8, 1200);
        let charged = mv("Blizzard", Type::Ice, 140.0, -100, 3100);
        let sample =
            compute_specific_y(&[Type::Water], 200.0, &fast, &charged, 0.0, &Config::default())
                .unwrap();
        assert_eq!(sample.y_num.len(), 2);
        assert_eq!(sample.y_num[0].move_type, Some(Type::Water));
        assert_eq!(sample.y_num[1].move_type, Some(Type::Ice));
        assert_eq!(sample.cm_num.unwrap().move_type, Some(Type::Ice));
    }

    #[test]
    fn test_energy_based_uses_trigger_probability() {
        let fast = mv("Dragon Tail", Type::Dragon, 15.0, 9, 1100);
        let charged = mv("Outrage", Type::Dragon, 110.0, -50, 3900);
        let config = Config::default().damage_model(DamageModel::EnergyBased);
        let calm = compute_specific_y(&[Type::Dragon], 250.0, &fast, &charged, 0.0, &config).unwrap();
        let pressed =
            compute_specific_y(&[Type::Dragon], 250.0, &fast, &charged, 20.0, &config).unwrap();
        // More incoming damage means charged moves arrive sooner
        assert!(pressed.y_num[0].value > calm.y_num[0].value);

        // 50 / 9 fast moves plus (1 - 0.5) / 0.5 = 1 skipped trigger
        let n = 50.0 / 9.0 + 1.0;
        let stab = f64::from(1.2f32);
        let cycle = n * 3.1 + 5.9;
        let expected = (n * 0.5 * 15.0 * 250.0 * stab + 0.5 * 110.0 * 250.0 * stab) / cycle;
        assert!((calm.y_num[0].value - expected).abs() < 1e-9);
    }

    #[test]
    fn test_negative_pressure_is_rejected() {
        let fast = mv("Tackle", Type::Normal, 5.0, 5, 500);
        let charged = mv("Body Slam", Type::Normal, 50.0, -33, 1900);
        let result =
            compute_specific_y(&[Type::Normal], 100.0, &fast, &charged, -1.0, &Config::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_trigger_probability_is_rejected() {
        let fast = mv("Tackle", Type::Normal, 5.0, 5, 500);
        let charged = mv("Body Slam", Type::Normal, 50.0, -33, 1900);
        let mut config = Config::default().damage_model(DamageModel::EnergyBased);
        config.charged_trigger_probability = 0.0;
        let result = compute_specific_y(&[Type::Normal], 100.0, &fast, &charged, 5.0, &config);
        assert!(matches!(result, Err(EngineError::Configuration { .. })));
    }
}
