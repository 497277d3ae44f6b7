//! Instantaneous evaluation of the lab circuit.

use serde::{Deserialize, Serialize};
use vl_core::config::{BulbType, Configuration, Connection};
use vl_core::constants::{
    LED_BRIGHTNESS_EXPONENT, LED_BURNOUT_VOLTS, LED_FULL_BRIGHT_OVERDRIVE, MAH_PER_BATTERY,
    OHMS_PER_BULB, REGULAR_BURNOUT_VOLTS, REGULAR_FULL_BRIGHT_VOLTS, REGULAR_GLOW_FLOOR_VOLTS,
    VOLTS_PER_BATTERY,
};

/// Derived electrical/visual state, fully recomputed on every change.
///
/// `total_current_ma` is the draw seen by the battery pack: with the
/// transformer enabled it is the load current scaled by the ratio, which is
/// what makes high-voltage experiments drain quadratically faster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircuitOutputs {
    /// Volts delivered at the transformer/source output.
    pub total_voltage_v: f64,
    /// Milliamps drawn from the battery pack.
    pub total_current_ma: f64,
    /// Volts seen by each individual bulb.
    pub v_per_bulb_v: f64,
    /// Perceived brightness, 0..=100.
    pub brightness_pct: f64,
    /// The load failed from overvoltage. Recomputed fresh each evaluation.
    pub is_burned_out: bool,
    /// Battery charge is exhausted.
    pub is_drained: bool,
    /// Estimated minutes of operation left at the present draw.
    pub expected_minutes: f64,
}

impl CircuitOutputs {
    /// The dead-circuit result: switch open or battery empty.
    fn idle(drained: bool) -> Self {
        Self {
            total_voltage_v: 0.0,
            total_current_ma: 0.0,
            v_per_bulb_v: 0.0,
            brightness_pct: 0.0,
            is_burned_out: false,
            is_drained: drained,
            expected_minutes: 0.0,
        }
    }
}

/// Voltage produced by the battery bank before the transformer.
///
/// Series cells add; parallel cells hold single-cell voltage and only extend
/// runtime.
pub fn source_voltage(config: &Configuration) -> f64 {
    match config.battery_connection {
        Connection::Series => config.battery_count as f64 * VOLTS_PER_BATTERY,
        Connection::Parallel => VOLTS_PER_BATTERY,
    }
}

/// Total resistance of the bulb bank.
pub fn load_resistance(config: &Configuration) -> f64 {
    let n = config.bulb_count as f64;
    match config.bulb_connection {
        Connection::Series => n * OHMS_PER_BULB,
        Connection::Parallel => OHMS_PER_BULB / n,
    }
}

/// Brightness of one bulb given the voltage it sees, before burnout.
fn brightness(config: &Configuration, v_per_bulb: f64) -> f64 {
    let threshold = config.active_forward_voltage();
    if v_per_bulb < threshold {
        return 0.0;
    }
    match config.bulb_type {
        BulbType::Led => {
            // LEDs ramp steeply once past Vf.
            let overdrive = v_per_bulb - threshold;
            let curve = overdrive.powf(LED_BRIGHTNESS_EXPONENT)
                / LED_FULL_BRIGHT_OVERDRIVE.powf(LED_BRIGHTNESS_EXPONENT);
            (curve * 100.0).min(100.0)
        }
        BulbType::Regular => {
            // Filament glow goes with the square of the voltage; below the
            // floor the tungsten never gets hot enough to light.
            if v_per_bulb < REGULAR_GLOW_FLOOR_VOLTS {
                0.0
            } else {
                let curve = (v_per_bulb * v_per_bulb)
                    / (REGULAR_FULL_BRIGHT_VOLTS * REGULAR_FULL_BRIGHT_VOLTS);
                (curve * 100.0).min(100.0)
            }
        }
    }
}

/// Evaluate the circuit for a configuration snapshot and battery charge.
///
/// Pure function: identical inputs yield identical outputs. Callers are
/// expected to supply validated configurations (see
/// `Configuration::validate`); counts are always >= 1, so the parallel
/// resistance never divides by zero.
pub fn evaluate(config: &Configuration, charge_percent: f64) -> CircuitOutputs {
    if config.is_open || charge_percent <= 0.0 {
        return CircuitOutputs::idle(charge_percent <= 0.0);
    }

    let source_v = source_voltage(config);
    let resistance = load_resistance(config);

    let output_v = if config.transformer_enabled {
        source_v * config.transformer_ratio
    } else {
        source_v
    };

    let v_per_bulb = match config.bulb_connection {
        Connection::Series => output_v / config.bulb_count as f64,
        Connection::Parallel => output_v,
    };

    // The forward voltage only gates whether current flows; the magnitude of
    // the draw comes from Ohm's law over the whole bank.
    let effective_drive = (v_per_bulb - config.active_forward_voltage()).max(0.0);
    let load_current_ma = if effective_drive > 0.0 {
        (output_v / resistance) * 1000.0
    } else {
        0.0
    };

    // Primary-side draw scales with the ratio on top of the voltage scaling,
    // so a 2x transformer costs 4x the battery current. The quadratic cost is
    // the lesson, not an oversight.
    let battery_draw_ma = if config.transformer_enabled {
        load_current_ma * config.transformer_ratio
    } else {
        load_current_ma
    };

    let mut brightness_pct = brightness(config, v_per_bulb);

    let burnout_threshold = match config.bulb_type {
        BulbType::Led => LED_BURNOUT_VOLTS,
        BulbType::Regular => REGULAR_BURNOUT_VOLTS,
    };
    let is_burned_out = v_per_bulb > burnout_threshold;
    if is_burned_out {
        // The failed load goes dark, but voltage/current readouts keep showing
        // what the pack delivers.
        brightness_pct = 0.0;
    }

    let total_capacity_mah = MAH_PER_BATTERY * config.battery_count as f64;
    let remaining_mah = (charge_percent / 100.0) * total_capacity_mah;
    let expected_minutes = if battery_draw_ma > 0.0 {
        (remaining_mah / battery_draw_ma) * 60.0
    } else {
        0.0
    };

    CircuitOutputs {
        total_voltage_v: output_v,
        total_current_ma: battery_draw_ma,
        v_per_bulb_v: v_per_bulb,
        brightness_pct,
        is_burned_out,
        is_drained: false,
        expected_minutes,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use vl_core::config::LedColor;

    fn config_strategy() -> impl Strategy<Value = Configuration> {
        (
            1u8..=10,
            prop::bool::ANY,
            1u8..=10,
            prop::bool::ANY,
            prop::bool::ANY,
            prop::bool::ANY,
            prop::bool::ANY,
            prop::sample::select(vec![0.5, 1.0, 1.5, 2.0]),
            prop::sample::select(vec![1.8, 2.2, 3.2]),
        )
            .prop_map(
                |(
                    battery_count,
                    batt_series,
                    bulb_count,
                    bulb_series,
                    led,
                    is_open,
                    transformer_enabled,
                    transformer_ratio,
                    forward_voltage_v,
                )| Configuration {
                    battery_count,
                    battery_connection: if batt_series {
                        Connection::Series
                    } else {
                        Connection::Parallel
                    },
                    bulb_count,
                    bulb_connection: if bulb_series {
                        Connection::Series
                    } else {
                        Connection::Parallel
                    },
                    bulb_type: if led { BulbType::Led } else { BulbType::Regular },
                    is_open,
                    transformer_enabled,
                    transformer_ratio,
                    led_color: LedColor::Yellow,
                    forward_voltage_v,
                },
            )
    }

    proptest! {
        #[test]
        fn evaluation_is_pure(config in config_strategy(), charge in 0.0_f64..=100.0) {
            let a = evaluate(&config, charge);
            let b = evaluate(&config, charge);
            // Bit-identical, not merely approximately equal.
            prop_assert_eq!(a.total_voltage_v.to_bits(), b.total_voltage_v.to_bits());
            prop_assert_eq!(a.total_current_ma.to_bits(), b.total_current_ma.to_bits());
            prop_assert_eq!(a.brightness_pct.to_bits(), b.brightness_pct.to_bits());
            prop_assert_eq!(a.expected_minutes.to_bits(), b.expected_minutes.to_bits());
            prop_assert_eq!(a.is_burned_out, b.is_burned_out);
            prop_assert_eq!(a.is_drained, b.is_drained);
        }

        #[test]
        fn outputs_stay_in_range(config in config_strategy(), charge in 0.0_f64..=100.0) {
            let out = evaluate(&config, charge);
            prop_assert!(out.total_voltage_v >= 0.0);
            prop_assert!(out.total_current_ma >= 0.0);
            prop_assert!((0.0..=100.0).contains(&out.brightness_pct));
            prop_assert!(out.expected_minutes >= 0.0);
            if out.is_burned_out {
                prop_assert_eq!(out.brightness_pct, 0.0);
            }
        }

        #[test]
        fn broken_or_drained_circuit_is_dead(config in config_strategy(), charge in 0.0_f64..=100.0) {
            let mut config = config;
            config.is_open = true;
            let out = evaluate(&config, charge);
            prop_assert_eq!(out.total_voltage_v, 0.0);
            prop_assert_eq!(out.total_current_ma, 0.0);
            prop_assert_eq!(out.brightness_pct, 0.0);
            prop_assert!(!out.is_burned_out);

            config.is_open = false;
            let out = evaluate(&config, 0.0);
            prop_assert!(out.is_drained);
            prop_assert_eq!(out.total_current_ma, 0.0);
        }
    }
}
