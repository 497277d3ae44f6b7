//! Battery drain rate math and gating.
//!
//! Discharge converts the present battery draw into percent-of-capacity per
//! second (mAh = mA x hours), then applies a fixed acceleration so that
//! experiments complete while someone is watching.

use crate::error::{SimError, SimResult};
use vl_circuit::CircuitOutputs;
use vl_core::constants::{DRAIN_ACCELERATION, MAH_PER_BATTERY};
use vl_core::Configuration;

/// Discharge rate captured for one scheduling interval.
///
/// The rate is a snapshot: it does not track later changes to the draw, which
/// is why the scheduler re-arms whenever a rate-affecting input changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrainRate {
    percent_per_second: f64,
}

impl DrainRate {
    /// Rate for a given battery draw and pack size.
    pub fn new(draw_ma: f64, battery_count: u8) -> SimResult<Self> {
        if !draw_ma.is_finite() || draw_ma < 0.0 {
            return Err(SimError::NonPhysical { what: "draw_ma" });
        }
        if battery_count == 0 {
            return Err(SimError::InvalidArg {
                what: "battery_count must be at least 1",
            });
        }
        let total_capacity_mah = MAH_PER_BATTERY * battery_count as f64;
        let percent_per_second = (draw_ma / 3600.0) / total_capacity_mah * 100.0;
        Ok(Self { percent_per_second })
    }

    /// Percent of capacity lost per real-time second.
    pub fn percent_per_second(&self) -> f64 {
        self.percent_per_second
    }

    /// Percent of capacity lost per accelerated tick.
    pub fn percent_per_tick(&self) -> f64 {
        self.percent_per_second * DRAIN_ACCELERATION
    }

    /// The rate the drain process should run at, or `None` while it is idle.
    ///
    /// Discharge happens only while the switch is closed, charge remains, the
    /// load has not burned out, and current is actually being drawn.
    pub fn for_state(
        config: &Configuration,
        charge_percent: f64,
        outputs: &CircuitOutputs,
    ) -> Option<Self> {
        let active = !config.is_open
            && charge_percent > 0.0
            && !outputs.is_burned_out
            && outputs.total_current_ma > 0.0;
        if !active {
            return None;
        }
        // Inputs came from a valid evaluation, so construction cannot fail.
        Self::new(outputs.total_current_ma, config.battery_count).ok()
    }
}

/// Apply one tick of discharge to a charge level, clamping at empty.
pub fn tick_charge(charge_percent: f64, rate: DrainRate) -> f64 {
    (charge_percent - rate.percent_per_tick()).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vl_circuit::evaluate;
    use vl_core::nearly_equal;

    #[test]
    fn rate_matches_capacity_arithmetic() {
        // 200 mA against a 2-cell pack (4000 mAh).
        let rate = DrainRate::new(200.0, 2).unwrap();
        let expected = (200.0 / 3600.0) / 4000.0 * 100.0;
        assert!(nearly_equal(rate.percent_per_second(), expected, 1e-15, 1e-12));
        assert!(nearly_equal(
            rate.percent_per_tick(),
            expected * 3.0,
            1e-15,
            1e-12
        ));
    }

    #[test]
    fn rejects_negative_or_nan_draw() {
        assert!(DrainRate::new(-1.0, 1).is_err());
        assert!(DrainRate::new(f64::NAN, 1).is_err());
    }

    #[test]
    fn tick_clamps_at_empty() {
        let rate = DrainRate::new(2000.0, 1).unwrap();
        let mut charge = rate.percent_per_tick() * 1.5;
        charge = tick_charge(charge, rate);
        assert!(charge > 0.0);
        charge = tick_charge(charge, rate);
        assert_eq!(charge, 0.0);
        assert_eq!(tick_charge(charge, rate), 0.0);
    }

    #[test]
    fn gate_requires_closed_switch_and_draw() {
        let mut config = Configuration::default();
        let outputs = evaluate(&config, 100.0);
        // Open switch: idle.
        assert!(DrainRate::for_state(&config, 100.0, &outputs).is_none());

        config.is_open = false;
        let outputs = evaluate(&config, 100.0);
        assert!(DrainRate::for_state(&config, 100.0, &outputs).is_some());

        // Empty pack: idle even with the switch closed.
        let outputs = evaluate(&config, 0.0);
        assert!(DrainRate::for_state(&config, 0.0, &outputs).is_none());
    }

    #[test]
    fn gate_stops_on_burnout() {
        let mut config = Configuration::default();
        config.is_open = false;
        config.battery_count = 7; // 10.5 V burns out a single regular bulb
        let outputs = evaluate(&config, 100.0);
        assert!(outputs.is_burned_out);
        assert!(DrainRate::for_state(&config, 100.0, &outputs).is_none());
    }
}
