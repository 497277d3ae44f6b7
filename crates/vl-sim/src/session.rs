//! Lab session: the closed feedback loop of the experiment.
//!
//! The session owns the configuration, the battery charge, and the latest
//! circuit outputs. Charge is threaded explicitly: nothing reads or writes it
//! except through the session, and every change triggers a full recompute of
//! the derived state.

use crate::drain::{tick_charge, DrainRate};
use tracing::{debug, info};
use vl_circuit::{evaluate, CircuitOutputs};
use vl_core::{clamp_percent, Configuration};

/// A running experiment.
#[derive(Debug, Clone)]
pub struct Session {
    config: Configuration,
    charge_percent: f64,
    outputs: CircuitOutputs,
}

impl Session {
    /// Start a session with a fresh battery.
    pub fn new(config: Configuration) -> Self {
        let outputs = evaluate(&config, 100.0);
        Self {
            config,
            charge_percent: 100.0,
            outputs,
        }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn charge_percent(&self) -> f64 {
        self.charge_percent
    }

    pub fn outputs(&self) -> &CircuitOutputs {
        &self.outputs
    }

    /// Mutate the configuration and recompute the derived state.
    pub fn update_config(&mut self, mutate: impl FnOnce(&mut Configuration)) -> &CircuitOutputs {
        mutate(&mut self.config);
        self.recompute();
        &self.outputs
    }

    /// Overwrite the charge level (e.g. from a scenario file) and recompute.
    pub fn set_charge(&mut self, charge_percent: f64) {
        self.charge_percent = clamp_percent(charge_percent);
        self.recompute();
    }

    /// Present drain rate, or `None` while the drain process is idle.
    pub fn drain_rate(&self) -> Option<DrainRate> {
        DrainRate::for_state(&self.config, self.charge_percent, &self.outputs)
    }

    /// Apply an externally scheduled decrement (a timer tick) and recompute.
    pub fn apply_drain(&mut self, percent: f64) {
        self.charge_percent = (self.charge_percent - percent).max(0.0);
        self.recompute();
    }

    /// Advance one accelerated second. Returns `true` if any charge was
    /// consumed; `false` means the drain process is idle.
    pub fn tick(&mut self) -> bool {
        let Some(rate) = self.drain_rate() else {
            return false;
        };
        self.charge_percent = tick_charge(self.charge_percent, rate);
        self.recompute();
        true
    }

    /// Advance the experiment by `seconds` one-second ticks. Stops early once
    /// the drain process goes idle (drained, opened, or burned out).
    pub fn step_seconds(&mut self, seconds: u64) -> u64 {
        let mut applied = 0;
        for _ in 0..seconds {
            if !self.tick() {
                break;
            }
            applied += 1;
        }
        applied
    }

    /// Swap in a fresh battery.
    pub fn replenish(&mut self) {
        debug!("battery replenished");
        self.charge_percent = 100.0;
        self.recompute();
    }

    /// Restore the default configuration and a fresh battery.
    pub fn reset(&mut self) {
        debug!("experiment reset");
        self.config = Configuration::default();
        self.charge_percent = 100.0;
        self.recompute();
    }

    fn recompute(&mut self) {
        let was_burned_out = self.outputs.is_burned_out;
        let was_drained = self.outputs.is_drained;
        self.outputs = evaluate(&self.config, self.charge_percent);
        if self.outputs.is_burned_out && !was_burned_out {
            info!(v_per_bulb = self.outputs.v_per_bulb_v, "load burned out");
        }
        if self.outputs.is_drained && !was_drained {
            info!("battery drained");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_session() -> Session {
        let mut config = Configuration::default();
        config.is_open = false;
        config.battery_count = 2;
        Session::new(config)
    }

    #[test]
    fn charge_strictly_decreases_while_drawing() {
        let mut session = running_session();
        let mut previous = session.charge_percent();
        for _ in 0..5 {
            assert!(session.tick());
            assert!(session.charge_percent() < previous);
            previous = session.charge_percent();
        }
    }

    #[test]
    fn idle_when_switch_open() {
        let mut session = Session::new(Configuration::default());
        assert!(!session.tick());
        assert_eq!(session.charge_percent(), 100.0);
    }

    #[test]
    fn drains_to_zero_and_stays_there() {
        let mut session = running_session();
        // Crank the cost up so exhaustion is quick: 2x transformer.
        session.update_config(|c| {
            c.transformer_enabled = true;
            c.transformer_ratio = 2.0;
        });
        // 800 mA on 4000 mAh at 3x acceleration: ~0.0167 %/tick, so cap the
        // loop generously rather than computing the exact count.
        let mut guard = 0u64;
        while session.tick() {
            guard += 1;
            assert!(guard < 1_000_000, "drain never completed");
        }
        assert_eq!(session.charge_percent(), 0.0);
        assert!(session.outputs().is_drained);
        assert!(!session.tick());
        assert_eq!(session.charge_percent(), 0.0);
    }

    #[test]
    fn feedback_loop_shrinks_expected_minutes() {
        let mut session = running_session();
        let before = session.outputs().expected_minutes;
        session.tick();
        let after = session.outputs().expected_minutes;
        assert!(after < before);
    }

    #[test]
    fn replenish_restores_full_charge() {
        let mut session = running_session();
        session.step_seconds(10);
        assert!(session.charge_percent() < 100.0);
        session.replenish();
        assert_eq!(session.charge_percent(), 100.0);
        assert!(!session.outputs().is_drained);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut session = running_session();
        session.step_seconds(3);
        session.reset();
        assert_eq!(session.charge_percent(), 100.0);
        assert_eq!(*session.config(), Configuration::default());
        assert!(session.config().is_open);
    }

    #[test]
    fn step_seconds_reports_applied_ticks() {
        let mut session = running_session();
        assert_eq!(session.step_seconds(4), 4);
        session.update_config(|c| c.is_open = true);
        assert_eq!(session.step_seconds(4), 0);
    }

    #[test]
    fn apply_drain_clamps_at_zero() {
        let mut session = running_session();
        session.apply_drain(150.0);
        assert_eq!(session.charge_percent(), 0.0);
        assert!(session.outputs().is_drained);
    }
}
