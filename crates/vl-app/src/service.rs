//! The lab's control surface.
//!
//! `LabService` wraps a `Session` with the discrete mutation actions the
//! frontend exposes: clamped count changes, topology/switch/transformer
//! toggles, bulb and LED selection, the two reset actions, and the
//! explanation state. Every action recomputes the derived outputs before
//! returning.

use crate::error::{AppError, AppResult};
use crate::explain::{explain_or_fallback, Explainer, ExplanationRequest, DEFAULT_EXPLANATION};
use crate::scenario::Scenario;
use tracing::debug;
use vl_circuit::CircuitOutputs;
use vl_core::config::{BulbType, LedColor};
use vl_core::constants::{BASELINE_DRAW_MA, FORWARD_VOLTAGES, TRANSFORMER_RATIOS};
use vl_core::{Configuration, VlError};
use vl_sim::{DrainRate, Session};

/// One running experiment plus its explanation text.
#[derive(Debug, Clone)]
pub struct LabService {
    session: Session,
    explanation: String,
}

impl Default for LabService {
    fn default() -> Self {
        Self::new()
    }
}

impl LabService {
    /// Start with the default configuration and a fresh battery.
    pub fn new() -> Self {
        Self {
            session: Session::new(Configuration::default()),
            explanation: DEFAULT_EXPLANATION.to_string(),
        }
    }

    /// Start from a validated scenario.
    pub fn from_scenario(scenario: &Scenario) -> AppResult<Self> {
        scenario.config.validate()?;
        let mut session = Session::new(scenario.config);
        session.set_charge(scenario.charge_percent);
        Ok(Self {
            session,
            explanation: DEFAULT_EXPLANATION.to_string(),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn config(&self) -> &Configuration {
        self.session.config()
    }

    pub fn outputs(&self) -> &CircuitOutputs {
        self.session.outputs()
    }

    pub fn charge_percent(&self) -> f64 {
        self.session.charge_percent()
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Battery draw relative to the one-battery-one-bulb baseline (100 mA).
    pub fn power_factor(&self) -> f64 {
        self.session.outputs().total_current_ma / BASELINE_DRAW_MA
    }

    pub fn drain_rate(&self) -> Option<DrainRate> {
        self.session.drain_rate()
    }

    // --- count actions, clamped to 1..=10 ---

    pub fn add_battery(&mut self) {
        self.adjust_battery_count(1);
    }

    pub fn remove_battery(&mut self) {
        self.adjust_battery_count(-1);
    }

    pub fn add_bulb(&mut self) {
        self.adjust_bulb_count(1);
    }

    pub fn remove_bulb(&mut self) {
        self.adjust_bulb_count(-1);
    }

    fn adjust_battery_count(&mut self, delta: i32) {
        self.session.update_config(|c| {
            c.battery_count = Configuration::clamp_count(c.battery_count as i32 + delta);
        });
        debug!(count = self.config().battery_count, "battery count changed");
    }

    fn adjust_bulb_count(&mut self, delta: i32) {
        self.session.update_config(|c| {
            c.bulb_count = Configuration::clamp_count(c.bulb_count as i32 + delta);
        });
        debug!(count = self.config().bulb_count, "bulb count changed");
    }

    // --- toggles ---

    pub fn toggle_battery_connection(&mut self) {
        self.session
            .update_config(|c| c.battery_connection = c.battery_connection.toggled());
    }

    pub fn toggle_bulb_connection(&mut self) {
        self.session
            .update_config(|c| c.bulb_connection = c.bulb_connection.toggled());
    }

    pub fn toggle_switch(&mut self) {
        self.session.update_config(|c| c.is_open = !c.is_open);
        debug!(is_open = self.config().is_open, "switch toggled");
    }

    pub fn toggle_transformer(&mut self) {
        self.session
            .update_config(|c| c.transformer_enabled = !c.transformer_enabled);
    }

    // --- selections ---

    pub fn select_transformer_ratio(&mut self, ratio: f64) -> AppResult<()> {
        if !TRANSFORMER_RATIOS.contains(&ratio) {
            return Err(VlError::OutOfRange {
                what: "transformer_ratio",
                value: ratio,
                allowed: "0.5, 1.0, 1.5, 2.0",
            }
            .into());
        }
        self.session.update_config(|c| c.transformer_ratio = ratio);
        Ok(())
    }

    pub fn select_bulb_type(&mut self, bulb_type: BulbType) {
        self.session.update_config(|c| c.bulb_type = bulb_type);
    }

    /// Pick an LED color. The color also selects its typical forward voltage;
    /// a later explicit forward-voltage selection overrides it.
    pub fn select_led_color(&mut self, color: LedColor) {
        self.session.update_config(|c| {
            c.led_color = color;
            c.forward_voltage_v = color.default_forward_voltage();
        });
    }

    pub fn select_forward_voltage(&mut self, vf: f64) -> AppResult<()> {
        if !FORWARD_VOLTAGES.contains(&vf) {
            return Err(VlError::OutOfRange {
                what: "forward_voltage_v",
                value: vf,
                allowed: "1.8, 2.2, 3.2",
            }
            .into());
        }
        self.session.update_config(|c| c.forward_voltage_v = vf);
        Ok(())
    }

    // --- resets ---

    /// Swap in a fresh battery, keeping the configuration.
    pub fn replenish_battery(&mut self) {
        self.session.replenish();
    }

    /// Restore the default configuration and a fresh battery.
    pub fn full_reset(&mut self) {
        self.session.reset();
        self.explanation = DEFAULT_EXPLANATION.to_string();
    }

    // --- time ---

    pub fn tick(&mut self) -> bool {
        self.session.tick()
    }

    pub fn step_seconds(&mut self, seconds: u64) -> u64 {
        self.session.step_seconds(seconds)
    }

    // --- explanation / observation ---

    /// Ask the provider for fresh text. Failures silently fall back to the
    /// canned line; the stored explanation is returned either way.
    pub fn ask_explanation(&mut self, explainer: &dyn Explainer) -> &str {
        let request = ExplanationRequest {
            config: self.session.config(),
            charge_percent: self.session.charge_percent(),
            outputs: self.session.outputs(),
        };
        self.explanation = explain_or_fallback(explainer, &request);
        &self.explanation
    }

    /// A one-line observation hint for the current state.
    pub fn observation_tip(&self) -> String {
        let config = self.session.config();
        let out = self.session.outputs();
        if config.is_open {
            return "The switch is open: no current is flowing. Close it and observe!".to_string();
        }
        if out.is_drained {
            return "The battery is empty. Swap in a fresh one to continue.".to_string();
        }
        if out.is_burned_out {
            return "Too much voltage burned out the load! That is overload; reset the experiment."
                .to_string();
        }
        if out.brightness_pct == 0.0 {
            return match config.bulb_type {
                BulbType::Led => {
                    "LED dark? Check whether each bulb clears its forward voltage (Vf).".to_string()
                }
                BulbType::Regular => {
                    "The voltage is too low; the filament never gets hot enough to glow."
                        .to_string()
                }
            };
        }
        match config.bulb_type {
            BulbType::Led => {
                "The LED is shining, and it uses far less energy than a filament bulb.".to_string()
            }
            BulbType::Regular if out.brightness_pct > 80.0 => {
                "The filament is running white hot. Bright, but very hungry for energy!".to_string()
            }
            BulbType::Regular => {
                "Glowing steadily. Try series batteries and watch the brightness climb."
                    .to_string()
            }
        }
    }
}
