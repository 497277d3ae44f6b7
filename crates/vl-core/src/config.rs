//! Circuit configuration schema.
//!
//! A `Configuration` is a snapshot of everything the experimenter can touch:
//! battery bank, load bank, switch, transformer, and LED parameters. It is
//! immutable per evaluation; the surrounding control surface replaces fields
//! through discrete actions and is responsible for keeping counts clamped.

use crate::constants::{FORWARD_VOLTAGES, MAX_COUNT, MIN_COUNT, TRANSFORMER_RATIOS};
use crate::error::{VlError, VlResult};
use crate::numeric::ensure_finite;
use serde::{Deserialize, Serialize};

/// How elements of a bank are wired together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Connection {
    /// One path: voltages add (batteries) or divide (bulbs).
    Series,
    /// Shared nodes: voltage is common, currents sum.
    Parallel,
}

impl Connection {
    /// Flip between series and parallel.
    pub fn toggled(self) -> Self {
        match self {
            Connection::Series => Connection::Parallel,
            Connection::Parallel => Connection::Series,
        }
    }
}

/// Kind of load in the bulb bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulbType {
    /// Incandescent filament bulb.
    Regular,
    /// Light-emitting diode with a forward-voltage threshold.
    Led,
}

/// LED color. Cosmetic for the electrical model, but each color carries a
/// typical forward voltage used as the default when the color is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedColor {
    Red,
    Green,
    Blue,
    Yellow,
    White,
}

impl LedColor {
    /// Typical forward voltage for this color (volts). Red and yellow diodes
    /// conduct lowest, blue and white need the most.
    pub fn default_forward_voltage(self) -> f64 {
        match self {
            LedColor::Red | LedColor::Yellow => 1.8,
            LedColor::Green => 2.2,
            LedColor::Blue | LedColor::White => 3.2,
        }
    }
}

/// Full experiment configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Number of battery cells, 1..=10.
    pub battery_count: u8,
    pub battery_connection: Connection,
    /// Number of bulbs, 1..=10.
    pub bulb_count: u8,
    pub bulb_connection: Connection,
    pub bulb_type: BulbType,
    /// Switch state; `true` means the circuit is broken.
    pub is_open: bool,
    pub transformer_enabled: bool,
    /// Secondary/primary voltage ratio, one of {0.5, 1.0, 1.5, 2.0}.
    pub transformer_ratio: f64,
    pub led_color: LedColor,
    /// LED conduction threshold (volts), one of {1.8, 2.2, 3.2}. Ignored for
    /// regular bulbs.
    pub forward_voltage_v: f64,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            battery_count: 1,
            battery_connection: Connection::Series,
            bulb_count: 1,
            bulb_connection: Connection::Series,
            bulb_type: BulbType::Regular,
            is_open: true,
            transformer_enabled: false,
            transformer_ratio: 1.0,
            led_color: LedColor::Yellow,
            forward_voltage_v: 1.8,
        }
    }
}

impl Configuration {
    /// Check that every field is inside its documented domain.
    ///
    /// The in-process control surface keeps configurations valid by
    /// construction; this guards configurations arriving from scenario files.
    pub fn validate(&self) -> VlResult<()> {
        check_count(self.battery_count, "battery_count")?;
        check_count(self.bulb_count, "bulb_count")?;

        let ratio = ensure_finite(self.transformer_ratio, "transformer_ratio")?;
        if !TRANSFORMER_RATIOS.contains(&ratio) {
            return Err(VlError::OutOfRange {
                what: "transformer_ratio",
                value: ratio,
                allowed: "0.5, 1.0, 1.5, 2.0",
            });
        }

        let vf = ensure_finite(self.forward_voltage_v, "forward_voltage_v")?;
        if !FORWARD_VOLTAGES.contains(&vf) {
            return Err(VlError::OutOfRange {
                what: "forward_voltage_v",
                value: vf,
                allowed: "1.8, 2.2, 3.2",
            });
        }

        Ok(())
    }

    /// Clamp a requested element count into the supported range.
    pub fn clamp_count(requested: i32) -> u8 {
        requested.clamp(MIN_COUNT as i32, MAX_COUNT as i32) as u8
    }

    /// The forward-voltage threshold that actually gates conduction:
    /// the configured Vf for LEDs, zero for regular bulbs.
    pub fn active_forward_voltage(&self) -> f64 {
        match self.bulb_type {
            BulbType::Led => self.forward_voltage_v,
            BulbType::Regular => 0.0,
        }
    }
}

fn check_count(count: u8, what: &'static str) -> VlResult<()> {
    if (MIN_COUNT..=MAX_COUNT).contains(&count) {
        Ok(())
    } else {
        Err(VlError::OutOfRange {
            what,
            value: count as f64,
            allowed: "1..=10",
        })
    }
}
