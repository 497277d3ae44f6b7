//! Physical constants of the lab model.
//!
//! These mirror the classroom narrative: ideal 1.5 V cells, identical 15 ohm
//! bulbs, and a deliberately accelerated drain clock so experiments finish in
//! human-observable time.

/// Nominal voltage of a single battery cell (volts).
pub const VOLTS_PER_BATTERY: f64 = 1.5;

/// Resistance of a single bulb (ohms), identical for regular and LED loads.
pub const OHMS_PER_BULB: f64 = 15.0;

/// Capacity contributed by each battery (mAh). Capacity scales with count
/// regardless of topology in this model's accounting.
pub const MAH_PER_BATTERY: f64 = 2000.0;

/// Per-bulb voltage above which a regular bulb fails.
pub const REGULAR_BURNOUT_VOLTS: f64 = 9.0;

/// Per-bulb voltage above which an LED fails.
pub const LED_BURNOUT_VOLTS: f64 = 5.5;

/// Below this per-bulb voltage a regular filament does not glow visibly.
pub const REGULAR_GLOW_FLOOR_VOLTS: f64 = 0.5;

/// Per-bulb voltage at which a regular bulb reaches 100 % brightness.
pub const REGULAR_FULL_BRIGHT_VOLTS: f64 = 3.5;

/// LED overdrive (volts above Vf) that reaches 100 % brightness.
pub const LED_FULL_BRIGHT_OVERDRIVE: f64 = 3.0;

/// Exponent of the LED overdrive-to-brightness curve.
pub const LED_BRIGHTNESS_EXPONENT: f64 = 0.8;

/// Drain ticks advance battery chemistry 3x faster than wall time.
pub const DRAIN_ACCELERATION: f64 = 3.0;

/// Period of one drain tick in wall-clock seconds.
pub const TICK_PERIOD_SECONDS: f64 = 1.0;

/// Baseline draw used for the power-factor readout: one battery driving one
/// bulb, 1.5 V / 15 ohm = 100 mA.
pub const BASELINE_DRAW_MA: f64 = (VOLTS_PER_BATTERY / OHMS_PER_BULB) * 1000.0;

/// Allowed transformer ratios.
pub const TRANSFORMER_RATIOS: [f64; 4] = [0.5, 1.0, 1.5, 2.0];

/// Allowed LED forward voltages.
pub const FORWARD_VOLTAGES: [f64; 3] = [1.8, 2.2, 3.2];

/// Inclusive bounds for battery and bulb counts.
pub const MIN_COUNT: u8 = 1;
pub const MAX_COUNT: u8 = 10;
