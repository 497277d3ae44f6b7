//! End-to-end flows through the service layer: build a circuit with the
//! control-surface actions, let it drain, and check the derived state at
//! each step.

use vl_app::{LabService, Scenario, DEFAULT_EXPLANATION};
use vl_core::config::{BulbType, Connection, LedColor};
use vl_core::Configuration;

#[test]
fn series_batteries_brighten_and_drain_faster() {
    let mut lab = LabService::new();
    lab.toggle_switch();

    let one_cell = lab.outputs().clone();
    assert!((one_cell.total_voltage_v - 1.5).abs() < 1e-9);

    lab.add_battery();
    let two_cells = lab.outputs().clone();
    assert!((two_cells.total_voltage_v - 3.0).abs() < 1e-9);
    assert!(two_cells.brightness_pct > one_cell.brightness_pct);
    // Doubled voltage doubles draw, but capacity doubled too: same runtime.
    assert!((two_cells.total_current_ma - 2.0 * one_cell.total_current_ma).abs() < 1e-9);
    assert!((two_cells.expected_minutes - one_cell.expected_minutes).abs() < 1e-6);
}

#[test]
fn parallel_batteries_hold_voltage_and_last_longer() {
    let mut lab = LabService::new();
    lab.toggle_switch();
    let baseline_minutes = lab.outputs().expected_minutes;

    lab.add_battery();
    lab.toggle_battery_connection();
    assert_eq!(lab.config().battery_connection, Connection::Parallel);
    let out = lab.outputs();
    assert!((out.total_voltage_v - 1.5).abs() < 1e-9);
    assert!((out.expected_minutes - 2.0 * baseline_minutes).abs() < 1e-6);
}

#[test]
fn transformer_step_up_costs_quadratically() {
    let mut lab = LabService::new();
    lab.toggle_switch();
    let plain_draw = lab.outputs().total_current_ma;

    lab.toggle_transformer();
    lab.select_transformer_ratio(2.0).unwrap();
    let boosted = lab.outputs();
    assert!((boosted.total_voltage_v - 3.0).abs() < 1e-9);
    assert!((boosted.total_current_ma - 4.0 * plain_draw).abs() < 1e-9);
    assert!(lab.power_factor() > 3.9);
}

#[test]
fn seven_series_cells_burn_out_a_filament_bulb() {
    let mut lab = LabService::new();
    lab.toggle_switch();
    for _ in 0..6 {
        lab.add_battery();
    }
    let out = lab.outputs();
    assert!((out.total_voltage_v - 10.5).abs() < 1e-9);
    assert!(out.is_burned_out);
    assert_eq!(out.brightness_pct, 0.0);
    // Meters still read the electrical state.
    assert!(out.total_current_ma > 0.0);
    // A burned-out circuit stops draining.
    assert!(lab.drain_rate().is_none());
    let ticks = lab.step_seconds(10);
    assert_eq!(ticks, 0);
    assert_eq!(lab.charge_percent(), 100.0);
}

#[test]
fn led_below_forward_voltage_stays_dark_but_cheap() {
    let mut lab = LabService::new();
    lab.toggle_switch();
    lab.select_bulb_type(BulbType::Led);
    lab.select_led_color(LedColor::Blue);
    // 1.5 V against a 3.2 V forward voltage: no conduction.
    let out = lab.outputs();
    assert_eq!(out.brightness_pct, 0.0);
    assert_eq!(out.total_current_ma, 0.0);
    assert!(lab.drain_rate().is_none());

    lab.add_battery();
    lab.add_battery();
    // 4.5 V clears the threshold.
    assert!(lab.outputs().brightness_pct > 0.0);
    assert!(lab.drain_rate().is_some());
}

#[test]
fn circuit_drains_to_empty_and_recovers_on_replenish() {
    let mut lab = LabService::new();
    lab.toggle_switch();
    lab.session_mut().set_charge(0.05);

    let mut guard = 0;
    while lab.tick() {
        guard += 1;
        assert!(guard < 100_000, "drain never reached empty");
    }
    assert_eq!(lab.charge_percent(), 0.0);
    assert!(lab.outputs().is_drained);
    assert_eq!(lab.outputs().brightness_pct, 0.0);
    assert!(lab.observation_tip().contains("empty"));

    lab.replenish_battery();
    assert_eq!(lab.charge_percent(), 100.0);
    assert!(lab.outputs().brightness_pct > 0.0);
}

#[test]
fn scenario_boots_the_service() {
    let mut scenario = Scenario {
        name: "half drained".to_string(),
        ..Scenario::default()
    };
    scenario.config.battery_count = 2;
    scenario.config.is_open = false;
    scenario.charge_percent = 50.0;

    let lab = LabService::from_scenario(&scenario).unwrap();
    assert_eq!(lab.charge_percent(), 50.0);
    assert!((lab.outputs().total_voltage_v - 3.0).abs() < 1e-9);
    assert_eq!(lab.explanation(), DEFAULT_EXPLANATION);
}

#[test]
fn full_reset_returns_to_the_default_experiment() {
    let mut lab = LabService::new();
    lab.toggle_switch();
    lab.select_bulb_type(BulbType::Led);
    lab.add_bulb();
    lab.toggle_transformer();
    lab.step_seconds(3);

    lab.full_reset();
    assert_eq!(*lab.config(), Configuration::default());
    assert_eq!(lab.charge_percent(), 100.0);
    assert!(lab.config().is_open);
}
