//! Explanation text for the current experiment.
//!
//! The explanation provider sits behind a trait so a remote text-generation
//! service can plug in. The core never surfaces a provider failure: any error
//! is swallowed and replaced with a canned fallback line. A deterministic
//! rule-based provider ships by default.

use thiserror::Error;
use vl_circuit::CircuitOutputs;
use vl_core::config::{BulbType, Connection};
use vl_core::Configuration;

/// Text shown before anyone asks for an explanation.
pub const DEFAULT_EXPLANATION: &str = "Try enabling the transformer and changing its ratio: \
     watch for the square-law relationship between voltage and energy use!";

/// Substituted whenever the explanation provider fails.
pub const FALLBACK_EXPLANATION: &str = "Keep observing your experiment. Did you notice how fast the charge drops when \
     the voltage goes up? That is the price of more power!";

#[derive(Error, Debug)]
pub enum ExplainError {
    #[error("Explanation service unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Everything a provider gets to work with.
#[derive(Debug, Clone, Copy)]
pub struct ExplanationRequest<'a> {
    pub config: &'a Configuration,
    pub charge_percent: f64,
    pub outputs: &'a CircuitOutputs,
}

/// Source of explanation text.
pub trait Explainer {
    fn explain(&self, request: &ExplanationRequest<'_>) -> Result<String, ExplainError>;
}

/// Ask a provider, substituting the canned fallback on any failure.
pub fn explain_or_fallback(
    explainer: &dyn Explainer,
    request: &ExplanationRequest<'_>,
) -> String {
    match explainer.explain(request) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(error = %err, "explanation provider failed, using fallback");
            FALLBACK_EXPLANATION.to_string()
        }
    }
}

/// Deterministic local provider.
///
/// Builds a short classroom-voiced paragraph from the circuit state, leading
/// with whatever is most worth noticing and always landing on the
/// quadratic-cost lesson when the transformer is boosting.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleExplainer;

impl Explainer for RuleExplainer {
    fn explain(&self, request: &ExplanationRequest<'_>) -> Result<String, ExplainError> {
        let config = request.config;
        let out = request.outputs;
        let mut parts: Vec<String> = Vec::new();

        parts.push(format!(
            "Your circuit: {} battery(ies) in {}, {} {} bulb(s) in {}, battery at {:.0} %.",
            config.battery_count,
            connection_word(config.battery_connection),
            config.bulb_count,
            bulb_word(config.bulb_type),
            connection_word(config.bulb_connection),
            request.charge_percent,
        ));

        if config.is_open {
            parts.push(
                "The switch is open, so no current flows anywhere. Close it and watch the bulbs."
                    .to_string(),
            );
        } else if out.is_drained {
            parts.push(
                "The battery is completely empty. Swap in a fresh one to keep experimenting."
                    .to_string(),
            );
        } else if out.is_burned_out {
            parts.push(format!(
                "Oh no: {:.1} V per bulb was too much and the load burned out. That is overload; \
                 reset the experiment.",
                out.v_per_bulb_v
            ));
        } else if out.brightness_pct == 0.0 {
            match config.bulb_type {
                BulbType::Led => parts.push(format!(
                    "The LED stays dark because each one only sees {:.2} V, below its {:.1} V \
                     forward voltage. More series batteries would push it over the threshold.",
                    out.v_per_bulb_v, config.forward_voltage_v
                )),
                BulbType::Regular => parts.push(
                    "The voltage is too low for the filament to glow, even though a little \
                     current still flows and slowly drains the battery."
                        .to_string(),
                ),
            }
        } else {
            parts.push(format!(
                "Each bulb sees {:.2} V and shines at {:.0} % brightness while the pack delivers \
                 {:.0} mA.",
                out.v_per_bulb_v, out.brightness_pct, out.total_current_ma
            ));
        }

        if config.transformer_enabled && config.transformer_ratio > 1.0 && !config.is_open {
            parts.push(format!(
                "The transformer multiplies the voltage by {:.1}, but the battery pays for it \
                 twice: {:.1}x the push and {:.1}x the current, so the energy drains about \
                 {:.1} times faster. Double the push, double the speed, four times the cost!",
                config.transformer_ratio,
                config.transformer_ratio,
                config.transformer_ratio,
                config.transformer_ratio * config.transformer_ratio,
            ));
            parts.push(
                "Watch the expected-lifetime readout jump around as you change the ratio, and \
                 think about how extra batteries could share the load."
                    .to_string(),
            );
        }

        Ok(parts.join(" "))
    }
}

fn connection_word(connection: Connection) -> &'static str {
    match connection {
        Connection::Series => "series",
        Connection::Parallel => "parallel",
    }
}

fn bulb_word(bulb_type: BulbType) -> &'static str {
    match bulb_type {
        BulbType::Regular => "regular",
        BulbType::Led => "LED",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vl_circuit::evaluate;

    struct BrokenExplainer;
    impl Explainer for BrokenExplainer {
        fn explain(&self, _request: &ExplanationRequest<'_>) -> Result<String, ExplainError> {
            Err(ExplainError::Unavailable {
                reason: "socket timed out".to_string(),
            })
        }
    }

    fn request_for(config: &Configuration, charge: f64) -> (CircuitOutputs, f64) {
        (evaluate(config, charge), charge)
    }

    #[test]
    fn failure_substitutes_the_fallback() {
        let config = Configuration::default();
        let (outputs, charge) = request_for(&config, 100.0);
        let text = explain_or_fallback(
            &BrokenExplainer,
            &ExplanationRequest {
                config: &config,
                charge_percent: charge,
                outputs: &outputs,
            },
        );
        assert_eq!(text, FALLBACK_EXPLANATION);
    }

    #[test]
    fn open_switch_is_called_out() {
        let config = Configuration::default();
        let (outputs, charge) = request_for(&config, 100.0);
        let text = RuleExplainer
            .explain(&ExplanationRequest {
                config: &config,
                charge_percent: charge,
                outputs: &outputs,
            })
            .unwrap();
        assert!(text.contains("switch is open"));
    }

    #[test]
    fn boosted_transformer_teaches_the_square_law() {
        let mut config = Configuration::default();
        config.is_open = false;
        config.battery_count = 2;
        config.transformer_enabled = true;
        config.transformer_ratio = 2.0;
        let (outputs, charge) = request_for(&config, 100.0);
        let text = RuleExplainer
            .explain(&ExplanationRequest {
                config: &config,
                charge_percent: charge,
                outputs: &outputs,
            })
            .unwrap();
        assert!(text.contains("4.0 times faster"));
    }

    #[test]
    fn dark_led_mentions_forward_voltage() {
        let mut config = Configuration::default();
        config.is_open = false;
        config.bulb_type = BulbType::Led;
        config.forward_voltage_v = 3.2;
        let (outputs, charge) = request_for(&config, 100.0);
        let text = RuleExplainer
            .explain(&ExplanationRequest {
                config: &config,
                charge_percent: charge,
                outputs: &outputs,
            })
            .unwrap();
        assert!(text.contains("forward voltage"));
    }
}
