//! Shared application service layer for voltlab.
//!
//! This crate gives frontends one interface over the circuit model, the
//! drain process, scenario files, and the explanation text, centralizing the
//! control-surface actions and their clamping rules.

pub mod error;
pub mod explain;
pub mod scenario;
pub mod service;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use explain::{
    ExplainError, ExplanationRequest, Explainer, RuleExplainer, DEFAULT_EXPLANATION,
    FALLBACK_EXPLANATION,
};
pub use scenario::{load_scenario, Scenario};
pub use service::LabService;
