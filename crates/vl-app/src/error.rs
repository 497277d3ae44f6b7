//! Error types for the vl-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates and
/// provides a unified error interface for frontends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to read scenario file: {path}")]
    ScenarioFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Scenario error: {0}")]
    Scenario(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Quiz error: {0}")]
    Quiz(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for vl-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<vl_core::VlError> for AppError {
    fn from(err: vl_core::VlError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<vl_sim::SimError> for AppError {
    fn from(err: vl_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<vl_quiz::QuizError> for AppError {
    fn from(err: vl_quiz::QuizError) -> Self {
        AppError::Quiz(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Scenario(err.to_string())
    }
}
