use thiserror::Error;

pub type VlResult<T> = Result<T, VlError>;

#[derive(Error, Debug)]
pub enum VlError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Value out of range for {what}: {value} (allowed {allowed})")]
    OutOfRange {
        what: &'static str,
        value: f64,
        allowed: &'static str,
    },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
