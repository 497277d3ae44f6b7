//! vl-core: stable foundation for voltlab.
//!
//! Contains:
//! - config (circuit configuration enums + validation)
//! - constants (physical constants of the lab model)
//! - numeric (float helpers used across crates)
//! - error (shared error types)

pub mod config;
pub mod constants;
pub mod error;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use config::{BulbType, Configuration, Connection, LedColor};
pub use error::{VlError, VlResult};
pub use numeric::*;
