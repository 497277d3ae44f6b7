//! vl-sim: the time-stepped side of the lab.
//!
//! Provides:
//! - drain rate math and the gating predicate for battery discharge
//! - a Session owning configuration + charge, recomputed as a closed loop
//! - a cancellable periodic timer handle for wall-clock drain ticks

pub mod drain;
pub mod error;
pub mod session;
pub mod timer;

// Re-exports for public API
pub use drain::DrainRate;
pub use error::{SimError, SimResult};
pub use session::Session;
pub use timer::{DrainScheduler, DrainTick, DrainTimer};
