//! vl-circuit: the instantaneous circuit model.
//!
//! A single pure function maps a configuration snapshot plus the current
//! battery charge to the derived electrical/visual state. No graph solving:
//! the lab restricts batteries and bulbs to pure series or pure parallel
//! banks, so every quantity has a closed form.

pub mod model;

pub use model::{evaluate, CircuitOutputs};
