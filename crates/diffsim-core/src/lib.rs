//! Core types for the diffsim diffusion-reaction simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! coefficient tables, run parameters, error kinds, the standard initial
//! condition and the physics helpers that convert experimental conditions
//! into integrator inputs.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod params;
pub mod physics;
pub mod profile;
pub mod table;

pub use error::SimError;
pub use params::{GradientScheme, SimParams, SimParamsBuilder};
pub use physics::{
    emigration_factor, num_sim_steps, optimum_dt, signed_current, stable_dt, Direction,
};
pub use profile::step_profile;
pub use table::{CoefficientTable, Coefficients};
