//! Test utilities for diffsim development.
//!
//! Provides standard initial conditions, coefficient tables and an
//! independent reference solver for linear diffusion, shared by the unit
//! tests, integration tests and benchmarks of the workspace.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    assert_profile_close, constant_table, linear_table, reference_linear_diffusion, smooth_step,
    step_profile,
};
