//! diffsim: concentration-dependent diffusion with electromigration.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the diffsim sub-crates. For most users, adding `diffsim` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use diffsim::prelude::*;
//!
//! // Diffusion couple: solute on the left, none on the right.
//! let init: Vec<f64> = (0..40).map(|i| if i < 20 { 1.0 } else { 0.0 }).collect();
//!
//! // D rises from 1.0 to 1.5 with concentration; R is constant.
//! let n = 101;
//! let d: Vec<f64> = (0..n).map(|i| 1.0 + 0.5 * i as f64 / (n - 1) as f64).collect();
//! let table = CoefficientTable::new(d, vec![0.3; n]).unwrap();
//!
//! let dx = 0.1;
//! let dt = optimum_dt(dx, &table, 1.0).unwrap();
//! let params = SimParams::builder()
//!     .steps(num_sim_steps(dt, 0.05).unwrap())
//!     .dt(dt)
//!     .dx(dx)
//!     .rate(emigration_factor(2.0, 1.0e-3, 973.0))
//!     .build()
//!     .unwrap();
//!
//! let profile = simulate(&table, &init, &params).unwrap();
//! assert_eq!(profile[0], 1.0);
//! assert_eq!(profile[39], 0.0);
//!
//! // Align the result against the starting profile.
//! let shift = fast_pad_shift(&init, &profile).unwrap();
//! assert!(shift.unsigned_abs() <= init.len());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `diffsim-core` | Errors, coefficient tables, run parameters, physics helpers |
//! | [`solver`] | `diffsim-solver` | Integrator, aligner, comparison engine |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Errors, coefficient tables, run parameters and physics helpers
/// (`diffsim-core`).
pub use diffsim_core as types;

/// Numerical kernels (`diffsim-solver`).
///
/// [`solver::calc_simulation`] advances a profile in time,
/// [`solver::fast_pad_shift`] aligns two curves, and
/// [`solver::ComparisonEngine`] keeps a calibrated shift between them.
pub use diffsim_solver as solver;

/// Common imports for typical diffsim usage.
///
/// ```rust
/// use diffsim::prelude::*;
/// ```
pub mod prelude {
    // Inputs
    pub use diffsim_core::{CoefficientTable, GradientScheme, SimParams};

    // Helpers
    pub use diffsim_core::{emigration_factor, num_sim_steps, optimum_dt};

    // Errors
    pub use diffsim_core::SimError;

    // Kernels
    pub use diffsim_solver::{calc_simulation, fast_pad_shift, simulate, ComparisonEngine};
}
