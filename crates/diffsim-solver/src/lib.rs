//! Numerical kernels for diffsim.
//!
//! - [`calc_simulation`]: explicit diffusion-reaction integrator with
//!   concentration-dependent coefficients and table-range instability
//!   detection.
//! - [`fast_pad_shift`]: exhaustive least-squares alignment of two curves
//!   under a fixed padding rule.
//! - [`ComparisonEngine`]: calibrates a model profile against an
//!   experimental one using that alignment.
//!
//! Every function here is synchronous and free of shared state; concurrent
//! callers only need their own buffers.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod align;
pub mod comparison;
pub mod integrator;

pub use align::{fast_pad_shift, HIGH_PAD, LOW_PAD};
pub use comparison::{lsq, pad_shift, Calibration, ComparisonEngine};
pub use integrator::{calc_simulation, simulate, MIN_POINTS};
