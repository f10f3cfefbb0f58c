//! Library half of the `diffsim` command-line tool.
//!
//! `diffsim simulate <run.json>` prints the final profile as `x,c` CSV;
//! `diffsim align <curves.json>` prints the best shift and the residuals
//! before and after shifting.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod commands;
pub mod config;

use diffsim_core::SimError;

/// Exit status for a run aborted by numerical instability.
pub const EXIT_UNSTABLE: u8 = 2;

/// Whether `err` was caused by the integrator leaving the table range.
pub fn is_unstable(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|e| e.downcast_ref::<SimError>())
        .any(SimError::is_unstable)
}
