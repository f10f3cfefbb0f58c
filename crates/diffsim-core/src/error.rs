//! Error types for diffsim.
//!
//! A run can fail in exactly two ways: the caller handed in malformed
//! inputs, or the field left the concentration range the coefficient
//! tables cover while stepping. Both surface as [`SimError`].

use std::error::Error;
use std::fmt;

/// Errors from table construction, parameter validation, the integrator
/// and the aligner.
#[derive(Clone, Debug, PartialEq)]
pub enum SimError {
    /// A concentration mapped outside `[0, nIV - 1]` during stepping.
    ///
    /// The run was aborted at this point; any output written so far is
    /// not a valid profile.
    Unstable {
        /// Zero-based time step that was being computed.
        step: usize,
        /// Spatial index whose stencil read the offending value.
        cell: usize,
        /// The concentration that could not be mapped to a table index.
        concentration: f64,
    },
    /// An input violated a precondition (length mismatch, too few
    /// samples, non-finite scalar, ...).
    InvalidArgument {
        /// Human-readable description of the violated precondition.
        reason: String,
    },
}

impl SimError {
    /// Shorthand for building an [`SimError::InvalidArgument`].
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Whether this error signals numerical blow-up rather than bad input.
    pub fn is_unstable(&self) -> bool {
        matches!(self, Self::Unstable { .. })
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unstable {
                step,
                cell,
                concentration,
            } => write!(
                f,
                "simulation unstable at step {step}, cell {cell}: \
                 concentration {concentration} is outside the coefficient table"
            ),
            Self::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
        }
    }
}

impl Error for SimError {}
