//! C-compatible status codes.
//!
//! [`DiffsimStatus`] is a `repr(i32)` enum. `Success` is 0, numerical
//! instability is the positive code 1 (an outcome the caller may retry
//! with a smaller `dt`), and caller errors are negative.

use diffsim_core::SimError;

/// Status code returned by every FFI function. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiffsimStatus {
    /// The call completed and its outputs are valid.
    Success = 0,
    /// A concentration left the coefficient table range while stepping.
    Unstable = 1,
    /// A pointer was null, a size negative, or a precondition violated.
    InvalidArgument = -1,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl From<&SimError> for DiffsimStatus {
    fn from(e: &SimError) -> Self {
        match e {
            SimError::Unstable { .. } => DiffsimStatus::Unstable,
            SimError::InvalidArgument { .. } => DiffsimStatus::InvalidArgument,
        }
    }
}
