//! Status code and `SimError` -> Python exception mapping with recovery hints.

use std::ffi::c_char;

use diffsim_core::SimError;
use diffsim_ffi::{diffsim_last_error_message, diffsim_last_panic_message};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::{create_exception, PyErr, PyResult};

create_exception!(
    _diffsim,
    SimulationUnstableError,
    PyRuntimeError,
    "The simulated field left the concentration range of the coefficient tables."
);

/// Read a thread-local FFI message slot into an owned string.
fn read_slot(f: extern "C" fn(*mut c_char, usize) -> i32) -> String {
    let len = f(std::ptr::null_mut(), 0);
    if len <= 0 {
        return String::new();
    }
    let mut buf = vec![0u8; len as usize + 1];
    let written = f(buf.as_mut_ptr().cast::<c_char>(), buf.len());
    buf.truncate(written.clamp(0, len) as usize);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Collect the diagnostic for `code` from the FFI slots.
///
/// Must run on the thread that made the FFI call, i.e. inside the same
/// `py.detach` closure.
pub(crate) fn ffi_detail(code: i32) -> String {
    match code {
        0 => String::new(),
        -128 => read_slot(diffsim_last_panic_message),
        _ => read_slot(diffsim_last_error_message),
    }
}

/// Check an FFI status code. Returns `Ok(())` on success, raises a typed
/// Python exception with a recovery hint on error.
pub(crate) fn check_status(code: i32, detail: &str) -> PyResult<()> {
    if code == 0 {
        return Ok(());
    }
    Err(status_error(code, detail))
}

/// Map an error from the Rust crates onto the same exception types.
pub(crate) fn sim_error(e: SimError) -> PyErr {
    let code = match e {
        SimError::Unstable { .. } => 1,
        SimError::InvalidArgument { .. } => -1,
    };
    status_error(code, &e.to_string())
}

fn status_error(code: i32, detail: &str) -> PyErr {
    let (msg, hint) = error_detail(code);
    let full = if detail.is_empty() {
        format!("diffsim error {code}: {msg}\n  Hint: {hint}")
    } else {
        format!("diffsim error {code}: {msg} ({detail})\n  Hint: {hint}")
    };
    match code {
        1 => SimulationUnstableError::new_err(full),
        -1 => PyValueError::new_err(full),
        _ => PyRuntimeError::new_err(full),
    }
}

/// Returns `(message, recovery_hint)` for each FFI status code.
fn error_detail(code: i32) -> (&'static str, &'static str) {
    match code {
        1 => (
            "simulation unstable",
            "A concentration left [0, 1] (to table resolution) while stepping. \
             Reduce dt, for example to optimum_dt(dx, d), or check that the \
             initial condition lies inside the tables' range.",
        ),
        -1 => (
            "invalid argument",
            "Check that d and r have the same length (at least 2), that \
             init_cond has at least 3 points, that dt and rate are finite \
             and dx is positive, and that aligned curves are non-empty and \
             equally long.",
        ),
        -128 => (
            "internal panic in the native library",
            "This is a bug in diffsim. The message above is the captured \
             panic; please report it together with the inputs that caused it.",
        ),
        _ => (
            "unknown diffsim error",
            "An unrecognized error code was returned from the FFI layer. \
             This may indicate a version mismatch between the Python \
             bindings and the native library.",
        ),
    }
}
