//! Integrator, aligner and physics helpers exposed as module functions.
//!
//! Array-like inputs are copied into contiguous `f64` buffers before the
//! GIL is released, so the native kernels never touch Python objects.

use numpy::PyArray1;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use diffsim_core::{stable_dt, GradientScheme, SimError};
use diffsim_ffi::{diffsim_calc_simulation_with_scheme, diffsim_fast_pad_shift};

use crate::error::{check_status, ffi_detail, sim_error};

fn to_c_int(name: &str, value: usize) -> PyResult<i32> {
    i32::try_from(value)
        .map_err(|_| PyValueError::new_err(format!("{name} = {value} does not fit in a C int")))
}

fn parse_scheme(scheme: &str) -> PyResult<GradientScheme> {
    match scheme {
        "central" => Ok(GradientScheme::Central),
        "forward" => Ok(GradientScheme::Forward),
        other => Err(PyValueError::new_err(format!(
            "scheme must be 'central' or 'forward', got {other:?}"
        ))),
    }
}

/// Run the diffusion-reaction integrator and return the final profile.
///
/// Args:
///     d: Diffusivity table sampled uniformly over c in [0, 1].
///     r: Reaction table, same length as `d`.
///     init_cond: Initial profile; its ends stay fixed.
///     ndt: Number of time steps.
///     dt: Time step.
///     dx: Spatial step.
///     rate: Electromigration rate scale (see `emigration_factor`).
///     cv_factor: Multiplier applied to every diffusivity sample.
///     scheme: First-derivative stencil, "central" or "forward".
///
/// Raises:
///     SimulationUnstableError: If the field left the tables' range.
///     ValueError: On malformed inputs.
#[pyfunction]
#[pyo3(signature = (d, r, init_cond, ndt, dt, dx, rate, cv_factor=1.0, scheme="central"))]
#[allow(clippy::too_many_arguments)]
pub(crate) fn calc_simulation<'py>(
    py: Python<'py>,
    d: Vec<f64>,
    r: Vec<f64>,
    init_cond: Vec<f64>,
    ndt: usize,
    dt: f64,
    dx: f64,
    rate: f64,
    cv_factor: f64,
    scheme: &str,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let scheme = parse_scheme(scheme)?.as_raw();
    if !cv_factor.is_finite() {
        return Err(PyValueError::new_err(format!(
            "cv_factor must be finite, got {cv_factor}"
        )));
    }
    let n_iv = to_c_int("len(d)", d.len())?;
    if r.len() != d.len() {
        return Err(PyValueError::new_err(format!(
            "d and r must be the same length, got {} and {}",
            d.len(),
            r.len()
        )));
    }
    let ndt = to_c_int("ndt", ndt)?;
    let ndx = to_c_int("len(init_cond)", init_cond.len())?;
    let d: Vec<f64> = d.iter().map(|v| v * cv_factor).collect();
    let mut out = vec![0.0; init_cond.len()];

    // Release GIL: the integrator is pure computation on owned buffers.
    let (status, detail) = py.detach(|| {
        let s = diffsim_calc_simulation_with_scheme(
            d.as_ptr(),
            r.as_ptr(),
            n_iv,
            init_cond.as_ptr(),
            ndt,
            ndx,
            dt,
            dx,
            rate,
            out.as_mut_ptr(),
            scheme,
        );
        (s, ffi_detail(s))
    });
    check_status(status, &detail)?;
    Ok(PyArray1::from_vec(py, out))
}

/// Shift of `y2` (in samples) that best matches `y1` in least squares.
///
/// Negative values shift `y2` left, positive values shift it right.
///
/// Raises:
///     ValueError: If the curves differ in length or are empty.
#[pyfunction]
pub(crate) fn fast_pad_shift(py: Python<'_>, y1: Vec<f64>, y2: Vec<f64>) -> PyResult<i32> {
    if y1.len() != y2.len() {
        return Err(PyValueError::new_err(format!(
            "input sizes must be the same, got {} and {}",
            y1.len(),
            y2.len()
        )));
    }
    let len = to_c_int("len(y1)", y1.len())?;
    // Release GIL: the scan is O(len^2).
    let (status, shift, detail) = py.detach(|| {
        let mut shift = 0;
        let s = diffsim_fast_pad_shift(y1.as_ptr(), y2.as_ptr(), len, &mut shift);
        (s, shift, ffi_detail(s))
    });
    check_status(status, &detail)?;
    Ok(shift)
}

/// Electromigration rate scale `e * j * z / (k_B * T)`.
#[pyfunction]
pub(crate) fn emigration_factor(z: f64, current_density: f64, temperature: f64) -> f64 {
    diffsim_core::emigration_factor(z, current_density, temperature)
}

/// A stable time step `0.1 * dx^2 / (max(d) * cv_factor)`.
///
/// Any non-empty `d` is accepted, including a single sample.
#[pyfunction]
#[pyo3(signature = (dx, d, cv_factor=1.0))]
pub(crate) fn optimum_dt(dx: f64, d: Vec<f64>, cv_factor: f64) -> PyResult<f64> {
    dt_for_samples(dx, &d, cv_factor).map_err(sim_error)
}

fn dt_for_samples(dx: f64, d: &[f64], cv_factor: f64) -> Result<f64, SimError> {
    if d.is_empty() {
        return Err(SimError::invalid("d must not be empty"));
    }
    let max_d = d.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    stable_dt(dx, max_d * cv_factor)
}

/// Number of steps of size `dt` needed to reach `tmax`.
#[pyfunction]
pub(crate) fn num_sim_steps(dt: f64, tmax: f64) -> PyResult<usize> {
    diffsim_core::num_sim_steps(dt, tmax).map_err(sim_error)
}
