//! Integrator entry points.
//!
//! All buffers are caller-owned. `out` must not overlap any input buffer.
//! After a non-zero status the contents of `out` are unspecified.

use diffsim_core::{CoefficientTable, GradientScheme, SimParams};
use diffsim_solver::calc_simulation;

use crate::status::DiffsimStatus;
use crate::{clear_last_error, fail, reject};

/// Run the integrator with the central first-derivative stencil.
///
/// `d` and `r` hold `n_iv` table samples each, `init` and `out` hold `ndx`
/// values each. Returns `DIFFSIM_STATUS_SUCCESS` (0) with the final profile
/// in `out`, `DIFFSIM_STATUS_UNSTABLE` (1) if the field left the table
/// range, or a negative code for invalid arguments.
#[no_mangle]
#[allow(unsafe_code)]
#[allow(clippy::too_many_arguments)]
pub extern "C" fn diffsim_calc_simulation(
    d: *const f64,
    r: *const f64,
    n_iv: i32,
    init: *const f64,
    ndt: i32,
    ndx: i32,
    dt: f64,
    dx: f64,
    rate: f64,
    out: *mut f64,
) -> i32 {
    diffsim_calc_simulation_with_scheme(
        d,
        r,
        n_iv,
        init,
        ndt,
        ndx,
        dt,
        dx,
        rate,
        out,
        GradientScheme::Central.as_raw(),
    )
}

/// As [`diffsim_calc_simulation`], selecting the first-derivative stencil
/// with `scheme` (0 = central, 1 = forward).
#[no_mangle]
#[allow(unsafe_code)]
#[allow(clippy::too_many_arguments)]
pub extern "C" fn diffsim_calc_simulation_with_scheme(
    d: *const f64,
    r: *const f64,
    n_iv: i32,
    init: *const f64,
    ndt: i32,
    ndx: i32,
    dt: f64,
    dx: f64,
    rate: f64,
    out: *mut f64,
    scheme: i32,
) -> i32 {
    ffi_guard!({
        if d.is_null() || r.is_null() || init.is_null() || out.is_null() {
            return reject("null buffer pointer");
        }
        let (Ok(n_iv), Ok(ndt), Ok(ndx)) = (
            usize::try_from(n_iv),
            usize::try_from(ndt),
            usize::try_from(ndx),
        ) else {
            return reject(&format!(
                "sizes must be non-negative, got n_iv={n_iv} ndt={ndt} ndx={ndx}"
            ));
        };
        let Some(gradient) = GradientScheme::from_raw(scheme) else {
            return reject(&format!("unknown gradient scheme {scheme}"));
        };

        // SAFETY: d and r point to n_iv readable f64 values, init to ndx
        // readable values and out to ndx writable values that alias none
        // of the inputs, per caller contract. All four are non-null.
        let (d, r, init, out) = unsafe {
            (
                std::slice::from_raw_parts(d, n_iv),
                std::slice::from_raw_parts(r, n_iv),
                std::slice::from_raw_parts(init, ndx),
                std::slice::from_raw_parts_mut(out, ndx),
            )
        };

        let table = match CoefficientTable::from_slices(d, r) {
            Ok(t) => t,
            Err(e) => return fail(&e),
        };
        let params = SimParams {
            ndt,
            dt,
            dx,
            r: rate,
            gradient,
        };
        match calc_simulation(&table, init, &params, out) {
            Ok(()) => {
                clear_last_error();
                DiffsimStatus::Success as i32
            }
            Err(e) => fail(&e),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use diffsim_test_utils::{reference_linear_diffusion, step_profile};

    fn run(init: &[f64], d: &[f64], r: &[f64], ndt: i32, dt: f64, out: &mut [f64]) -> i32 {
        diffsim_calc_simulation(
            d.as_ptr(),
            r.as_ptr(),
            d.len() as i32,
            init.as_ptr(),
            ndt,
            init.len() as i32,
            dt,
            0.1,
            0.0,
            out.as_mut_ptr(),
        )
    }

    #[test]
    fn success_matches_linear_reference() {
        let init = step_profile(20);
        let d = vec![1.0; 51];
        let r = vec![0.0; 51];
        let mut out = vec![0.0; 20];
        assert_eq!(run(&init, &d, &r, 50, 0.004, &mut out), 0);
        let reference = reference_linear_diffusion(&init, 1.0, 0.004, 0.1, 50);
        for (a, b) in out.iter().zip(&reference) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn unstable_returns_one() {
        let mut init = step_profile(8);
        init[2] = 1.6;
        let mut out = vec![0.0; 8];
        assert_eq!(run(&init, &[1.0, 1.0], &[0.0, 0.0], 5, 0.001, &mut out), 1);
    }

    #[test]
    fn null_pointers_are_rejected() {
        let init = step_profile(8);
        let mut out = vec![0.0; 8];
        let status = diffsim_calc_simulation(
            std::ptr::null(),
            std::ptr::null(),
            2,
            init.as_ptr(),
            1,
            8,
            0.001,
            0.1,
            0.0,
            out.as_mut_ptr(),
        );
        assert_eq!(status, DiffsimStatus::InvalidArgument as i32);
    }

    #[test]
    fn negative_sizes_are_rejected() {
        let init = step_profile(8);
        let mut out = vec![0.0; 8];
        let d = [1.0, 1.0];
        assert_eq!(run(&init, &d, &d, -1, 0.001, &mut out), -1);
    }

    #[test]
    fn unknown_scheme_is_rejected() {
        let init = step_profile(8);
        let mut out = vec![0.0; 8];
        let d = [1.0, 1.0];
        let status = diffsim_calc_simulation_with_scheme(
            d.as_ptr(),
            d.as_ptr(),
            2,
            init.as_ptr(),
            1,
            8,
            0.001,
            0.1,
            0.0,
            out.as_mut_ptr(),
            7,
        );
        assert_eq!(status, -1);
    }

    #[test]
    fn short_table_is_rejected() {
        let init = step_profile(8);
        let mut out = vec![0.0; 8];
        assert_eq!(run(&init, &[1.0], &[0.0], 1, 0.001, &mut out), -1);
    }
}
