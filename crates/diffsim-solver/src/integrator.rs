//! Explicit finite-difference integrator for concentration-dependent
//! diffusion with an electromigration term.
//!
//! Each step computes, for every interior cell `k`:
//!
//! ```text
//! c'[k] = c[k] + dt * ( D c_xx + D_c c_x^2 - D_c c R r - D R c_x r - D R_c c_x r )
//! ```
//!
//! where `D`, `R` and their slopes `D_c`, `R_c` are looked up at the table
//! sample nearest to `c[k]`. All reads come from the previous step. The two
//! end cells keep their initial values for the whole run.
//!
//! If any concentration in a stencil maps outside the table, the run stops
//! with [`SimError::Unstable`]. Results are never clamped to `[0, 1]`; the
//! table-range check is the only guard against blow-up.

use diffsim_core::{CoefficientTable, GradientScheme, SimError, SimParams};
use log::{debug, warn};

/// Minimum number of spatial points: two boundaries and one interior cell.
pub const MIN_POINTS: usize = 3;

/// Run the integrator, writing the final profile into `out`.
///
/// `out` must have the same length as `init`. On `Ok(())` it holds the
/// field after `params.ndt` steps (a copy of `init` when `ndt == 0`). On
/// `Err(SimError::Unstable)` its contents are partial and must not be used.
///
/// # Errors
///
/// * [`SimError::InvalidArgument`] if `init` has fewer than [`MIN_POINTS`]
///   points, `out` has a different length, or `params` fail validation.
/// * [`SimError::Unstable`] if the field leaves the table's concentration
///   range during stepping.
pub fn calc_simulation(
    table: &CoefficientTable,
    init: &[f64],
    params: &SimParams,
    out: &mut [f64],
) -> Result<(), SimError> {
    params.validate()?;
    let ndx = init.len();
    if ndx < MIN_POINTS {
        return Err(SimError::invalid(format!(
            "ndx must be >= {MIN_POINTS}, got {ndx}"
        )));
    }
    if out.len() != ndx {
        return Err(SimError::invalid(format!(
            "output buffer has length {}, expected {ndx}",
            out.len()
        )));
    }

    debug!(
        "calc_simulation: ndx={ndx} nIV={} ndt={} dt={} dx={} r={} gradient={:?}",
        table.len(),
        params.ndt,
        params.dt,
        params.dx,
        params.r,
        params.gradient
    );

    out.copy_from_slice(init);
    // The only heap allocation of the run; dropped on every return path.
    let mut prev = init.to_vec();

    for step in 0..params.ndt {
        if let Err(e) = advance(table, &prev, params, step, out) {
            warn!("calc_simulation aborted: {e}");
            return Err(e);
        }
        prev.copy_from_slice(out);
    }

    debug!("calc_simulation: completed {} steps", params.ndt);
    Ok(())
}

/// Run the integrator into a freshly allocated profile.
///
/// Convenience wrapper over [`calc_simulation`] for callers that do not
/// manage their own output buffer.
pub fn simulate(
    table: &CoefficientTable,
    init: &[f64],
    params: &SimParams,
) -> Result<Vec<f64>, SimError> {
    let mut out = vec![0.0; init.len()];
    calc_simulation(table, init, params, &mut out)?;
    Ok(out)
}

/// Compute one explicit step from `prev` into `out`.
///
/// Boundary cells of `out` are reset to the boundary values of `prev`,
/// which never change during a run.
fn advance(
    table: &CoefficientTable,
    prev: &[f64],
    params: &SimParams,
    step: usize,
    out: &mut [f64],
) -> Result<(), SimError> {
    let ndx = prev.len();
    let SimParams {
        dt, dx, r, gradient, ..
    } = *params;
    let dx2 = dx * dx;

    out[0] = prev[0];
    out[ndx - 1] = prev[ndx - 1];

    for k in 1..ndx - 1 {
        let (cm, c, cp) = (prev[k - 1], prev[k], prev[k + 1]);

        let idx = match (table.index_of(cm), table.index_of(c), table.index_of(cp)) {
            (Some(_), Some(idx), Some(_)) => idx,
            (left, centre, _) => {
                let concentration = if left.is_none() {
                    cm
                } else if centre.is_none() {
                    c
                } else {
                    cp
                };
                return Err(SimError::Unstable {
                    step,
                    cell: k,
                    concentration,
                });
            }
        };
        let coeff = table.coefficients(idx);

        let dcdx = match gradient {
            GradientScheme::Central => (cp - cm) / (2.0 * dx),
            GradientScheme::Forward => (cp - c) / dx,
        };
        let d2cdx2 = (cp - 2.0 * c + cm) / dx2;

        out[k] = dt
            * (coeff.d * d2cdx2 + coeff.d_slope * dcdx * dcdx
                - coeff.d_slope * c * coeff.r * r
                - coeff.d * coeff.r * dcdx * r
                - coeff.d * coeff.r_slope * dcdx * r)
            + c;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn table(d: f64, r: f64, n: usize) -> CoefficientTable {
        CoefficientTable::new(vec![d; n], vec![r; n]).unwrap()
    }

    fn params(ndt: usize, dt: f64, dx: f64, r: f64) -> SimParams {
        SimParams::builder()
            .steps(ndt)
            .dt(dt)
            .dx(dx)
            .rate(r)
            .build()
            .unwrap()
    }

    #[test]
    fn zero_steps_copies_initial_condition() {
        let init = [1.0, 0.7, 0.2, 0.0];
        let out = simulate(&table(1.0, 0.0, 11), &init, &params(0, 0.1, 1.0, 0.0)).unwrap();
        assert_eq!(out, init);
    }

    #[test]
    fn single_step_matches_hand_computation() {
        // Constant D = 1, no reaction: c'[1] = c + dt * (c2 - 2 c1 + c0) / dx^2
        let init = [1.0, 0.5, 0.0];
        let out = simulate(&table(1.0, 0.0, 5), &init, &params(1, 0.1, 1.0, 0.0)).unwrap();
        assert_relative_eq!(out[1], 0.5 + 0.1 * (0.0 - 1.0 + 1.0), epsilon = 1e-12);
        assert_eq!(out[0], 1.0);
        assert_eq!(out[2], 0.0);

        let init = [1.0, 0.75, 0.0];
        let out = simulate(&table(1.0, 0.0, 5), &init, &params(1, 0.1, 1.0, 0.0)).unwrap();
        assert_relative_eq!(out[1], 0.75 + 0.1 * (0.0 - 1.5 + 1.0), epsilon = 1e-12);
    }

    #[test]
    fn reaction_terms_use_selected_gradient() {
        // Constant D = 1, R = 2, r = 0.5. Slopes are zero, so only
        // D c_xx - D R c_x r survives.
        let init = [0.8, 0.5, 0.4];
        let t = table(1.0, 2.0, 5);

        let central = simulate(&t, &init, &params(1, 0.01, 1.0, 0.5)).unwrap();
        let c_x = (0.4 - 0.8) / 2.0;
        let c_xx = 0.4 - 1.0 + 0.8;
        assert_relative_eq!(central[1], 0.5 + 0.01 * (c_xx - 2.0 * c_x * 0.5), epsilon = 1e-12);

        let mut p = params(1, 0.01, 1.0, 0.5);
        p.gradient = GradientScheme::Forward;
        let forward = simulate(&t, &init, &p).unwrap();
        let c_x = 0.4 - 0.5;
        assert_relative_eq!(forward[1], 0.5 + 0.01 * (c_xx - 2.0 * c_x * 0.5), epsilon = 1e-12);
    }

    #[test]
    fn slope_terms_enter_update() {
        // D(c) = c on 3 samples: D = [0, 0.5, 1], slope 1 everywhere.
        // R(c) = 1 - c: R = [1, 0.5, 0], slope -1 everywhere.
        let t = CoefficientTable::new(vec![0.0, 0.5, 1.0], vec![1.0, 0.5, 0.0]).unwrap();
        let init = [1.0, 0.5, 0.0];
        let (dt, dx, r) = (0.01, 0.5, 0.2);
        let out = simulate(&t, &init, &params(1, dt, dx, r)).unwrap();

        let c = 0.5;
        let c_x: f64 = (0.0 - 1.0) / (2.0 * dx);
        let c_xx = (0.0 - 2.0 * c + 1.0) / (dx * dx);
        let (d, rv, d_c, r_c) = (0.5, 0.5, 1.0, -1.0);
        let expected = c
            + dt * (d * c_xx + d_c * c_x * c_x - d_c * c * rv * r - d * rv * c_x * r
                - d * r_c * c_x * r);
        assert_relative_eq!(out[1], expected, epsilon = 1e-12);
    }

    #[test]
    fn out_of_range_initial_value_is_unstable() {
        // Two samples: 1.6 * 1 rounds to index 2, past the last sample.
        let init = [1.0, 1.6, 0.0];
        let err = simulate(&table(1.0, 0.0, 2), &init, &params(3, 0.01, 1.0, 0.0)).unwrap_err();
        assert_eq!(
            err,
            SimError::Unstable {
                step: 0,
                cell: 1,
                concentration: 1.6
            }
        );
    }

    #[test]
    fn unstable_reports_neighbour_value() {
        // The boundary value itself is out of range: caught through the
        // stencil of the first interior cell.
        let init = [-0.5, 0.2, 0.1, 0.0];
        let err = simulate(&table(1.0, 0.0, 11), &init, &params(1, 0.01, 1.0, 0.0)).unwrap_err();
        assert!(matches!(
            err,
            SimError::Unstable { step: 0, cell: 1, concentration } if concentration == -0.5
        ));
    }

    #[test]
    fn oversized_dt_blows_up_later_step() {
        // dt * D / dx^2 = 2, far past the explicit limit of 0.5.
        let init = [1.0, 0.0, 0.0, 0.0, 0.0];
        let err = simulate(&table(1.0, 0.0, 101), &init, &params(50, 2.0, 1.0, 0.0)).unwrap_err();
        match err {
            SimError::Unstable { step, .. } => assert!(step > 0, "step = {step}"),
            other => panic!("expected Unstable, got {other:?}"),
        }
    }

    #[test]
    fn nan_concentration_is_unstable() {
        let init = [0.0, f64::NAN, 0.0];
        let err = simulate(&table(1.0, 0.0, 5), &init, &params(1, 0.01, 1.0, 0.0)).unwrap_err();
        assert!(err.is_unstable());
    }

    #[test]
    fn rejects_short_field() {
        let err = simulate(&table(1.0, 0.0, 5), &[0.0, 1.0], &params(1, 0.1, 1.0, 0.0))
            .unwrap_err();
        assert!(err.to_string().contains("ndx"));
    }

    #[test]
    fn rejects_mismatched_output() {
        let mut out = vec![0.0; 4];
        let err = calc_simulation(
            &table(1.0, 0.0, 5),
            &[1.0, 0.5, 0.0],
            &params(1, 0.1, 1.0, 0.0),
            &mut out,
        )
        .unwrap_err();
        assert!(err.to_string().contains("output buffer"));
    }

    #[test]
    fn rejects_invalid_params_passed_directly() {
        let p = SimParams {
            ndt: 1,
            dt: 0.1,
            dx: 0.0,
            r: 0.0,
            gradient: GradientScheme::Central,
        };
        let err = simulate(&table(1.0, 0.0, 5), &[1.0, 0.5, 0.0], &p).unwrap_err();
        assert!(matches!(err, SimError::InvalidArgument { .. }));
    }
}
