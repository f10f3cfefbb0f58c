//! Reusable profiles, tables and reference solutions.
//!
//! - [`step_profile`]: the diffusion-couple initial condition (1 then 0).
//! - [`smooth_step`]: a tanh front, handy for alignment tests.
//! - [`constant_table`] / [`linear_table`]: coefficient tables.
//! - [`reference_linear_diffusion`]: plain FTCS for constant D.

use diffsim_core::CoefficientTable;

pub use diffsim_core::step_profile;

/// A front falling from 1 to 0 around `centre` with the given `width`.
pub fn smooth_step(ndx: usize, centre: f64, width: f64) -> Vec<f64> {
    (0..ndx)
        .map(|i| 0.5 * (1.0 - ((i as f64 - centre) / width).tanh()))
        .collect()
}

/// A table with `n` identical samples of `d` and `r`.
pub fn constant_table(n: usize, d: f64, r: f64) -> CoefficientTable {
    CoefficientTable::new(vec![d; n], vec![r; n]).expect("constant table")
}

/// A table whose D and R vary linearly from their `c = 0` to `c = 1` values.
pub fn linear_table(n: usize, d: (f64, f64), r: (f64, f64)) -> CoefficientTable {
    let lerp = |(a, b): (f64, f64), i: usize| a + (b - a) * i as f64 / (n - 1) as f64;
    CoefficientTable::new(
        (0..n).map(|i| lerp(d, i)).collect(),
        (0..n).map(|i| lerp(r, i)).collect(),
    )
    .expect("linear table")
}

/// Forward-time centred-space solution of `c_t = d c_xx` with fixed ends.
///
/// Written independently of the integrator so the two can be compared.
pub fn reference_linear_diffusion(init: &[f64], d: f64, dt: f64, dx: f64, ndt: usize) -> Vec<f64> {
    let n = init.len();
    let lambda = d * dt / (dx * dx);
    let mut cur = init.to_vec();
    let mut next = init.to_vec();
    for _ in 0..ndt {
        for k in 1..n - 1 {
            next[k] = cur[k] + lambda * (cur[k + 1] - 2.0 * cur[k] + cur[k - 1]);
        }
        std::mem::swap(&mut cur, &mut next);
    }
    cur
}

/// Assert two profiles agree element-wise within `tol`.
#[track_caller]
pub fn assert_profile_close(actual: &[f64], expected: &[f64], tol: f64) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "profile lengths differ: {} vs {}",
        actual.len(),
        expected.len()
    );
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() <= tol,
            "profiles differ at cell {i}: {a} vs {e} (tol {tol})"
        );
    }
}
