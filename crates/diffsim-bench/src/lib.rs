//! Benchmark profiles for diffsim.
//!
//! Provides pre-built runs for benchmarking:
//!
//! - [`reference_profile`]: 100 points, 1001-sample tables
//! - [`stress_profile`]: 1000 points, 10001-sample tables
//! - [`aligned_pair`]: two fronts a known number of samples apart

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use diffsim_core::{optimum_dt, CoefficientTable, SimParams};
use diffsim_test_utils::{linear_table, smooth_step, step_profile};

/// Everything one integrator run needs.
#[derive(Clone, Debug)]
pub struct RunProfile {
    /// D and R tables.
    pub table: CoefficientTable,
    /// Initial condition (diffusion couple).
    pub init: Vec<f64>,
    /// Run parameters with a stable `dt`.
    pub params: SimParams,
}

fn profile(ndx: usize, n_iv: usize, ndt: usize) -> RunProfile {
    let table = linear_table(n_iv, (0.5, 1.5), (1.0, 0.2));
    let dx = 1.0 / ndx as f64;
    let dt = optimum_dt(dx, &table, 1.0).expect("linear table has positive D");
    let params = SimParams::builder()
        .steps(ndt)
        .dt(dt)
        .dx(dx)
        .rate(0.2)
        .build()
        .expect("benchmark parameters are valid");
    RunProfile {
        table,
        init: step_profile(ndx),
        params,
    }
}

/// 100 spatial points, 1001-sample tables, 1000 steps.
pub fn reference_profile() -> RunProfile {
    profile(100, 1001, 1000)
}

/// 1000 spatial points, 10001-sample tables, 1000 steps.
pub fn stress_profile() -> RunProfile {
    profile(1000, 10001, 1000)
}

/// A smooth front of `len` samples and a copy displaced by `shift`.
pub fn aligned_pair(len: usize, shift: isize) -> (Vec<f64>, Vec<f64>) {
    let centre = len as f64 / 2.0;
    let width = len as f64 / 20.0;
    (
        smooth_step(len, centre, width),
        smooth_step(len, centre - shift as f64, width),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use diffsim_solver::simulate;

    #[test]
    fn reference_profile_is_stable() {
        let p = reference_profile();
        let out = simulate(&p.table, &p.init, &p.params).unwrap();
        assert_eq!(out.len(), 100);
        assert_eq!(out[0], 1.0);
        assert_eq!(out[99], 0.0);
    }

    #[test]
    fn stress_profile_dimensions() {
        let p = stress_profile();
        assert_eq!(p.init.len(), 1000);
        assert_eq!(p.table.len(), 10001);
    }

    #[test]
    fn aligned_pair_recovers_shift() {
        let (y1, y2) = aligned_pair(200, 6);
        assert_eq!(diffsim_solver::fast_pad_shift(&y1, &y2).unwrap(), 6);
    }
}
