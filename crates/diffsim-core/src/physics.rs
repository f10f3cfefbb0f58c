//! Helpers that turn experimental conditions into integrator inputs.

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::table::CoefficientTable;

/// Elementary charge in coulombs.
pub const ELEMENTARY_CHARGE: f64 = 1.602e-19;

/// Boltzmann constant in J/K.
pub const BOLTZMANN: f64 = 1.381e-23;

/// Safety factor applied to the explicit-diffusion stability limit in
/// [`optimum_dt`].
pub const DT_SAFETY_FACTOR: f64 = 0.1;

/// Direction in which current was applied across the couple.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Current flows in the reference direction.
    #[default]
    Forward,
    /// Current flows against the reference direction.
    Reverse,
}

/// Apply the current direction to a current magnitude.
pub fn signed_current(current: f64, direction: Direction) -> f64 {
    match direction {
        Direction::Forward => current,
        Direction::Reverse => -current,
    }
}

/// Electromigration rate scale `r = e * j * z / (k_B * T)`.
///
/// * `z` - effective valence
/// * `current_density` - in A/m^2
/// * `temperature` - in K
pub fn emigration_factor(z: f64, current_density: f64, temperature: f64) -> f64 {
    (ELEMENTARY_CHARGE * current_density * z) / (BOLTZMANN * temperature)
}

/// A time step that keeps the explicit scheme stable for the given table.
///
/// Returns `0.1 * dx^2 / (max(D) * cv_factor)`.
///
/// # Errors
///
/// `SimError::InvalidArgument` if the effective maximum diffusivity is not
/// finite and positive.
pub fn optimum_dt(dx: f64, table: &CoefficientTable, cv_factor: f64) -> Result<f64, SimError> {
    stable_dt(dx, table.max_diffusivity() * cv_factor)
}

/// `0.1 * dx^2 / max_diffusivity`, for callers holding only the peak D.
///
/// # Errors
///
/// `SimError::InvalidArgument` if `max_diffusivity` is not finite and
/// positive.
pub fn stable_dt(dx: f64, max_diffusivity: f64) -> Result<f64, SimError> {
    if !(max_diffusivity > 0.0) || !max_diffusivity.is_finite() {
        return Err(SimError::invalid(format!(
            "maximum diffusivity must be finite and > 0, got {max_diffusivity}"
        )));
    }
    Ok(DT_SAFETY_FACTOR * dx * dx / max_diffusivity)
}

/// Number of steps of size `dt` needed to reach at least `tmax`.
///
/// # Errors
///
/// `SimError::InvalidArgument` if `dt` is not finite and positive, or
/// `tmax` is negative or not finite.
pub fn num_sim_steps(dt: f64, tmax: f64) -> Result<usize, SimError> {
    if !(dt > 0.0) || !dt.is_finite() {
        return Err(SimError::invalid(format!(
            "dt must be finite and > 0, got {dt}"
        )));
    }
    if !(tmax >= 0.0) || !tmax.is_finite() {
        return Err(SimError::invalid(format!(
            "tmax must be finite and >= 0, got {tmax}"
        )));
    }
    Ok((tmax / dt).ceil() as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn emigration_factor_matches_constants() {
        // z = 160, 3500 A/cm^2, 1052 K
        let r = emigration_factor(160.0, 3500.0 * 100.0 * 100.0, 1052.0);
        let expected = 1.602e-19 * 3.5e7 * 160.0 / (1.381e-23 * 1052.0);
        assert_relative_eq!(r, expected);
        assert!(r > 0.0);
    }

    #[test]
    fn reverse_current_flips_factor_sign() {
        let i = signed_current(800.0, Direction::Reverse);
        assert_eq!(i, -800.0);
        assert!(emigration_factor(10.0, i, 973.0) < 0.0);
        assert_eq!(signed_current(800.0, Direction::Forward), 800.0);
    }

    #[test]
    fn optimum_dt_uses_scaled_max() {
        let table = CoefficientTable::new(vec![1.0, 4.0, 2.0], vec![0.0; 3]).unwrap();
        let dt = optimum_dt(0.5, &table, 2.0).unwrap();
        assert_relative_eq!(dt, 0.1 * 0.25 / 8.0);
    }

    #[test]
    fn optimum_dt_rejects_zero_diffusivity() {
        let table = CoefficientTable::new(vec![0.0, 0.0], vec![0.0; 2]).unwrap();
        assert!(optimum_dt(0.5, &table, 1.0).is_err());
    }

    #[test]
    fn stable_dt_matches_optimum_dt() {
        let table = CoefficientTable::new(vec![1.0, 4.0, 2.0], vec![0.0; 3]).unwrap();
        assert_eq!(
            stable_dt(0.5, 8.0).unwrap(),
            optimum_dt(0.5, &table, 2.0).unwrap()
        );
        assert!(stable_dt(0.5, f64::NEG_INFINITY).is_err());
        assert!(stable_dt(0.5, f64::NAN).is_err());
    }

    #[test]
    fn steps_round_up() {
        assert_eq!(num_sim_steps(0.25, 7200.0).unwrap(), 28_800);
        assert_eq!(num_sim_steps(0.3, 1.0).unwrap(), 4);
        assert_eq!(num_sim_steps(0.5, 0.0).unwrap(), 0);
        assert!(num_sim_steps(0.0, 1.0).is_err());
        assert!(num_sim_steps(0.1, f64::NAN).is_err());
    }
}
