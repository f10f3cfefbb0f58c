//! Calibrating simulated profiles against measured ones.
//!
//! A simulated profile and an experimental one rarely share an origin. The
//! [`ComparisonEngine`] finds the integer shift that best aligns them with
//! [`fast_pad_shift`], keeps it, and applies it to later profiles so that
//! residuals compare like with like.

use diffsim_core::SimError;

use crate::align::{fast_pad_shift, padded};

/// Shift `y` by `shift` samples under the aligner's padding rule.
///
/// Positive shifts move the curve right and fill from the left with
/// [`LOW_PAD`](crate::align::LOW_PAD); negative shifts move it left and
/// fill from the right with [`HIGH_PAD`](crate::align::HIGH_PAD). The
/// result always has the same length as `y`.
pub fn pad_shift(y: &[f64], shift: isize) -> Vec<f64> {
    (0..y.len())
        .map(|i| padded(y, i as isize - shift))
        .collect()
}

/// Sum of squared differences between two equal-length curves.
pub fn lsq(y1: &[f64], y2: &[f64]) -> Result<f64, SimError> {
    if y1.len() != y2.len() {
        return Err(SimError::invalid(format!(
            "curves must be the same length, got {} and {}",
            y1.len(),
            y2.len()
        )));
    }
    Ok(y1.iter().zip(y2).map(|(a, b)| (b - a) * (b - a)).sum())
}

/// Outcome of [`ComparisonEngine::calibrate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Calibration {
    /// Residual between the model and the experiment before shifting.
    pub lsq: f64,
    /// Shift to apply to the model (negative = left, positive = right).
    pub shift: isize,
}

/// Aligns model profiles to an experimental reference.
///
/// # Examples
///
/// ```
/// use diffsim_solver::ComparisonEngine;
///
/// let experiment = [1.0, 1.0, 0.6, 0.1, 0.0];
/// let model = [1.0, 0.6, 0.1, 0.0, 0.0];
///
/// let mut engine = ComparisonEngine::new();
/// let cal = engine.calibrate(&model, &experiment).unwrap();
/// assert_eq!(cal.shift, 1);
/// assert_eq!(engine.shifted_lsq(&model, &experiment).unwrap(), 0.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ComparisonEngine {
    shift: Option<isize>,
}

impl ComparisonEngine {
    /// Create an engine with no calibrated shift.
    pub fn new() -> Self {
        Self::default()
    }

    /// The calibrated shift, if [`calibrate`](Self::calibrate) has run.
    pub fn shift(&self) -> Option<isize> {
        self.shift
    }

    /// Find and store the shift that aligns `model` to `experiment`.
    ///
    /// The returned residual is that of the unshifted model; use
    /// [`shifted_lsq`](Self::shifted_lsq) for the aligned residual.
    pub fn calibrate(&mut self, model: &[f64], experiment: &[f64]) -> Result<Calibration, SimError> {
        if model.len() != experiment.len() {
            return Err(SimError::invalid(format!(
                "model and experiment must be the same length, got {} and {}",
                model.len(),
                experiment.len()
            )));
        }
        let shift = fast_pad_shift(experiment, model)?;
        self.shift = Some(shift);
        Ok(Calibration {
            lsq: lsq(model, experiment)?,
            shift,
        })
    }

    /// Apply the calibrated shift to `model`.
    ///
    /// # Errors
    ///
    /// `SimError::InvalidArgument` if the engine has not been calibrated.
    pub fn shift_data(&self, model: &[f64]) -> Result<Vec<f64>, SimError> {
        Ok(pad_shift(model, self.require_shift()?))
    }

    /// Residual between `experiment` and `model` after applying the
    /// calibrated shift.
    pub fn shifted_lsq(&self, model: &[f64], experiment: &[f64]) -> Result<f64, SimError> {
        let shifted = self.shift_data(model)?;
        lsq(&shifted, experiment)
    }

    fn require_shift(&self) -> Result<isize, SimError> {
        self.shift
            .ok_or_else(|| SimError::invalid("comparison engine has not been calibrated"))
    }
}
