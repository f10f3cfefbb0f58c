//! PyComparisonEngine: calibrates model profiles against an experiment.

use numpy::PyArray1;
use pyo3::prelude::*;

use diffsim_solver::ComparisonEngine;

use crate::error::sim_error;

/// Aligns model profiles to an experimental reference.
///
/// Call `calibrate(model, experiment)` once to find the shift, then use
/// `shift_data` and `shifted_lsq` on later model profiles.
#[pyclass(name = "ComparisonEngine")]
pub(crate) struct PyComparisonEngine {
    inner: ComparisonEngine,
}

#[pymethods]
impl PyComparisonEngine {
    /// Create an uncalibrated engine.
    #[new]
    fn new() -> Self {
        Self {
            inner: ComparisonEngine::new(),
        }
    }

    /// Find and store the shift aligning `model` to `experiment`.
    ///
    /// Returns `(lsq, shift)` where `lsq` is the unshifted residual.
    fn calibrate(
        &mut self,
        py: Python<'_>,
        model: Vec<f64>,
        experiment: Vec<f64>,
    ) -> PyResult<(f64, isize)> {
        let inner = &mut self.inner;
        // Release GIL: the shift search is O(len^2).
        let cal = py
            .detach(|| inner.calibrate(&model, &experiment))
            .map_err(sim_error)?;
        Ok((cal.lsq, cal.shift))
    }

    /// `model` moved by the calibrated shift, padded to its original length.
    fn shift_data<'py>(
        &self,
        py: Python<'py>,
        model: Vec<f64>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let shifted = self.inner.shift_data(&model).map_err(sim_error)?;
        Ok(PyArray1::from_vec(py, shifted))
    }

    /// Residual between `experiment` and the shifted `model`.
    fn shifted_lsq(&self, model: Vec<f64>, experiment: Vec<f64>) -> PyResult<f64> {
        self.inner
            .shifted_lsq(&model, &experiment)
            .map_err(sim_error)
    }

    /// The calibrated shift, or None before `calibrate`.
    #[getter]
    fn shift(&self) -> Option<isize> {
        self.inner.shift()
    }

    fn __repr__(&self) -> String {
        match self.inner.shift() {
            Some(s) => format!("ComparisonEngine(shift={s})"),
            None => "ComparisonEngine(uncalibrated)".to_string(),
        }
    }
}
