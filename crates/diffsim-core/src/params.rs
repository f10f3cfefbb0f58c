//! Run parameters for the diffusion-reaction integrator.

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Stencil for the first spatial derivative `dc/dx`.
///
/// The second derivative always uses the central three-point stencil.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientScheme {
    /// `(c[k+1] - c[k-1]) / (2 dx)`.
    #[default]
    Central,
    /// `(c[k+1] - c[k]) / dx`. Reproduces profiles from older runs.
    Forward,
}

impl GradientScheme {
    /// Decode the integer tag used across the C ABI (0 = central, 1 = forward).
    pub fn from_raw(tag: i32) -> Option<Self> {
        match tag {
            0 => Some(Self::Central),
            1 => Some(Self::Forward),
            _ => None,
        }
    }

    /// Integer tag used across the C ABI.
    pub fn as_raw(self) -> i32 {
        match self {
            Self::Central => 0,
            Self::Forward => 1,
        }
    }
}

/// Scalars that drive one integrator run.
///
/// The number of spatial points is not stored here: it is the length of
/// the initial condition handed to the integrator.
///
/// # Construction
///
/// ```
/// use diffsim_core::SimParams;
///
/// let params = SimParams::builder()
///     .steps(100)
///     .dt(1e-3)
///     .dx(0.1)
///     .rate(0.5)
///     .build()
///     .unwrap();
/// assert_eq!(params.ndt, 100);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimParams {
    /// Number of time steps.
    pub ndt: usize,
    /// Time step size.
    pub dt: f64,
    /// Spatial step size.
    pub dx: f64,
    /// Reaction-rate scale (electromigration factor).
    pub r: f64,
    /// First-derivative stencil.
    #[serde(default)]
    pub gradient: GradientScheme,
}

/// Builder for [`SimParams`].
///
/// `dt` and `dx` are required. `ndt` defaults to 0, `rate` to 0 and the
/// gradient scheme to [`GradientScheme::Central`].
#[derive(Clone, Debug, Default)]
pub struct SimParamsBuilder {
    ndt: usize,
    dt: Option<f64>,
    dx: Option<f64>,
    r: f64,
    gradient: GradientScheme,
}

impl SimParams {
    /// Create a new builder.
    pub fn builder() -> SimParamsBuilder {
        SimParamsBuilder::default()
    }

    /// Check the scalar preconditions.
    ///
    /// `dt` and `r` must be finite; `dx` must be finite and positive.
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.dt.is_finite() {
            return Err(SimError::invalid(format!(
                "dt must be finite, got {}",
                self.dt
            )));
        }
        if !(self.dx > 0.0) || !self.dx.is_finite() {
            return Err(SimError::invalid(format!(
                "dx must be finite and > 0, got {}",
                self.dx
            )));
        }
        if !self.r.is_finite() {
            return Err(SimError::invalid(format!(
                "r must be finite, got {}",
                self.r
            )));
        }
        Ok(())
    }

    /// Simulated time covered by the run (`ndt * dt`).
    pub fn duration(&self) -> f64 {
        self.ndt as f64 * self.dt
    }
}

impl SimParamsBuilder {
    /// Set the number of time steps.
    pub fn steps(mut self, ndt: usize) -> Self {
        self.ndt = ndt;
        self
    }

    /// Set the time step size.
    pub fn dt(mut self, dt: f64) -> Self {
        self.dt = Some(dt);
        self
    }

    /// Set the spatial step size.
    pub fn dx(mut self, dx: f64) -> Self {
        self.dx = Some(dx);
        self
    }

    /// Set the reaction-rate scale.
    pub fn rate(mut self, r: f64) -> Self {
        self.r = r;
        self
    }

    /// Set the first-derivative stencil.
    pub fn gradient(mut self, gradient: GradientScheme) -> Self {
        self.gradient = gradient;
        self
    }

    /// Build and validate the parameters.
    ///
    /// # Errors
    ///
    /// Returns `Err(SimError::InvalidArgument)` if `dt` or `dx` is unset,
    /// or if [`SimParams::validate`] rejects the values.
    pub fn build(self) -> Result<SimParams, SimError> {
        let dt = self.dt.ok_or_else(|| SimError::invalid("dt is required"))?;
        let dx = self.dx.ok_or_else(|| SimError::invalid("dx is required"))?;
        let params = SimParams {
            ndt: self.ndt,
            dt,
            dx,
            r: self.r,
            gradient: self.gradient,
        };
        params.validate()?;
        Ok(params)
    }
}
