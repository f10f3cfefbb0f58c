//! JSON run descriptions.
//!
//! A run file names the coefficient tables and the grid, and may derive
//! `r` from the applied current and `ndt`/`dt` from a target time:
//!
//! ```json
//! {
//!   "diffusivity": [1.0, 1.2, 1.5],
//!   "reaction": [0.3, 0.3, 0.3],
//!   "ndx": 100,
//!   "dx": 0.01,
//!   "tmax": 0.05,
//!   "current": { "density": 1.0e7, "z": 2.0, "temperature": 973.0 }
//! }
//! ```

use std::path::Path;

use anyhow::{bail, Context, Result};
use diffsim_core::{
    emigration_factor, num_sim_steps, optimum_dt, signed_current, step_profile, CoefficientTable,
    Direction, GradientScheme, SimParams,
};
use log::info;
use serde::{Deserialize, Serialize};

fn one() -> f64 {
    1.0
}

/// Applied current, used to derive the electromigration factor `r`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Current {
    /// Current density magnitude in A/m^2.
    pub density: f64,
    /// Effective valence.
    pub z: f64,
    /// Temperature in K.
    pub temperature: f64,
    /// Direction the current was applied in.
    #[serde(default)]
    pub direction: Direction,
}

impl Current {
    /// The electromigration factor for this current.
    pub fn rate(&self) -> f64 {
        emigration_factor(
            self.z,
            signed_current(self.density, self.direction),
            self.temperature,
        )
    }
}

/// A run as written in the JSON file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Diffusivity samples over `c` in `[0, 1]`.
    pub diffusivity: Vec<f64>,
    /// Reaction samples, same length as `diffusivity`.
    pub reaction: Vec<f64>,
    /// Explicit initial condition. Mutually exclusive with `ndx`.
    #[serde(default)]
    pub init: Option<Vec<f64>>,
    /// Size of a diffusion-couple step profile. Mutually exclusive with `init`.
    #[serde(default)]
    pub ndx: Option<usize>,
    /// Spatial step.
    pub dx: f64,
    /// Time step; defaults to [`optimum_dt`].
    #[serde(default)]
    pub dt: Option<f64>,
    /// Number of steps. Mutually exclusive with `tmax`.
    #[serde(default)]
    pub ndt: Option<usize>,
    /// Simulated time to reach. Mutually exclusive with `ndt`.
    #[serde(default)]
    pub tmax: Option<f64>,
    /// Electromigration factor. Mutually exclusive with `current`.
    #[serde(default)]
    pub r: Option<f64>,
    /// Applied current. Mutually exclusive with `r`.
    #[serde(default)]
    pub current: Option<Current>,
    /// Multiplier applied to every diffusivity sample.
    #[serde(default = "one")]
    pub cv_factor: f64,
    /// First-derivative stencil.
    #[serde(default)]
    pub gradient: GradientScheme,
}

/// A run with every derived quantity filled in.
#[derive(Clone, Debug)]
pub struct ResolvedRun {
    /// Tables with `cv_factor` applied.
    pub table: CoefficientTable,
    /// Initial condition.
    pub init: Vec<f64>,
    /// Integrator parameters.
    pub params: SimParams,
}

impl RunConfig {
    /// Read and parse a run file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading run file {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing run file {}", path.display()))
    }

    /// Resolve the optional fields into a runnable configuration.
    pub fn resolve(&self) -> Result<ResolvedRun> {
        if !self.cv_factor.is_finite() {
            bail!("cv_factor must be finite, got {}", self.cv_factor);
        }
        let table = CoefficientTable::from_slices(&self.diffusivity, &self.reaction)?
            .with_cv_factor(self.cv_factor);

        let init = match (&self.init, self.ndx) {
            (Some(init), None) => init.clone(),
            (None, Some(ndx)) => step_profile(ndx),
            (Some(_), Some(_)) => bail!("give either `init` or `ndx`, not both"),
            (None, None) => bail!("one of `init` or `ndx` is required"),
        };

        let dt = match self.dt {
            Some(dt) => dt,
            None => {
                let dt = optimum_dt(self.dx, &table, 1.0)?;
                info!("dt not given, using optimum dt = {dt:e}");
                dt
            }
        };

        let ndt = match (self.ndt, self.tmax) {
            (Some(ndt), None) => ndt,
            (None, Some(tmax)) => num_sim_steps(dt, tmax)?,
            (Some(_), Some(_)) => bail!("give either `ndt` or `tmax`, not both"),
            (None, None) => bail!("one of `ndt` or `tmax` is required"),
        };

        let r = match (&self.r, &self.current) {
            (Some(r), None) => *r,
            (None, Some(current)) => current.rate(),
            (None, None) => 0.0,
            (Some(_), Some(_)) => bail!("give either `r` or `current`, not both"),
        };

        let params = SimParams::builder()
            .steps(ndt)
            .dt(dt)
            .dx(self.dx)
            .rate(r)
            .gradient(self.gradient)
            .build()?;
        Ok(ResolvedRun {
            table,
            init,
            params,
        })
    }
}

/// Two curves to align.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CurvesConfig {
    /// Reference curve (typically the experiment).
    pub y1: Vec<f64>,
    /// Curve to shift onto `y1` (typically the model).
    pub y2: Vec<f64>,
}

impl CurvesConfig {
    /// Read and parse a curves file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading curves file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing curves file {}", path.display()))
    }
}
