//! Concentration-indexed coefficient tables.

use crate::error::SimError;

/// D(c) and R(c) sampled at `n` evenly spaced concentrations over `[0, 1]`.
///
/// Sample `i` corresponds to concentration `i / (n - 1)`. Lookups use the
/// nearest sample; slopes use finite differences in sample space scaled to
/// per-unit-concentration.
///
/// # Examples
///
/// ```
/// use diffsim_core::CoefficientTable;
///
/// let table = CoefficientTable::new(vec![1.0, 2.0, 3.0], vec![0.0; 3]).unwrap();
/// assert_eq!(table.len(), 3);
/// assert_eq!(table.index_of(0.74), Some(1));
/// assert_eq!(table.index_of(0.76), Some(2));
/// assert_eq!(table.index_of(1.3), None);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CoefficientTable {
    diffusivity: Vec<f64>,
    reaction: Vec<f64>,
}

/// Coefficients and their concentration slopes at one table sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coefficients {
    /// D at the sample.
    pub d: f64,
    /// R at the sample.
    pub r: f64,
    /// dD/dc at the sample.
    pub d_slope: f64,
    /// dR/dc at the sample.
    pub r_slope: f64,
}

#[allow(clippy::len_without_is_empty)]
impl CoefficientTable {
    /// Minimum number of samples: a slope needs two points.
    pub const MIN_SAMPLES: usize = 2;

    /// Build a table from matching D and R sample vectors.
    ///
    /// Returns `Err(SimError::InvalidArgument)` if the vectors differ in
    /// length or hold fewer than [`MIN_SAMPLES`](Self::MIN_SAMPLES) samples.
    pub fn new(diffusivity: Vec<f64>, reaction: Vec<f64>) -> Result<Self, SimError> {
        if diffusivity.len() != reaction.len() {
            return Err(SimError::invalid(format!(
                "D and R must be the same length, got {} and {}",
                diffusivity.len(),
                reaction.len()
            )));
        }
        if diffusivity.len() < Self::MIN_SAMPLES {
            return Err(SimError::invalid(format!(
                "coefficient tables need at least {} samples, got {}",
                Self::MIN_SAMPLES,
                diffusivity.len()
            )));
        }
        Ok(Self {
            diffusivity,
            reaction,
        })
    }

    /// Build a table by copying borrowed sample slices.
    pub fn from_slices(diffusivity: &[f64], reaction: &[f64]) -> Result<Self, SimError> {
        Self::new(diffusivity.to_vec(), reaction.to_vec())
    }

    /// Number of samples (`nIV`).
    pub fn len(&self) -> usize {
        self.diffusivity.len()
    }

    /// D samples.
    pub fn diffusivity(&self) -> &[f64] {
        &self.diffusivity
    }

    /// R samples.
    pub fn reaction(&self) -> &[f64] {
        &self.reaction
    }

    /// Largest D sample.
    pub fn max_diffusivity(&self) -> f64 {
        self.diffusivity
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// A copy with every D sample multiplied by `cv_factor`.
    ///
    /// Models vacancy-enhanced diffusion (`Cv / Cv_eq > 1`). R is unchanged.
    pub fn with_cv_factor(&self, cv_factor: f64) -> Self {
        Self {
            diffusivity: self.diffusivity.iter().map(|d| d * cv_factor).collect(),
            reaction: self.reaction.clone(),
        }
    }

    /// Nearest sample index for concentration `c`.
    ///
    /// Rounds `c * (n - 1)` half away from zero. Returns `None` when the
    /// rounded index falls outside `[0, n - 1]`, which is the case for any
    /// concentration outside roughly `[0, 1]` and for NaN.
    #[inline]
    pub fn index_of(&self, c: f64) -> Option<usize> {
        let last = (self.len() - 1) as f64;
        let idx = (c * last).round();
        if idx >= 0.0 && idx <= last {
            Some(idx as usize)
        } else {
            None
        }
    }

    /// D, R and their slopes at sample `idx`.
    ///
    /// Slopes are central differences in sample space, one-sided at the
    /// first and last sample, scaled by `n - 1` to per-unit-concentration.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[inline]
    pub fn coefficients(&self, idx: usize) -> Coefficients {
        let last = self.len() - 1;
        let left = if idx == 0 { idx } else { idx - 1 };
        let right = if idx == last { idx } else { idx + 1 };
        let span = (right - left) as f64;
        let per_unit = last as f64;

        Coefficients {
            d: self.diffusivity[idx],
            r: self.reaction[idx],
            d_slope: (self.diffusivity[right] - self.diffusivity[left]) / span * per_unit,
            r_slope: (self.reaction[right] - self.reaction[left]) / span * per_unit,
        }
    }
}
