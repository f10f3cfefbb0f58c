//! Brute-force least-squares alignment of two sampled curves.
//!
//! The shifted curve is extended with [`LOW_PAD`] before its first sample
//! and [`HIGH_PAD`] after its last one, matching a profile that runs from
//! fully-solute on the left to solute-free on the right. Every shift in
//! `[-len, len]` is scored, so the search is O(len^2).

use diffsim_core::SimError;
use log::trace;

/// Value substituted for samples before the start of the shifted curve.
pub const LOW_PAD: f64 = 1.0;

/// Value substituted for samples past the end of the shifted curve.
pub const HIGH_PAD: f64 = 0.0;

/// Sample `idx` of `y`, padded outside `[0, len)`.
#[inline]
pub(crate) fn padded(y: &[f64], idx: isize) -> f64 {
    if idx < 0 {
        LOW_PAD
    } else if idx as usize >= y.len() {
        HIGH_PAD
    } else {
        y[idx as usize]
    }
}

/// Sum of squared differences between `y1[i]` and padded `y2[i + offset]`.
fn offset_residual(y1: &[f64], y2: &[f64], offset: isize) -> f64 {
    y1.iter()
        .enumerate()
        .map(|(i, &a)| {
            let b = padded(y2, i as isize + offset);
            (b - a) * (b - a)
        })
        .sum()
}

/// Find the shift of `y2` that best matches `y1` in the least-squares sense.
///
/// Negative shifts move `y2` left, positive shifts move it right. Ties keep
/// the first candidate scanned, i.e. the largest returned shift.
///
/// # Errors
///
/// `SimError::InvalidArgument` if the inputs differ in length or are empty.
///
/// # Examples
///
/// ```
/// use diffsim_solver::fast_pad_shift;
///
/// let y = [1.0, 1.0, 0.5, 0.0, 0.0];
/// assert_eq!(fast_pad_shift(&y, &y).unwrap(), 0);
///
/// // y2 is y moved one sample to the left.
/// let y2 = [1.0, 0.5, 0.0, 0.0, 0.0];
/// assert_eq!(fast_pad_shift(&y, &y2).unwrap(), 1);
/// ```
pub fn fast_pad_shift(y1: &[f64], y2: &[f64]) -> Result<isize, SimError> {
    if y1.len() != y2.len() {
        return Err(SimError::invalid(format!(
            "input sizes must be the same, got {} and {}",
            y1.len(),
            y2.len()
        )));
    }
    if y1.is_empty() {
        return Err(SimError::invalid("inputs must not be empty"));
    }

    let len = y1.len() as isize;
    let mut best: Option<(f64, isize)> = None;
    for offset in -len..=len {
        let sum = offset_residual(y1, y2, offset);
        trace!("fast_pad_shift: offset={offset} lsq={sum}");
        if best.is_none_or(|(min, _)| sum < min) {
            best = Some((sum, offset));
        }
    }

    // The range is non-empty, so a candidate was always recorded.
    let best_offset = best.map_or(0, |(_, offset)| offset);
    Ok(-best_offset)
}
