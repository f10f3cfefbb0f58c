//! Standard initial conditions.

/// Diffusion-couple initial condition: ones on the left half, zeros from
/// `ndx / 2` onwards.
pub fn step_profile(ndx: usize) -> Vec<f64> {
    (0..ndx).map(|i| if i < ndx / 2 { 1.0 } else { 0.0 }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_at_half() {
        assert_eq!(step_profile(4), vec![1.0, 1.0, 0.0, 0.0]);
        assert_eq!(step_profile(5), vec![1.0, 1.0, 0.0, 0.0, 0.0]);
        assert!(step_profile(0).is_empty());
    }
}
