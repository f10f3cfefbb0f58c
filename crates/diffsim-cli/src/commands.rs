//! Subcommand implementations.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use diffsim_solver::{simulate, ComparisonEngine};
use log::info;

use crate::config::{CurvesConfig, RunConfig};

/// Load, resolve and run a simulation, then write the profile as CSV.
pub fn simulate_file(path: &Path, out: &mut impl Write) -> Result<()> {
    let run = RunConfig::load(path)?.resolve()?;
    info!(
        "running {}: ndx={} ndt={} dt={:e} dx={:e} r={:e}",
        path.display(),
        run.init.len(),
        run.params.ndt,
        run.params.dt,
        run.params.dx,
        run.params.r
    );
    let profile = simulate(&run.table, &run.init, &run.params)
        .with_context(|| format!("simulating {}", path.display()))?;
    write_profile(out, run.params.dx, &profile)?;
    Ok(())
}

/// Write `x,c` rows with `x = i * dx`.
pub fn write_profile(out: &mut impl Write, dx: f64, profile: &[f64]) -> Result<()> {
    writeln!(out, "x,c")?;
    for (i, c) in profile.iter().enumerate() {
        writeln!(out, "{},{}", i as f64 * dx, c)?;
    }
    Ok(())
}

/// Align `y2` onto `y1` and report the shift and both residuals.
pub fn align_file(path: &Path, out: &mut impl Write) -> Result<()> {
    let curves = CurvesConfig::load(path)?;
    let mut engine = ComparisonEngine::new();
    let cal = engine
        .calibrate(&curves.y2, &curves.y1)
        .with_context(|| format!("aligning {}", path.display()))?;
    let shifted = engine.shifted_lsq(&curves.y2, &curves.y1)?;
    info!("aligned {} samples: shift={}", curves.y1.len(), cal.shift);
    writeln!(out, "shift={}", cal.shift)?;
    writeln!(out, "lsq={}", cal.lsq)?;
    writeln!(out, "shifted_lsq={shifted}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_csv_has_header_and_positions() {
        let mut buf = Vec::new();
        write_profile(&mut buf, 0.5, &[1.0, 0.25, 0.0]).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "x,c\n0,1\n0.5,0.25\n1,0\n"
        );
    }
}
