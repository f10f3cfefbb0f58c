//! Python bindings for diffsim.
//!
//! The native extension is named `_diffsim`. The integrator and aligner go
//! through the C ABI in `diffsim-ffi` with the GIL released; the helpers and
//! the comparison engine call the Rust crates directly.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![allow(unsafe_code)]

use pyo3::prelude::*;

mod comparison;
mod error;
mod simulation;

/// The native `_diffsim` extension module.
#[pymodule]
fn _diffsim(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Exceptions
    m.add(
        "SimulationUnstableError",
        m.py().get_type::<error::SimulationUnstableError>(),
    )?;

    // Classes
    m.add_class::<comparison::PyComparisonEngine>()?;

    // Functions
    m.add_function(wrap_pyfunction!(simulation::calc_simulation, m)?)?;
    m.add_function(wrap_pyfunction!(simulation::fast_pad_shift, m)?)?;
    m.add_function(wrap_pyfunction!(simulation::emigration_factor, m)?)?;
    m.add_function(wrap_pyfunction!(simulation::optimum_dt, m)?)?;
    m.add_function(wrap_pyfunction!(simulation::num_sim_steps, m)?)?;

    Ok(())
}
