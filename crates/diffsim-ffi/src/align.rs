//! Aligner entry point.

use diffsim_solver::fast_pad_shift;

use crate::status::DiffsimStatus;
use crate::{clear_last_error, fail, reject};

/// Find the shift of `y2` that best matches `y1` in the least-squares
/// sense and write it to `shift_out`.
///
/// Both curves hold `len` values. Negative shifts move `y2` left, positive
/// shifts move it right. `shift_out` is left untouched on error.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn diffsim_fast_pad_shift(
    y1: *const f64,
    y2: *const f64,
    len: i32,
    shift_out: *mut i32,
) -> i32 {
    ffi_guard!({
        if y1.is_null() || y2.is_null() || shift_out.is_null() {
            return reject("null pointer");
        }
        let Ok(len) = usize::try_from(len) else {
            return reject(&format!("len must be non-negative, got {len}"));
        };

        // SAFETY: y1 and y2 each point to len readable f64 values per
        // caller contract and are non-null.
        let (y1, y2) = unsafe {
            (
                std::slice::from_raw_parts(y1, len),
                std::slice::from_raw_parts(y2, len),
            )
        };

        match fast_pad_shift(y1, y2) {
            Ok(shift) => {
                // |shift| <= len, and len came from an i32.
                let shift = shift as i32;
                // SAFETY: shift_out is non-null and writable per caller contract.
                unsafe { *shift_out = shift };
                clear_last_error();
                DiffsimStatus::Success as i32
            }
            Err(e) => fail(&e),
        }
    })
}
