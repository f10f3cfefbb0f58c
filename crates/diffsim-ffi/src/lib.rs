//! C ABI for the diffsim integrator and curve aligner.
//!
//! Every entry point returns an `i32` [`DiffsimStatus`] code, never panics
//! across the boundary, and writes results only through caller-owned
//! buffers. The header `include/diffsim.h` is generated by `build.rs`.
//!
//! Diagnostics for the most recent failure on the calling thread are kept
//! in thread-local slots and can be copied out with
//! [`diffsim_last_error_message`] and [`diffsim_last_panic_message`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

use std::any::Any;
use std::cell::RefCell;
use std::ffi::c_char;

thread_local! {
    pub(crate) static LAST_PANIC: RefCell<String> = const { RefCell::new(String::new()) };
    pub(crate) static LAST_ERROR: RefCell<String> = const { RefCell::new(String::new()) };
}

/// Run an FFI body, converting a panic into `DiffsimStatus::Panicked`.
///
/// The body must evaluate to an `i32` status and may `return` early.
macro_rules! ffi_guard {
    ($body:block) => {
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| -> i32 { $body })) {
            Ok(status) => status,
            Err(payload) => {
                $crate::record_panic(payload.as_ref());
                $crate::status::DiffsimStatus::Panicked as i32
            }
        }
    };
}

pub mod align;
pub mod simulation;
pub mod status;

pub use align::diffsim_fast_pad_shift;
pub use simulation::{diffsim_calc_simulation, diffsim_calc_simulation_with_scheme};
pub use status::DiffsimStatus;

pub(crate) fn record_panic(payload: &(dyn Any + Send)) {
    let msg = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with non-string payload".to_string()
    };
    log::error!("panic caught at FFI boundary: {msg}");
    LAST_PANIC.with(|cell| *cell.borrow_mut() = msg);
}

/// Store `err` as the thread's last error and return its status code.
pub(crate) fn fail(err: &diffsim_core::SimError) -> i32 {
    LAST_ERROR.with(|cell| *cell.borrow_mut() = err.to_string());
    DiffsimStatus::from(err) as i32
}

/// Record an argument rejected before reaching the kernels.
pub(crate) fn reject(reason: &str) -> i32 {
    fail(&diffsim_core::SimError::invalid(reason))
}

pub(crate) fn clear_last_error() {
    LAST_ERROR.with(|cell| cell.borrow_mut().clear());
}

/// Copy `msg` into `buf` as a NUL-terminated string, truncating to fit.
///
/// Returns the full message length in bytes (excluding the terminator).
#[allow(unsafe_code)]
fn copy_message(msg: &str, buf: *mut c_char, cap: usize) -> i32 {
    let bytes = msg.as_bytes();
    if !buf.is_null() && cap > 0 {
        let n = bytes.len().min(cap - 1);
        // SAFETY: buf points to at least cap writable bytes per caller
        // contract, and n + 1 <= cap.
        unsafe {
            std::ptr::copy_nonoverlapping(bytes.as_ptr(), buf.cast::<u8>(), n);
            *buf.add(n) = 0;
        }
    }
    i32::try_from(bytes.len()).unwrap_or(i32::MAX)
}

/// Copy the last panic message caught on this thread into `buf`.
///
/// Pass a null `buf` (or `cap == 0`) to query the length. Returns the
/// message length in bytes, or 0 if no panic has been recorded.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn diffsim_last_panic_message(buf: *mut c_char, cap: usize) -> i32 {
    LAST_PANIC.with(|cell| copy_message(&cell.borrow(), buf, cap))
}

/// Copy the description of the last failed call on this thread into `buf`.
///
/// Successful calls clear the message. Same buffer contract as
/// [`diffsim_last_panic_message`].
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn diffsim_last_error_message(buf: *mut c_char, cap: usize) -> i32 {
    LAST_ERROR.with(|cell| copy_message(&cell.borrow(), buf, cap))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(f: extern "C" fn(*mut c_char, usize) -> i32) -> String {
        let len = f(std::ptr::null_mut(), 0);
        let mut buf = vec![0u8; len as usize + 1];
        let len2 = f(buf.as_mut_ptr() as *mut c_char, buf.len());
        assert_eq!(len, len2);
        String::from_utf8(buf[..len as usize].to_vec()).unwrap()
    }

    #[test]
    fn exports_keep_their_c_signatures() {
        type Message = extern "C" fn(*mut c_char, usize) -> i32;
        type Simulate = extern "C" fn(
            *const f64,
            *const f64,
            i32,
            *const f64,
            i32,
            i32,
            f64,
            f64,
            f64,
            *mut f64,
        ) -> i32;
        let messages: [Message; 2] = [diffsim_last_panic_message, diffsim_last_error_message];
        let simulate: Simulate = diffsim_calc_simulation;

        // Null buffers only query the length.
        for f in messages {
            assert!(f(std::ptr::null_mut(), 0) >= 0);
        }
        let status = simulate(
            std::ptr::null(),
            std::ptr::null(),
            2,
            std::ptr::null(),
            1,
            3,
            0.1,
            0.1,
            0.0,
            std::ptr::null_mut(),
        );
        assert_eq!(status, DiffsimStatus::InvalidArgument as i32);
    }

    #[test]
    fn ffi_guard_catches_panic_and_stores_message() {
        LAST_PANIC.with(|cell| cell.borrow_mut().clear());

        let status = ffi_guard!({
            panic!("deliberate panic inside guard");
        });

        assert_eq!(status, DiffsimStatus::Panicked as i32);
        assert!(read(diffsim_last_panic_message).contains("deliberate panic inside guard"));
    }

    #[test]
    fn ffi_guard_passes_status_through() {
        let status = ffi_guard!({ DiffsimStatus::Unstable as i32 });
        assert_eq!(status, 1);
    }

    #[test]
    fn formatted_panic_payload_is_recorded() {
        let cell = 7;
        let status = ffi_guard!({
            panic!("cell {cell} exploded");
        });
        assert_eq!(status, -128);
        assert_eq!(read(diffsim_last_panic_message), "cell 7 exploded");
    }

    #[test]
    fn message_is_truncated_to_capacity() {
        LAST_ERROR.with(|cell| *cell.borrow_mut() = "abcdef".to_string());
        let mut buf = [0x7fu8; 4];
        let len = diffsim_last_error_message(buf.as_mut_ptr() as *mut c_char, buf.len());
        assert_eq!(len, 6);
        assert_eq!(&buf, b"abc\0");
    }

    #[test]
    fn empty_slots_report_zero_length() {
        std::thread::spawn(|| {
            assert_eq!(diffsim_last_panic_message(std::ptr::null_mut(), 0), 0);
            assert_eq!(diffsim_last_error_message(std::ptr::null_mut(), 0), 0);
        })
        .join()
        .unwrap();
    }
}
