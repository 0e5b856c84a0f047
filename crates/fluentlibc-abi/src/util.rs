//! Shared internal utilities for ABI adapters.

use std::ffi::c_char;

/// Scan a C string with an optional hard bound.
///
/// Returns `(len, terminated)` where:
/// - `len` is the byte length before the first NUL or before the bound.
/// - `terminated` indicates whether a NUL byte was observed.
///
/// With a bound, at most `limit` bytes are read and the byte at `limit` is
/// never touched.
///
/// # Safety
///
/// `ptr` must be valid to read up to the discovered length (and bound when given).
pub unsafe fn scan_c_string(ptr: *const c_char, bound: Option<usize>) -> (usize, bool) {
    match bound {
        Some(limit) => {
            for i in 0..limit {
                // SAFETY: caller provides validity for bounded read.
                if unsafe { *ptr.add(i) } == 0 {
                    return (i, true);
                }
            }
            (limit, false)
        }
        None => {
            let mut i = 0usize;
            // SAFETY: caller guarantees valid NUL-terminated string in unbounded mode.
            while unsafe { *ptr.add(i) } != 0 {
                i += 1;
            }
            (i, true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_scan_finds_terminator() {
        let s = c"hello";
        assert_eq!(unsafe { scan_c_string(s.as_ptr(), None) }, (5, true));
    }

    #[test]
    fn bounded_scan_stops_at_limit() {
        let s = c"hello";
        assert_eq!(unsafe { scan_c_string(s.as_ptr(), Some(3)) }, (3, false));
    }

    #[test]
    fn bounded_scan_reports_early_terminator() {
        let s = c"hi";
        assert_eq!(unsafe { scan_c_string(s.as_ptr(), Some(8)) }, (2, true));
    }

    #[test]
    fn zero_bound_reads_nothing() {
        // A dangling but non-null pointer is fine: no byte is read.
        let ptr = std::ptr::NonNull::<c_char>::dangling().as_ptr();
        assert_eq!(unsafe { scan_c_string(ptr, Some(0)) }, (0, false));
    }
}
