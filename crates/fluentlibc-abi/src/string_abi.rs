//! ABI layer for the fluentlibc string utilities.
//!
//! Each function is an `extern "C"` entry point that:
//! 1. Maps NULL pointers to the absence case
//! 2. Measures C strings with bounded scans so no byte past a terminator is read
//! 3. Delegates to `fluentlibc-core` safe implementations

use std::ffi::c_char;

use fluentlibc_core::string;

use crate::util::scan_c_string;

abi_fn! {
    /// fluentlibc `str_has_prefix` -- returns `true` if `text` starts with `prefix`.
    ///
    /// Returns `false` if either pointer is NULL. Reads all of `prefix` but at
    /// most `strlen(prefix)` bytes of `text`.
    ///
    /// # Safety
    ///
    /// Each non-NULL argument must point to a NUL-terminated string.
    fn str_has_prefix(text: *const c_char, prefix: *const c_char) -> bool {
        if text.is_null() || prefix.is_null() {
            return false;
        }

        let (prefix_len, _) = scan_c_string(prefix, None);
        let (text_len, _) = scan_c_string(text, Some(prefix_len));
        if text_len < prefix_len {
            return false;
        }

        // SAFETY: both regions were just scanned and hold `prefix_len` readable bytes.
        let text = std::slice::from_raw_parts(text.cast::<u8>(), prefix_len);
        let prefix = std::slice::from_raw_parts(prefix.cast::<u8>(), prefix_len);
        string::str_has_prefix(Some(text), Some(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_arguments_are_false() {
        let s = c"abc";
        unsafe {
            assert!(!str_has_prefix(std::ptr::null(), s.as_ptr()));
            assert!(!str_has_prefix(s.as_ptr(), std::ptr::null()));
            assert!(!str_has_prefix(std::ptr::null(), std::ptr::null()));
        }
    }

    #[test]
    fn delegates_match_and_mismatch() {
        unsafe {
            assert!(str_has_prefix(
                c"https://example.com".as_ptr(),
                c"https://".as_ptr()
            ));
            assert!(!str_has_prefix(
                c"http://example.com".as_ptr(),
                c"https://".as_ptr()
            ));
        }
    }

    #[test]
    fn text_shorter_than_prefix() {
        unsafe {
            assert!(!str_has_prefix(c"ab".as_ptr(), c"abc".as_ptr()));
        }
    }

    #[test]
    fn empty_prefix_matches() {
        unsafe {
            assert!(str_has_prefix(c"".as_ptr(), c"".as_ptr()));
            assert!(str_has_prefix(c"abc".as_ptr(), c"".as_ptr()));
        }
    }
}
