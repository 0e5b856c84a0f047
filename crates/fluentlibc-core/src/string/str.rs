//! Length primitives: strlen, strnlen.
//!
//! In this safe Rust model, strings are `&[u8]` slices where a NUL byte
//! (`0x00`) marks the logical end of the string.

/// Returns the length of a NUL-terminated byte string (not counting the NUL).
///
/// Equivalent to C `strlen`. Scans `s` for the first `0x00` byte and returns
/// its index. If no NUL is found, returns the full slice length.
pub fn strlen(s: &[u8]) -> usize {
    s.iter().position(|&b| b == 0).unwrap_or(s.len())
}

/// Returns the length of a C string up to a maximum of `maxlen` bytes.
///
/// Equivalent to C `strnlen`. Scans at most `maxlen` bytes and returns:
/// - index of first `0x00` byte if found before `maxlen`
/// - otherwise `maxlen` (or `s.len()` when the slice is shorter)
pub fn strnlen(s: &[u8], maxlen: usize) -> usize {
    let limit = maxlen.min(s.len());
    s.iter().take(limit).position(|&b| b == 0).unwrap_or(limit)
}
