//! Prefix check: str_has_prefix.

use super::str::{strlen, strnlen};

/// Returns `true` if the NUL-terminated string `text` starts with the
/// NUL-terminated string `prefix`.
///
/// Comparison is byte-wise and case-sensitive. An empty `prefix` matches any
/// present `text`. If either argument is `None` the result is `false`, so
/// callers may pass unchecked strings.
///
/// Only the first `strlen(prefix)` bytes of `text` are ever inspected.
///
/// ```
/// use fluentlibc_core::string::str_has_prefix;
///
/// let url: &[u8] = b"https://example.com\0";
/// assert!(str_has_prefix(Some(url), Some(&b"https://\0"[..])));
/// assert!(!str_has_prefix(Some(&b"--verbose\0"[..]), None));
/// ```
pub fn str_has_prefix(text: Option<&[u8]>, prefix: Option<&[u8]>) -> bool {
    let (Some(text), Some(prefix)) = (text, prefix) else {
        return false;
    };

    let prefix = &prefix[..strlen(prefix)];
    if strnlen(text, prefix.len()) < prefix.len() {
        return false;
    }

    for (i, &p) in prefix.iter().enumerate() {
        if text[i] != p {
            return false;
        }
    }
    true
}
