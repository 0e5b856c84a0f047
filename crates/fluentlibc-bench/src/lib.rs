//! Benchmark inputs shared by the fluentlibc criterion suites.

/// Prefix lengths exercised by the string benchmarks.
pub const PREFIX_LENGTHS: &[usize] = &[1, 8, 32, 128, 1024];

/// Build a `(text, prefix)` pair of NUL-terminated buffers where `prefix`
/// is `len` bytes and `text` extends it by `tail` bytes.
///
/// When `mismatch_last` is set, the final prefix byte differs from the text
/// so a comparison has to walk the whole prefix before failing.
#[must_use]
pub fn prefix_pair(len: usize, tail: usize, mismatch_last: bool) -> (Vec<u8>, Vec<u8>) {
    let mut text: Vec<u8> = (0..len + tail).map(|i| b'a' + (i % 26) as u8).collect();
    let mut prefix = text[..len].to_vec();
    // Text bytes are lowercase, so an uppercase byte never matches.
    if mismatch_last && let Some(last) = prefix.last_mut() {
        *last = b'Z';
    }
    text.push(0);
    prefix.push(0);
    (text, prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluentlibc_core::string::str_has_prefix;

    #[test]
    fn pair_shapes() {
        let (text, prefix) = prefix_pair(8, 4, false);
        assert_eq!(text.len(), 13);
        assert_eq!(prefix.len(), 9);
        assert!(text.starts_with(&prefix[..8]));
        assert!(str_has_prefix(Some(&text[..]), Some(&prefix[..])));
    }

    #[test]
    fn mismatch_differs_only_at_last_byte() {
        let (text, prefix) = prefix_pair(8, 0, true);
        assert_eq!(text[..7], prefix[..7]);
        assert_ne!(text[7], prefix[7]);
        assert!(!str_has_prefix(Some(&text[..]), Some(&prefix[..])));
    }
}
