#![no_main]
use libfuzzer_sys::fuzz_target;

use fluentlibc_core::string;

// Input layout: [split: u8][payload...]. The payload is cut at `split`
// (mod its length) into text and prefix.
fuzz_target!(|data: &[u8]| {
    let Some((&split, payload)) = data.split_first() else {
        return;
    };
    let cut = if payload.is_empty() {
        0
    } else {
        usize::from(split) % (payload.len() + 1)
    };
    let (text, prefix) = payload.split_at(cut);

    let text_len = string::strlen(text);
    let prefix_len = string::strlen(prefix);
    let reference = text[..text_len].starts_with(&prefix[..prefix_len]);

    let core = string::str_has_prefix(Some(text), Some(prefix));
    assert_eq!(core, reference, "core diverged from slice reference");

    let mut text_c = text[..text_len].to_vec();
    text_c.push(0);
    let mut prefix_c = prefix[..prefix_len].to_vec();
    prefix_c.push(0);
    let abi = unsafe {
        fluentlibc_abi::string_abi::str_has_prefix(text_c.as_ptr().cast(), prefix_c.as_ptr().cast())
    };
    assert_eq!(abi, core, "abi diverged from core");

    assert!(string::str_has_prefix(Some(text), Some(&b""[..])));
    assert!(!string::str_has_prefix(None, Some(prefix)));
    assert!(!string::str_has_prefix(Some(text), None));
});
