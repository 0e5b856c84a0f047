//! Differential fixture execution for fluentlibc.
//!
//! A fixture case names a function and carries JSON inputs. Execution runs the
//! case three ways and reports whether they agree:
//! - the safe implementation in `fluentlibc-core`
//! - the exported C symbol in `fluentlibc-abi`
//! - a host libc reference built from `strlen` + `strncmp`

use std::ffi::{CString, c_char};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use fluentlibc_core::string;

/// Errors raised while decoding or executing a fixture case.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("unsupported function: {0} (supported: {supported})", supported = SUPPORTED_FUNCTIONS.join(", "))]
    UnsupportedFunction(String),
    #[error("unsupported mode: {0}")]
    UnsupportedMode(String),
    #[error("missing input field `{0}`")]
    MissingInput(&'static str),
    #[error("input field `{field}` is malformed: {reason}")]
    MalformedInput { field: &'static str, reason: String },
}

/// Outcome of running one fixture case against every implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifferentialExecution {
    /// Output of the safe core implementation.
    pub impl_output: String,
    /// Output of the exported C ABI symbol.
    pub abi_output: String,
    /// Output of the host libc reference.
    pub host_output: String,
    /// `impl_output == abi_output`.
    pub abi_parity: bool,
    /// `impl_output == host_output`.
    pub host_parity: bool,
    /// Free-form execution note.
    pub note: Option<String>,
}

/// A case produced by [`capture_str_has_prefix_cases`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapturedCase {
    pub name: String,
    pub spec_section: String,
    pub inputs: serde_json::Value,
    pub expected_output: String,
}

/// Functions this crate knows how to execute.
pub const SUPPORTED_FUNCTIONS: &[&str] = &["str_has_prefix"];

/// Execute a fixture case by function name.
pub fn execute_fixture_case(
    function: &str,
    inputs: &serde_json::Value,
    mode: &str,
) -> Result<DifferentialExecution, ExecError> {
    if !SUPPORTED_FUNCTIONS.contains(&function) {
        return Err(ExecError::UnsupportedFunction(function.to_string()));
    }
    if !is_known_mode(mode) {
        return Err(ExecError::UnsupportedMode(mode.to_string()));
    }
    match function {
        "str_has_prefix" => execute_str_has_prefix(inputs),
        other => Err(ExecError::UnsupportedFunction(other.to_string())),
    }
}

fn is_known_mode(mode: &str) -> bool {
    matches!(
        mode.to_ascii_lowercase().as_str(),
        "strict" | "hardened" | "both"
    )
}

fn execute_str_has_prefix(inputs: &serde_json::Value) -> Result<DifferentialExecution, ExecError> {
    let text = decode_c_string(inputs, "text")?;
    let prefix = decode_c_string(inputs, "prefix")?;

    let impl_result = string::str_has_prefix(text.as_deref(), prefix.as_deref());

    let c_text = text.as_deref().map(to_c_string);
    let c_prefix = prefix.as_deref().map(to_c_string);
    let abi_result = abi_str_has_prefix(c_text.as_ref(), c_prefix.as_ref());
    let host_result = host_str_has_prefix(c_text.as_ref(), c_prefix.as_ref());

    let abi_parity = impl_result == abi_result;
    let host_parity = impl_result == host_result;
    let note = match (abi_parity, host_parity) {
        (true, true) => None,
        (false, _) => Some(format!("abi parity mismatch: abi={abi_result}, impl={impl_result}")),
        (true, false) => Some(format!(
            "host parity mismatch: host={host_result}, impl={impl_result}"
        )),
    };

    Ok(DifferentialExecution {
        impl_output: impl_result.to_string(),
        abi_output: abi_result.to_string(),
        host_output: host_result.to_string(),
        abi_parity,
        host_parity,
        note,
    })
}

/// Decode a C-string fixture input.
///
/// Accepts a JSON string (its UTF-8 bytes), an array of byte values, or
/// `null` for a NULL pointer. A missing key is an error, not NULL.
pub fn decode_c_string(
    inputs: &serde_json::Value,
    field: &'static str,
) -> Result<Option<Vec<u8>>, ExecError> {
    let value = inputs.get(field).ok_or(ExecError::MissingInput(field))?;
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) => Ok(Some(s.as_bytes().to_vec())),
        serde_json::Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_u64()
                    .and_then(|b| u8::try_from(b).ok())
                    .ok_or_else(|| ExecError::MalformedInput {
                        field,
                        reason: format!("expected byte value 0-255, got {item}"),
                    })
            })
            .collect::<Result<Vec<u8>, _>>()
            .map(Some),
        other => Err(ExecError::MalformedInput {
            field,
            reason: format!("expected string, byte array or null, got {other}"),
        }),
    }
}

/// Truncate at the first NUL and build an owned C string.
fn to_c_string(bytes: &[u8]) -> CString {
    let len = string::strlen(bytes);
    let mut owned = bytes[..len].to_vec();
    owned.push(0);
    CString::from_vec_with_nul(owned).unwrap_or_default()
}

fn as_ptr(s: Option<&CString>) -> *const c_char {
    s.map_or(std::ptr::null(), |s| s.as_ptr())
}

fn abi_str_has_prefix(text: Option<&CString>, prefix: Option<&CString>) -> bool {
    // SAFETY: each pointer is NULL or a NUL-terminated string kept alive by the caller.
    unsafe { fluentlibc_abi::string_abi::str_has_prefix(as_ptr(text), as_ptr(prefix)) }
}

/// Host libc reference: `strncmp(text, prefix, strlen(prefix)) == 0`.
///
/// NULL inputs are not passed to libc; they yield `false`.
pub fn host_str_has_prefix(text: Option<&CString>, prefix: Option<&CString>) -> bool {
    let (Some(text), Some(prefix)) = (text, prefix) else {
        return false;
    };
    // SAFETY: both pointers come from live `CString`s.
    unsafe {
        let n = libc::strlen(prefix.as_ptr());
        libc::strncmp(text.as_ptr(), prefix.as_ptr(), n) == 0
    }
}

/// Canonical `str_has_prefix` cases, with expected outputs taken from the
/// host libc reference (NULL handling from the documented contract).
#[must_use]
pub fn capture_str_has_prefix_cases() -> Vec<CapturedCase> {
    use serde_json::{Value, json};

    let raw: Vec<(&str, &str, Value, Value)> = vec![
        (
            "secure_url",
            "str_has_prefix: matching prefix",
            json!("https://example.com"),
            json!("https://"),
        ),
        (
            "insecure_url",
            "str_has_prefix: mismatch at index 4",
            json!("http://example.com"),
            json!("https://"),
        ),
        (
            "text_shorter_than_prefix",
            "str_has_prefix: text shorter than prefix",
            json!("ab"),
            json!("abc"),
        ),
        (
            "case_sensitive",
            "str_has_prefix: byte-wise case-sensitive",
            json!("ABC"),
            json!("abc"),
        ),
        (
            "empty_prefix",
            "str_has_prefix: empty prefix matches",
            json!("anything"),
            json!(""),
        ),
        (
            "empty_both",
            "str_has_prefix: empty prefix matches",
            json!(""),
            json!(""),
        ),
        (
            "self_prefix",
            "str_has_prefix: string is its own prefix",
            json!("--verbose"),
            json!("--verbose"),
        ),
        (
            "flag_prefix",
            "str_has_prefix: matching prefix",
            json!("--output"),
            json!("--"),
        ),
        (
            "single_dash_flag",
            "str_has_prefix: mismatch at index 1",
            json!("-o"),
            json!("--"),
        ),
        (
            "embedded_nul_in_text",
            "str_has_prefix: text ends at first NUL",
            json!([97, 98, 0, 99]),
            json!("abc"),
        ),
        (
            "high_bytes",
            "str_has_prefix: raw byte comparison",
            json!([226, 130, 172, 49]),
            json!([226, 130]),
        ),
        (
            "null_text",
            "str_has_prefix: NULL text yields false",
            Value::Null,
            json!("abc"),
        ),
        (
            "null_prefix",
            "str_has_prefix: NULL prefix yields false",
            json!("abc"),
            Value::Null,
        ),
        (
            "null_text_empty_prefix",
            "str_has_prefix: NULL text yields false",
            Value::Null,
            json!(""),
        ),
    ];

    raw.into_iter()
        .map(|(name, section, text, prefix)| {
            let inputs = json!({ "text": text, "prefix": prefix });
            let expected = capture_expected(&inputs);
            CapturedCase {
                name: name.to_string(),
                spec_section: section.to_string(),
                inputs,
                expected_output: expected,
            }
        })
        .collect()
}

fn capture_expected(inputs: &serde_json::Value) -> String {
    let text = decode_c_string(inputs, "text").ok().flatten();
    let prefix = decode_c_string(inputs, "prefix").ok().flatten();
    let c_text = text.as_deref().map(to_c_string);
    let c_prefix = prefix.as_deref().map(to_c_string);
    host_str_has_prefix(c_text.as_ref(), c_prefix.as_ref()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn executes_matching_case() {
        let run = execute_fixture_case(
            "str_has_prefix",
            &json!({"text": "https://example.com", "prefix": "https://"}),
            "strict",
        )
        .unwrap();
        assert_eq!(run.impl_output, "true");
        assert!(run.abi_parity);
        assert!(run.host_parity);
        assert!(run.note.is_none());
    }

    #[test]
    fn null_inputs_are_false_everywhere() {
        let run = execute_fixture_case(
            "str_has_prefix",
            &json!({"text": null, "prefix": "abc"}),
            "hardened",
        )
        .unwrap();
        assert_eq!(run.impl_output, "false");
        assert_eq!(run.abi_output, "false");
        assert_eq!(run.host_output, "false");
    }

    #[test]
    fn byte_array_input_with_embedded_nul() {
        let run = execute_fixture_case(
            "str_has_prefix",
            &json!({"text": [97, 98, 0, 99], "prefix": "abc"}),
            "both",
        )
        .unwrap();
        assert_eq!(run.impl_output, "false");
        assert!(run.abi_parity && run.host_parity);
    }

    #[test]
    fn missing_field_is_an_error() {
        let err = execute_fixture_case("str_has_prefix", &json!({"text": "abc"}), "strict")
            .unwrap_err();
        assert!(matches!(err, ExecError::MissingInput("prefix")));
    }

    #[test]
    fn out_of_range_byte_is_malformed() {
        let err = decode_c_string(&json!({"text": [300]}), "text").unwrap_err();
        assert!(matches!(err, ExecError::MalformedInput { field: "text", .. }));
    }

    #[test]
    fn number_input_is_malformed() {
        let err = decode_c_string(&json!({"text": 7}), "text").unwrap_err();
        assert!(err.to_string().contains("expected string, byte array or null"));
    }

    #[test]
    fn unknown_function_is_rejected() {
        let err = execute_fixture_case("strlen", &json!({}), "strict").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unsupported function: strlen (supported: str_has_prefix)"
        );
    }

    #[test]
    fn every_supported_function_dispatches() {
        let inputs = json!({"text": "abc", "prefix": "ab"});
        for function in SUPPORTED_FUNCTIONS {
            let run = execute_fixture_case(function, &inputs, "both").unwrap();
            assert!(run.abi_parity, "{function}");
        }
    }

    #[test]
    fn unknown_function_checked_before_mode() {
        let err = execute_fixture_case("strlen", &json!({}), "off").unwrap_err();
        assert!(matches!(err, ExecError::UnsupportedFunction(ref f) if f == "strlen"));
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let err = execute_fixture_case(
            "str_has_prefix",
            &json!({"text": "a", "prefix": "a"}),
            "off",
        )
        .unwrap_err();
        assert!(matches!(err, ExecError::UnsupportedMode(_)));
    }

    #[test]
    fn captured_cases_replay_cleanly() {
        let cases = capture_str_has_prefix_cases();
        assert!(cases.len() >= 10);
        for case in cases {
            let run = execute_fixture_case("str_has_prefix", &case.inputs, "strict").unwrap();
            assert_eq!(run.impl_output, case.expected_output, "case {}", case.name);
            assert!(run.abi_parity && run.host_parity, "case {}", case.name);
        }
    }

    #[test]
    fn captured_expectations_follow_contract() {
        let by_name = |name: &str| {
            capture_str_has_prefix_cases()
                .into_iter()
                .find(|c| c.name == name)
                .map(|c| c.expected_output)
                .unwrap()
        };
        assert_eq!(by_name("secure_url"), "true");
        assert_eq!(by_name("insecure_url"), "false");
        assert_eq!(by_name("text_shorter_than_prefix"), "false");
        assert_eq!(by_name("case_sensitive"), "false");
        assert_eq!(by_name("empty_prefix"), "true");
        assert_eq!(by_name("null_text_empty_prefix"), "false");
    }
}
