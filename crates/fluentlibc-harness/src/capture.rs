//! Fixture capture: package reference cases as a fixture set.

use fluentlibc_conformance::capture_str_has_prefix_cases;

use crate::fixtures::{FixtureCase, FixtureSet};
use crate::structured_log::now_utc;

/// Build the canonical `str_has_prefix` fixture set.
///
/// `captured_at` overrides the capture timestamp for reproducible output.
#[must_use]
pub fn capture_str_has_prefix_fixture_set(captured_at: Option<&str>) -> FixtureSet {
    let cases = capture_str_has_prefix_cases()
        .into_iter()
        .map(|case| FixtureCase {
            name: case.name,
            function: "str_has_prefix".to_string(),
            spec_section: case.spec_section,
            inputs: case.inputs,
            expected_output: case.expected_output,
            mode: "both".to_string(),
        })
        .collect();

    FixtureSet {
        version: "v1".to_string(),
        family: "string/str_has_prefix".to_string(),
        captured_at: captured_at.map_or_else(now_utc, str::to_string),
        cases,
    }
}
