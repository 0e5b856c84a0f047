//! Integration test: shared str_has_prefix fixtures replay cleanly.
//!
//! Validates that:
//! 1. tests/conformance/fixtures/ contains well-formed fixture sets.
//! 2. Every case passes in strict and hardened mode with ABI and host parity.
//! 3. The checked-in fixture agrees with freshly captured expectations.
//! 4. A logged run produces a valid structured log file and artifact index.
//!
//! Run: cargo test -p fluentlibc-harness --test conformance_fixture_test

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use fluentlibc_harness::capture::capture_str_has_prefix_fixture_set;
use fluentlibc_harness::fixtures::discover_fixture_files;
use fluentlibc_harness::structured_log::{ArtifactIndex, LogEmitter, sha256_hex, validate_log_file};
use fluentlibc_harness::{FixtureSet, RuntimeMode, TestRunner, VerificationSummary};

fn workspace_root() -> PathBuf {
    let manifest = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest)
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf()
}

fn fixture_dir() -> PathBuf {
    workspace_root().join("tests/conformance/fixtures")
}

fn load_all() -> Vec<FixtureSet> {
    discover_fixture_files(&fixture_dir())
        .expect("fixture directory must contain JSON files")
        .iter()
        .map(|p| FixtureSet::from_file(p).expect("fixture must parse"))
        .collect()
}

#[test]
fn fixture_sets_are_well_formed() {
    let sets = load_all();
    assert!(!sets.is_empty());
    for set in &sets {
        assert_eq!(set.version, "v1");
        assert!(!set.cases.is_empty(), "{} has no cases", set.family);
        for case in &set.cases {
            assert!(
                ["strict", "hardened", "both"].contains(&case.mode.as_str()),
                "case {} has invalid mode {}",
                case.name,
                case.mode
            );
            assert!(
                case.expected_output == "true" || case.expected_output == "false",
                "case {} expected_output must be a bool literal",
                case.name
            );
        }
    }
}

#[test]
fn all_cases_pass_in_both_modes() {
    for mode in [RuntimeMode::Strict, RuntimeMode::Hardened] {
        let runner = TestRunner::new("fixtures", mode);
        let results: Vec<_> = load_all().iter().flat_map(|set| runner.run(set)).collect();
        let summary = VerificationSummary::from_results(results);
        let failures: Vec<_> = summary
            .results
            .iter()
            .filter(|r| !r.passed || r.diff.is_some())
            .map(|r| format!("{}: {:?}", r.case_name, r.diff))
            .collect();
        assert!(
            failures.is_empty(),
            "{mode:?} failures:\n{}",
            failures.join("\n")
        );
        assert!(summary.total > 0);
    }
}

#[test]
fn checked_in_fixture_matches_capture() {
    let captured = capture_str_has_prefix_fixture_set(Some("fixed"));
    let expected: HashMap<_, _> = captured
        .cases
        .iter()
        .map(|c| (c.name.as_str(), c.expected_output.as_str()))
        .collect();

    let checked_in =
        FixtureSet::from_file(&fixture_dir().join("str_has_prefix.json")).expect("fixture parses");
    for case in &checked_in.cases {
        if let Some(want) = expected.get(case.name.as_str()) {
            assert_eq!(
                &case.expected_output.as_str(),
                want,
                "case {} drifted from capture",
                case.name
            );
        }
    }
    for name in expected.keys() {
        assert!(
            checked_in.cases.iter().any(|c| c.name == *name),
            "captured case {name} missing from checked-in fixture"
        );
    }
}

#[test]
fn logged_run_writes_valid_log_and_index() {
    let dir = std::env::temp_dir().join(format!(
        "fluentlibc-harness-test-{}",
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    let log_path = dir.join("run.jsonl");

    let mut emitter = LogEmitter::to_file(&log_path, "it-run").unwrap();
    let runner = TestRunner::new("fixtures", RuntimeMode::Strict);
    let mut total = 0;
    for set in load_all() {
        total += runner.run_logged(&set, &mut emitter).unwrap().len();
    }
    emitter.flush().unwrap();
    drop(emitter);

    let (lines, errors) = validate_log_file(&log_path).unwrap();
    assert_eq!(lines, total);
    assert!(errors.is_empty(), "log errors: {errors:?}");

    let mut index = ArtifactIndex::new("it-run");
    index.add_file(&log_path, "structured_log").unwrap();
    let data = std::fs::read(&log_path).unwrap();
    assert_eq!(index.artifacts[0].sha256, sha256_hex(&data));
    assert_eq!(index.artifacts[0].size_bytes, Some(data.len() as u64));

    std::fs::remove_dir_all(&dir).ok();
}
