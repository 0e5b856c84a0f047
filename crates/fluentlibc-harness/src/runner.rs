//! Test execution engine.

use std::io::Write;
use std::time::Instant;

use fluentlibc_conformance::execute_fixture_case;

use crate::config::RuntimeMode;
use crate::diff;
use crate::fixtures::{FixtureCase, FixtureSet};
use crate::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome, StreamKind};
use crate::verify::VerificationResult;

/// Runs a fixture set and collects verification results.
pub struct TestRunner {
    /// Name of the test campaign.
    pub campaign: String,
    /// Mode being tested.
    pub mode: RuntimeMode,
}

impl TestRunner {
    #[must_use]
    pub fn new(campaign: impl Into<String>, mode: RuntimeMode) -> Self {
        Self {
            campaign: campaign.into(),
            mode,
        }
    }

    /// Run all fixtures in a set and return results.
    pub fn run(&self, fixture_set: &FixtureSet) -> Vec<VerificationResult> {
        self.matching_cases(fixture_set)
            .map(|case| self.verify_case(case).0)
            .collect()
    }

    /// Run all fixtures, emitting one structured log entry per case.
    pub fn run_logged<W: Write>(
        &self,
        fixture_set: &FixtureSet,
        emitter: &mut LogEmitter<W>,
    ) -> std::io::Result<Vec<VerificationResult>> {
        let mut results = Vec::new();
        for case in self.matching_cases(fixture_set) {
            let (result, latency_ns) = self.verify_case(case);
            let (level, outcome) = if result.passed {
                (LogLevel::Info, Outcome::Pass)
            } else {
                (LogLevel::Error, Outcome::Fail)
            };
            let mut entry = LogEntry::new("", level, "case_result")
                .with_stream(StreamKind::Conformance)
                .with_mode(self.mode.as_str())
                .with_api(fixture_set.family.as_str(), case.function.as_str())
                .with_case(result.case_name.as_str())
                .with_outcome(outcome)
                .with_latency_ns(latency_ns);
            if let Some(diff) = &result.diff {
                entry = entry.with_details(serde_json::json!({
                    "campaign": self.campaign,
                    "expected": result.expected,
                    "actual": result.actual,
                    "diff": diff,
                    "abi_parity": result.abi_parity,
                    "host_parity": result.host_parity,
                }));
            }
            emitter.emit_entry(entry)?;
            results.push(result);
        }
        Ok(results)
    }

    fn matching_cases<'a>(
        &'a self,
        fixture_set: &'a FixtureSet,
    ) -> impl Iterator<Item = &'a FixtureCase> + 'a {
        fixture_set
            .cases
            .iter()
            .filter(move |case| mode_matches(self.mode, &case.mode))
    }

    fn verify_case(&self, case: &FixtureCase) -> (VerificationResult, u64) {
        let started = Instant::now();
        let outcome = execute_case(case, self.mode);
        let latency_ns = u64::try_from(started.elapsed().as_nanos()).unwrap_or(u64::MAX);
        let case_name = if case.mode.eq_ignore_ascii_case("both") {
            format!("{} [{}]", case.name, self.mode.as_str())
        } else {
            case.name.clone()
        };
        let result = VerificationResult {
            case_name,
            section: case.spec_section.clone(),
            mode: self.mode.as_str().to_string(),
            passed: outcome.abi_parity && outcome.actual == case.expected_output,
            expected: case.expected_output.clone(),
            actual: outcome.actual,
            abi_parity: outcome.abi_parity,
            host_parity: outcome.host_parity,
            diff: outcome.diff,
        };
        (result, latency_ns)
    }
}

fn mode_matches(active: RuntimeMode, case_mode: &str) -> bool {
    let case = case_mode.to_ascii_lowercase();
    case == active.as_str() || case == "both"
}

struct CaseOutcome {
    actual: String,
    abi_parity: bool,
    host_parity: bool,
    diff: Option<String>,
}

fn execute_case(case: &FixtureCase, mode: RuntimeMode) -> CaseOutcome {
    match execute_fixture_case(&case.function, &case.inputs, mode.as_str()) {
        Ok(run) => {
            let mut notes = Vec::new();
            if !run.abi_parity {
                notes.push(format!(
                    "abi parity mismatch: abi={}, impl={}",
                    run.abi_output, run.impl_output
                ));
            }
            if !run.host_parity {
                notes.push(format!(
                    "host parity mismatch: host={}, impl={}",
                    run.host_output, run.impl_output
                ));
            }

            let diff = if run.impl_output != case.expected_output {
                let mut d = diff::render_diff(&case.expected_output, &run.impl_output);
                for note in &notes {
                    d.push_str(note);
                    d.push('\n');
                }
                Some(d)
            } else if !notes.is_empty() {
                Some(notes.join("\n"))
            } else {
                None
            };

            CaseOutcome {
                actual: run.impl_output,
                abi_parity: run.abi_parity,
                host_parity: run.host_parity,
                diff,
            }
        }
        Err(err) => {
            let actual = format!("unsupported:{err}");
            CaseOutcome {
                diff: Some(diff::render_diff(&case.expected_output, &actual)),
                actual,
                abi_parity: false,
                host_parity: false,
            }
        }
    }
}
