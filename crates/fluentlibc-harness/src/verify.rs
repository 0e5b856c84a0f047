//! Per-case verdicts and run totals.
//!
//! A case passes when the core output equals the fixture expectation and the
//! exported C symbol agrees with the core. Host-libc disagreement is recorded
//! but does not fail the case: the host is a reference, not the contract.

use serde::{Deserialize, Serialize};

/// Verdict for one fixture case under one runtime mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Case name, suffixed with the active mode for `both` fixtures.
    pub case_name: String,
    /// Contract clause the case exercises.
    pub section: String,
    /// Runtime mode label the case ran under.
    pub mode: String,
    pub passed: bool,
    pub expected: String,
    /// Core output.
    pub actual: String,
    /// ABI export agreed with the core.
    pub abi_parity: bool,
    /// Host libc reference agreed with the core.
    pub host_parity: bool,
    /// Rendered diff and parity notes, if anything disagreed.
    pub diff: Option<String>,
}

impl VerificationResult {
    /// Passed, but the host reference disagreed.
    #[must_use]
    pub fn host_divergent(&self) -> bool {
        self.passed && !self.host_parity
    }
}

/// Totals for a verification run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Cases where the ABI or host reference disagreed with the core.
    pub parity_mismatches: usize,
    pub results: Vec<VerificationResult>,
}

impl VerificationSummary {
    #[must_use]
    pub fn from_results(results: Vec<VerificationResult>) -> Self {
        let passed = results.iter().filter(|r| r.passed).count();
        let parity_mismatches = results
            .iter()
            .filter(|r| !r.abi_parity || !r.host_parity)
            .count();
        Self {
            total: results.len(),
            passed,
            failed: results.len() - passed,
            parity_mismatches,
            results,
        }
    }

    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Results worth showing in detail: failures and host divergences.
    pub fn flagged(&self) -> impl Iterator<Item = &VerificationResult> {
        self.results
            .iter()
            .filter(|r| !r.passed || r.host_divergent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, passed: bool, host_parity: bool) -> VerificationResult {
        VerificationResult {
            case_name: name.to_string(),
            section: "str_has_prefix".to_string(),
            mode: "strict".to_string(),
            passed,
            expected: "true".to_string(),
            actual: if passed { "true" } else { "false" }.to_string(),
            abi_parity: true,
            host_parity,
            diff: (!passed || !host_parity).then(|| "note".to_string()),
        }
    }

    #[test]
    fn summary_counts() {
        let summary = VerificationSummary::from_results(vec![
            result("a", true, true),
            result("b", false, true),
            result("c", true, false),
        ]);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.parity_mismatches, 1);
        assert!(!summary.all_passed());
        let flagged: Vec<_> = summary.flagged().map(|r| r.case_name.as_str()).collect();
        assert_eq!(flagged, ["b", "c"]);
    }

    #[test]
    fn host_divergence_does_not_fail() {
        let r = result("c", true, false);
        assert!(r.host_divergent());
        assert!(VerificationSummary::from_results(vec![r]).all_passed());
    }

    #[test]
    fn host_divergent_pass_is_flagged_without_diff() {
        let mut r = result("d", true, false);
        r.diff = None;
        let summary = VerificationSummary::from_results(vec![r, result("e", true, true)]);
        let flagged: Vec<_> = summary.flagged().map(|r| r.case_name.as_str()).collect();
        assert_eq!(flagged, ["d"]);
    }

    #[test]
    fn empty_summary_passes() {
        assert!(VerificationSummary::from_results(Vec::new()).all_passed());
    }
}
