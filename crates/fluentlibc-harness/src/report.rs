//! Conformance report rendering (markdown and JSON).

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::verify::VerificationSummary;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConformanceReport {
    pub title: String,
    /// Runtime mode label of the run.
    pub mode: String,
    /// UTC timestamp.
    pub timestamp: String,
    pub summary: VerificationSummary,
}

fn mark(ok: bool) -> &'static str {
    if ok { "ok" } else { "MISMATCH" }
}

impl ConformanceReport {
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let s = &self.summary;
        let mut out = String::new();
        let _ = writeln!(out, "# {}\n", self.title);
        let _ = writeln!(out, "- Mode: {}", self.mode);
        let _ = writeln!(out, "- Timestamp: {}", self.timestamp);
        let _ = writeln!(
            out,
            "- Cases: {} total, {} passed, {} failed",
            s.total, s.passed, s.failed
        );
        let _ = writeln!(out, "- Parity mismatches: {}\n", s.parity_mismatches);

        out.push_str("| Case | Section | Result | ABI | Host |\n");
        out.push_str("|------|---------|--------|-----|------|\n");
        for r in &s.results {
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} | {} |",
                r.case_name,
                r.section,
                if r.passed { "PASS" } else { "FAIL" },
                mark(r.abi_parity),
                mark(r.host_parity),
            );
        }

        let mut flagged = s.flagged().peekable();
        if flagged.peek().is_some() {
            out.push_str("\n## Details\n");
            for r in flagged {
                let _ = writeln!(out, "\n### {}\n\n```diff", r.case_name);
                out.push_str(r.diff.as_deref().unwrap_or(""));
                if !out.ends_with('\n') {
                    out.push('\n');
                }
                out.push_str("```\n");
            }
        }
        out
    }

    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::VerificationResult;

    fn report(passed: bool, host_parity: bool) -> ConformanceReport {
        ConformanceReport {
            title: "fluentlibc conformance".to_string(),
            mode: "strict".to_string(),
            timestamp: "2026-10-15T00:00:00Z".to_string(),
            summary: VerificationSummary::from_results(vec![VerificationResult {
                case_name: "secure_url".to_string(),
                section: "str_has_prefix: matching prefix".to_string(),
                mode: "strict".to_string(),
                passed,
                expected: "true".to_string(),
                actual: if passed { "true" } else { "false" }.to_string(),
                abi_parity: true,
                host_parity,
                diff: (!passed || !host_parity).then(|| "-true\n+false\n".to_string()),
            }]),
        }
    }

    #[test]
    fn markdown_lists_cases() {
        let md = report(true, true).to_markdown();
        assert!(md.starts_with("# fluentlibc conformance"));
        assert!(md.contains("- Cases: 1 total, 1 passed, 0 failed"));
        assert!(md.contains("| secure_url | str_has_prefix: matching prefix | PASS | ok | ok |"));
        assert!(!md.contains("## Details"));
    }

    #[test]
    fn markdown_includes_failure_details() {
        let md = report(false, true).to_markdown();
        assert!(md.contains("| FAIL |"));
        assert!(md.contains("### secure_url"));
        assert!(md.contains("+false"));
    }

    #[test]
    fn host_mismatch_is_reported() {
        let md = report(true, false).to_markdown();
        assert!(md.contains("- Parity mismatches: 1"));
        assert!(md.contains("| PASS | ok | MISMATCH |"));
        assert!(md.contains("## Details"));
    }

    #[test]
    fn json_round_trips() {
        let json = report(true, true).to_json();
        let back: ConformanceReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.summary.total, 1);
        assert_eq!(back.mode, "strict");
    }
}
