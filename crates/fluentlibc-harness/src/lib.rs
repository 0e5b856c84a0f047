//! Conformance testing harness for fluentlibc.
//!
//! This crate provides:
//! - Fixture capture: record reference behavior as JSON fixture sets
//! - Fixture verify: run fixtures through core, ABI and host reference
//! - Structured logging: JSONL run logs with schema validation
//! - Report generation: human-readable + machine-readable conformance reports

#![forbid(unsafe_code)]

pub mod capture;
pub mod config;
pub mod diff;
pub mod error;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod structured_log;
pub mod verify;

pub use config::{HarnessConfig, RuntimeMode};
pub use error::HarnessError;
pub use fixtures::{FixtureCase, FixtureSet};
pub use report::ConformanceReport;
pub use runner::TestRunner;
pub use verify::{VerificationResult, VerificationSummary};
