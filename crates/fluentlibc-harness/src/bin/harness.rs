//! CLI entrypoint for the fluentlibc conformance harness.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};

use fluentlibc_harness::capture::capture_str_has_prefix_fixture_set;
use fluentlibc_harness::diff::render_diff;
use fluentlibc_harness::fixtures::discover_fixture_files;
use fluentlibc_harness::structured_log::{
    ArtifactIndex, LogEmitter, LogEntry, LogLevel, Outcome, StreamKind, now_utc, validate_log_file,
};
use fluentlibc_harness::{
    ConformanceReport, FixtureSet, HarnessConfig, HarnessError, TestRunner, VerificationSummary,
};

/// Conformance tooling for fluentlibc.
#[derive(Debug, Parser)]
#[command(name = "fluentlibc-harness")]
#[command(about = "Conformance testing harness for fluentlibc")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Verify core, ABI and host reference against fixture files.
    Verify {
        /// Fixture file or directory of fixture JSON files
        /// (default: $FLUENTLIBC_FIXTURE_DIR or tests/conformance/fixtures).
        #[arg(long)]
        fixture: Option<PathBuf>,
        /// Runtime mode label (strict or hardened; default: $FLUENTLIBC_MODE).
        #[arg(long)]
        mode: Option<String>,
        /// Output report path (markdown).
        #[arg(long)]
        report: Option<PathBuf>,
        /// Output report path (JSON).
        #[arg(long)]
        report_json: Option<PathBuf>,
        /// Structured JSONL log path (default: $FLUENTLIBC_LOG).
        #[arg(long)]
        log: Option<PathBuf>,
        /// Artifact index path linking the log to written reports.
        #[arg(long)]
        artifact_index: Option<PathBuf>,
        /// Optional fixed timestamp string for deterministic report generation.
        #[arg(long)]
        timestamp: Option<String>,
    },
    /// Write the canonical str_has_prefix fixture set.
    Capture {
        /// Output fixture path.
        #[arg(long)]
        output: PathBuf,
        /// Optional fixed capture timestamp.
        #[arg(long)]
        timestamp: Option<String>,
    },
    /// Render a diff between expected and actual text values.
    Diff {
        #[arg(long)]
        expected: String,
        #[arg(long)]
        actual: String,
    },
    /// Validate a structured JSONL log file.
    ValidateLog {
        #[arg(long)]
        log: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("harness: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), HarnessError> {
    match command {
        Command::Verify {
            fixture,
            mode,
            report,
            report_json,
            log,
            artifact_index,
            timestamp,
        } => {
            let config = HarnessConfig::from_env().with_overrides(mode.as_deref(), fixture, log);
            verify(
                &config,
                report.as_deref(),
                report_json.as_deref(),
                artifact_index.as_deref(),
                timestamp,
            )
        }
        Command::Capture { output, timestamp } => {
            let set = capture_str_has_prefix_fixture_set(timestamp.as_deref());
            write_file(&output, &set.to_json()?)?;
            println!("wrote {} cases to {}", set.cases.len(), output.display());
            Ok(())
        }
        Command::Diff { expected, actual } => {
            println!("{}", render_diff(&expected, &actual));
            Ok(())
        }
        Command::ValidateLog { log } => {
            let (lines, errors) = validate_log_file(&log).map_err(|e| HarnessError::io(&log, e))?;
            for err in &errors {
                eprintln!("{err}");
            }
            if errors.is_empty() {
                println!("{}: {lines} valid entries", log.display());
                Ok(())
            } else {
                Err(HarnessError::InvalidLog {
                    path: log,
                    count: errors.len(),
                })
            }
        }
    }
}

fn verify(
    config: &HarnessConfig,
    report_md: Option<&Path>,
    report_json: Option<&Path>,
    artifact_index: Option<&Path>,
    timestamp: Option<String>,
) -> Result<(), HarnessError> {
    let started = Instant::now();
    let run_id = format!("verify-{}", std::process::id());
    let mut emitter = match &config.log_path {
        Some(path) => LogEmitter::to_file(path, &run_id).map_err(|e| HarnessError::io(path, e))?,
        None => LogEmitter::sink(&run_id),
    };
    let log_err =
        |e: std::io::Error| HarnessError::io(config.log_path.clone().unwrap_or_default(), e);

    emitter
        .emit_entry(
            LogEntry::new("", LogLevel::Info, "run_start")
                .with_stream(StreamKind::Conformance)
                .with_mode(config.mode.as_str())
                .with_details(serde_json::json!({
                    "fixture": config.fixture_dir.display().to_string(),
                })),
        )
        .map_err(log_err)?;

    let runner = TestRunner::new("fixtures", config.mode);
    let mut results = Vec::new();
    for path in discover_fixture_files(&config.fixture_dir)? {
        let set = FixtureSet::from_file(&path)?;
        results.extend(runner.run_logged(&set, &mut emitter).map_err(log_err)?);
    }

    let summary = VerificationSummary::from_results(results);
    let report = ConformanceReport {
        title: "fluentlibc conformance".to_string(),
        mode: config.mode.as_str().to_string(),
        timestamp: timestamp.unwrap_or_else(now_utc),
        summary,
    };

    let markdown = report.to_markdown();
    println!("{markdown}");

    let mut written = Vec::new();
    if let Some(path) = report_md {
        write_file(path, &markdown)?;
        written.push((path, "report_markdown"));
    }
    if let Some(path) = report_json {
        write_file(path, &report.to_json())?;
        written.push((path, "report_json"));
    }

    let (level, outcome) = if report.summary.all_passed() {
        (LogLevel::Info, Outcome::Pass)
    } else {
        (LogLevel::Error, Outcome::Fail)
    };
    emitter
        .emit_entry(
            LogEntry::new("", level, "run_summary")
                .with_stream(StreamKind::Conformance)
                .with_mode(config.mode.as_str())
                .with_outcome(outcome)
                .with_duration_ms(u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX))
                .with_artifacts(written.iter().map(|(p, _)| p.display().to_string()).collect())
                .with_details(serde_json::json!({
                    "total": report.summary.total,
                    "passed": report.summary.passed,
                    "failed": report.summary.failed,
                    "parity_mismatches": report.summary.parity_mismatches,
                })),
        )
        .map_err(log_err)?;
    emitter.flush().map_err(log_err)?;

    if let Some(index_path) = artifact_index {
        let mut index = ArtifactIndex::new(emitter.run_id());
        if let Some(log_path) = &config.log_path {
            index
                .add_file(log_path, "structured_log")
                .map_err(|e| HarnessError::io(log_path, e))?;
        }
        for (path, kind) in &written {
            index
                .add_file(path, *kind)
                .map_err(|e| HarnessError::io(*path, e))?;
        }
        write_file(index_path, &index.to_json()?)?;
    }

    if report.summary.all_passed() {
        Ok(())
    } else {
        Err(HarnessError::CasesFailed {
            failed: report.summary.failed,
            total: report.summary.total,
        })
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), HarnessError> {
    std::fs::write(path, contents).map_err(|e| HarnessError::io(path, e))
}
