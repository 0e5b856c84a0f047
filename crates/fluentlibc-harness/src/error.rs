//! Harness error type.

use std::path::PathBuf;

use fluentlibc_conformance::ExecError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid fixture JSON in {}: {source}", .path.display())]
    FixtureJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Exec(#[from] ExecError),
    #[error("no fixture files found under {}", .0.display())]
    NoFixtures(PathBuf),
    #[error("{failed} of {total} conformance cases failed")]
    CasesFailed { failed: usize, total: usize },
    #[error("structured log {} has {count} schema violations", .path.display())]
    InvalidLog { path: PathBuf, count: usize },
}

impl HarnessError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
