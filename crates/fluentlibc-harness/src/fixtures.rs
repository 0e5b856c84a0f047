//! Fixture loading and management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// A single fixture test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    /// Function being tested.
    pub function: String,
    /// Contract clause the case exercises.
    pub spec_section: String,
    /// Input parameters (serialized).
    pub inputs: serde_json::Value,
    /// Expected output (serialized as string for comparison).
    pub expected_output: String,
    /// Whether this tests strict, hardened or both behaviors.
    #[serde(default = "default_mode")]
    pub mode: String,
}

fn default_mode() -> String {
    "both".to_string()
}

/// A collection of fixture cases for a function family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Function family name.
    pub family: String,
    /// UTC timestamp of capture.
    pub captured_at: String,
    /// Individual test cases.
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Load fixture set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize fixture set to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load fixture set from a file path.
    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path).map_err(|e| HarnessError::io(path, e))?;
        Self::from_json(&content).map_err(|source| HarnessError::FixtureJson {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Collect fixture files: a single file, or every `*.json` in a directory
/// (sorted for deterministic runs).
pub fn discover_fixture_files(path: &Path) -> Result<Vec<PathBuf>, HarnessError> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    let entries = std::fs::read_dir(path).map_err(|e| HarnessError::io(path, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| HarnessError::io(path, e))?;
        let p = entry.path();
        if p.is_file() && p.extension().is_some_and(|ext| ext == "json") {
            files.push(p);
        }
    }
    files.sort();
    if files.is_empty() {
        return Err(HarnessError::NoFixtures(path.to_path_buf()));
    }
    Ok(files)
}
