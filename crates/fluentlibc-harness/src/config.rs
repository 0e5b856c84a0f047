//! Harness configuration.
//!
//! Resolution order: built-in defaults, then environment, then CLI flags.
//! - `FLUENTLIBC_MODE`: `strict` (default) or `hardened`.
//! - `FLUENTLIBC_FIXTURE_DIR`: fixture directory (default `tests/conformance/fixtures`).
//! - `FLUENTLIBC_LOG`: optional structured JSONL log path.

use std::path::PathBuf;

pub const MODE_ENV: &str = "FLUENTLIBC_MODE";
pub const FIXTURE_DIR_ENV: &str = "FLUENTLIBC_FIXTURE_DIR";
pub const LOG_ENV: &str = "FLUENTLIBC_LOG";
pub const DEFAULT_FIXTURE_DIR: &str = "tests/conformance/fixtures";

/// Runtime mode a conformance campaign is labelled with.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuntimeMode {
    /// ABI-compatible behavior.
    #[default]
    Strict,
    /// Opt-in hardened behavior.
    Hardened,
}

impl RuntimeMode {
    /// Parse from string (case-insensitive). Unknown values fall back to strict.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "hardened" | "repair" | "full" => Self::Hardened,
            _ => Self::Strict,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Hardened => "hardened",
        }
    }
}

/// Resolved harness settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub mode: RuntimeMode,
    pub fixture_dir: PathBuf,
    pub log_path: Option<PathBuf>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            mode: RuntimeMode::Strict,
            fixture_dir: PathBuf::from(DEFAULT_FIXTURE_DIR),
            log_path: None,
        }
    }
}

impl HarnessConfig {
    /// Defaults overridden by the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(mode) = lookup(MODE_ENV) {
            config.mode = RuntimeMode::from_str_loose(&mode);
        }
        if let Some(dir) = lookup(FIXTURE_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            config.fixture_dir = PathBuf::from(dir);
        }
        if let Some(log) = lookup(LOG_ENV).filter(|v| !v.trim().is_empty()) {
            config.log_path = Some(PathBuf::from(log));
        }
        config
    }

    /// Apply CLI overrides; `None` keeps the current value.
    #[must_use]
    pub fn with_overrides(
        mut self,
        mode: Option<&str>,
        fixture_dir: Option<PathBuf>,
        log_path: Option<PathBuf>,
    ) -> Self {
        if let Some(mode) = mode {
            self.mode = RuntimeMode::from_str_loose(mode);
        }
        if let Some(dir) = fixture_dir {
            self.fixture_dir = dir;
        }
        if log_path.is_some() {
            self.log_path = log_path;
        }
        self
    }
}
