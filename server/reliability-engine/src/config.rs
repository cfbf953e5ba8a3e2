//! Engine configuration with sane defaults, overridable from the environment.

use std::path::{Path, PathBuf};

use crate::error::EngineError;

pub const ENV_SOURCE: &str = "RELIABILITY_SOURCE";
pub const ENV_SOURCE_FORMAT: &str = "RELIABILITY_SOURCE_FORMAT";
pub const ENV_CACHE: &str = "RELIABILITY_CACHE";

/// On-disk layout of the maintenance log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
  /// Header row followed by data rows.
  Csv,
  /// One JSON object per line.
  JsonLines,
}

impl SourceFormat {
  pub fn from_str_loose(s: &str) -> Option<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "csv" => Some(Self::Csv),
      "jsonl" | "ndjson" | "json" | "jsonlines" => Some(Self::JsonLines),
      _ => None,
    }
  }

  /// Infer from the file extension.
  pub fn from_path(path: &Path) -> Option<Self> {
    path
      .extension()
      .and_then(|e| e.to_str())
      .and_then(Self::from_str_loose)
  }
}

/// Where the maintenance log lives and how it is read.
#[derive(Debug, Clone)]
pub struct Config {
  /// Path of the backing table.
  pub source_path: PathBuf,
  /// Explicit format; inferred from the extension when `None`.
  pub source_format: Option<SourceFormat>,
  /// Reuse the parsed table while the file's content fingerprint is unchanged.
  pub cache_by_fingerprint: bool,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      source_path: PathBuf::from("data/maintenance.csv"),
      source_format: None,
      cache_by_fingerprint: true,
    }
  }
}

impl Config {
  /// Defaults overridden by `RELIABILITY_*` environment variables.
  pub fn from_env() -> Result<Self, EngineError> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  pub fn from_lookup<F>(lookup: F) -> Result<Self, EngineError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let mut config = Self::default();

    if let Some(path) = lookup(ENV_SOURCE).filter(|p| !p.trim().is_empty()) {
      config.source_path = PathBuf::from(path);
    }

    if let Some(fmt) = lookup(ENV_SOURCE_FORMAT) {
      let format = SourceFormat::from_str_loose(&fmt)
        .ok_or_else(|| EngineError::config(ENV_SOURCE_FORMAT, "expected csv|jsonl"))?;
      config.source_format = Some(format);
    }

    if let Some(flag) = lookup(ENV_CACHE) {
      config.cache_by_fingerprint = match flag.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => return Err(EngineError::config(ENV_CACHE, "expected true|false")),
      };
    }

    Ok(config)
  }

  /// Explicit format, else inferred from the path.
  pub fn resolved_format(&self) -> Result<SourceFormat, EngineError> {
    self
      .source_format
      .or_else(|| SourceFormat::from_path(&self.source_path))
      .ok_or_else(|| {
        EngineError::config(
          ENV_SOURCE_FORMAT,
          &format!("cannot infer format of {}", self.source_path.display()),
        )
      })
  }
}
