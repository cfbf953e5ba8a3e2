//! Data-access port: where raw tables come from.
//!
//! The engine only sees `TableSource`. Sources are re-read on every `load()`;
//! `FileSource` can reuse its last parse while the file's content fingerprint
//! is unchanged, which never serves stale data.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::config::{Config, SourceFormat};
use crate::error::EngineError;
use crate::fingerprint::{self, Fingerprint};
use crate::types::RawTable;

/// Anything that can hand the engine a fresh raw table.
pub trait TableSource: Send + Sync {
  fn load(&self) -> Result<Arc<RawTable>, EngineError>;

  /// Human-readable origin, for logs.
  fn describe(&self) -> String;
}

// ---------------------------------------------------------------------------
// In-memory source
// ---------------------------------------------------------------------------

/// A fixed table held in memory.
#[derive(Debug, Clone)]
pub struct MemorySource {
  table: Arc<RawTable>,
}

impl MemorySource {
  pub fn new(table: RawTable) -> Self {
    Self {
      table: Arc::new(table),
    }
  }
}

impl TableSource for MemorySource {
  fn load(&self) -> Result<Arc<RawTable>, EngineError> {
    Ok(Arc::clone(&self.table))
  }

  fn describe(&self) -> String {
    format!("memory ({} rows)", self.table.rows.len())
  }
}

// ---------------------------------------------------------------------------
// File source
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct CachedTable {
  fingerprint: Fingerprint,
  table: Arc<RawTable>,
}

/// A CSV or JSON-lines file, read in full on every load.
#[derive(Debug)]
pub struct FileSource {
  path: PathBuf,
  format: SourceFormat,
  cache: Option<Mutex<Option<CachedTable>>>,
}

impl FileSource {
  pub fn new(path: impl Into<PathBuf>, format: SourceFormat) -> Self {
    Self {
      path: path.into(),
      format,
      cache: None,
    }
  }

  /// Reuse the last parsed table while the content fingerprint matches.
  pub fn with_fingerprint_cache(mut self) -> Self {
    self.cache = Some(Mutex::new(None));
    self
  }

  pub fn from_config(config: &Config) -> Result<Self, EngineError> {
    let source = Self::new(&config.source_path, config.resolved_format()?);
    Ok(if config.cache_by_fingerprint {
      source.with_fingerprint_cache()
    } else {
      source
    })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  fn parse(&self, bytes: &[u8]) -> Result<RawTable, EngineError> {
    match self.format {
      SourceFormat::Csv => parse_csv(bytes),
      SourceFormat::JsonLines => parse_json_lines(bytes),
    }
  }
}

impl TableSource for FileSource {
  fn load(&self) -> Result<Arc<RawTable>, EngineError> {
    let bytes = fs::read(&self.path)
      .map_err(|e| EngineError::missing_source(self.path.display().to_string(), e))?;

    let cache = match &self.cache {
      Some(cache) => cache,
      None => return Ok(Arc::new(self.parse(&bytes)?)),
    };

    let fp = fingerprint::compute(&bytes);
    let mut slot = cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(cached) = slot.as_ref().filter(|c| c.fingerprint == fp) {
      tracing::debug!(fingerprint = %fp, "source unchanged, reusing parsed table");
      return Ok(Arc::clone(&cached.table));
    }

    let table = Arc::new(self.parse(&bytes)?);
    tracing::debug!(fingerprint = %fp, rows = table.rows.len(), "source parsed");
    *slot = Some(CachedTable {
      fingerprint: fp,
      table: Arc::clone(&table),
    });
    Ok(table)
  }

  fn describe(&self) -> String {
    self.path.display().to_string()
  }
}

// ---------------------------------------------------------------------------
// Parsers
// ---------------------------------------------------------------------------

/// First record is the header. Ragged rows are allowed; invalid UTF-8 is replaced.
pub fn parse_csv(bytes: &[u8]) -> Result<RawTable, EngineError> {
  let mut reader = csv::ReaderBuilder::new()
    .has_headers(true)
    .flexible(true)
    .from_reader(bytes);

  let headers: Vec<String> = reader
    .byte_headers()?
    .iter()
    .map(|h| String::from_utf8_lossy(h).into_owned())
    .collect();

  let mut rows = Vec::new();
  for record in reader.byte_records() {
    let record = record?;
    rows.push(
      record
        .iter()
        .map(|c| String::from_utf8_lossy(c).into_owned())
        .collect(),
    );
  }

  Ok(RawTable::new(headers, rows))
}

/// One JSON object per line (blank lines skipped), or a single JSON array of objects.
///
/// Columns are the union of keys in order of first appearance.
pub fn parse_json_lines(bytes: &[u8]) -> Result<RawTable, EngineError> {
  let text = String::from_utf8_lossy(bytes);

  let objects: Vec<serde_json::Map<String, Value>> = if text.trim_start().starts_with('[') {
    let values: Vec<Value> = serde_json::from_str(&text)?;
    values
      .into_iter()
      .enumerate()
      .map(|(i, v)| into_object(v, i + 1))
      .collect::<Result<_, _>>()?
  } else {
    text
      .lines()
      .enumerate()
      .filter(|(_, line)| !line.trim().is_empty())
      .map(|(i, line)| {
        let value: Value = serde_json::from_str(line.trim())
          .map_err(|e| EngineError::parse(format!("line {}: {}", i + 1, e)))?;
        into_object(value, i + 1)
      })
      .collect::<Result<_, _>>()?
  };

  let mut seen = HashSet::new();
  let mut headers = Vec::new();
  for obj in &objects {
    for key in obj.keys() {
      if seen.insert(key.clone()) {
        headers.push(key.clone());
      }
    }
  }

  let rows = objects
    .iter()
    .map(|obj| headers.iter().map(|h| cell_text(obj.get(h))).collect())
    .collect();

  Ok(RawTable::new(headers, rows))
}

fn into_object(value: Value, position: usize) -> Result<serde_json::Map<String, Value>, EngineError> {
  match value {
    Value::Object(map) => Ok(map),
    _ => Err(EngineError::parse(format!(
      "record {}: expected a JSON object",
      position
    ))),
  }
}

fn cell_text(value: Option<&Value>) -> String {
  match value {
    None | Some(Value::Null) => String::new(),
    Some(Value::String(s)) => s.clone(),
    Some(other) => other.to_string(),
  }
}
