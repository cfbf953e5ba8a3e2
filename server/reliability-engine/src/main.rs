//! Binary entrypoint: run one query against a source file, print JSON to stdout.
//!
//! Usage:
//!   reliability-engine <query> [source-path]
//!
//! Queries: mttf, mttr, availability, failures, subsystem-count, availability-mean.
//! Without a path, the source comes from `RELIABILITY_SOURCE` (see `Config`).
//!
//! Exit codes: 0 on success, 1 with an ErrorOutput on stdout when the query
//! fails, 2 on usage errors.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use reliability_engine::telemetry;
use reliability_engine::{Config, Engine, EngineError, ErrorOutput, Query, SourceFormat};

fn main() {
  telemetry::init_tracing();

  let args: Vec<String> = std::env::args().skip(1).collect();
  let query = match args.first().and_then(|a| Query::from_str_loose(a)) {
    Some(q) => q,
    None => {
      let _ = writeln!(
        io::stderr(),
        "usage: reliability-engine <mttf|mttr|availability|failures|subsystem-count|availability-mean> [source-path]"
      );
      process::exit(2);
    }
  };

  if let Err(e) = run_binary(query, args.get(1).map(PathBuf::from)) {
    let err = ErrorOutput::from(&e);
    let mut out = io::stdout().lock();
    let _ = serde_json::to_writer(&mut out, &err);
    let _ = writeln!(out);
    process::exit(1);
  }
}

fn run_binary(query: Query, path: Option<PathBuf>) -> Result<(), EngineError> {
  let mut config = Config::from_env()?;
  if let Some(path) = path {
    config.source_format = SourceFormat::from_path(&path).or(config.source_format);
    config.source_path = path;
  }

  let engine = Engine::from_config(&config)?;
  let output = engine.run(query)?;

  let mut out = io::stdout().lock();
  serde_json::to_writer(&mut out, &output)?;
  writeln!(out)?;
  Ok(())
}
