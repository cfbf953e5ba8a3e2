//! Shared application state.

use reliability_engine::{Engine, FileSource};

/// Holds the engine only; every request re-reads the source through it.
pub struct AppState {
  pub engine: Engine<FileSource>,
}
