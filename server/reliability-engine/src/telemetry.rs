//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const ENV_LOG: &str = "RELIABILITY_LOG";

static INIT: Once = Once::new();

/// Install a stderr fmt subscriber filtered by `RELIABILITY_LOG`
/// (e.g. `RELIABILITY_LOG=reliability_engine=debug`), defaulting to `info`.
///
/// Idempotent; later calls are no-ops.
pub fn init_tracing() {
  INIT.call_once(|| {
    let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
      .with(
        fmt::layer()
          .with_writer(std::io::stderr)
          .with_target(true),
      )
      .with(filter)
      .init();
  });
}
