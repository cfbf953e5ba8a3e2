//! Binary entrypoint for the metrics API.

use std::net::SocketAddr;
use std::sync::Arc;

use reliability_api::{app, AppState};
use reliability_engine::{telemetry, Config, Engine};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let config = Config::from_env()?;
  let port: u16 = std::env::var("PORT")
    .unwrap_or_else(|_| "5005".into())
    .parse()?;

  let engine = Engine::from_config(&config)?;
  let state = Arc::new(AppState { engine });

  let addr = SocketAddr::from(([127, 0, 0, 1], port));
  tracing::info!(
    %addr,
    source = %config.source_path.display(),
    "reliability-api listening"
  );

  let listener = tokio::net::TcpListener::bind(addr).await?;
  axum::serve(listener, app(state)).await?;

  Ok(())
}
