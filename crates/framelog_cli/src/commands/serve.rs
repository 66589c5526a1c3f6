//! Serve command implementation.

use framelog_core::Log;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Runs the produce/consume HTTP server until interrupted.
pub fn run(addr: &str, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let log = Arc::new(Log::open(path)?);
    tracing::info!(path = %path.display(), records = log.len(), "opened log");

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let listener = TcpListener::bind(addr).await?;
        framelog_server::http::serve(listener, log).await
    })?;

    Ok(())
}
