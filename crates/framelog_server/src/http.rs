//! HTTP wiring for the produce/consume server.
//!
//! Routes mirror the original transport: `POST /` produces a record,
//! `GET /` consumes one; both carry JSON bodies.

use crate::api::{ConsumeRequest, ProduceRequest};
use crate::error::ServerError;
use crate::server::LogServer;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use framelog_core::Log;
use std::sync::Arc;
use tokio::net::TcpListener;

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::OffsetNotFound(_) => StatusCode::NOT_FOUND,
            e if e.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

async fn produce(
    State(server): State<Arc<LogServer>>,
    Json(request): Json<ProduceRequest>,
) -> Result<impl IntoResponse, ServerError> {
    let response = server.handle_produce(request)?;
    Ok(Json(response))
}

async fn consume(
    State(server): State<Arc<LogServer>>,
    Json(request): Json<ConsumeRequest>,
) -> Result<impl IntoResponse, ServerError> {
    let response = server.handle_consume(request)?;
    Ok(Json(response))
}

/// Builds the router for a produce/consume server over the given log.
pub fn router(log: Arc<Log>) -> Router {
    let server = Arc::new(LogServer::new(log));

    Router::new()
        .route("/", post(produce).get(consume))
        .with_state(server)
}

/// Serves the produce/consume API on the given listener until the task is
/// cancelled or the listener fails.
///
/// # Errors
///
/// Returns an error if accepting connections fails.
pub async fn serve(listener: TcpListener, log: Arc<Log>) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "serving produce/consume API");
    }

    axum::serve(listener, router(log)).await
}
