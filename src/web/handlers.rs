//! HTTP handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::{debug, error};

use crate::engine::Engine;
use crate::error::EngineError;

/// Shared application state
pub type AppState = Arc<Engine>;

/// Request body for one operation
#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    /// Operation name, e.g. "zadd"
    pub method: String,
    /// Positional arguments
    #[serde(default)]
    pub args: Vec<JsonValue>,
}

/// Successful call
#[derive(Debug, Serialize)]
pub struct RpcResponse {
    pub result: JsonValue,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    kind: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

fn status_for(err: &EngineError) -> StatusCode {
    match err {
        EngineError::UnsupportedOperation(_) => StatusCode::NOT_FOUND,
        EngineError::WrongType { .. }
        | EngineError::WrongArity(_)
        | EngineError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
    }
}

fn error_response(status: StatusCode, kind: &'static str, message: String) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: ErrorBody { kind, message },
        }),
    )
        .into_response()
}

/// Execute one operation
pub async fn execute_rpc(
    State(engine): State<AppState>,
    Json(req): Json<RpcRequest>,
) -> Response {
    debug!("Executing {} over HTTP", req.method);

    let outcome =
        tokio::task::spawn_blocking(move || engine.execute(&req.method, &req.args)).await;

    match outcome {
        Ok(Ok(result)) => (StatusCode::OK, Json(RpcResponse { result })).into_response(),
        Ok(Err(e)) => error_response(status_for(&e), e.kind(), e.to_string()),
        Err(e) => {
            error!("Request task failed: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal",
                "request task failed".to_string(),
            )
        }
    }
}

/// Key counts
pub async fn stats_handler(State(engine): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(engine.stats()))
}
