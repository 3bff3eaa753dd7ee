use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::Response,
    routing::{get, post},
    Router,
};

use crate::codec;
use crate::errors::ApiError;
use crate::services::time_service;
use crate::state::AppState;

/// Build the time routes:
/// - POST /setTime
/// - GET  /getTime
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/setTime", post(set_time).fallback(method_not_allowed))
        .route("/getTime", get(get_time).fallback(method_not_allowed))
        .with_state(state)
}

//
// ─────────────────────────────────────────────────────────────
// POST /setTime
// Replace the stored time with the one in the body
// ─────────────────────────────────────────────────────────────
//
async fn set_time(State(state): State<AppState>, body: Bytes) -> Result<StatusCode, ApiError> {
    let value = codec::decode(state.format, &body)?;
    time_service::set(&state.store, value).await?;
    Ok(StatusCode::OK)
}

//
// ─────────────────────────────────────────────────────────────
// GET /getTime
// Return the stored time in the configured format
// ─────────────────────────────────────────────────────────────
//
async fn get_time(State(state): State<AppState>) -> Result<Response, ApiError> {
    let value = time_service::get(&state.store).await?;
    Ok(codec::into_response(state.format, value))
}

async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::MethodNotAllowed(method)
}
