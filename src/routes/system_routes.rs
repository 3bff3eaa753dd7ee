use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::config::AppConfig;
use crate::state::TimestampStore;

#[derive(Clone)]
struct SystemState {
    config: AppConfig,
    store: TimestampStore,
}

pub fn routes(config: AppConfig, store: TimestampStore) -> Router {
    Router::new()
        .route("/alive", get(is_alive))
        .route("/version", get(version))
        .route("/ready", get(ready))
        .with_state(SystemState { config, store })
}

/// GET /system/alive
async fn is_alive() -> &'static str {
    "OK"
}

/// GET /system/version
async fn version(State(state): State<SystemState>) -> Json<serde_json::Value> {
    Json(json!({
        "version": state.config.server_version,
        "wire_format": state.config.wire_format,
    }))
}

/// GET /system/ready
async fn ready(State(state): State<SystemState>) -> (StatusCode, &'static str) {
    if state.store.is_running() {
        (StatusCode::OK, "READY")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "NOT READY")
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::state::store::DEFAULT_MAILBOX_CAPACITY;

    async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
        let res = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_ready_tracks_store_lifecycle() {
        let store = TimestampStore::new(DEFAULT_MAILBOX_CAPACITY);
        let app = routes(AppConfig::default(), store.clone());

        let (status, body) = get_body(app.clone(), "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body, "NOT READY");

        store.start().await.unwrap();

        let (status, body) = get_body(app, "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "READY");
    }

    #[tokio::test]
    async fn test_alive_and_version() {
        let config = AppConfig {
            server_version: "9.9.9".to_string(),
            ..AppConfig::default()
        };
        let app = routes(config, TimestampStore::new(DEFAULT_MAILBOX_CAPACITY));

        let (status, body) = get_body(app.clone(), "/alive").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");

        let (status, body) = get_body(app, "/version").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json, json!({ "version": "9.9.9", "wire_format": "text" }));
    }
}
