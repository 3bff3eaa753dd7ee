use axum::Router;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::AppConfig;
use crate::routes::{system_routes, time_routes};
use crate::state::AppState;

/// Build the complete Axum application:
/// - /setTime, /getTime  (the timestamp store)
/// - /system             (alive + version + ready)
pub fn build_app(state: AppState, cfg: AppConfig) -> Router {
    Router::new()
        .merge(time_routes::routes(state.clone()))
        .nest("/system", system_routes::routes(cfg, state.store))
        // Logging middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
