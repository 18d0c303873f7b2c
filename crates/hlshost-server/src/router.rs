//! Axum router construction.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::context::AppContext;
use crate::routes;

/// Build the complete Axum router.
pub fn build_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/status", get(routes::admin::status))
        .route("/reload", post(routes::admin::reload))
        .route("/{mode}/playlist.m3u8", get(routes::playlist::master_playlist))
        .route(
            "/{mode}/{index}/playlist.m3u8",
            get(routes::playlist::media_playlist),
        )
        .route("/{mode}/{index}/{segment}", get(routes::playlist::segment))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
