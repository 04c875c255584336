pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::recommendation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/recommend", post(handlers::handle_recommend))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Any origin, method and header; credentials allowed.
        .layer(CorsLayer::very_permissive())
}
