//! radulator-server
//!
//! JSON HTTP surface over the calculator registry.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::middleware as axum_mw;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use state::AppState;

/// Build the application router.
pub fn router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/calculators", get(routes::calculators::list_calculators))
        .route("/calculators/{id}", get(routes::calculators::get_calculator))
        .route(
            "/calculators/{id}/visibility",
            post(routes::calculators::visible_fields),
        )
        .route(
            "/calculators/{id}/compute",
            post(routes::calculators::compute),
        )
        .route("/categories", get(routes::catalog::list_categories))
        .route("/categories/{name}", get(routes::catalog::get_category))
        .route("/tags", get(routes::catalog::list_tags))
        .layer(
            ServiceBuilder::new()
                .layer(axum_mw::from_fn(middleware::request_log::request_log))
                .layer(cors),
        )
        .with_state(state)
}
