//! API Routes
//!
//! Configures the Axum router with all coupon endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    applicable_handler, create_handler, health_handler, stats_handler, validate_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /coupons` - Create a coupon
/// - `POST /coupons/applicable` - List coupons applicable to a cart
/// - `POST /coupons/validate` - Validate and redeem a coupon
/// - `GET /stats` - Result cache statistics
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/coupons", post(create_handler))
        .route("/coupons/applicable", post(applicable_handler))
        .route("/coupons/validate", post(validate_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
