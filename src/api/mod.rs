//! API Module
//!
//! HTTP handlers and routing for the coupon REST API.
//!
//! # Endpoints
//! - `POST /coupons` - Create a coupon
//! - `POST /coupons/applicable` - List coupons applicable to a cart
//! - `POST /coupons/validate` - Validate and redeem a coupon
//! - `GET /stats` - Result cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
