//! API Handlers
//!
//! HTTP request handlers for each coupon endpoint. They only translate
//! between JSON and the engine.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::config::Config;
use crate::domain::{Coupon, NewCoupon};
use crate::engine::CouponEngine;
use crate::error::{CouponError, Result};
use crate::models::{
    ApplicableCouponsRequest, HealthResponse, StatsResponse, ValidateCouponRequest,
    ValidateCouponResponse,
};
use crate::repository::CouponRepository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<CouponEngine>,
}

impl AppState {
    pub fn new(engine: CouponEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Creates an engine over `repository` with cache size and deadline
    /// from the Config.
    pub fn from_config(config: &Config, repository: Arc<dyn CouponRepository>) -> Self {
        Self::new(CouponEngine::from_config(repository, config))
    }
}

/// Handler for POST /coupons/applicable
pub async fn applicable_handler(
    State(state): State<AppState>,
    Json(req): Json<ApplicableCouponsRequest>,
) -> Result<Json<Vec<Coupon>>> {
    let (cart, at) = req.into_parts();
    let coupons = state.engine.get_applicable_coupons(&cart, &at).await?;
    Ok(Json(coupons))
}

/// Handler for POST /coupons/validate
///
/// Unknown or inapplicable coupons answer 200 with `valid: false`.
pub async fn validate_handler(
    State(state): State<AppState>,
    Json(req): Json<ValidateCouponRequest>,
) -> Result<Json<ValidateCouponResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CouponError::InvalidRequest(error_msg));
    }

    let at = req.evaluation_time();
    let outcome = state
        .engine
        .validate_coupon(&req.code, &req.cart, &at)
        .await?;

    Ok(Json(ValidateCouponResponse::from(outcome)))
}

/// Handler for POST /coupons
pub async fn create_handler(
    State(state): State<AppState>,
    Json(req): Json<NewCoupon>,
) -> Result<(StatusCode, Json<Coupon>)> {
    let coupon = state.engine.create_coupon(req).await?;
    Ok((StatusCode::CREATED, Json(coupon)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.engine.cache_stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Cart, CartItem, DiscountType};
    use crate::repository::InMemoryRepository;
    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;

    fn state() -> AppState {
        AppState::from_config(&Config::default(), Arc::new(InMemoryRepository::new()))
    }

    fn new_coupon(code: &str) -> NewCoupon {
        let now = Utc::now();
        NewCoupon {
            code: code.to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: dec!(10),
            min_order_value: dec!(100),
            max_discount: dec!(50),
            start_date: now - Duration::hours(1),
            end_date: now + Duration::hours(24),
            usage_limit: 100,
            is_active: true,
            applicable_items: ["item1".to_string()].into(),
        }
    }

    fn cart(total: rust_decimal::Decimal) -> Cart {
        Cart::new(vec![CartItem::new("item1", total)], total)
    }

    #[tokio::test]
    async fn test_create_then_validate() {
        let state = state();

        let (status, created) = create_handler(State(state.clone()), Json(new_coupon("TEST10")))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.usage_count, 0);

        let req = ValidateCouponRequest {
            code: "TEST10".to_string(),
            cart: cart(dec!(150)),
            timestamp: None,
        };
        let response = validate_handler(State(state), Json(req)).await.unwrap();
        assert!(response.valid);
        assert_eq!(response.discount.as_ref().unwrap().discount_amount, dec!(15));
    }

    #[tokio::test]
    async fn test_validate_unknown_code_is_not_an_error() {
        let req = ValidateCouponRequest {
            code: "NOPE".to_string(),
            cart: cart(dec!(150)),
            timestamp: None,
        };

        let response = validate_handler(State(state()), Json(req)).await.unwrap();

        assert!(!response.valid);
        assert_eq!(response.reason.as_deref(), Some("coupon not found"));
    }

    #[tokio::test]
    async fn test_validate_blank_code_is_rejected() {
        let req = ValidateCouponRequest {
            code: " ".to_string(),
            cart: cart(dec!(150)),
            timestamp: None,
        };

        let result = validate_handler(State(state()), Json(req)).await;
        assert!(matches!(result, Err(CouponError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_applicable_handler_filters() {
        let state = state();
        create_handler(State(state.clone()), Json(new_coupon("TEST10")))
            .await
            .unwrap();

        let req = ApplicableCouponsRequest {
            items: vec![CartItem::new("item1", dec!(50))],
            total: dec!(50),
            timestamp: None,
        };
        let coupons = applicable_handler(State(state), Json(req)).await.unwrap();

        assert!(coupons.is_empty());
    }

    #[tokio::test]
    async fn test_stats_and_health_handlers() {
        let response = stats_handler(State(state())).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.capacity, 100);

        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
