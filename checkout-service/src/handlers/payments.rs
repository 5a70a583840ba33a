//! Order payment endpoints.
//!
//! Thin adapters over [`PaymentDispatcher`](crate::services::PaymentDispatcher):
//! a failure result becomes a 400 with the dispatcher's message, a success
//! result is wrapped in `data`.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use service_core::error::AppError;

use crate::dtos::{
    ApiResponse, CapturePaymentRequest, ClientSecretResponse, PriceIntentRequest,
    ProcessPaymentRequest,
};
use crate::models::{CaptureResult, PaymentOutcome, PaymentResult};
use crate::startup::AppState;

pub const PAYMENT_METHOD_REQUIRED: &str = "Payment method is required";
pub const ORDER_DATA_REQUIRED: &str = "Order data is required";
pub const PRICE_REQUIRED: &str = "Price is required";

type Reply<T> = (StatusCode, Json<ApiResponse<T>>);

fn bad_request<T>(message: impl Into<String>) -> Reply<T> {
    (StatusCode::BAD_REQUEST, Json(ApiResponse::failure(message)))
}

fn malformed_body(rejection: JsonRejection) -> AppError {
    tracing::warn!(error = %rejection.body_text(), "Rejected malformed request body");
    AppError::BadRequest(anyhow::anyhow!(rejection.body_text()))
}

pub async fn process_payment(
    State(state): State<AppState>,
    payload: Result<Json<ProcessPaymentRequest>, JsonRejection>,
) -> Result<Reply<PaymentResult>, AppError> {
    let Json(payload) = payload.map_err(malformed_body)?;

    let Some(method) = payload.payment_method.filter(|m| !m.is_empty()) else {
        return Ok(bad_request(PAYMENT_METHOD_REQUIRED));
    };
    let Some(order) = payload.order_data else {
        return Ok(bad_request(ORDER_DATA_REQUIRED));
    };

    let result = state.dispatcher.process_payment(&method, &order).await;

    Ok(match result.error() {
        Some(error) => bad_request(error),
        None => (StatusCode::OK, Json(ApiResponse::ok(result))),
    })
}

pub async fn capture_paypal_payment(
    State(state): State<AppState>,
    payload: Result<Json<CapturePaymentRequest>, JsonRejection>,
) -> Result<Reply<CaptureResult>, AppError> {
    let Json(payload) = payload.map_err(malformed_body)?;

    // A missing id is reported by the dispatcher like a blank one.
    let order_id = payload.order_id.unwrap_or_default();
    let result = state.dispatcher.capture_paypal_payment(&order_id).await;

    Ok(match result.error() {
        Some(error) => bad_request(error),
        None => (StatusCode::OK, Json(ApiResponse::ok(result))),
    })
}

/// Bare client secret, as the storefront's product checkout expects.
pub async fn create_payment_intent(
    State(state): State<AppState>,
    payload: Result<Json<PriceIntentRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = payload.map_err(malformed_body)?;

    let Some(price) = payload.price else {
        return Ok(bad_request::<()>(PRICE_REQUIRED).into_response());
    };

    let result = state.dispatcher.create_price_intent(price).await;

    Ok(match result {
        PaymentResult::Success(PaymentOutcome::PaymentIntent { client_secret, .. }) => {
            Json(ClientSecretResponse { client_secret }).into_response()
        }
        PaymentResult::Success(_) => {
            return Err(AppError::InternalError(anyhow::anyhow!(
                "price intent produced a non-intent outcome"
            )))
        }
        PaymentResult::Failure { error } => bad_request::<()>(error).into_response(),
    })
}
