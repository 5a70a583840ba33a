//! Application startup and lifecycle management.

use crate::config::CheckoutConfig;
use crate::handlers;
use crate::services::{
    init_metrics, CardProcessor, PayPalClient, PayPalGateway, PaymentDispatcher, StripeClient,
};
use axum::middleware::from_fn;
use axum::{
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{metrics_middleware, request_id_middleware, REQUEST_ID_HEADER};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: CheckoutConfig,
    pub dispatcher: PaymentDispatcher,
}

impl AppState {
    /// State backed by the real Stripe and PayPal clients.
    pub fn from_config(config: CheckoutConfig) -> Self {
        let stripe = StripeClient::new(config.stripe.clone());
        if stripe.is_configured() {
            tracing::info!("Stripe client initialized");
        } else {
            tracing::warn!("Stripe credentials not configured - card payments will fail");
        }

        let paypal = PayPalClient::new(config.paypal.clone());
        if paypal.is_configured() {
            tracing::info!(base_url = %config.paypal.base_url(), "PayPal client initialized");
        } else {
            tracing::warn!("PayPal credentials not configured - PayPal payments will fail");
        }

        let dispatcher =
            PaymentDispatcher::new(Arc::new(stripe), Arc::new(paypal), config.store.clone());

        Self { config, dispatcher }
    }
}

/// Routes and layers, without a listener.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route(
            "/api/order/process-payment",
            post(handlers::payments::process_payment),
        )
        .route(
            "/api/order/create-payment-intent",
            post(handlers::payments::create_payment_intent),
        )
        .route(
            "/api/order/capture-paypal",
            post(handlers::payments::capture_paypal_payment),
        )
        .route(
            "/api/translations",
            get(handlers::translations::list_languages),
        )
        .route(
            "/api/translations/:code",
            get(handlers::translations::get_translations),
        )
        .route_layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        // Wraps the trace layer; the span reads this header.
        .layer(from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    pub async fn build(config: CheckoutConfig) -> Result<Self, AppError> {
        init_metrics();

        let state = AppState::from_config(config);

        // port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], state.config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            port,
            environment = %state.config.common.environment,
            "Checkout service listening"
        );

        Ok(Self {
            port,
            listener,
            router: router(state),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router).await
    }
}
