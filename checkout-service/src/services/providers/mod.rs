//! External payment providers.
//!
//! Each provider sits behind an async trait so the dispatcher can be driven
//! by the real HTTP client or by an in-memory mock.

pub mod paypal;
pub mod stripe;

use async_trait::async_trait;
use thiserror::Error;

pub use paypal::{
    MockPayPalGateway, PayPalClient, PayPalLink, PayPalOrder, PayPalOrderRequest,
};
pub use stripe::{MockCardProcessor, PaymentIntent, PaymentIntentRequest, StripeClient};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Connection error: {0}")]
    Connection(String),

    /// The provider answered with an error; carries its message untouched.
    #[error("Provider rejected request: {0}")]
    Rejected(String),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    /// Refused locally, nothing was sent.
    #[error("Invalid provider request: {0}")]
    InvalidRequest(String),
}

impl ProviderError {
    /// Message to hand back to the caller, without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            ProviderError::NotConfigured(msg)
            | ProviderError::Connection(msg)
            | ProviderError::Rejected(msg)
            | ProviderError::MalformedResponse(msg)
            | ProviderError::InvalidRequest(msg) => msg,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::Connection(_) => "connection",
            ProviderError::Rejected(_) => "rejected",
            ProviderError::MalformedResponse(_) => "malformed_response",
            ProviderError::InvalidRequest(_) => "invalid_request",
        }
    }
}

/// Card-processing provider (Stripe payment intents).
#[async_trait]
pub trait CardProcessor: Send + Sync {
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, ProviderError>;
    fn is_configured(&self) -> bool;
}

/// PayPal Orders API.
#[async_trait]
pub trait PayPalGateway: Send + Sync {
    async fn create_order(&self, request: &PayPalOrderRequest)
        -> Result<PayPalOrder, ProviderError>;
    async fn capture_order(&self, order_id: &str) -> Result<PayPalOrder, ProviderError>;
    fn is_configured(&self) -> bool;
}
