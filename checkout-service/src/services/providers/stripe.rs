//! Stripe payment provider client.
//!
//! Implements the Payment Intents API used by card and wallet checkouts.
//! The browser confirms the intent with the returned client secret.

use super::{CardProcessor, ProviderError};
use crate::config::StripeConfig;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Stripe client for creating payment intents.
#[derive(Clone)]
pub struct StripeClient {
    client: Client,
    config: StripeConfig,
}

/// Request to create a payment intent.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentIntentRequest {
    /// Amount in the smallest currency unit (cents for USD).
    pub amount: u64,
    /// Lowercase ISO currency code.
    pub currency: String,
    /// Empty means Stripe's account defaults apply.
    pub payment_method_types: Vec<String>,
    pub metadata: BTreeMap<String, String>,
}

impl PaymentIntentRequest {
    /// Stripe's form encoding: `payment_method_types[]=card`, `metadata[key]=value`.
    fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("amount".to_string(), self.amount.to_string()),
            ("currency".to_string(), self.currency.clone()),
        ];

        for method_type in &self.payment_method_types {
            fields.push(("payment_method_types[]".to_string(), method_type.clone()));
        }

        for (key, value) in &self.metadata {
            fields.push((format!("metadata[{}]", key), value.clone()));
        }

        fields
    }
}

/// Payment intent returned by Stripe.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
    #[serde(default)]
    pub amount: u64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub status: String,
}

/// Stripe API error response.
#[derive(Debug, Deserialize)]
struct StripeError {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
    #[serde(rename = "type")]
    error_type: Option<String>,
    code: Option<String>,
}

impl StripeClient {
    pub fn new(config: StripeConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl CardProcessor for StripeClient {
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, ProviderError> {
        if !self.is_configured() {
            return Err(ProviderError::NotConfigured(
                "Stripe credentials not configured".to_string(),
            ));
        }

        let url = format!(
            "{}/v1/payment_intents",
            self.config.api_base_url.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.config.secret_key.expose_secret())
            .form(&request.form_fields())
            .send()
            .await
            .map_err(|e| ProviderError::Connection(format!("Failed to connect to Stripe: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Connection(format!("Failed to read Stripe response: {}", e)))?;

        tracing::debug!(status = %status, "Stripe create_payment_intent response");

        if status.is_success() {
            let intent: PaymentIntent = serde_json::from_str(&body).map_err(|e| {
                ProviderError::MalformedResponse(format!("Failed to parse Stripe response: {}", e))
            })?;
            tracing::info!(
                payment_intent_id = %intent.id,
                amount = intent.amount,
                currency = %intent.currency,
                status = %intent.status,
                "Stripe payment intent created"
            );
            Ok(intent)
        } else {
            let message = match serde_json::from_str::<StripeError>(&body) {
                Ok(error) => {
                    tracing::error!(
                        status = %status,
                        error_type = ?error.error.error_type,
                        code = ?error.error.code,
                        "Stripe payment intent creation failed"
                    );
                    error.error.message.unwrap_or_else(|| body.clone())
                }
                Err(_) => {
                    tracing::error!(status = %status, "Stripe returned an unrecognised error body");
                    body
                }
            };
            Err(ProviderError::Rejected(message))
        }
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }
}

/// In-memory card processor for tests.
///
/// Derives the intent id from the `orderId` metadata so concurrent callers
/// can check they got their own intent back.
#[derive(Default)]
pub struct MockCardProcessor {
    failure: Option<ProviderError>,
    requests: Mutex<Vec<PaymentIntentRequest>>,
}

impl MockCardProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: ProviderError) -> Self {
        Self {
            failure: Some(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, in call order.
    pub fn requests(&self) -> Vec<PaymentIntentRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests().len()
    }
}

#[async_trait]
impl CardProcessor for MockCardProcessor {
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, ProviderError> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());

        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        let order_id = request
            .metadata
            .get("orderId")
            .map(String::as_str)
            .unwrap_or("unknown");

        tracing::info!(order_id = %order_id, amount = request.amount, "[MOCK] Payment intent created");

        Ok(PaymentIntent {
            id: format!("pi_{}", order_id),
            client_secret: format!("pi_{}_secret_{}", order_id, request.amount),
            amount: request.amount,
            currency: request.currency.clone(),
            status: "requires_payment_method".to_string(),
        })
    }

    fn is_configured(&self) -> bool {
        true
    }
}
