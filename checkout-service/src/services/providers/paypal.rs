//! PayPal payment provider client.
//!
//! Implements the Orders v2 API: order creation (returns the buyer approval
//! link) and capture of an approved order. Every call first exchanges the
//! client credentials for an access token; tokens are not cached.

use super::{PayPalGateway, ProviderError};
use crate::config::{PayPalConfig, StoreConfig};
use crate::models::OrderData;
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

pub const INVALID_ORDER_ID: &str = "Invalid PayPal order id";

/// PayPal order ids are short alphanumeric tokens such as `5O190127TN364715T`.
fn is_valid_order_id(order_id: &str) -> bool {
    !order_id.is_empty()
        && order_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// PayPal client for interacting with the Orders API.
#[derive(Clone)]
pub struct PayPalClient {
    client: Client,
    config: PayPalConfig,
}

/// Body of `POST /v2/checkout/orders`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayPalOrderRequest {
    pub intent: String,
    pub purchase_units: Vec<PurchaseUnitRequest>,
    pub application_context: ApplicationContext,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseUnitRequest {
    pub amount: Money,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Money {
    pub currency_code: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationContext {
    pub return_url: String,
    pub cancel_url: String,
    pub brand_name: String,
    pub landing_page: String,
    pub user_action: String,
}

impl PayPalOrderRequest {
    /// Single-unit capture order for the whole cart total.
    pub fn for_order(order: &OrderData, store: &StoreConfig) -> Self {
        Self {
            intent: "CAPTURE".to_string(),
            purchase_units: vec![PurchaseUnitRequest {
                amount: Money {
                    currency_code: "USD".to_string(),
                    value: order.decimal_total(),
                },
                description: format!(
                    "Order from {} - {} items",
                    store.brand_name,
                    order.item_count()
                ),
            }],
            application_context: ApplicationContext {
                return_url: store.return_url(),
                cancel_url: store.cancel_url(),
                brand_name: store.brand_name.clone(),
                landing_page: "BILLING".to_string(),
                user_action: "PAY_NOW".to_string(),
            },
        }
    }
}

/// Order graph returned by create and capture.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PayPalOrder {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub links: Vec<PayPalLink>,
    #[serde(default)]
    pub purchase_units: Vec<PurchaseUnit>,
}

/// HATEOAS link on an order.
#[derive(Debug, Clone, Deserialize)]
pub struct PayPalLink {
    pub href: String,
    pub rel: String,
    #[serde(default)]
    pub method: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PurchaseUnit {
    #[serde(default)]
    pub payments: Option<PaymentCollection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentCollection {
    #[serde(default)]
    pub captures: Vec<Capture>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Capture {
    pub id: String,
    pub status: String,
}

impl PayPalOrder {
    /// The buyer redirect, i.e. the link with `rel == "approve"`.
    pub fn approval_url(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|link| link.rel == "approve")
            .map(|link| link.href.as_str())
    }

    pub fn first_capture(&self) -> Option<&Capture> {
        self.purchase_units
            .iter()
            .filter_map(|unit| unit.payments.as_ref())
            .flat_map(|payments| payments.captures.iter())
            .next()
    }
}

#[derive(Debug, Deserialize)]
struct AccessToken {
    access_token: String,
}

/// Orders API error body.
#[derive(Debug, Deserialize)]
struct PayPalError {
    name: Option<String>,
    message: Option<String>,
    debug_id: Option<String>,
}

/// OAuth error body.
#[derive(Debug, Deserialize)]
struct OAuthError {
    error: String,
    error_description: Option<String>,
}

impl PayPalClient {
    pub fn new(config: PayPalConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url().trim_end_matches('/'), path)
    }

    /// `{base}/v2/checkout/orders/{id}/capture` with the id as a single
    /// escaped path segment.
    fn capture_url(&self, order_id: &str) -> Result<Url, ProviderError> {
        if !is_valid_order_id(order_id) {
            return Err(ProviderError::InvalidRequest(
                INVALID_ORDER_ID.to_string(),
            ));
        }

        let mut url = Url::parse(&self.url("/v2/checkout/orders")).map_err(|e| {
            ProviderError::NotConfigured(format!("Invalid PayPal API base URL: {}", e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                ProviderError::NotConfigured("PayPal API base URL cannot carry a path".to_string())
            })?
            .push(order_id)
            .push("capture");

        Ok(url)
    }

    /// Client-credentials grant.
    async fn access_token(&self) -> Result<String, ProviderError> {
        if !self.is_configured() {
            return Err(ProviderError::NotConfigured(
                "PayPal credentials not configured".to_string(),
            ));
        }

        let response = self
            .client
            .post(self.url("/v1/oauth2/token"))
            .basic_auth(
                &self.config.client_id,
                Some(self.config.client_secret.expose_secret()),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| ProviderError::Connection(format!("Failed to connect to PayPal: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Connection(format!("Failed to read PayPal response: {}", e)))?;

        if status.is_success() {
            let token: AccessToken = serde_json::from_str(&body).map_err(|e| {
                ProviderError::MalformedResponse(format!("Failed to parse PayPal token: {}", e))
            })?;
            Ok(token.access_token)
        } else {
            let message = serde_json::from_str::<OAuthError>(&body)
                .map(|e| e.error_description.unwrap_or(e.error))
                .unwrap_or(body);
            tracing::error!(status = %status, "PayPal authentication failed");
            Err(ProviderError::Rejected(message))
        }
    }

    async fn read_order(
        &self,
        response: Response,
        operation: &str,
    ) -> Result<PayPalOrder, ProviderError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Connection(format!("Failed to read PayPal response: {}", e)))?;

        tracing::debug!(status = %status, operation = %operation, "PayPal response");

        if status.is_success() {
            serde_json::from_str(&body).map_err(|e| {
                ProviderError::MalformedResponse(format!("Failed to parse PayPal order: {}", e))
            })
        } else {
            let message = match serde_json::from_str::<PayPalError>(&body) {
                Ok(error) => {
                    tracing::error!(
                        status = %status,
                        operation = %operation,
                        name = ?error.name,
                        debug_id = ?error.debug_id,
                        "PayPal request failed"
                    );
                    error.message.unwrap_or_else(|| body.clone())
                }
                Err(_) => {
                    tracing::error!(status = %status, operation = %operation, "PayPal request failed");
                    body
                }
            };
            Err(ProviderError::Rejected(message))
        }
    }
}

#[async_trait]
impl PayPalGateway for PayPalClient {
    async fn create_order(
        &self,
        request: &PayPalOrderRequest,
    ) -> Result<PayPalOrder, ProviderError> {
        let token = self.access_token().await?;

        let response = self
            .client
            .post(self.url("/v2/checkout/orders"))
            .bearer_auth(token)
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::Connection(format!("Failed to connect to PayPal: {}", e)))?;

        let order = self.read_order(response, "create_order").await?;
        tracing::info!(
            paypal_order_id = %order.id,
            status = ?order.status,
            "PayPal order created"
        );
        Ok(order)
    }

    async fn capture_order(&self, order_id: &str) -> Result<PayPalOrder, ProviderError> {
        let url = self.capture_url(order_id)?;
        let token = self.access_token().await?;

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| ProviderError::Connection(format!("Failed to connect to PayPal: {}", e)))?;

        let order = self.read_order(response, "capture_order").await?;
        tracing::info!(
            paypal_order_id = %order.id,
            status = ?order.status,
            "PayPal order captured"
        );
        Ok(order)
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }
}

/// In-memory PayPal gateway for tests.
///
/// Orders it creates can be captured; unknown ids fail the way PayPal does.
pub struct MockPayPalGateway {
    approve_links: bool,
    failure: Option<ProviderError>,
    created: Mutex<HashMap<String, PayPalOrderRequest>>,
    sequence: AtomicU64,
}

impl MockPayPalGateway {
    pub fn new() -> Self {
        Self {
            approve_links: true,
            failure: None,
            created: Mutex::new(HashMap::new()),
            sequence: AtomicU64::new(0),
        }
    }

    /// Orders come back with only a `self` link.
    pub fn without_approval_link() -> Self {
        Self {
            approve_links: false,
            ..Self::new()
        }
    }

    pub fn failing(error: ProviderError) -> Self {
        Self {
            failure: Some(error),
            ..Self::new()
        }
    }

    pub fn created_orders(&self) -> Vec<PayPalOrderRequest> {
        self.created
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .values()
            .cloned()
            .collect()
    }
}

impl Default for MockPayPalGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PayPalGateway for MockPayPalGateway {
    async fn create_order(
        &self,
        request: &PayPalOrderRequest,
    ) -> Result<PayPalOrder, ProviderError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        let id = format!(
            "MOCK_PAYPAL_ORDER_{}",
            self.sequence.fetch_add(1, Ordering::SeqCst) + 1
        );
        self.created
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(id.clone(), request.clone());

        let mut links = vec![PayPalLink {
            href: format!("https://api-m.sandbox.paypal.com/v2/checkout/orders/{}", id),
            rel: "self".to_string(),
            method: Some("GET".to_string()),
        }];
        if self.approve_links {
            links.push(PayPalLink {
                href: format!("https://www.sandbox.paypal.com/checkoutnow?token={}", id),
                rel: "approve".to_string(),
                method: Some("GET".to_string()),
            });
        }

        tracing::info!(paypal_order_id = %id, "[MOCK] PayPal order created");

        Ok(PayPalOrder {
            id,
            status: Some("CREATED".to_string()),
            links,
            purchase_units: Vec::new(),
        })
    }

    async fn capture_order(&self, order_id: &str) -> Result<PayPalOrder, ProviderError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        let known = self
            .created
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains_key(order_id);
        if !known {
            return Err(ProviderError::Rejected(
                "The specified resource does not exist.".to_string(),
            ));
        }

        Ok(PayPalOrder {
            id: order_id.to_string(),
            status: Some("COMPLETED".to_string()),
            links: Vec::new(),
            purchase_units: vec![PurchaseUnit {
                payments: Some(PaymentCollection {
                    captures: vec![Capture {
                        id: format!("CAPTURE_{}", order_id),
                        status: "COMPLETED".to_string(),
                    }],
                }),
            }],
        })
    }

    fn is_configured(&self) -> bool {
        true
    }
}
