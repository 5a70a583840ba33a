use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::i18n::LanguageInfo;
use crate::models::OrderData;

/// Body of `POST /api/order/process-payment`.
///
/// Both fields are optional at the wire level so their absence can be
/// reported with a specific message instead of a generic decode error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessPaymentRequest {
    pub payment_method: Option<String>,
    pub order_data: Option<OrderData>,
}

/// Body of `POST /api/order/capture-paypal`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturePaymentRequest {
    pub order_id: Option<String>,
}

/// Body of `POST /api/order/create-payment-intent`.
#[derive(Debug, Default, Deserialize)]
pub struct PriceIntentRequest {
    pub price: Option<Decimal>,
}

/// The storefront confirms the card payment with this secret.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSecretResponse {
    pub client_secret: String,
}

/// Response envelope shared by the order endpoints.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub languages: Vec<LanguageInfo>,
}

#[derive(Debug, Serialize)]
pub struct TranslationsResponse {
    /// Code the request resolved to after alias lookup and fallback.
    pub code: &'static str,
    pub translations: BTreeMap<&'static str, &'static str>,
}
