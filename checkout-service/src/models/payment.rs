//! Payment method tags and the normalized results returned to callers.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Closed set of checkout payment methods, keyed by their storefront tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Card")]
    Card,
    #[serde(rename = "PayPal")]
    PayPal,
    #[serde(rename = "Apple Pay")]
    ApplePay,
    #[serde(rename = "Google Pay")]
    GooglePay,
    #[serde(rename = "COD")]
    CashOnDelivery,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Card,
        PaymentMethod::PayPal,
        PaymentMethod::ApplePay,
        PaymentMethod::GooglePay,
        PaymentMethod::CashOnDelivery,
    ];

    /// Exact tag accepted on the wire.
    pub fn tag(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Card",
            PaymentMethod::PayPal => "PayPal",
            PaymentMethod::ApplePay => "Apple Pay",
            PaymentMethod::GooglePay => "Google Pay",
            PaymentMethod::CashOnDelivery => "COD",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown payment method tag: {0}")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    /// Case-sensitive; `"card"` or `"ApplePay"` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.tag() == s)
            .ok_or_else(|| UnknownPaymentMethod(s.to_string()))
    }
}

/// Provider fields of a successful payment, one variant per strategy.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum PaymentOutcome {
    /// Card, Apple Pay and Google Pay. Only card results carry the intent id.
    PaymentIntent {
        client_secret: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        payment_intent_id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        payment_method: Option<String>,
    },
    PayPalOrder {
        order_id: String,
        approval_url: String,
    },
    CashOnDelivery {
        payment_method: String,
        message: String,
    },
}

/// Result of [`crate::services::PaymentDispatcher::process_payment`].
///
/// Serializes as `{"success": true, ...fields}` or
/// `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentResult {
    Success(PaymentOutcome),
    Failure { error: String },
}

impl PaymentResult {
    pub fn failure(error: impl Into<String>) -> Self {
        PaymentResult::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PaymentResult::Success(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PaymentResult::Success(_) => None,
            PaymentResult::Failure { error } => Some(error),
        }
    }

    pub fn outcome(&self) -> Option<&PaymentOutcome> {
        match self {
            PaymentResult::Success(outcome) => Some(outcome),
            PaymentResult::Failure { .. } => None,
        }
    }
}

/// Fields of a successful PayPal capture.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureOutcome {
    pub capture_id: String,
    pub status: String,
}

/// Result of [`crate::services::PaymentDispatcher::capture_paypal_payment`].
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureResult {
    Success(CaptureOutcome),
    Failure { error: String },
}

impl CaptureResult {
    pub fn failure(error: impl Into<String>) -> Self {
        CaptureResult::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CaptureResult::Success(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            CaptureResult::Success(_) => None,
            CaptureResult::Failure { error } => Some(error),
        }
    }
}

#[derive(Serialize)]
struct SuccessBody<'a, T> {
    success: bool,
    #[serde(flatten)]
    fields: &'a T,
}

#[derive(Serialize)]
struct FailureBody<'a> {
    success: bool,
    error: &'a str,
}

impl Serialize for PaymentResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PaymentResult::Success(outcome) => SuccessBody {
                success: true,
                fields: outcome,
            }
            .serialize(serializer),
            PaymentResult::Failure { error } => FailureBody {
                success: false,
                error,
            }
            .serialize(serializer),
        }
    }
}

impl Serialize for CaptureResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CaptureResult::Success(outcome) => SuccessBody {
                success: true,
                fields: outcome,
            }
            .serialize(serializer),
            CaptureResult::Failure { error } => FailureBody {
                success: false,
                error,
            }
            .serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_exact_tags_only() {
        assert_eq!("Card".parse::<PaymentMethod>(), Ok(PaymentMethod::Card));
        assert_eq!(
            "Apple Pay".parse::<PaymentMethod>(),
            Ok(PaymentMethod::ApplePay)
        );
        assert_eq!(
            "COD".parse::<PaymentMethod>(),
            Ok(PaymentMethod::CashOnDelivery)
        );
        assert!("card".parse::<PaymentMethod>().is_err());
        assert!("ApplePay".parse::<PaymentMethod>().is_err());
        assert!("".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn tags_round_trip_through_display() {
        for method in PaymentMethod::ALL {
            assert_eq!(method.to_string().parse::<PaymentMethod>(), Ok(method));
        }
    }

    #[test]
    fn intent_success_serializes_flat() {
        let result = PaymentResult::Success(PaymentOutcome::PaymentIntent {
            client_secret: "pi_123_secret".to_string(),
            payment_intent_id: Some("pi_123".to_string()),
            payment_method: None,
        });

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "success": true,
                "clientSecret": "pi_123_secret",
                "paymentIntentId": "pi_123"
            })
        );
    }

    #[test]
    fn wallet_success_carries_label_without_intent_id() {
        let result = PaymentResult::Success(PaymentOutcome::PaymentIntent {
            client_secret: "pi_456_secret".to_string(),
            payment_intent_id: None,
            payment_method: Some("Google Pay".to_string()),
        });

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "success": true,
                "clientSecret": "pi_456_secret",
                "paymentMethod": "Google Pay"
            })
        );
    }

    #[test]
    fn failure_serializes_error_only() {
        let result = PaymentResult::failure("Invalid payment method");
        assert!(!result.is_success());
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "success": false, "error": "Invalid payment method" })
        );
    }

    #[test]
    fn capture_serializes_camel_case() {
        let result = CaptureResult::Success(CaptureOutcome {
            capture_id: "CAPTURE_123".to_string(),
            status: "COMPLETED".to_string(),
        });

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "success": true, "captureId": "CAPTURE_123", "status": "COMPLETED" })
        );
    }
}
