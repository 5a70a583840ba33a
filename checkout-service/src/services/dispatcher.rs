//! Payment method dispatch.
//!
//! Routes a payment-method tag to its strategy, makes at most one provider
//! call, and folds every invalid-input and provider failure into a
//! [`PaymentResult`] / [`CaptureResult`]. Nothing is retried and nothing is
//! kept between calls.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::StoreConfig;
use crate::models::{
    to_minor_units, CaptureOutcome, CaptureResult, InvalidOrder, OrderData, PaymentMethod,
    PaymentOutcome, PaymentResult,
};
use rust_decimal::Decimal;
use crate::services::metrics::{record_capture, record_payment};
use crate::services::providers::{
    CardProcessor, PayPalGateway, PayPalOrderRequest, PaymentIntentRequest,
};

pub const INVALID_PAYMENT_METHOD: &str = "Invalid payment method";
pub const NO_APPROVAL_URL: &str = "No approval URL found";
pub const NO_CAPTURE_FOUND: &str = "No capture found";
pub const ORDER_ID_REQUIRED: &str = "Order id is required";
pub const COD_LABEL: &str = "Cash on Delivery";
pub const COD_MESSAGE: &str = "Order placed successfully. Pay on delivery.";
pub const VALID_PRICE_REQUIRED: &str = "Valid price is required";

const INTENT_CURRENCY: &str = "usd";
/// Metric label for unknown tags; caller input never becomes a label.
const INVALID_METHOD_LABEL: &str = "invalid";

/// Parameters of the shared payment-intent strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct IntentProfile {
    /// Wallet label stored in metadata and echoed in the result.
    wallet: Option<&'static str>,
    /// Restrict the intent to `payment_method_types = ["card"]`.
    card_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    PaymentIntent(IntentProfile),
    PayPalOrder,
    CashOnDelivery,
}

impl Strategy {
    fn for_method(method: PaymentMethod) -> Self {
        match method {
            PaymentMethod::Card => Strategy::PaymentIntent(IntentProfile {
                wallet: None,
                card_only: false,
            }),
            PaymentMethod::ApplePay => Strategy::PaymentIntent(IntentProfile {
                wallet: Some("Apple Pay"),
                card_only: true,
            }),
            PaymentMethod::GooglePay => Strategy::PaymentIntent(IntentProfile {
                wallet: Some("Google Pay"),
                card_only: true,
            }),
            PaymentMethod::PayPal => Strategy::PayPalOrder,
            PaymentMethod::CashOnDelivery => Strategy::CashOnDelivery,
        }
    }
}

/// Stateless dispatcher over the card and PayPal providers.
#[derive(Clone)]
pub struct PaymentDispatcher {
    card: Arc<dyn CardProcessor>,
    paypal: Arc<dyn PayPalGateway>,
    store: StoreConfig,
}

impl PaymentDispatcher {
    pub fn new(
        card: Arc<dyn CardProcessor>,
        paypal: Arc<dyn PayPalGateway>,
        store: StoreConfig,
    ) -> Self {
        Self {
            card,
            paypal,
            store,
        }
    }

    /// Process a payment for `order` with the method named by `method_tag`.
    ///
    /// Never fails: unknown tags, invalid orders and provider errors all come
    /// back as [`PaymentResult::Failure`].
    pub async fn process_payment(&self, method_tag: &str, order: &OrderData) -> PaymentResult {
        let method = match method_tag.parse::<PaymentMethod>() {
            Ok(method) => method,
            Err(_) => {
                tracing::warn!(method = %method_tag, "Rejected unknown payment method");
                record_payment(INVALID_METHOD_LABEL, false);
                return PaymentResult::failure(INVALID_PAYMENT_METHOD);
            }
        };

        if let Err(invalid) = order.check() {
            tracing::warn!(
                method = %method,
                order_id = %order.order_id,
                reason = %invalid,
                "Rejected invalid order"
            );
            record_payment(method.tag(), false);
            return PaymentResult::failure(invalid.to_string());
        }

        let result = match Strategy::for_method(method) {
            Strategy::PaymentIntent(profile) => self.create_payment_intent(profile, order).await,
            Strategy::PayPalOrder => self.create_paypal_order(order).await,
            Strategy::CashOnDelivery => cash_on_delivery(),
        };

        if result.is_success() {
            tracing::info!(method = %method, order_id = %order.order_id, "Payment processed");
        }
        record_payment(method.tag(), result.is_success());

        result
    }

    /// Card-only intent for a bare product price, outside any order.
    pub async fn create_price_intent(&self, price: Decimal) -> PaymentResult {
        let amount = match to_minor_units(price) {
            Some(amount) if amount > 0 => amount,
            _ => {
                tracing::warn!(price = %price, "Rejected price intent");
                record_payment(PaymentMethod::Card.tag(), false);
                return PaymentResult::failure(VALID_PRICE_REQUIRED);
            }
        };

        let request = PaymentIntentRequest {
            amount,
            currency: INTENT_CURRENCY.to_string(),
            payment_method_types: vec!["card".to_string()],
            metadata: BTreeMap::new(),
        };

        let result = match self.card.create_payment_intent(&request).await {
            Ok(intent) => PaymentResult::Success(PaymentOutcome::PaymentIntent {
                client_secret: intent.client_secret,
                payment_intent_id: Some(intent.id),
                payment_method: None,
            }),
            Err(e) => {
                tracing::error!(
                    amount_minor = amount,
                    error = %e,
                    kind = e.kind(),
                    "Price intent creation failed"
                );
                PaymentResult::failure(e.message())
            }
        };

        record_payment(PaymentMethod::Card.tag(), result.is_success());
        result
    }

    async fn create_payment_intent(
        &self,
        profile: IntentProfile,
        order: &OrderData,
    ) -> PaymentResult {
        let Some(amount) = order.amount_in_minor_units() else {
            return PaymentResult::failure(InvalidOrder::NonPositiveTotal.to_string());
        };

        let mut metadata = BTreeMap::from([("orderId".to_string(), order.order_id.clone())]);
        if let Some(wallet) = profile.wallet {
            metadata.insert("paymentMethod".to_string(), wallet.to_string());
        }

        let request = PaymentIntentRequest {
            amount,
            currency: INTENT_CURRENCY.to_string(),
            payment_method_types: if profile.card_only {
                vec!["card".to_string()]
            } else {
                Vec::new()
            },
            metadata,
        };

        tracing::debug!(
            order_id = %order.order_id,
            amount_minor = amount,
            wallet = ?profile.wallet,
            "Creating payment intent"
        );

        match self.card.create_payment_intent(&request).await {
            Ok(intent) => PaymentResult::Success(PaymentOutcome::PaymentIntent {
                client_secret: intent.client_secret,
                payment_intent_id: profile.wallet.is_none().then_some(intent.id),
                payment_method: profile.wallet.map(str::to_string),
            }),
            Err(e) => {
                tracing::error!(
                    order_id = %order.order_id,
                    error = %e,
                    kind = e.kind(),
                    "Payment intent creation failed"
                );
                PaymentResult::failure(e.message())
            }
        }
    }

    async fn create_paypal_order(&self, order: &OrderData) -> PaymentResult {
        let request = PayPalOrderRequest::for_order(order, &self.store);

        let paypal_order = match self.paypal.create_order(&request).await {
            Ok(paypal_order) => paypal_order,
            Err(e) => {
                tracing::error!(
                    order_id = %order.order_id,
                    error = %e,
                    kind = e.kind(),
                    "PayPal order creation failed"
                );
                return PaymentResult::failure(e.message());
            }
        };

        let Some(approval_url) = paypal_order.approval_url().map(str::to_string) else {
            tracing::error!(
                order_id = %order.order_id,
                paypal_order_id = %paypal_order.id,
                "PayPal order has no approve link"
            );
            return PaymentResult::failure(NO_APPROVAL_URL);
        };

        PaymentResult::Success(PaymentOutcome::PayPalOrder {
            order_id: paypal_order.id,
            approval_url,
        })
    }

    /// Capture a PayPal order the buyer has approved.
    pub async fn capture_paypal_payment(&self, order_id: &str) -> CaptureResult {
        if order_id.trim().is_empty() {
            record_capture(false);
            return CaptureResult::failure(ORDER_ID_REQUIRED);
        }

        let result = match self.paypal.capture_order(order_id).await {
            Ok(order) => match order.first_capture() {
                Some(capture) => {
                    tracing::info!(
                        paypal_order_id = %order_id,
                        capture_id = %capture.id,
                        status = %capture.status,
                        "PayPal payment captured"
                    );
                    CaptureResult::Success(CaptureOutcome {
                        capture_id: capture.id.clone(),
                        status: capture.status.clone(),
                    })
                }
                None => {
                    tracing::error!(
                        paypal_order_id = %order_id,
                        "PayPal capture response has no capture record"
                    );
                    CaptureResult::failure(NO_CAPTURE_FOUND)
                }
            },
            Err(e) => {
                tracing::error!(
                    paypal_order_id = %order_id,
                    error = %e,
                    kind = e.kind(),
                    "PayPal capture failed"
                );
                CaptureResult::failure(e.message())
            }
        };

        record_capture(result.is_success());
        result
    }
}

fn cash_on_delivery() -> PaymentResult {
    PaymentResult::Success(PaymentOutcome::CashOnDelivery {
        payment_method: COD_LABEL.to_string(),
        message: COD_MESSAGE.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LineItem;
    use crate::services::providers::{MockCardProcessor, MockPayPalGateway, ProviderError};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn store() -> StoreConfig {
        StoreConfig {
            url: "https://shop.example.com".to_string(),
            brand_name: "Shofy".to_string(),
        }
    }

    fn order(order_id: &str, total: Decimal) -> OrderData {
        OrderData {
            total,
            order_id: order_id.to_string(),
            items: vec![LineItem {
                name: "Test Product".to_string(),
                quantity: 1,
                price: total,
            }],
        }
    }

    fn dispatcher(
        card: Arc<MockCardProcessor>,
        paypal: Arc<MockPayPalGateway>,
    ) -> PaymentDispatcher {
        PaymentDispatcher::new(card, paypal, store())
    }

    fn default_dispatcher() -> (
        PaymentDispatcher,
        Arc<MockCardProcessor>,
        Arc<MockPayPalGateway>,
    ) {
        let card = Arc::new(MockCardProcessor::new());
        let paypal = Arc::new(MockPayPalGateway::new());
        (dispatcher(card.clone(), paypal.clone()), card, paypal)
    }

    #[tokio::test]
    async fn card_payment_returns_client_secret_and_intent_id() {
        let (dispatcher, card, _) = default_dispatcher();

        let result = dispatcher
            .process_payment("Card", &order("order_123", dec!(100.50)))
            .await;

        assert_eq!(
            result,
            PaymentResult::Success(PaymentOutcome::PaymentIntent {
                client_secret: "pi_order_123_secret_10050".to_string(),
                payment_intent_id: Some("pi_order_123".to_string()),
                payment_method: None,
            })
        );

        let requests = card.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].amount, 10050);
        assert_eq!(requests[0].currency, "usd");
        assert!(requests[0].payment_method_types.is_empty());
        assert_eq!(requests[0].metadata.get("orderId").unwrap(), "order_123");
        assert!(!requests[0].metadata.contains_key("paymentMethod"));
    }

    #[tokio::test]
    async fn wallets_share_the_intent_strategy() {
        for (tag, label) in [("Apple Pay", "Apple Pay"), ("Google Pay", "Google Pay")] {
            let (dispatcher, card, _) = default_dispatcher();

            let result = dispatcher
                .process_payment(tag, &order("order_123", dec!(50)))
                .await;

            match result {
                PaymentResult::Success(PaymentOutcome::PaymentIntent {
                    client_secret,
                    payment_intent_id,
                    payment_method,
                }) => {
                    assert_eq!(client_secret, "pi_order_123_secret_5000");
                    assert_eq!(payment_intent_id, None);
                    assert_eq!(payment_method.as_deref(), Some(label));
                }
                other => panic!("unexpected result for {}: {:?}", tag, other),
            }

            let request = &card.requests()[0];
            assert_eq!(request.payment_method_types, vec!["card".to_string()]);
            assert_eq!(request.metadata.get("paymentMethod").unwrap(), label);
        }
    }

    #[tokio::test]
    async fn card_decline_is_passed_through() {
        let card = Arc::new(MockCardProcessor::failing(ProviderError::Rejected(
            "Your card was declined.".to_string(),
        )));
        let dispatcher = dispatcher(card, Arc::new(MockPayPalGateway::new()));

        let result = dispatcher
            .process_payment("Card", &order("order_123", dec!(10)))
            .await;

        assert_eq!(result, PaymentResult::failure("Your card was declined."));
    }

    #[tokio::test]
    async fn paypal_returns_order_id_and_approval_url() {
        let (dispatcher, card, paypal) = default_dispatcher();

        let result = dispatcher
            .process_payment("PayPal", &order("order_123", dec!(100.50)))
            .await;

        assert_eq!(
            result,
            PaymentResult::Success(PaymentOutcome::PayPalOrder {
                order_id: "MOCK_PAYPAL_ORDER_1".to_string(),
                approval_url: "https://www.sandbox.paypal.com/checkoutnow?token=MOCK_PAYPAL_ORDER_1"
                    .to_string(),
            })
        );
        assert_eq!(card.call_count(), 0);

        let created = paypal.created_orders();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].purchase_units[0].amount.value, "100.5");
        assert_eq!(
            created[0].purchase_units[0].description,
            "Order from Shofy - 1 items"
        );
    }

    #[tokio::test]
    async fn paypal_without_approve_link_is_a_failure() {
        let dispatcher = dispatcher(
            Arc::new(MockCardProcessor::new()),
            Arc::new(MockPayPalGateway::without_approval_link()),
        );

        let result = dispatcher
            .process_payment("PayPal", &order("order_123", dec!(10)))
            .await;

        assert_eq!(result, PaymentResult::failure(NO_APPROVAL_URL));
    }

    #[tokio::test]
    async fn paypal_provider_error_becomes_failure() {
        let dispatcher = dispatcher(
            Arc::new(MockCardProcessor::new()),
            Arc::new(MockPayPalGateway::failing(ProviderError::Rejected(
                "PayPal API Error".to_string(),
            ))),
        );

        let result = dispatcher
            .process_payment("PayPal", &order("order_123", dec!(10)))
            .await;

        assert_eq!(result, PaymentResult::failure("PayPal API Error"));
    }

    #[tokio::test]
    async fn cash_on_delivery_makes_no_provider_call() {
        let (dispatcher, card, paypal) = default_dispatcher();

        let result = dispatcher
            .process_payment("COD", &order("order_123", dec!(136)))
            .await;

        assert_eq!(
            result,
            PaymentResult::Success(PaymentOutcome::CashOnDelivery {
                payment_method: "Cash on Delivery".to_string(),
                message: "Order placed successfully. Pay on delivery.".to_string(),
            })
        );
        assert_eq!(card.call_count(), 0);
        assert!(paypal.created_orders().is_empty());
    }

    #[tokio::test]
    async fn unknown_methods_are_rejected() {
        let (dispatcher, card, _) = default_dispatcher();

        for tag in ["InvalidMethod", "card", "ApplePay", "", "Bitcoin"] {
            let result = dispatcher
                .process_payment(tag, &order("order_123", dec!(10)))
                .await;
            assert_eq!(result, PaymentResult::failure(INVALID_PAYMENT_METHOD));
        }
        assert_eq!(card.call_count(), 0);
    }

    #[tokio::test]
    async fn invalid_orders_are_rejected_for_every_method() {
        let (dispatcher, card, paypal) = default_dispatcher();

        for method in PaymentMethod::ALL {
            let zero = dispatcher
                .process_payment(method.tag(), &order("order_123", dec!(0)))
                .await;
            assert_eq!(zero, PaymentResult::failure("Valid total amount is required"));

            let mut empty = order("order_123", dec!(10));
            empty.items.clear();
            let result = dispatcher.process_payment(method.tag(), &empty).await;
            assert_eq!(
                result,
                PaymentResult::failure("Order must contain at least one item")
            );
        }

        assert_eq!(card.call_count(), 0);
        assert!(paypal.created_orders().is_empty());
    }

    #[tokio::test]
    async fn sub_cent_totals_are_rejected_before_any_provider_call() {
        let (dispatcher, card, paypal) = default_dispatcher();

        for method in PaymentMethod::ALL {
            let result = dispatcher
                .process_payment(method.tag(), &order("order_123", dec!(0.004)))
                .await;
            assert_eq!(
                result,
                PaymentResult::failure("Valid total amount is required"),
                "{} accepted a total that rounds to zero cents",
                method
            );
        }

        assert_eq!(card.call_count(), 0);
        assert!(paypal.created_orders().is_empty());
    }

    #[tokio::test]
    async fn price_intent_is_card_only_without_metadata() {
        let (dispatcher, card, _) = default_dispatcher();

        let result = dispatcher.create_price_intent(dec!(24.99)).await;

        assert!(result.is_success());
        let request = &card.requests()[0];
        assert_eq!(request.amount, 2499);
        assert_eq!(request.currency, "usd");
        assert_eq!(request.payment_method_types, vec!["card".to_string()]);
        assert!(request.metadata.is_empty());
    }

    #[tokio::test]
    async fn price_intent_rejects_prices_below_one_cent() {
        let (dispatcher, card, _) = default_dispatcher();

        for price in [dec!(0), dec!(-3), dec!(0.004)] {
            assert_eq!(
                dispatcher.create_price_intent(price).await,
                PaymentResult::failure(VALID_PRICE_REQUIRED)
            );
        }
        assert_eq!(card.call_count(), 0);
    }

    #[tokio::test]
    async fn capture_returns_first_capture_record() {
        let (dispatcher, _, _) = default_dispatcher();

        let created = dispatcher
            .process_payment("PayPal", &order("order_123", dec!(25)))
            .await;
        let Some(PaymentOutcome::PayPalOrder { order_id, .. }) = created.outcome() else {
            panic!("expected PayPal order, got {:?}", created);
        };

        let result = dispatcher.capture_paypal_payment(order_id).await;

        assert_eq!(
            result,
            CaptureResult::Success(CaptureOutcome {
                capture_id: format!("CAPTURE_{}", order_id),
                status: "COMPLETED".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn capture_of_unknown_order_passes_provider_message() {
        let (dispatcher, _, _) = default_dispatcher();

        let result = dispatcher.capture_paypal_payment("INVALID_ORDER_ID").await;

        assert_eq!(
            result,
            CaptureResult::failure("The specified resource does not exist.")
        );
    }

    #[tokio::test]
    async fn capture_requires_order_id() {
        let (dispatcher, _, _) = default_dispatcher();
        assert_eq!(
            dispatcher.capture_paypal_payment(" ").await,
            CaptureResult::failure(ORDER_ID_REQUIRED)
        );
    }

    #[tokio::test]
    async fn concurrent_calls_do_not_share_state() {
        let (dispatcher, _, _) = default_dispatcher();
        let mut handles = Vec::new();

        for i in 1..=32u64 {
            let dispatcher = dispatcher.clone();
            handles.push(tokio::spawn(async move {
                let order_id = format!("order_{}", i);
                let total = Decimal::from(i);
                let tag = if i % 3 == 0 { "COD" } else { "Card" };
                let result = dispatcher
                    .process_payment(tag, &order(&order_id, total))
                    .await;
                (i, tag, order_id, result)
            }));
        }

        for handle in handles {
            let (i, tag, order_id, result) = handle.await.unwrap();
            match (tag, result) {
                ("COD", PaymentResult::Success(PaymentOutcome::CashOnDelivery { .. })) => {}
                (
                    "Card",
                    PaymentResult::Success(PaymentOutcome::PaymentIntent {
                        client_secret,
                        payment_intent_id,
                        ..
                    }),
                ) => {
                    assert_eq!(payment_intent_id, Some(format!("pi_{}", order_id)));
                    assert_eq!(client_secret, format!("pi_{}_secret_{}", order_id, i * 100));
                }
                (tag, other) => panic!("unexpected result for {}: {:?}", tag, other),
            }
        }
    }
}
