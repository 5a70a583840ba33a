use checkout_service::config::{
    CheckoutConfig, PayPalConfig, PayPalEnvironment, StoreConfig, StripeConfig,
};
use checkout_service::startup::Application;
use secrecy::Secret;
use serde_json::{json, Value};
use service_core::config::Config;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const STORE_URL: &str = "https://shop.example.com";
pub const PAYPAL_ACCESS_TOKEN: &str = "A21AA_test_token";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
    /// Stands in for `api.stripe.com`.
    pub stripe: MockServer,
    /// Stands in for `api-m.sandbox.paypal.com`.
    pub paypal: MockServer,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let stripe = MockServer::start().await;
        let paypal = MockServer::start().await;

        let config = CheckoutConfig {
            common: Config {
                port: 0, // Random port
                ..Config::default()
            },
            stripe: StripeConfig {
                secret_key: Secret::new("sk_test_checkout".to_string()),
                api_base_url: stripe.uri(),
            },
            paypal: PayPalConfig {
                client_id: "paypal-client-id".to_string(),
                client_secret: Secret::new("paypal-client-secret".to_string()),
                environment: PayPalEnvironment::Sandbox,
                api_base_url: Some(paypal.uri()),
            },
            store: StoreConfig {
                url: STORE_URL.to_string(),
                brand_name: "Shofy".to_string(),
            },
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
            stripe,
            paypal,
        }
    }

    pub async fn process_payment(&self, body: Value) -> reqwest::Response {
        self.client
            .post(format!("{}/api/order/process-payment", self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn create_payment_intent(&self, body: Value) -> reqwest::Response {
        self.client
            .post(format!("{}/api/order/create-payment-intent", self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn capture_paypal(&self, body: Value) -> reqwest::Response {
        self.client
            .post(format!("{}/api/order/capture-paypal", self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// PayPal OAuth endpoint answering with a fixed token.
    pub async fn mock_paypal_token(&self) {
        Mock::given(method("POST"))
            .and(path("/v1/oauth2/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "scope": "https://uri.paypal.com/services/payments/payment",
                "access_token": PAYPAL_ACCESS_TOKEN,
                "token_type": "Bearer",
                "app_id": "APP-80W284485P519543T",
                "expires_in": 32400
            })))
            .mount(&self.paypal)
            .await;
    }
}

pub fn order(order_id: &str, total: &str) -> Value {
    json!({
        "orderId": order_id,
        "total": total.parse::<f64>().expect("numeric total"),
        "items": [
            { "name": "Rose Face Serum", "quantity": 2, "price": 25.25 },
            { "name": "Matte Lipstick", "quantity": 1, "price": 50 }
        ]
    })
}
