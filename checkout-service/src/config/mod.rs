use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::str::FromStr;

pub const STRIPE_API_BASE_URL: &str = "https://api.stripe.com";
pub const PAYPAL_SANDBOX_BASE_URL: &str = "https://api-m.sandbox.paypal.com";
pub const PAYPAL_LIVE_BASE_URL: &str = "https://api-m.paypal.com";

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub stripe: StripeConfig,
    pub paypal: PayPalConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeConfig {
    pub secret_key: Secret<String>,
    pub api_base_url: String,
}

impl StripeConfig {
    pub fn is_configured(&self) -> bool {
        !self.secret_key.expose_secret().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayPalEnvironment {
    Sandbox,
    Live,
}

impl FromStr for PayPalEnvironment {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sandbox" => Ok(PayPalEnvironment::Sandbox),
            "live" | "production" => Ok(PayPalEnvironment::Live),
            other => Err(AppError::ConfigError(anyhow::anyhow!(
                "Unknown PayPal environment: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PayPalConfig {
    pub client_id: String,
    pub client_secret: Secret<String>,
    pub environment: PayPalEnvironment,
    /// Overrides the environment's API host.
    pub api_base_url: Option<String>,
}

impl PayPalConfig {
    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.expose_secret().is_empty()
    }

    pub fn base_url(&self) -> &str {
        match (&self.api_base_url, self.environment) {
            (Some(url), _) => url,
            (None, PayPalEnvironment::Sandbox) => PAYPAL_SANDBOX_BASE_URL,
            (None, PayPalEnvironment::Live) => PAYPAL_LIVE_BASE_URL,
        }
    }
}

/// Storefront details used for PayPal redirects and branding.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub url: String,
    pub brand_name: String,
}

impl StoreConfig {
    pub fn return_url(&self) -> String {
        format!("{}/order/success", self.url.trim_end_matches('/'))
    }

    pub fn cancel_url(&self) -> String {
        format!("{}/checkout", self.url.trim_end_matches('/'))
    }
}

impl CheckoutConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = common.is_production();

        let environment: PayPalEnvironment =
            get_env("PAYPAL_ENVIRONMENT", Some("sandbox"), false)?.parse()?;

        Ok(CheckoutConfig {
            common,
            stripe: StripeConfig {
                secret_key: Secret::new(get_env("STRIPE_SECRET_KEY", Some(""), is_prod)?),
                api_base_url: get_env("STRIPE_API_BASE_URL", Some(STRIPE_API_BASE_URL), false)?,
            },
            paypal: PayPalConfig {
                client_id: get_env("PAYPAL_CLIENT_ID", Some(""), is_prod)?,
                client_secret: Secret::new(get_env("PAYPAL_CLIENT_SECRET", Some(""), is_prod)?),
                environment,
                api_base_url: env::var("PAYPAL_API_BASE_URL")
                    .ok()
                    .filter(|url| !url.is_empty()),
            },
            store: StoreConfig {
                url: get_env("STORE_URL", Some("http://localhost:3000"), is_prod)?,
                brand_name: get_env("STORE_BRAND_NAME", Some("Shofy"), false)?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
