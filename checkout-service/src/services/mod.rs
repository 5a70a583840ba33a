pub mod dispatcher;
pub mod metrics;
pub mod providers;

pub use dispatcher::PaymentDispatcher;
pub use metrics::{get_metrics, init_metrics};
pub use providers::{CardProcessor, PayPalClient, PayPalGateway, ProviderError, StripeClient};
