use checkout_service::{config::CheckoutConfig, Application};
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CheckoutConfig::load()?;

    init_tracing(
        "checkout-service",
        &config.common.log_level,
        config.common.otlp_endpoint.as_deref(),
    );

    let application = Application::build(config).await?;
    tracing::info!(port = application.port(), "Starting checkout-service");
    application.run_until_stopped().await?;

    Ok(())
}
