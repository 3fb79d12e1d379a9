use service_core::observability::init_tracing;
use trait_service::config::TraitServiceConfig;
use trait_service::services::init_metrics;
use trait_service::Application;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = TraitServiceConfig::load().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "trait-service",
        &config.observability.log_level,
        config.observability.otlp_endpoint.as_deref(),
    );

    // Must precede any recorded metric
    init_metrics()?;

    let application = Application::build(config).await?;
    application.run_until_stopped().await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    Ok(())
}
