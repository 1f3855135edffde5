use brandcraft_service::config::BrandcraftConfig;
use brandcraft_service::services::metrics::init_metrics;
use brandcraft_service::startup::Application;
use service_core::error::AppError;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    // Load configuration - fail fast if invalid
    let config = BrandcraftConfig::load()?;

    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    init_tracing(
        &config.service_name,
        &log_level,
        config.otlp_endpoint.as_deref(),
    );

    init_metrics();

    tracing::info!(
        service = %config.service_name,
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.common.environment,
        api_prefix = %config.api_prefix,
        "Starting BrandCraft service"
    );

    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    tracing::info!("Server stopped");
    Ok(())
}
