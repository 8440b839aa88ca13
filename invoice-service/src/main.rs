use invoice_service::config::InvoiceConfig;
use invoice_service::services::init_metrics;
use invoice_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Initialize metrics recorder (must be before any metrics are recorded)
    init_metrics();

    // Loaded before tracing so LOG_LEVEL and OTLP_ENDPOINT from .env apply
    let config = InvoiceConfig::load();
    let (log_level, otlp_endpoint) = match &config {
        Ok(c) => (c.log_level.clone(), c.otlp_endpoint.clone()),
        Err(_) => ("info".to_string(), None),
    };
    init_tracing("invoice-service", &log_level, otlp_endpoint.as_deref());

    let config = config.map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to start invoice-service: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    tracing::info!(port = app.port(), "invoice-service started");
    app.run_until_stopped().await
}
