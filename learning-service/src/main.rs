use learning_service::config::LearningConfig;
use learning_service::startup::{self, SERVICE};
use service_core::observability::{init_metrics, init_tracing};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = LearningConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    init_tracing(
        SERVICE.name,
        config.common.log_level(),
        config.common.debug,
        config.common.otlp_endpoint.as_deref(),
    )
    .map_err(|e| std::io::Error::other(e.to_string()))?;
    init_metrics().map_err(|e| std::io::Error::other(e.to_string()))?;

    let app = startup::build(config).await.map_err(|e| {
        tracing::error!("Failed to start {}: {}", SERVICE.name, e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    app.run_until_stopped().await
}
