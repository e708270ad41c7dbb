use actix_web::{web, HttpServer};
use sesame3_proxy::{
    config::load_dotenv, create_app, telemetry, AppMetrics, DoorController, LoggingConfig,
    MetricsConfig, SesameConfig,
};
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // A missing .env is fine; an unreadable or malformed one is not
    let dotenv = load_dotenv();

    let logging = LoggingConfig::from_env();
    if let Err(e) = telemetry::init_tracing(&logging) {
        eprintln!("failed to initialize tracing: {e}");
    }
    match dotenv {
        Ok(true) => info!("Loaded environment from .env"),
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "Invalid .env file, refusing to start");
            return Err(std::io::Error::other(e.to_string()));
        }
    }

    // Invalid credentials must keep the proxy from coming up
    let config = SesameConfig::from_env().map_err(|e| {
        error!(error = %e, "Invalid configuration, refusing to start");
        std::io::Error::other(e.to_string())
    })?;
    let metrics_config = MetricsConfig::from_env();

    let metrics = AppMetrics::new().map_err(|e| {
        error!(error = %e, "Failed to create metrics registry");
        std::io::Error::other(e.to_string())
    })?;

    let door = DoorController::from_config(&config)
        .map_err(|e| {
            error!(error = %e, "Failed to build Sesame HTTP client");
            std::io::Error::other(e.to_string())
        })?
        .with_metrics(metrics.clone());

    let door = web::Data::new(door);
    let metrics = web::Data::new(metrics);
    let bind_address = config.bind_address();

    info!(
        bind_address = %bind_address,
        api_base_url = %config.api_base_url,
        devices = config.devices.len(),
        "Sesame3 proxy starting"
    );

    HttpServer::new(move || create_app(door.clone(), metrics.clone(), metrics_config.clone()))
        .bind(&bind_address)?
        .run()
        .await
}
