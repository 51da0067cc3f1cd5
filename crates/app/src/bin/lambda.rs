//! Jobsheet API - AWS Lambda Runtime

use lambda_http::{run, Error};
use tracing::info;

use jobsheet_app::{create_app, log_filter, with_http_layers};
use jobsheet_common::Config;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config =
        Config::from_env().map_err(|e| Error::from(format!("Configuration error: {}", e)))?;

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&config))
        .json()
        .without_time()
        .init();

    info!("Initializing Jobsheet API Lambda");

    let app = create_app(&config)
        .map_err(|e| Error::from(format!("App initialization error: {}", e)))?;

    let cors_origins = config
        .cors_allowed_origins
        .clone()
        .ok_or_else(|| Error::from("CORS_ALLOWED_ORIGINS environment variable is required"))?;

    let app = with_http_layers(app, &cors_origins);

    info!("Jobsheet API Lambda ready to serve requests");

    run(app).await
}
