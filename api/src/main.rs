use api::app::App;
use api::config::{Config, Environment};
use api::http::server::ApiError;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(environment: &Environment) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if environment.structured_logs() {
        builder.json().init();
    } else {
        builder.pretty().init();
    }
}

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // Variables already set in the process win over .env
    let dotenv = dotenvy::dotenv();
    let config = Config::parse();
    init_tracing(&config.environment);

    match dotenv {
        Ok(path) => info!(path = %path.display(), "Loaded .env file"),
        Err(_) => info!("No .env file, reading process environment"),
    }

    let app = App::new(config).await?;
    app.start().await
}
