use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use piazza_backend::api::{start_server, ApiContext};
use piazza_backend::config::{self, Settings};
use piazza_backend::engine::HttpOcrEngine;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::from_env();
    tracing::info!(
        version = config::APP_VERSION,
        host = %settings.host,
        port = settings.port,
        upload_dir = %settings.upload_dir.display(),
        engine_url = %settings.engine_url,
        groq_key_set = settings.groq_api_key.is_some(),
        "Starting {}",
        config::APP_NAME
    );

    tokio::fs::create_dir_all(&settings.upload_dir).await?;

    let engine = Arc::new(HttpOcrEngine::new(
        &settings.engine_url,
        settings.engine_timeout_secs,
    ));

    let addr: SocketAddr = format!("{}:{}", settings.host, settings.port).parse()?;
    let ctx = ApiContext::new(settings, engine);
    let mut server = start_server(ctx, addr).await?;

    tracing::info!(addr = %server.addr, "{} ready", config::APP_NAME);

    tokio::signal::ctrl_c().await?;
    tracing::info!("Ctrl-C received, shutting down");
    server.shutdown();

    Ok(())
}
