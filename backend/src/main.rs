//! Backend entry-point: loads settings, selects the document store, and
//! serves the REST API.

mod server;

use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use mesto::settings::AppSettings;
use server::{ServerConfig, build_store, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let store = build_store(&settings).await?;
    let config = ServerConfig::new(settings.host(), settings.port(), settings.caller_id())
        .with_store(store);

    create_server(config)?.await
}
