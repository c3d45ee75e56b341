//! chartlist - Billboard Hot 100 to Spotify playlist web form
//!
//! Serves one HTML form on all interfaces (port 5000 unless configured).
//! Startup fails before serving anything when Spotify credentials are
//! missing.

use anyhow::Result;
use chartlist_common::config::{config_file_path, load_dotenv, load_toml_config};
use tracing::info;
use tracing_subscriber::EnvFilter;

use chartlist::config::Config;
use chartlist::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // TOML first: it carries the default log level
    let toml_path = config_file_path();
    let toml_config = load_toml_config(toml_path.as_deref())?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&toml_config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(
        "Starting chartlist v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    load_dotenv();
    let config = Config::load(&toml_config)?;

    info!("Chart source: {}", config.chart_url_template);
    info!("Search pacing: {:?}", config.pacing);
    info!("Token cache: {}", config.token_cache_path.display());

    let state = AppState::from_config(&config)?;
    let app = chartlist::build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Listening on http://{}", config.bind_addr);
    info!("Spotify redirect URI: {}", config.spotify.redirect_uri);

    axum::serve(listener, app).await?;

    Ok(())
}
