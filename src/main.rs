use anyhow::Result;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chat_translate_relay::build_app;
use chat_translate_relay::config::Config;
use chat_translate_relay::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("chat_translate_relay=debug,tower_http=debug")),
        )
        .init();

    // Load configuration - first existing file wins, defaults only when none exists
    let config_paths: Vec<String> = vec![
        std::env::var("CONFIG_PATH").ok(),
        Some("conf.yaml".to_string()),
        Some("conf.json".to_string()),
    ]
    .into_iter()
    .flatten()
    .collect();

    let mut config = match Config::discover(config_paths.as_slice())? {
        Some((path, cfg)) => {
            info!("Loaded configuration from: {}", path);
            cfg
        }
        None => {
            info!("No config file found (tried {:?}), using defaults", config_paths);
            Config::default()
        }
    };

    config.apply_env_overrides(|name| std::env::var(name).ok());
    config.validate()?;

    let app_state = AppState::new(&config)?;
    let app = build_app(app_state);

    let host: std::net::IpAddr = config
        .system_config
        .host
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid host {}: {}", config.system_config.host, e))?;
    let addr = SocketAddr::from((host, config.system_config.port));
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
