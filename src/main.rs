//! Wiring & DI. Entry point: load config, build the container, run the UI.
//! No business logic here.

use dotenv::dotenv;
use repi_recipe::adapters::ui::tui::TuiInputPort;
use repi_recipe::app::AppContainer;
use repi_recipe::ports::InputPort;
use repi_recipe::shared::config::AppConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    repi_recipe::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "invalid configuration, using defaults");
        AppConfig::default()
    });
    if cfg.stub_token_or_default().is_some() {
        info!("stand-in bearer token enabled (REPI_STUB_TOKEN)");
    }

    let container = AppContainer::from_config(&cfg)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
        Arc::clone(&container.repository),
        Arc::clone(&container.use_cases),
    ));

    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
