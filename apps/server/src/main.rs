mod config;
mod main_lib;
mod scheduler;

use config::Config;
use main_lib::{build_service, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing();
    let service = build_service(&config)?;

    let refresh = scheduler::start_refresh_scheduler(service, config.refresh_interval);

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");
    refresh.abort();
    Ok(())
}
