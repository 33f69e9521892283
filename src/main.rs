use std::sync::Arc;

use anyhow::Context;
use switchyard::config::Config;
use switchyard::{routes, server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true)
        .init();

    let mut cfg = Config::load()?;
    if let Some(arg) = std::env::args().nth(1) {
        let port = arg
            .parse::<u16>()
            .with_context(|| format!("invalid port argument {:?}", arg))?;
        cfg = cfg.with_port(port);
    }
    let router = Arc::new(routes::demo_router());

    tokio::select! {
        res = server::run(&cfg, router) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
