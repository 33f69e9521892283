use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::config::Config;
use crate::http::connection::{Connection, ConnectionOptions};
use crate::http::router::Router;

pub async fn run(cfg: &Config, router: Arc<Router>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr).await?;
    info!("Listening on {} (async)", listener.local_addr()?);

    serve(listener, router, cfg.connection_options()).await
}

/// Accepts connections forever, one task each.
pub async fn serve(
    listener: TcpListener,
    router: Arc<Router>,
    options: ConnectionOptions,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let router = Arc::clone(&router);
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, router, options);
            match conn.run().await {
                Ok(closed) => debug!(%peer, reason = ?closed, "Connection closed"),
                Err(e) => tracing::error!("Connection error from {}: {}", peer, e),
            }
        });
    }
}
