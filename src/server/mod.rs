//! Transports that plumb socket bytes into [`Session`](crate::http::session::Session)s.
//!
//! - **`listener`**: tokio event loop, one task per connection
//! - **`blocking`**: std sockets, one OS thread per connection

pub mod blocking;
pub mod listener;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crate::config::{Config, Transport};
use crate::http::router::Router;

/// Sets the flag when dropped, so cancelling [`run`] stops the blocking accept loop.
struct StopOnDrop(Arc<AtomicBool>);

impl Drop for StopOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Release);
    }
}

/// Runs the transport selected in `cfg` until it fails or this future is dropped.
pub async fn run(cfg: &Config, router: Arc<Router>) -> anyhow::Result<()> {
    match cfg.server.transport {
        Transport::Async => listener::run(cfg, router).await,
        Transport::Blocking => {
            let shutdown = Arc::new(AtomicBool::new(false));
            let _stop = StopOnDrop(Arc::clone(&shutdown));
            let (tx, rx) = tokio::sync::oneshot::channel();
            let cfg = cfg.clone();

            // Detached: runtime shutdown must not wait on the accept loop.
            thread::spawn(move || {
                let _ = tx.send(blocking::run(&cfg, router, &shutdown));
            });

            rx.await?
        }
    }
}
