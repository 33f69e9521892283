use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::Config;
use crate::http::connection::{Closed, ConnectionOptions};
use crate::http::router::Router;
use crate::http::session::Session;

const READ_CHUNK: usize = 1024;

/// How often the accept loop checks the shutdown flag while idle.
const ACCEPT_POLL: Duration = Duration::from_millis(50);

pub fn run(cfg: &Config, router: Arc<Router>, shutdown: &AtomicBool) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr)?;
    info!("Listening on {} (blocking)", listener.local_addr()?);

    serve(listener, router, cfg.connection_options(), shutdown)
}

/// Accepts connections, one thread each, until `shutdown` is set.
///
/// Connections already accepted keep running on their own threads.
pub fn serve(
    listener: TcpListener,
    router: Arc<Router>,
    options: ConnectionOptions,
    shutdown: &AtomicBool,
) -> anyhow::Result<()> {
    listener.set_nonblocking(true)?;

    while !shutdown.load(Ordering::Acquire) {
        let (stream, peer) = match listener.accept() {
            Ok(accepted) => accepted,
            Err(e) if e.kind() == ErrorKind::WouldBlock => {
                thread::sleep(ACCEPT_POLL);
                continue;
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        info!("Accepted connection from {}", peer);

        let router = Arc::clone(&router);
        thread::spawn(move || match handle(stream, router, options) {
            Ok(closed) => debug!(%peer, reason = ?closed, "Connection closed"),
            Err(e) => tracing::error!("Connection error from {}: {}", peer, e),
        });
    }

    info!("Blocking listener stopped");
    Ok(())
}

/// Reads until the session answers, writes the answer, and closes.
pub fn handle(
    mut stream: TcpStream,
    router: Arc<Router>,
    options: ConnectionOptions,
) -> anyhow::Result<Closed> {
    // Some platforms hand out accepted sockets in the listener's mode.
    stream.set_nonblocking(false)?;
    stream.set_read_timeout(options.idle_timeout)?;

    let mut session = Session::new(router, options.session);
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        let n = match stream.read(&mut chunk) {
            Ok(n) => n,
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                return Ok(Closed::IdleTimeout);
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };

        if n == 0 {
            return Ok(Closed::PeerClosed);
        }

        if let Some(outbound) = session.feed(&chunk[..n]) {
            stream.write_all(&outbound.bytes)?;
            stream.flush()?;
            if outbound.close {
                stream.shutdown(Shutdown::Write)?;
            }
            return Ok(Closed::Responded);
        }

        if let Some(max) = options.max_request_bytes {
            if session.buffered_len() > max {
                return Ok(Closed::TooLarge);
            }
        }
    }
}
