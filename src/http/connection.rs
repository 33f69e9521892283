use std::sync::Arc;
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::task;
use tokio::time::timeout;

use crate::http::router::Router;
use crate::http::session::{Outbound, Session, SessionOptions};
use crate::http::writer::ResponseWriter;

const READ_CHUNK: usize = 1024;

/// Transport-level limits applied around a session.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectionOptions {
    pub session: SessionOptions,
    /// Close the connection when no bytes arrive for this long.
    pub idle_timeout: Option<Duration>,
    /// Close the connection once this many request bytes are buffered.
    pub max_request_bytes: Option<usize>,
}

/// Why a connection ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closed {
    /// A response was written.
    Responded,
    /// The peer closed before a full request arrived.
    PeerClosed,
    /// No bytes arrived within the idle timeout.
    IdleTimeout,
    /// The request grew past `max_request_bytes`.
    TooLarge,
}

/// Drives one session over an async stream.
///
/// Each chunk is fed to the session on tokio's blocking pool, so a handler
/// that takes its time only holds up its own connection.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    router: Arc<Router>,
    options: ConnectionOptions,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, router: Arc<Router>, options: ConnectionOptions) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(READ_CHUNK),
            router,
            options,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<Closed> {
        let mut session = Session::new(Arc::clone(&self.router), self.options.session);

        loop {
            self.buffer.reserve(READ_CHUNK);

            let n = match self.options.idle_timeout {
                Some(limit) => match timeout(limit, self.stream.read_buf(&mut self.buffer)).await {
                    Ok(read) => read?,
                    Err(_) => return Ok(Closed::IdleTimeout),
                },
                None => self.stream.read_buf(&mut self.buffer).await?,
            };

            if n == 0 {
                return Ok(Closed::PeerClosed);
            }

            let chunk = self.buffer.split().freeze();
            let (fed, outbound) = feed_off_runtime(session, chunk).await?;
            session = fed;

            if let Some(outbound) = outbound {
                self.respond(outbound).await?;
                return Ok(Closed::Responded);
            }

            if let Some(max) = self.options.max_request_bytes {
                if session.buffered_len() > max {
                    return Ok(Closed::TooLarge);
                }
            }
        }
    }

    async fn respond(&mut self, outbound: Outbound) -> anyhow::Result<()> {
        let mut writer = ResponseWriter::new(&outbound.bytes);
        writer.write_to_stream(&mut self.stream).await?;

        if outbound.close {
            self.stream.shutdown().await?;
        }
        Ok(())
    }
}

/// Feeds a chunk on the blocking pool and hands the session back.
async fn feed_off_runtime(
    mut session: Session,
    chunk: Bytes,
) -> anyhow::Result<(Session, Option<Outbound>)> {
    let fed = task::spawn_blocking(move || {
        let outbound = session.feed(&chunk);
        (session, outbound)
    })
    .await?;
    Ok(fed)
}
