use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";

/// Renders a response to wire bytes.
///
/// Status line carries no reason phrase, headers are written `key:value`,
/// and no Content-Length is added: the peer reads the body until close.
pub fn serialize_response(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::with_capacity(64 + resp.body.len());

    // Status line
    buf.extend_from_slice(format!("{} {}\r\n", HTTP_VERSION, resp.status).as_bytes());

    // Headers
    for header in &resp.headers {
        buf.extend_from_slice(header.key.as_bytes());
        buf.push(b':');
        buf.extend_from_slice(header.value.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    // Body
    buf.extend_from_slice(resp.body.as_bytes());

    buf
}

/// Writes serialized bytes to an async stream, tracking partial writes.
pub struct ResponseWriter<'a> {
    buffer: &'a [u8],
    written: usize,
}

impl<'a> ResponseWriter<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, written: 0 }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
