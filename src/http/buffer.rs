use bytes::BytesMut;

/// Initial capacity for a fresh connection buffer.
const INITIAL_CAPACITY: usize = 4096;

/// Location of the blank line that ends the request head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderTerminator {
    /// Offset where the blank line begins (end of the last header line's text).
    pub head_end: usize,
    /// Offset of the first body byte.
    pub body_start: usize,
}

/// Accumulates the raw bytes of one request across partial reads.
#[derive(Debug)]
pub struct MessageBuffer {
    bytes: BytesMut,
    scanned: usize,
}

impl MessageBuffer {
    pub fn new() -> Self {
        Self {
            bytes: BytesMut::with_capacity(INITIAL_CAPACITY),
            scanned: 0,
        }
    }

    pub fn append(&mut self, chunk: &[u8]) {
        self.bytes.extend_from_slice(chunk);
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Finds the first blank line, accepting `\r\n\r\n` as well as a bare `\n\n`.
    ///
    /// Bytes already scanned on a previous call are skipped, except for the
    /// last few, so a terminator split across two appends is still found.
    pub fn find_header_terminator(&mut self) -> Option<HeaderTerminator> {
        let buf = &self.bytes[..];
        // A terminator is at most 4 bytes; back up far enough to catch one
        // that straddles the previous end of the buffer.
        let start = self.scanned.saturating_sub(3);

        for i in start..buf.len() {
            if buf[i] != b'\n' {
                continue;
            }
            // `i` ends a line. The line content stops at `i`, or `i - 1` for CRLF.
            let line_end = if i > 0 && buf[i - 1] == b'\r' { i - 1 } else { i };

            match &buf[i + 1..] {
                [b'\n', ..] => {
                    return Some(HeaderTerminator {
                        head_end: line_end,
                        body_start: i + 2,
                    });
                }
                [b'\r', b'\n', ..] => {
                    return Some(HeaderTerminator {
                        head_end: line_end,
                        body_start: i + 3,
                    });
                }
                _ => {}
            }
        }

        self.scanned = buf.len();
        None
    }
}

impl Default for MessageBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_crlf_terminator() {
        let mut buf = MessageBuffer::new();
        buf.append(b"GET / HTTP/1.1\r\nHost: a\r\n\r\nbody");

        let term = buf.find_header_terminator().unwrap();
        assert_eq!(&buf.as_bytes()[..term.head_end], b"GET / HTTP/1.1\r\nHost: a");
        assert_eq!(&buf.as_bytes()[term.body_start..], b"body");
    }

    #[test]
    fn terminator_split_across_appends() {
        let mut buf = MessageBuffer::new();
        buf.append(b"GET / HTTP/1.1\r\n\r");
        assert!(buf.find_header_terminator().is_none());

        buf.append(b"\n");
        let term = buf.find_header_terminator().unwrap();
        assert_eq!(term.body_start, buf.len());
    }
}
