use thiserror::Error;

use crate::http::request::{Header, QueryParameter};

/// Errors for a request head that does not have the expected delimiter shape.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty start line")]
    EmptyStartLine,

    #[error("start line has no path")]
    MissingTarget,

    #[error("query parameter without '=': {0:?}")]
    InvalidQueryParameter(String),

    #[error("header line without ':': {0:?}")]
    InvalidHeader(String),

    #[error("invalid content-length: {0:?}")]
    InvalidContentLength(String),

    #[error("request head is not valid UTF-8")]
    InvalidEncoding,
}

/// Everything in a request except its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHead {
    pub method: String,
    pub path: String,
    pub params: Vec<QueryParameter>,
    pub headers: Vec<Header>,
}

impl RequestHead {
    /// Declared body length from the first `content-length` header
    /// (any case). `None` when no such header is present.
    pub fn content_length(&self) -> Result<Option<usize>, ParseError> {
        self.headers
            .iter()
            .find(|h| h.key.eq_ignore_ascii_case("content-length"))
            .map(|h| {
                h.value
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| ParseError::InvalidContentLength(h.value.clone()))
            })
            .transpose()
    }
}

/// Parses the start line and header lines.
///
/// `head` is everything before the blank line. Lines end in `\r\n` or `\n`.
pub fn parse_head(head: &[u8]) -> Result<RequestHead, ParseError> {
    let text = std::str::from_utf8(head).map_err(|_| ParseError::InvalidEncoding)?;

    let mut lines = text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l));

    let start_line = lines.next().unwrap_or_default();
    let (method, path, params) = parse_start_line(start_line)?;

    let headers = lines
        .filter(|line| !line.is_empty())
        .map(parse_header_line)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RequestHead {
        method,
        path,
        params,
        headers,
    })
}

fn parse_start_line(line: &str) -> Result<(String, String, Vec<QueryParameter>), ParseError> {
    let mut parts = line.split(' ');

    let method = parts
        .next()
        .filter(|m| !m.is_empty())
        .ok_or(ParseError::EmptyStartLine)?;
    let target = parts
        .next()
        .filter(|t| !t.is_empty())
        .ok_or(ParseError::MissingTarget)?;

    // `&` separates the path from the query block; `?` separates
    // parameters inside it. Segments after the first `&` block are ignored.
    let mut segments = target.split('&');
    let path = segments.next().unwrap_or_default();
    let params = match segments.next() {
        Some(block) => parse_query_block(block)?,
        None => Vec::new(),
    };

    Ok((method.to_string(), path.to_string(), params))
}

fn parse_query_block(block: &str) -> Result<Vec<QueryParameter>, ParseError> {
    block
        .split('?')
        .map(|piece| {
            piece
                .split_once('=')
                .map(|(k, v)| QueryParameter::new(k, v))
                .ok_or_else(|| ParseError::InvalidQueryParameter(piece.to_string()))
        })
        .collect()
}

fn parse_header_line(line: &str) -> Result<Header, ParseError> {
    let (key, value) = line
        .split_once(':')
        .ok_or_else(|| ParseError::InvalidHeader(line.to_string()))?;
    let value = value.strip_prefix(' ').unwrap_or(value);

    Ok(Header::new(key, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let head = parse_head(b"GET / HTTP/1.1\r\nHost: example.com").unwrap();

        assert_eq!(head.method, "GET");
        assert_eq!(head.path, "/");
        assert_eq!(head.headers, vec![Header::new("Host", "example.com")]);
        assert_eq!(head.content_length(), Ok(None));
    }
}
