use std::fmt;

/// A single header line, kept in wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub key: String,
    pub value: String,
}

/// A single query parameter, kept in wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParameter {
    pub key: String,
    pub value: String,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl QueryParameter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.key, self.value)
    }
}

impl fmt::Display for QueryParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.key, self.value)
    }
}

/// Renders a list as `[a, b, c]` using each item's `Display`.
///
/// ```
/// # use switchyard::http::request::{render_list, Header};
/// let headers = vec![Header::new("custom-header", "foo")];
/// assert_eq!(render_list(&headers), "[{custom-header, foo}]");
/// ```
pub fn render_list<T: fmt::Display>(items: &[T]) -> String {
    let rendered: Vec<String> = items.iter().map(ToString::to_string).collect();
    format!("[{}]", rendered.join(", "))
}

/// A fully received request, handed to exactly one handler invocation.
///
/// Only built once the whole declared body is present.
#[derive(Debug, Clone)]
pub struct Request {
    /// Method token from the start line, matched exactly (e.g. "GET")
    pub method: String,
    /// Path segment of the start line, without the query block
    pub path: String,
    /// Headers in wire order, duplicates kept
    pub headers: Vec<Header>,
    /// Query parameters in wire order, duplicates kept
    pub params: Vec<QueryParameter>,
    /// Body decoded as UTF-8 (invalid sequences replaced)
    pub body: String,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Option<String>,
    path: Option<String>,
    headers: Vec<Header>,
    params: Vec<QueryParameter>,
    body: String,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            path: None,
            headers: Vec::new(),
            params: Vec::new(),
            body: String::new(),
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(Header::new(key, value));
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push(QueryParameter::new(key, value));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        Ok(Request {
            method: self.method.ok_or("method missing")?,
            path: self.path.ok_or("path missing")?,
            headers: self.headers,
            params: self.params,
            body: self.body,
        })
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Request {
    /// Returns the value of the first header whose name matches `key`,
    /// ignoring ASCII case.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.key.eq_ignore_ascii_case(key))
            .map(|h| h.value.as_str())
    }

    /// Returns the value of the first query parameter named `key` (case-sensitive).
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }

    /// Declared body length, `None` when absent or unparseable.
    ///
    /// Requests built by a session have already had this header validated,
    /// so for those `None` means no header was sent.
    pub fn content_length(&self) -> Option<usize> {
        self.header("Content-Length").and_then(|v| v.trim().parse().ok())
    }
}
