use crate::http::request::Header;

/// HTTP status codes the server produces on its own.
///
/// Handlers are free to return any numeric status; these cover the
/// responses the session itself emits plus plain success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use switchyard::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
        }
    }
}

impl From<StatusCode> for u16 {
    fn from(status: StatusCode) -> Self {
        status.as_u16()
    }
}

/// A handler's answer, consumed once by the serializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Numeric status code
    pub status: u16,
    /// Headers in the order they will be written
    pub headers: Vec<Header>,
    /// Body text, written verbatim
    pub body: String,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// No Content-Length is added: the body is written as-is and the
/// connection close marks its end.
///
/// # Example
///
/// ```
/// # use switchyard::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "text/html")
///     .body("<html></html>")
///     .build();
/// assert_eq!(response.status, 200);
/// ```
pub struct ResponseBuilder {
    status: u16,
    headers: Vec<Header>,
    body: String,
}

impl ResponseBuilder {
    pub fn new(status: impl Into<u16>) -> Self {
        Self {
            status: status.into(),
            headers: Vec::new(),
            body: String::new(),
        }
    }

    /// Appends a header. Repeated keys are kept in order.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(Header::new(key, value));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> Response {
        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// 200 with the given body and no headers.
    pub fn ok(body: impl Into<String>) -> Self {
        ResponseBuilder::new(StatusCode::Ok).body(body).build()
    }

    /// 404 with no headers and no body.
    pub fn not_found() -> Self {
        ResponseBuilder::new(StatusCode::NotFound).build()
    }

    /// 400 with no headers and no body.
    pub fn bad_request() -> Self {
        ResponseBuilder::new(StatusCode::BadRequest).build()
    }

    /// 500 with no headers and no body.
    pub fn internal_error() -> Self {
        ResponseBuilder::new(StatusCode::InternalServerError).build()
    }
}
