//! HTTP framing and dispatch.
//!
//! One request per connection: bytes are accumulated until the head and the
//! declared body are complete, the request is routed to a handler, and the
//! handler's response is written before the connection closes.
//!
//! # Architecture
//!
//! - **`buffer`**: accumulates raw bytes and locates the blank line ending the head
//! - **`parser`**: parses the start line, query block and headers
//! - **`body`**: decides whether the declared body has fully arrived
//! - **`router`**: first-match-wins table of (method, path) → handler
//! - **`request`** / **`response`**: the values handlers consume and produce
//! - **`writer`**: serializes a response to wire bytes
//! - **`session`**: the transport-agnostic per-connection state machine
//! - **`connection`**: drives a session over an async stream
//!
//! # Session State Machine
//!
//! ```text
//!        ┌──────────────────┐
//!        │ AwaitingHeaders  │ ← Append bytes until a blank line shows up
//!        └──────┬───────────┘
//!               │ Head parsed (malformed → 400, Terminal)
//!               ▼
//!        ┌──────────────────┐
//!        │  AwaitingBody    │ ← Wait until body length == content-length
//!        └──────┬───────────┘
//!               │ Body complete
//!               ▼
//!        ┌──────────────────┐
//!        │   Dispatching    │ ← Route, run handler (miss → 404, panic → 500)
//!        └──────┬───────────┘
//!               │ Response serialized
//!               ▼
//!        ┌──────────────────┐
//!        │    Terminal      │ ← One write, then close
//!        └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use switchyard::http::response::Response;
//! use switchyard::http::router::Router;
//! use switchyard::http::session::{Session, SessionOptions};
//!
//! let router = Arc::new(Router::default().route("PUT", "/body", |req| Response::ok(req.body.clone())));
//! let mut session = Session::new(router, SessionOptions::default());
//!
//! assert!(session.feed(b"PUT /body HTTP/1.1\r\ncontent-length: 9\r\n\r\nsome ").is_none());
//! let out = session.feed(b"body").unwrap();
//! assert_eq!(&out.bytes[..], b"HTTP/1.1 200\r\n\r\nsome body");
//! ```

pub mod body;
pub mod buffer;
pub mod connection;
pub mod parser;
pub mod request;
pub mod response;
pub mod router;
pub mod session;
pub mod writer;
