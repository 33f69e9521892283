//! Switchyard - single-request HTTP/1.1 framing and dispatch
//!
//! A transport-agnostic connection session plus blocking and async transports.

pub mod config;
pub mod http;
pub mod routes;
pub mod server;
