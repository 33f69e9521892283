use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, error, trace, warn};

use crate::http::body::{self, BodyStatus, OverlongBody};
use crate::http::buffer::{HeaderTerminator, MessageBuffer};
use crate::http::parser::{parse_head, ParseError, RequestHead};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::router::Router;
use crate::http::writer::serialize_response;

/// Per-session knobs that come from configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    pub overlong_body: OverlongBody,
}

/// Observable progress of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingHeaders,
    AwaitingBody,
    Dispatching,
    Terminal,
}

/// The single write a session produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub bytes: Bytes,
    /// Always true: connections carry exactly one exchange.
    pub close: bool,
}

/// Why a session answered 400 instead of dispatching.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RejectReason {
    #[error(transparent)]
    Malformed(#[from] ParseError),

    #[error("body exceeds declared length: {declared} declared, {received} received")]
    BodyTooLong { declared: usize, received: usize },
}

/// A parsed head waiting for its body.
struct PendingBody {
    head: RequestHead,
    body_start: usize,
    declared: Option<usize>,
}

enum Phase {
    AwaitingHeaders,
    AwaitingBody(PendingBody),
    Dispatching,
    Terminal,
}

/// Request framing and dispatch for one connection.
///
/// The transport calls [`Session::feed`] with every chunk it reads, in
/// order, from a single thread at a time. The session answers at most once;
/// after that the transport writes the bytes and closes the socket.
pub struct Session {
    router: Arc<Router>,
    options: SessionOptions,
    buffer: MessageBuffer,
    phase: Phase,
}

impl Session {
    pub fn new(router: Arc<Router>, options: SessionOptions) -> Self {
        Self {
            router,
            options,
            buffer: MessageBuffer::new(),
            phase: Phase::AwaitingHeaders,
        }
    }

    pub fn state(&self) -> SessionState {
        match self.phase {
            Phase::AwaitingHeaders => SessionState::AwaitingHeaders,
            Phase::AwaitingBody(_) => SessionState::AwaitingBody,
            Phase::Dispatching => SessionState::Dispatching,
            Phase::Terminal => SessionState::Terminal,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, Phase::Terminal)
    }

    /// Bytes held for this request so far.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Handles one byte-arrival event.
    ///
    /// Returns `None` while the request is still incomplete, and the
    /// serialized response once it has been dispatched (or rejected).
    pub fn feed(&mut self, chunk: &[u8]) -> Option<Outbound> {
        // `Dispatching` holds the slot while the current phase is worked on.
        let pending = match std::mem::replace(&mut self.phase, Phase::Dispatching) {
            Phase::AwaitingHeaders => {
                self.buffer.append(chunk);
                let Some(terminator) = self.buffer.find_header_terminator() else {
                    self.phase = Phase::AwaitingHeaders;
                    return None;
                };
                match self.read_head(terminator) {
                    Ok(pending) => pending,
                    Err(e) => return Some(self.reject(e.into())),
                }
            }
            Phase::AwaitingBody(pending) => {
                self.buffer.append(chunk);
                pending
            }
            // A session left in `Dispatching` never finished its previous
            // event; it is as done as a terminal one.
            Phase::Dispatching | Phase::Terminal => {
                trace!(len = chunk.len(), "Ignoring bytes after response");
                self.phase = Phase::Terminal;
                return None;
            }
        };

        let present = self.buffer.len() - pending.body_start;
        match body::check(pending.declared, present) {
            BodyStatus::Complete => Some(self.dispatch(pending)),
            BodyStatus::Incomplete => {
                self.phase = Phase::AwaitingBody(pending);
                None
            }
            BodyStatus::Overflow => {
                let declared = pending.declared.unwrap_or(0);
                match self.options.overlong_body {
                    OverlongBody::Wait => {
                        debug!(declared, received = present, "Body longer than declared, waiting");
                        self.phase = Phase::AwaitingBody(pending);
                        None
                    }
                    OverlongBody::Reject => Some(self.reject(RejectReason::BodyTooLong {
                        declared,
                        received: present,
                    })),
                }
            }
        }
    }

    fn read_head(&self, terminator: HeaderTerminator) -> Result<PendingBody, ParseError> {
        let head = parse_head(&self.buffer.as_bytes()[..terminator.head_end])?;
        let declared = head.content_length()?;

        trace!(
            method = %head.method,
            path = %head.path,
            headers = head.headers.len(),
            declared = ?declared,
            "Request head parsed"
        );

        Ok(PendingBody {
            head,
            body_start: terminator.body_start,
            declared,
        })
    }

    fn dispatch(&mut self, pending: PendingBody) -> Outbound {
        let PendingBody {
            head,
            body_start,
            declared,
        } = pending;

        let body_end = body_start + declared.unwrap_or(0);
        let body = String::from_utf8_lossy(&self.buffer.as_bytes()[body_start..body_end]).into_owned();

        let request = Request {
            method: head.method,
            path: head.path,
            headers: head.headers,
            params: head.params,
            body,
        };

        let response = match self.router.resolve(&request.method, &request.path) {
            Some(handler) => match panic::catch_unwind(AssertUnwindSafe(|| handler(&request))) {
                Ok(response) => response,
                Err(_) => {
                    error!(
                        method = %request.method,
                        path = %request.path,
                        "Handler panicked"
                    );
                    Response::internal_error()
                }
            },
            None => Response::not_found(),
        };

        debug!(
            method = %request.method,
            path = %request.path,
            status = response.status,
            "Request dispatched"
        );

        self.finish(&response)
    }

    fn reject(&mut self, reason: RejectReason) -> Outbound {
        warn!(error = %reason, "Rejecting malformed request");
        self.finish(&Response::bad_request())
    }

    fn finish(&mut self, response: &Response) -> Outbound {
        self.phase = Phase::Terminal;
        Outbound {
            bytes: Bytes::from(serialize_response(response)),
            close: true,
        }
    }
}
