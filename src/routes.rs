//! Demo routes registered by the `switchyard` binary.

use crate::http::request::{render_list, Request};
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::http::router::Router;

/// `GET /` echoes the request headers, `GET /params` the query parameters,
/// `PUT /body` the body.
pub fn demo_router() -> Router {
    Router::default()
        .route("GET", "/", headers)
        .route("GET", "/params", params)
        .route("PUT", "/body", body)
}

fn html(content: String) -> Response {
    ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/html")
        .body(format!("<html><body>{}</body></html>", content))
        .build()
}

fn headers(req: &Request) -> Response {
    html(render_list(&req.headers))
}

fn params(req: &Request) -> Response {
    html(render_list(&req.params))
}

fn body(req: &Request) -> Response {
    ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/html")
        .body(req.body.clone())
        .build()
}
