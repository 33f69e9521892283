use std::sync::Arc;

use crate::http::request::Request;
use crate::http::response::Response;

/// Application handler: runs synchronously on the connection's thread.
pub type Handler = Arc<dyn Fn(&Request) -> Response + Send + Sync>;

/// A (method, path) pair bound to one handler. Both match exactly.
#[derive(Clone)]
pub struct RouteDefinition {
    pub method: String,
    pub path: String,
    pub handler: Handler,
}

impl RouteDefinition {
    pub fn new<F>(method: impl Into<String>, path: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Request) -> Response + Send + Sync + 'static,
    {
        Self {
            method: method.into(),
            path: path.into(),
            handler: Arc::new(handler),
        }
    }
}

impl std::fmt::Debug for RouteDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteDefinition")
            .field("method", &self.method)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Flat, ordered route table. First registered match wins.
///
/// Immutable once built; share it between connections with `Arc<Router>`.
#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: Vec<RouteDefinition>,
}

impl Router {
    pub fn new(routes: Vec<RouteDefinition>) -> Self {
        Self { routes }
    }

    /// Appends a route.
    ///
    /// ```
    /// # use switchyard::http::router::Router;
    /// # use switchyard::http::response::Response;
    /// let router = Router::default()
    ///     .route("GET", "/", |_req| Response::ok("root"))
    ///     .route("GET", "/", |_req| Response::ok("shadowed"));
    /// assert_eq!(router.len(), 2);
    /// assert!(router.resolve("GET", "/").is_some());
    /// assert!(router.resolve("POST", "/").is_none());
    /// ```
    pub fn route<F>(mut self, method: impl Into<String>, path: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Request) -> Response + Send + Sync + 'static,
    {
        self.routes.push(RouteDefinition::new(method, path, handler));
        self
    }

    /// Linear scan in registration order.
    pub fn resolve(&self, method: &str, path: &str) -> Option<&Handler> {
        self.routes
            .iter()
            .find(|r| r.method == method && r.path == path)
            .map(|r| &r.handler)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
