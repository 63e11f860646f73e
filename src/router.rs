//! Radix-tree request router.
//!
//! One tree keyed by path; each leaf is the [`MethodMap`] of that route.
//! O(path-length) lookup via [`matchit`]. The router is also the single place
//! where an [`ApiError`] becomes a response.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;
use percent_encoding::percent_decode_str;
use tracing::{debug, error};

use crate::api_error::ApiError;
use crate::method_map::MethodMap;
use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each [`Router::route`] call returns `self` so registrations chain naturally.
pub struct Router {
    routes: MatchitRouter<Arc<MethodMap>>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: MatchitRouter::new() }
    }

    /// Registers the method map for `path`. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them
    /// percent-decoded (`al%20ice` → `al ice`).
    ///
    /// # Panics
    ///
    /// Panics on an invalid or conflicting path pattern.
    pub fn route(mut self, path: &str, methods: MethodMap) -> Self {
        self.routes
            .insert(path, Arc::new(methods))
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub(crate) fn lookup(&self, path: &str) -> Option<(Arc<MethodMap>, HashMap<String, String>)> {
        let matched = self.routes.at(path).ok()?;
        let methods = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), percent_decode_str(v).decode_utf8_lossy().into_owned()))
            .collect();
        Some((methods, params))
    }

    /// Routes one request and always produces a response.
    ///
    /// Unknown paths answer `404 route-not-found`; handler and dispatch
    /// failures are serialised through [`IntoResponse for ApiError`](ApiError).
    pub async fn handle(&self, mut req: Request) -> Response {
        let result = match self.lookup(req.path()) {
            Some((methods, params)) => {
                req.set_params(params);
                methods.dispatch(req).await
            }
            None => Err(ApiError::RouteNotFound { path: req.path().to_owned() }),
        };

        result.unwrap_or_else(|err| {
            if err.is_internal() {
                error!(code = err.code(), "request failed: {err}");
            } else {
                debug!(code = err.code(), "request rejected: {err}");
            }
            err.into_response()
        })
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}
