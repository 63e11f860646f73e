//! Method guard and the guarded-handler wrapper.
//!
//! Every handler in a [`MethodMap`](crate::MethodMap) is wrapped by
//! [`guarded`], so its body only ever sees requests for the method it was
//! registered under. The dispatcher already selects by method; the guard
//! checks again at the handler boundary.

use crate::api_error::ApiError;
use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;

/// Fails with [`ApiError::MethodMismatch`] unless `actual` is exactly the wire
/// name of `expected`.
pub fn ensure_method(actual: &str, expected: Method) -> Result<(), ApiError> {
    if actual == expected.as_str() {
        Ok(())
    } else {
        Err(ApiError::MethodMismatch { actual: actual.to_owned(), expected })
    }
}

/// A handler bound to the method it was registered for.
#[derive(Clone)]
pub struct GuardedHandler {
    expected: Method,
    inner: BoxedHandler,
}

/// Wraps `handler` so it only runs for `expected` requests.
pub fn guarded(expected: Method, handler: impl Handler) -> GuardedHandler {
    GuardedHandler { expected, inner: handler.into_boxed_handler() }
}

impl GuardedHandler {
    pub fn expected(&self) -> Method {
        self.expected
    }

    /// Runs the method guard, then the wrapped handler with the same request.
    pub async fn call(&self, req: Request) -> Result<Response, ApiError> {
        ensure_method(req.method(), self.expected)?;
        self.inner.call(req).await
    }
}

impl std::fmt::Debug for GuardedHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuardedHandler")
            .field("expected", &self.expected)
            .finish_non_exhaustive()
    }
}
