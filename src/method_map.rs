//! Per-route method dispatch.
//!
//! A [`MethodMap`] is the whole HTTP surface of one path: which methods it
//! answers and the guarded handler for each. Built once at startup, shared
//! read-only afterwards.

use std::collections::HashMap;

use crate::api_error::ApiError;
use crate::guard::{GuardedHandler, guarded};
use crate::handler::Handler;
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;

/// Method → guarded handler table for a single route.
///
/// ```rust
/// use accountable::{ApiError, MethodMap, Request};
///
/// async fn show(_req: Request) -> Result<&'static str, ApiError> { Ok("show") }
/// async fn replace(_req: Request) -> Result<&'static str, ApiError> { Ok("replace") }
///
/// let methods = MethodMap::new().get(show).put(replace);
/// assert_eq!(methods.allowed().len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MethodMap {
    handlers: HashMap<Method, GuardedHandler>,
}

impl MethodMap {
    pub fn new() -> Self {
        Self { handlers: HashMap::new() }
    }

    /// Registers `handler` for `method`, wrapped in the method guard.
    ///
    /// # Panics
    ///
    /// Panics if `method` already has a handler. Routes are declared at
    /// startup, so this surfaces as a boot failure.
    pub fn on(mut self, method: Method, handler: impl Handler) -> Self {
        if self.handlers.insert(method, guarded(method, handler)).is_some() {
            panic!("duplicate handler for {method}");
        }
        self
    }

    pub fn get(self, handler: impl Handler) -> Self {
        self.on(Method::Get, handler)
    }

    pub fn post(self, handler: impl Handler) -> Self {
        self.on(Method::Post, handler)
    }

    pub fn put(self, handler: impl Handler) -> Self {
        self.on(Method::Put, handler)
    }

    pub fn delete(self, handler: impl Handler) -> Self {
        self.on(Method::Delete, handler)
    }

    /// Registered methods, sorted.
    pub fn allowed(&self) -> Vec<Method> {
        let mut methods: Vec<Method> = self.handlers.keys().copied().collect();
        methods.sort();
        methods
    }

    pub fn handler(&self, method: Method) -> Option<&GuardedHandler> {
        self.handlers.get(&method)
    }

    /// Invokes the handler registered for the request's method.
    ///
    /// Unknown method strings and methods without a handler both fail with
    /// [`ApiError::UnsupportedMethod`]; no handler runs in that case.
    pub async fn dispatch(&self, req: Request) -> Result<Response, ApiError> {
        let handler = req.method()
            .parse::<Method>()
            .ok()
            .and_then(|method| self.handlers.get(&method));

        match handler {
            Some(handler) => handler.call(req).await,
            None => Err(ApiError::UnsupportedMethod {
                method: req.method().to_owned(),
                allowed: self.allowed(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    async fn echo_method(req: Request) -> Result<String, ApiError> {
        Ok(req.method().to_owned())
    }

    #[tokio::test]
    async fn dispatches_to_the_matching_handler() {
        let methods = MethodMap::new().get(echo_method);
        let response = methods.dispatch(Request::new("GET", "/")).await.unwrap();
        assert_eq!(response.body(), b"GET");
    }

    #[tokio::test]
    async fn missing_method_is_unsupported() {
        let methods = MethodMap::new().put(echo_method).get(echo_method);
        let err = methods.dispatch(Request::new("DELETE", "/")).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::UnsupportedMethod {
                method: "DELETE".to_owned(),
                allowed: vec![Method::Get, Method::Put],
            }
        );
    }

    #[tokio::test]
    async fn unknown_method_string_is_unsupported() {
        let methods = MethodMap::new().get(echo_method);
        let err = methods.dispatch(Request::new("BREW", "/")).await.unwrap_err();
        assert!(matches!(err, ApiError::UnsupportedMethod { ref method, .. } if method == "BREW"));
    }

    #[tokio::test]
    async fn unsupported_method_never_reaches_a_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let methods = MethodMap::new().get(move |_req: Request| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, ApiError>("hit")
            }
        });

        assert!(methods.dispatch(Request::new("POST", "/")).await.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn same_handler_under_two_methods_keeps_separate_guards() {
        let methods = MethodMap::new().get(echo_method).post(echo_method);

        let get = methods.handler(Method::Get).unwrap();
        let post = methods.handler(Method::Post).unwrap();
        assert_eq!(get.expected(), Method::Get);
        assert_eq!(post.expected(), Method::Post);

        assert!(get.call(Request::new("POST", "/")).await.is_err());
        assert!(post.call(Request::new("GET", "/")).await.is_err());
        assert_eq!(post.call(Request::new("POST", "/")).await.unwrap().body(), b"POST");
        assert_eq!(get.call(Request::new("GET", "/")).await.unwrap().body(), b"GET");
    }

    #[test]
    #[should_panic(expected = "duplicate handler for GET")]
    fn duplicate_registration_panics() {
        let _ = MethodMap::new().get(echo_method).get(echo_method);
    }
}
