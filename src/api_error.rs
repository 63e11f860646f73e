//! Error taxonomy for request handling.
//!
//! Two layers:
//!
//! - [`DomainError`]: expected, user-facing failures. Every kind has a fixed
//!   `name`, a stable machine `code` the client can branch on, and a
//!   [`Category`] that decides the HTTP status. Constructors set all three;
//!   there is no way to build a `DuplicateAccount` with another code.
//! - [`ApiError`]: everything a handler or the dispatcher can fail with.
//!   Domain errors, protocol misuse (wrong or unsupported method), unknown
//!   routes and unexpected internal failures.
//!
//! Errors travel up with `?` and are turned into a response exactly once, by
//! [`Router::handle`](crate::Router::handle), as `{ "code", "message" }`.

use std::borrow::Cow;

use serde::Serialize;
use thiserror::Error;

use crate::method::Method;
use crate::response::{IntoResponse, Json, Response};
use crate::status::Status;

const DUPLICATE_ACCOUNT_MESSAGE: &str = "An account with this identifier already exists.";

/// HTTP status class a domain error belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Category {
    BadRequest,
    NotFound,
    Conflict,
    Internal,
}

impl Category {
    pub fn status(self) -> Status {
        match self {
            Self::BadRequest => Status::BadRequest,
            Self::NotFound   => Status::NotFound,
            Self::Conflict   => Status::Conflict,
            Self::Internal   => Status::InternalServerError,
        }
    }
}

/// A named, user-facing failure.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum DomainError {
    /// Generic API error. The only kind whose name, code and category are
    /// chosen by the caller.
    #[error("{message}")]
    Api {
        name: Cow<'static, str>,
        code: Cow<'static, str>,
        category: Category,
        message: String,
    },

    /// Generic conflict with a caller-chosen code.
    #[error("{message}")]
    Conflict {
        code: Cow<'static, str>,
        message: String,
    },

    #[error("{message}")]
    DuplicateAccount { message: String },

    #[error("document `{collection_id}/{document_id}` already exists")]
    DuplicateDocument {
        collection_id: String,
        document_id: String,
    },

    #[error("account `{uid}` does not exist")]
    AccountNotFound { uid: String },

    #[error("document `{collection_id}/{document_id}` does not exist")]
    DocumentNotFound {
        collection_id: String,
        document_id: String,
    },

    #[error("invalid request body: {reason}")]
    InvalidBody { reason: String },
}

impl DomainError {
    pub fn api(
        name: impl Into<Cow<'static, str>>,
        code: impl Into<Cow<'static, str>>,
        category: Category,
        message: impl Into<String>,
    ) -> Self {
        Self::Api {
            name: name.into(),
            code: code.into(),
            category,
            message: message.into(),
        }
    }

    pub fn conflict(code: impl Into<Cow<'static, str>>, message: impl Into<String>) -> Self {
        Self::Conflict { code: code.into(), message: message.into() }
    }

    /// An account with the given identifier already exists.
    pub fn duplicate_account() -> Self {
        Self::duplicate_account_with(DUPLICATE_ACCOUNT_MESSAGE)
    }

    /// Same kind as [`duplicate_account`](Self::duplicate_account) with a
    /// custom human message. Code and category stay fixed.
    pub fn duplicate_account_with(message: impl Into<String>) -> Self {
        Self::DuplicateAccount { message: message.into() }
    }

    pub fn invalid_body(reason: impl Into<String>) -> Self {
        Self::InvalidBody { reason: reason.into() }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Api { name, .. }          => name.as_ref(),
            Self::Conflict { .. }           => "ConflictError",
            Self::DuplicateAccount { .. }   => "DuplicateAccountError",
            Self::DuplicateDocument { .. }  => "DuplicateDocumentError",
            Self::AccountNotFound { .. }    => "AccountNotFoundError",
            Self::DocumentNotFound { .. }   => "DocumentNotFoundError",
            Self::InvalidBody { .. }        => "InvalidBodyError",
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Api { code, .. } | Self::Conflict { code, .. } => code.as_ref(),
            Self::DuplicateAccount { .. }   => "account-conflict",
            Self::DuplicateDocument { .. }  => "document-conflict",
            Self::AccountNotFound { .. }    => "account-not-found",
            Self::DocumentNotFound { .. }   => "document-not-found",
            Self::InvalidBody { .. }        => "invalid-body",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Self::Api { category, .. } => *category,
            Self::Conflict { .. }
            | Self::DuplicateAccount { .. }
            | Self::DuplicateDocument { .. } => Category::Conflict,
            Self::AccountNotFound { .. } | Self::DocumentNotFound { .. } => Category::NotFound,
            Self::InvalidBody { .. } => Category::BadRequest,
        }
    }

    pub fn status(&self) -> Status {
        self.category().status()
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Every failure a request can end in.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A guarded handler saw a request for another method.
    #[error("method {actual} does not match the expected {expected}")]
    MethodMismatch { actual: String, expected: Method },

    /// The route has no handler for the request method.
    #[error("method {method} is not supported by this route")]
    UnsupportedMethod { method: String, allowed: Vec<Method> },

    #[error("no route matches `{path}`")]
    RouteNotFound { path: String },

    /// Unexpected failure. The detail is logged, never sent to the client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal(detail.into())
    }

    pub fn status(&self) -> Status {
        match self {
            Self::Domain(e) => e.status(),
            Self::MethodMismatch { .. } | Self::UnsupportedMethod { .. } => Status::MethodNotAllowed,
            Self::RouteNotFound { .. } => Status::NotFound,
            Self::Internal(_) => Status::InternalServerError,
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::MethodMismatch { .. } | Self::UnsupportedMethod { .. } => "method-not-allowed",
            Self::RouteNotFound { .. } => "route-not-found",
            Self::Internal(_) => "internal",
        }
    }

    /// Message sent to the client.
    pub fn public_message(&self) -> String {
        match self {
            Self::Internal(_) => "internal server error".to_owned(),
            other => other.to_string(),
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal(_))
            || matches!(self, Self::Domain(e) if e.category() == Category::Internal)
    }

    fn allow_header(&self) -> Option<String> {
        let allowed = match self {
            Self::MethodMismatch { expected, .. } => vec![*expected],
            Self::UnsupportedMethod { allowed, .. } => allowed.clone(),
            _ => return None,
        };
        Some(
            allowed.iter()
                .map(|m| m.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { code: self.code(), message: self.public_message() };
        let mut response = (self.status(), Json(body)).into_response();
        if let Some(allow) = self.allow_header() {
            response.headers.push(("allow".to_owned(), allow));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn body_json(response: &Response) -> Value {
        serde_json::from_slice(response.body()).expect("error body is json")
    }

    #[test]
    fn duplicate_account_has_fixed_identity() {
        for err in [
            DomainError::duplicate_account(),
            DomainError::duplicate_account_with("uid `alice` is taken"),
        ] {
            assert_eq!(err.name(), "DuplicateAccountError");
            assert_eq!(err.code(), "account-conflict");
            assert_eq!(err.category(), Category::Conflict);
            assert_eq!(err.status(), Status::Conflict);
        }
    }

    #[test]
    fn duplicate_account_default_message() {
        assert_eq!(DomainError::duplicate_account().message(), DUPLICATE_ACCOUNT_MESSAGE);
    }

    #[test]
    fn generic_conflict_keeps_conflict_category() {
        let err = DomainError::conflict("budget-conflict", "budget already closed");
        assert_eq!(err.name(), "ConflictError");
        assert_eq!(err.code(), "budget-conflict");
        assert_eq!(err.status(), Status::Conflict);
    }

    #[test]
    fn base_kind_uses_caller_fields() {
        let err = DomainError::api("QuotaError", "quota", Category::BadRequest, "too many");
        assert_eq!(err.name(), "QuotaError");
        assert_eq!(err.code(), "quota");
        assert_eq!(err.status(), Status::BadRequest);
        assert_eq!(err.message(), "too many");
    }

    #[test]
    fn domain_error_serializes_code_and_message() {
        let response = ApiError::from(DomainError::duplicate_account()).into_response();
        assert_eq!(response.status_code(), 409);
        assert_eq!(
            body_json(&response),
            json!({ "code": "account-conflict", "message": DUPLICATE_ACCOUNT_MESSAGE })
        );
        assert_eq!(response.header("allow"), None);
    }

    #[test]
    fn unsupported_method_lists_allowed_methods() {
        let err = ApiError::UnsupportedMethod {
            method: "PATCH".to_owned(),
            allowed: vec![Method::Get, Method::Put],
        };
        let response = err.into_response();
        assert_eq!(response.status_code(), 405);
        assert_eq!(response.header("allow"), Some("GET, PUT"));
        assert_eq!(body_json(&response)["code"], "method-not-allowed");
    }

    #[test]
    fn method_mismatch_allows_the_expected_method() {
        let err = ApiError::MethodMismatch { actual: "POST".to_owned(), expected: Method::Get };
        let response = err.into_response();
        assert_eq!(response.status_code(), 405);
        assert_eq!(response.header("allow"), Some("GET"));
    }

    #[test]
    fn internal_detail_is_not_leaked() {
        let err = ApiError::internal("connection refused by 10.0.0.3");
        assert!(err.is_internal());
        let response = err.into_response();
        assert_eq!(response.status_code(), 500);
        assert_eq!(
            body_json(&response),
            json!({ "code": "internal", "message": "internal server error" })
        );
    }
}
