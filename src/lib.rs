//! # accountable
//!
//! REST API behind the Accountable personal-finance app, served over hyper
//! behind a reverse proxy.
//!
//! ## How a request is handled
//!
//! - [`Router`] finds the route's [`MethodMap`] by path (radix tree via
//!   [`matchit`]).
//! - [`MethodMap::dispatch`] picks the handler for the request method, or
//!   fails with `405`.
//! - Every handler is [`guarded`]: [`ensure_method`] runs before its body.
//! - Handlers return `Result<impl IntoResponse, ApiError>`; the router turns
//!   errors into `{ "code", "message" }` bodies with the status of their kind.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use accountable::{Server, routes, store::InMemoryStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), accountable::Error> {
//!     let app = routes::api("1.2.3", Arc::new(InMemoryStore::new()));
//!     Server::bind("0.0.0.0:3000".parse().unwrap()).await?.serve(app).await
//! }
//! ```

mod api_error;
mod config;
mod error;
mod guard;
mod handler;
mod method;
mod method_map;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod health;
pub mod routes;
pub mod store;
pub mod telemetry;

pub use api_error::{ApiError, Category, DomainError};
pub use config::Config;
pub use error::Error;
pub use guard::{GuardedHandler, ensure_method, guarded};
pub use handler::Handler;
pub use method::{Method, UnknownMethod};
pub use method_map::MethodMap;
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
