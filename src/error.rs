//! Infrastructure error type.

use thiserror::Error;

/// The error type returned by the server's fallible operations.
///
/// Request-level failures (404, 409, etc.) are [`ApiError`](crate::ApiError)
/// values, turned into responses by the router. This type surfaces
/// infrastructure failures: binding to a port or reading the local address.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
