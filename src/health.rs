//! Kubernetes health-check handlers.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/readyz` | Can the pod serve traffic? Failure → pulled from load-balancer. |

use crate::{ApiError, Request, Response};

/// Liveness probe. Always `200 ok`; no dependencies.
pub async fn liveness(_req: Request) -> Result<Response, ApiError> {
    Ok(Response::text("ok"))
}

/// Readiness probe. The in-memory store is ready as soon as the router is
/// built, so this answers `200 ready` unconditionally.
pub async fn readiness(_req: Request) -> Result<Response, ApiError> {
    Ok(Response::text("ready"))
}
