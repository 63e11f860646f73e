//! HTTP surface of the API.
//!
//! | Path | Methods |
//! |---|---|
//! | `/api/v0/` | `GET` |
//! | `/api/v0/version` | `GET` |
//! | `/api/v0/db/users/{uid}` | `GET`, `POST` |
//! | `/api/v0/db/users/{uid}/{collectionId}/{documentId}` | `GET`, `PUT`, `POST`, `DELETE` |
//! | `/healthz`, `/readyz` | `GET` |

use std::sync::Arc;

use crate::health;
use crate::method_map::MethodMap;
use crate::router::Router;
use crate::store::DocumentStore;

pub mod accounts;
pub mod documents;
pub mod root;
pub mod version;

/// Builds the full application router.
///
/// `version` is the release string reported by `/api/v0/version`.
pub fn api<S: DocumentStore>(version: &str, store: Arc<S>) -> Router {
    let release: Arc<str> = Arc::from(version);

    Router::new()
        .route("/api/v0",  root::routes())
        .route("/api/v0/", root::routes())
        .route("/api/v0/version", version::routes(release))
        .route("/api/v0/db/users/{uid}", accounts::routes(Arc::clone(&store)))
        .route("/api/v0/db/users/{uid}/{collectionId}/{documentId}", documents::routes(store))
        .route("/healthz", MethodMap::new().get(health::liveness))
        .route("/readyz",  MethodMap::new().get(health::readiness))
}
