//! `/api/v0/db/users/{uid}/{collectionId}/{documentId}`
//!
//! | Method | Success | Failure |
//! |---|---|---|
//! | `GET` | `200` document | `404 document-not-found` |
//! | `PUT` | `201` created / `200` replaced | `400 invalid-body` |
//! | `POST` | `201` created | `409 document-conflict` |
//! | `DELETE` | `204` | `404 document-not-found` |
//!
//! Every method answers `404 account-not-found` when `uid` has no account.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::api_error::{ApiError, DomainError};
use crate::method_map::MethodMap;
use crate::request::Request;
use crate::response::{IntoResponse, Json};
use crate::status::Status;
use crate::store::{DocumentPath, DocumentStore, Written};

/// Wire shape of a stored document.
#[derive(Debug, Serialize)]
pub struct Document {
    #[serde(flatten)]
    pub path: DocumentPath,
    pub data: Map<String, Value>,
}

pub fn routes<S: DocumentStore>(store: Arc<S>) -> MethodMap {
    let (reader, replacer, creator) = (Arc::clone(&store), Arc::clone(&store), Arc::clone(&store));
    MethodMap::new()
        .get(move |req: Request| show(Arc::clone(&reader), req))
        .put(move |req: Request| replace(Arc::clone(&replacer), req))
        .post(move |req: Request| create(Arc::clone(&creator), req))
        .delete(move |req: Request| remove(Arc::clone(&store), req))
}

/// Reads the path triple captured by the router.
pub fn document_path(req: &Request) -> Result<DocumentPath, ApiError> {
    let param = |name: &str| {
        req.param(name)
            .map(str::to_owned)
            .ok_or_else(|| ApiError::internal(format!("route registered without {{{name}}}")))
    };
    Ok(DocumentPath {
        uid: param("uid")?,
        collection_id: param("collectionId")?,
        document_id: param("documentId")?,
    })
}

fn not_found(path: DocumentPath) -> ApiError {
    DomainError::DocumentNotFound {
        collection_id: path.collection_id,
        document_id: path.document_id,
    }
    .into()
}

fn object_body(req: &Request) -> Result<Map<String, Value>, ApiError> {
    match req.json::<Value>()? {
        Value::Object(data) => Ok(data),
        _ => Err(DomainError::invalid_body("document must be a JSON object").into()),
    }
}

async fn show<S: DocumentStore>(store: Arc<S>, req: Request) -> Result<Json<Document>, ApiError> {
    let path = document_path(&req)?;
    match store.get(&path).await? {
        Some(data) => Ok(Json(Document { path, data })),
        None => Err(not_found(path)),
    }
}

async fn replace<S: DocumentStore>(store: Arc<S>, req: Request) -> Result<impl IntoResponse, ApiError> {
    let path = document_path(&req)?;
    let data = object_body(&req)?;
    let status = match store.upsert(&path, data.clone()).await? {
        Written::Created => Status::Created,
        Written::Replaced => Status::Ok,
    };
    debug!(?path, ?status, "document written");
    Ok((status, Json(Document { path, data })))
}

async fn create<S: DocumentStore>(store: Arc<S>, req: Request) -> Result<impl IntoResponse, ApiError> {
    let path = document_path(&req)?;
    let data = object_body(&req)?;
    store.insert(&path, data.clone()).await?;
    debug!(?path, "document created");
    Ok((Status::Created, Json(Document { path, data })))
}

async fn remove<S: DocumentStore>(store: Arc<S>, req: Request) -> Result<Status, ApiError> {
    let path = document_path(&req)?;
    if store.delete(&path).await? {
        Ok(Status::NoContent)
    } else {
        Err(not_found(path))
    }
}
