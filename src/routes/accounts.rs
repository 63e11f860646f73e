//! `/api/v0/db/users/{uid}`: account lifecycle.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::api_error::{ApiError, DomainError};
use crate::method_map::MethodMap;
use crate::request::Request;
use crate::response::{Json, IntoResponse};
use crate::status::Status;
use crate::store::{AccountSummary, DocumentStore};

#[derive(Debug, Serialize)]
struct Created {
    uid: String,
}

pub fn routes<S: DocumentStore>(store: Arc<S>) -> MethodMap {
    let reader = Arc::clone(&store);
    MethodMap::new()
        .get(move |req: Request| show(Arc::clone(&reader), req))
        .post(move |req: Request| create(Arc::clone(&store), req))
}

fn account_uid(req: &Request) -> Result<String, ApiError> {
    req.param("uid")
        .map(str::to_owned)
        .ok_or_else(|| ApiError::internal("route registered without {uid}"))
}

async fn show<S: DocumentStore>(store: Arc<S>, req: Request) -> Result<Json<AccountSummary>, ApiError> {
    let uid = account_uid(&req)?;
    match store.account(&uid).await? {
        Some(summary) => Ok(Json(summary)),
        None => Err(DomainError::AccountNotFound { uid }.into()),
    }
}

async fn create<S: DocumentStore>(store: Arc<S>, req: Request) -> Result<impl IntoResponse, ApiError> {
    let uid = account_uid(&req)?;
    store.create_account(&uid).await?;
    info!(%uid, "account created");
    Ok((Status::Created, Json(Created { uid })))
}
