//! `/api/v0/version`

use std::sync::Arc;

use serde::Serialize;

use crate::api_error::ApiError;
use crate::method_map::MethodMap;
use crate::request::Request;
use crate::response::Json;

#[derive(Debug, Serialize)]
pub struct VersionInfo {
    pub message: String,
    pub version: String,
}

impl VersionInfo {
    pub fn new(version: &str) -> Self {
        Self {
            message: format!("Accountable v{version}"),
            version: version.to_owned(),
        }
    }
}

/// `GET` answers with the release string configured at startup.
pub fn routes(version: Arc<str>) -> MethodMap {
    MethodMap::new().get(move |_req: Request| show(Arc::clone(&version)))
}

async fn show(version: Arc<str>) -> Result<Json<VersionInfo>, ApiError> {
    Ok(Json(VersionInfo::new(&version)))
}
