//! `/api/v0/`: smoke-test echo.

use serde::Serialize;

use crate::api_error::ApiError;
use crate::method_map::MethodMap;
use crate::request::Request;
use crate::response::Json;

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}

pub fn routes() -> MethodMap {
    MethodMap::new().get(index)
}

async fn index(_req: Request) -> Result<Json<Message>, ApiError> {
    Ok(Json(Message { message: "lol" }))
}
