use hyper::{Body, Request, Response, StatusCode};
use serde_json::json;

use super::error::Result;
use super::macros::json_response;

pub async fn handle(_: Request<Body>) -> Result<Response<Body>> {
    Ok(json_response!(StatusCode::OK, json!({ "status": "ok" })))
}
