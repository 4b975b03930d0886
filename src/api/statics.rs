use hyper::{Body, Request, Response, StatusCode};
use routerify::ext::RequestExt;
use serde_json::json;

use super::error::Result;
use super::macros::json_response;
use super::RequestGlobalExt;

fn content_type(file: &str) -> &'static str {
    match file.rsplit('.').next() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        _ => "application/octet-stream",
    }
}

pub async fn handle(req: Request<Body>) -> Result<Response<Body>> {
    let global = req.get_global()?;

    let Some(file) = req.param("file").cloned() else {
        return Ok(json_response!(
            StatusCode::NOT_FOUND,
            json!({ "ok": false, "message": "Not Found" })
        ));
    };

    // The param is a single path segment, but be explicit about traversal.
    if file.contains("..") || file.contains('/') || file.contains('\\') {
        return Ok(json_response!(
            StatusCode::NOT_FOUND,
            json!({ "ok": false, "message": "Not Found" })
        ));
    }

    let path = global.config.static_dir.join(&file);
    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok(Response::builder()
            .status(StatusCode::OK)
            .header("Content-Type", content_type(&file))
            .body(Body::from(bytes))
            .expect("failed to build response")),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(json_response!(
            StatusCode::NOT_FOUND,
            json!({ "ok": false, "message": "Not Found" })
        )),
        Err(err) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            "failed to read static asset",
            err,
        )
            .into()),
    }
}
