/// Builds a JSON response from a status and a `serde_json::json!` body.
/// Paths are fully qualified so call sites only need the macro in scope.
macro_rules! json_response {
    ($status:expr, $body:expr) => {
        hyper::Response::builder()
            .status($status)
            .header(hyper::header::CONTENT_TYPE, "application/json")
            .body(hyper::Body::from($body.to_string()))
            .expect("failed to build json response")
    };
}

pub(super) use json_response;
