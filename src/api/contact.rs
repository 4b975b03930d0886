use hyper::{header, Body, Request, Response, StatusCode};
use serde_json::json;
use url::form_urlencoded;

use super::error::{Result, ResultExt};
use super::macros::json_response;
use super::{page, wants_json, RequestGlobalExt};
use crate::forwarder::ForwardingPolicy;
use crate::submission::ContactForm;

pub const ACCEPTED_NOT_FORWARDED: &str =
    "Your request was recorded, but forwarding it to the spreadsheet failed.";

fn parse_form(body: &[u8]) -> ContactForm {
    let mut name = String::new();
    let mut phone = String::new();
    let mut service = String::new();
    let mut message = String::new();

    for (key, value) in form_urlencoded::parse(body) {
        match key.as_ref() {
            "name" => name = value.into_owned(),
            "phone" => phone = value.into_owned(),
            "service" => service = value.into_owned(),
            "message" => message = value.into_owned(),
            _ => {}
        }
    }

    ContactForm::from_raw(&name, &phone, &service, &message)
}

pub async fn handle(req: Request<Body>) -> Result<Response<Body>> {
    let global = req.get_global()?;
    let json_flow = wants_json(&req);

    let body = hyper::body::to_bytes(req.into_body())
        .await
        .extend_route((StatusCode::BAD_REQUEST, "failed to read request body"))?;
    let form = parse_form(&body);

    let errors = form.validate();
    if !errors.is_empty() {
        if json_flow {
            return Ok(json_response!(
                StatusCode::BAD_REQUEST,
                json!({ "ok": false, "errors": errors })
            ));
        }

        return Ok(page::html_response(
            StatusCode::OK,
            page::render(false, &errors, &form),
        ));
    }

    let submission = form.to_submission();

    // The forward is awaited before the local write; the local write then
    // happens regardless of the outcome, the local log is the source of truth.
    let forwarded = global.forwarder.forward(&submission).await;

    global.store.append(&submission).await.extend_route((
        StatusCode::INTERNAL_SERVER_ERROR,
        "failed to record submission",
    ))?;

    if global.config.webhook.policy == ForwardingPolicy::Strict {
        if let Err(err) = forwarded {
            let detail = err.to_string();

            global.store.log_failure(&detail).await.extend_route((
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to record forwarding failure",
            ))?;

            let errors = vec![ACCEPTED_NOT_FORWARDED.to_string(), detail];
            if json_flow {
                return Ok(json_response!(
                    StatusCode::BAD_GATEWAY,
                    json!({ "ok": false, "errors": errors })
                ));
            }

            return Ok(page::html_response(
                StatusCode::BAD_GATEWAY,
                page::render(false, &errors, &form),
            ));
        }
    }
    // Lenient: the outcome is dropped here on purpose, see ForwardingPolicy.

    if json_flow {
        return Ok(json_response!(StatusCode::OK, json!({ "ok": true })));
    }

    Ok(Response::builder()
        .status(StatusCode::FOUND)
        .header(header::LOCATION, "/?submitted=1")
        .body(Body::empty())
        .expect("failed to build redirect"))
}
