use hyper::{Body, Request, Response, StatusCode};
use url::form_urlencoded;

use super::error::Result;
use super::page;
use crate::submission::ContactForm;

pub async fn handle(req: Request<Body>) -> Result<Response<Body>> {
    let submitted = req
        .uri()
        .query()
        .map(|query| {
            form_urlencoded::parse(query.as_bytes())
                .any(|(key, value)| key == "submitted" && value == "1")
        })
        .unwrap_or(false);

    Ok(page::html_response(
        StatusCode::OK,
        page::render(submitted, &[], &ContactForm::default()),
    ))
}
