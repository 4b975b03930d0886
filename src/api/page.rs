use hyper::{Body, Response, StatusCode};

use crate::submission::ContactForm;

/// Escapes text interpolated into the page.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn html_response(status: StatusCode, body: String) -> Response<Body> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Body::from(body))
        .expect("failed to build html response")
}

/// Renders the submission form, optionally with the success banner or with
/// the error list and the cleaned field values echoed back into the inputs
/// so nothing the user typed is lost.
pub fn render(submitted: bool, errors: &[String], form: &ContactForm) -> String {
    let banner = if submitted {
        r#"<p class="banner">Your request has been submitted. We will call you back shortly.</p>"#
    } else {
        ""
    };

    let errors = if errors.is_empty() {
        String::new()
    } else {
        let items = errors
            .iter()
            .map(|error| format!("<li>{}</li>", escape(error)))
            .collect::<String>();
        format!(r#"<ul class="errors">{}</ul>"#, items)
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Leave a request</title>
<link rel="icon" href="/img/favicon.ico">
</head>
<body>
<main>
<h1>Leave a request</h1>
{banner}
{errors}
<form method="post" action="/contact">
<label>Name or organization
<input type="text" name="name" value="{name}" required></label>
<label>Phone
<input type="tel" name="phone" value="{phone}" placeholder="+998 90 123 45 67" required></label>
<label>Service
<input type="text" name="service" value="{service}"></label>
<label>Message
<textarea name="message" rows="5">{message}</textarea></label>
<button type="submit">Submit</button>
</form>
</main>
</body>
</html>
"#,
        banner = banner,
        errors = errors,
        name = escape(&form.name),
        phone = escape(&form.phone),
        service = escape(&form.service),
        message = escape(&form.message),
    )
}
