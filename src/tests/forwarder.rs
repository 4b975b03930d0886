use hyper::StatusCode;
use serde_json::json;

use crate::config::WebhookConfig;
use crate::forwarder::{ForwardError, Forwarder};
use crate::submission::{ContactForm, Submission};
use crate::tests::global::{mock_webhook, MockResponse};

fn webhook_config(url: &str) -> WebhookConfig {
    WebhookConfig {
        url: url.to_string(),
        timeout_secs: 2,
        ..Default::default()
    }
}

fn sample() -> Submission {
    ContactForm::from_raw("Acme LLC", "+998901234567", "delivery", "hello").to_submission()
}

/// Runs one forward attempt against the mock webhook and replies as told.
async fn forward_with_reply(
    forwarder: Forwarder,
    reply: MockResponse,
    rx: &mut tokio::sync::mpsc::Receiver<(
        serde_json::Value,
        tokio::sync::oneshot::Sender<MockResponse>,
    )>,
) -> (serde_json::Value, Result<(), ForwardError>) {
    let task = tokio::spawn(async move { forwarder.forward(&sample()).await });

    let (payload, otx) = rx.recv().await.expect("no request received");
    otx.send(reply).ok().expect("failed to send mock reply");

    let result = task.await.expect("forward task panicked");
    (payload, result)
}

#[tokio::test]
async fn test_disabled_forwarder_is_a_noop() {
    let forwarder = Forwarder::new(&webhook_config("")).expect("failed to build forwarder");
    assert!(!forwarder.enabled());

    forwarder
        .forward(&sample())
        .await
        .expect("disabled forward should succeed");
}

#[tokio::test]
async fn test_forward_accepts_ok_flag() {
    let (mut rx, addr, handle) = mock_webhook().await;
    let forwarder = Forwarder::new(&webhook_config(&addr)).expect("failed to build forwarder");

    let (payload, result) = forward_with_reply(forwarder, MockResponse::ok(), &mut rx).await;

    assert_eq!(payload["name"], "Acme LLC");
    assert_eq!(payload["phone"], "+998901234567");
    assert!(payload["created_at"].is_string());
    result.expect("forward should succeed");

    handle.abort();
}

#[tokio::test]
async fn test_forward_accepts_status_ok() {
    let (mut rx, addr, handle) = mock_webhook().await;
    let forwarder = Forwarder::new(&webhook_config(&addr)).expect("failed to build forwarder");

    let reply = MockResponse {
        status: StatusCode::OK,
        body: json!({ "status": "ok" }).to_string(),
    };
    let (_, result) = forward_with_reply(forwarder, reply, &mut rx).await;
    result.expect("forward should succeed");

    handle.abort();
}

#[tokio::test]
async fn test_forward_rejects_http_error() {
    let (mut rx, addr, handle) = mock_webhook().await;
    let forwarder = Forwarder::new(&webhook_config(&addr)).expect("failed to build forwarder");

    let reply = MockResponse {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: json!({ "ok": false }).to_string(),
    };
    let (_, result) = forward_with_reply(forwarder, reply, &mut rx).await;

    let err = result.expect_err("forward should fail");
    assert!(matches!(err, ForwardError::Status(500)));
    assert!(err.to_string().contains("HTTP 500"));

    handle.abort();
}

#[tokio::test]
async fn test_forward_rejects_non_json_body() {
    let (mut rx, addr, handle) = mock_webhook().await;
    let forwarder = Forwarder::new(&webhook_config(&addr)).expect("failed to build forwarder");

    let reply = MockResponse {
        status: StatusCode::OK,
        body: "<html>not json</html>".to_string(),
    };
    let (_, result) = forward_with_reply(forwarder, reply, &mut rx).await;

    assert!(matches!(
        result.expect_err("forward should fail"),
        ForwardError::UnreadableResponse(_)
    ));

    handle.abort();
}

#[tokio::test]
async fn test_forward_extracts_rejection_message() {
    let (mut rx, addr, handle) = mock_webhook().await;
    let forwarder = Forwarder::new(&webhook_config(&addr)).expect("failed to build forwarder");

    let reply = MockResponse {
        status: StatusCode::OK,
        body: json!({ "ok": false, "message": "quota exceeded" }).to_string(),
    };
    let (_, result) = forward_with_reply(forwarder, reply, &mut rx).await;

    let err = result.expect_err("forward should fail");
    assert_eq!(err.to_string(), "quota exceeded");

    handle.abort();
}

#[tokio::test]
async fn test_forward_falls_back_to_error_field_then_generic() {
    let (mut rx, addr, handle) = mock_webhook().await;
    let forwarder = Forwarder::new(&webhook_config(&addr)).expect("failed to build forwarder");

    let reply = MockResponse {
        status: StatusCode::OK,
        body: json!({ "status": "error", "error": "bad row" }).to_string(),
    };
    let (_, result) = forward_with_reply(forwarder, reply, &mut rx).await;
    assert_eq!(result.expect_err("forward should fail").to_string(), "bad row");

    let forwarder = Forwarder::new(&webhook_config(&addr)).expect("failed to build forwarder");
    let reply = MockResponse {
        status: StatusCode::OK,
        body: json!({}).to_string(),
    };
    let (_, result) = forward_with_reply(forwarder, reply, &mut rx).await;
    assert_eq!(
        result.expect_err("forward should fail").to_string(),
        "spreadsheet webhook reported a failure"
    );

    handle.abort();
}

#[tokio::test]
async fn test_forward_reports_unreachable_webhook() {
    let port = portpicker::pick_unused_port().expect("no free port");
    let forwarder = Forwarder::new(&webhook_config(&format!("http://127.0.0.1:{}/", port)))
        .expect("failed to build forwarder");

    let err = forwarder
        .forward(&sample())
        .await
        .expect_err("forward should fail");
    assert!(matches!(err, ForwardError::Request(_)));
}

#[tokio::test]
async fn test_invalid_webhook_url_fails_construction() {
    assert!(Forwarder::new(&webhook_config("not a url")).is_err());
}
