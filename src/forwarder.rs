use std::str::FromStr;
use std::time::Duration;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::WebhookConfig;
use crate::submission::Submission;

/// What the request orchestrator does with the forwarding outcome.
///
/// `forward` itself always reports; under `Lenient` the caller discards the
/// result, so the discarding is visible as policy instead of being buried in
/// the forwarder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForwardingPolicy {
    /// Webhook failures are logged and surfaced to the caller as HTTP 502.
    Strict,
    /// Webhook failures are discarded, the caller always sees success.
    Lenient,
}

impl FromStr for ForwardingPolicy {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            _ => Err(anyhow::anyhow!(
                "unknown forwarding policy: {:?}, expected \"strict\" or \"lenient\"",
                value
            )),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    #[error("failed to reach the spreadsheet webhook: {0}")]
    Request(#[from] reqwest::Error),
    #[error("spreadsheet webhook error: HTTP {0}")]
    Status(u16),
    #[error("spreadsheet webhook returned a response that was not JSON")]
    UnreadableResponse(#[source] reqwest::Error),
    #[error("{0}")]
    Rejected(String),
}

/// Pushes accepted submissions to the spreadsheet webhook. Best-effort in
/// both policies, each submission gets exactly one attempt with a bounded
/// timeout and no retries.
pub struct Forwarder {
    client: reqwest::Client,
    url: Option<reqwest::Url>,
}

impl Forwarder {
    pub fn new(config: &WebhookConfig) -> anyhow::Result<Self> {
        let url = if config.url.trim().is_empty() {
            None
        } else {
            Some(config.url.parse().context("invalid webhook url")?)
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build webhook client")?;

        Ok(Self { client, url })
    }

    pub fn enabled(&self) -> bool {
        self.url.is_some()
    }

    /// POSTs the submission as JSON and verifies the webhook accepted it.
    /// With no webhook configured this is a no-op success, nothing goes over
    /// the network.
    ///
    /// A response counts as accepted when its JSON body carries `"ok": true`
    /// or `"status": "ok"`. On rejection the error message comes from the
    /// body's `message` or `error` field, falling back to a generic one.
    pub async fn forward(&self, submission: &Submission) -> Result<(), ForwardError> {
        let Some(url) = &self.url else {
            return Ok(());
        };

        let response = self
            .client
            .post(url.clone())
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(ForwardError::Status(status.as_u16()));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(ForwardError::UnreadableResponse)?;

        let ok = body.get("ok").and_then(Value::as_bool) == Some(true)
            || body.get("status").and_then(Value::as_str) == Some("ok");
        if !ok {
            let message = body
                .get("message")
                .or_else(|| body.get("error"))
                .filter(|value| !value.is_null())
                .map(|value| match value.as_str() {
                    Some(text) => text.to_string(),
                    None => value.to_string(),
                })
                .unwrap_or_else(|| "spreadsheet webhook reported a failure".to_string());

            return Err(ForwardError::Rejected(message));
        }

        Ok(())
    }
}
