use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::submission::Submission;

pub const SUBMISSIONS_FILE: &str = "requests.jsonl";
pub const FAILURES_FILE: &str = "forward_failures.log";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The durable side of a submission: an append-only line-delimited JSON log
/// for accepted requests and an append-only plain-text log for forwarding
/// failures. Lines are never rewritten or deleted.
pub struct SubmissionStore {
    data_dir: PathBuf,
    submissions_path: PathBuf,
    failures_path: PathBuf,
}

impl SubmissionStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let submissions_path = data_dir.join(SUBMISSIONS_FILE);
        let failures_path = data_dir.join(FAILURES_FILE);

        Self {
            data_dir,
            submissions_path,
            failures_path,
        }
    }

    pub fn submissions_path(&self) -> &Path {
        &self.submissions_path
    }

    pub fn failures_path(&self) -> &Path {
        &self.failures_path
    }

    /// Appends one submission as one JSON line. The line goes out in a single
    /// write on an append-mode handle, so concurrent requests interleave at
    /// line granularity and never corrupt each other.
    pub async fn append(&self, submission: &Submission) -> Result<(), StoreError> {
        let mut line = serde_json::to_string(submission)?;
        line.push('\n');

        self.append_line(&self.submissions_path, &line).await
    }

    /// Appends `<RFC3339-UTC> <message>` to the failure log. Empty messages
    /// are dropped.
    pub async fn log_failure(&self, message: &str) -> Result<(), StoreError> {
        if message.is_empty() {
            return Ok(());
        }

        let line = format!("{} {}\n", Utc::now().to_rfc3339(), message);

        self.append_line(&self.failures_path, &line).await
    }

    async fn append_line(&self, path: &Path, line: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.data_dir).await?;

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;

        file.write_all(line.as_bytes()).await?;
        // write_all only fills tokio's buffer; without the flush the OS write
        // happens after we return and its error is lost with the handle.
        file.flush().await?;

        Ok(())
    }
}
