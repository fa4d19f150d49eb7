//! REST wrapper for the forecasting backend's HTTP endpoints.
//!
//! Wraps task submission and status polling using [`reqwest`]. Paths
//! come from [`TaskKind`]; every response is decoded through the
//! explicit [`ApiEnvelope`].

use serde::Deserialize;

use floe_core::request::TaskRequest;
use floe_core::task::{TaskHandle, TaskSnapshot};
use floe_core::types::TaskId;

use crate::config::ClientConfig;
use crate::envelope::ApiEnvelope;
use crate::error::ClientError;

/// HTTP client for one backend instance.
///
/// Cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct BackendApi {
    client: reqwest::Client,
    base_url: String,
}

/// Payload of a successful submit response.
#[derive(Debug, Deserialize)]
pub struct SubmitData {
    /// Server-assigned identifier for the queued task.
    #[serde(rename = "taskId")]
    pub task_id: TaskId,
}

impl BackendApi {
    /// Build an API client from configuration.
    ///
    /// Applies the configured per-request timeout to every call.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self::with_client(client, &config.base_url))
    }

    /// Build an API client reusing an existing [`reqwest::Client`]
    /// (useful for pooling connections across clients).
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL requests are issued against (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a task request.
    ///
    /// Sends `POST <base>/<submit path>` with the kind-specific JSON
    /// body and returns the server-assigned task id. The caller is
    /// expected to have validated the request already.
    pub async fn submit(&self, request: &TaskRequest) -> Result<SubmitData, ClientError> {
        let url = format!("{}{}", self.base_url, request.kind().submit_path());

        let response = self.client.post(url).json(request).send().await?;

        Self::parse_envelope(response).await
    }

    /// Fetch the current status snapshot of a task.
    ///
    /// Sends `GET <base>/<submit path>/{task_id}`. Read-only; a task
    /// reporting `FAILED` is still a successful poll.
    pub async fn poll(&self, handle: &TaskHandle) -> Result<TaskSnapshot, ClientError> {
        let url = format!(
            "{}{}",
            self.base_url,
            handle.kind.poll_path(&handle.task_id)
        );

        let response = self.client.get(url).send().await?;

        Self::parse_envelope(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or [`ClientError::Api`] with the
    /// status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Decode a 2xx response through the envelope into its payload.
    async fn parse_envelope<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        let envelope = response.json::<ApiEnvelope<T>>().await?;
        envelope.into_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped_from_base_url() {
        let api = BackendApi::with_client(reqwest::Client::new(), "http://localhost:9000/seaice/");
        assert_eq!(api.base_url(), "http://localhost:9000/seaice");
    }

    #[test]
    fn submit_data_decodes_camel_case_task_id() {
        let data: SubmitData = serde_json::from_str(r#"{"taskId": "T1"}"#).unwrap();
        assert_eq!(data.task_id, "T1");
    }
}
