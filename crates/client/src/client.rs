//! High-level task client: submit, poll, and await completion.

use std::time::Instant;

use floe_core::request::TaskRequest;
use floe_core::task::{TaskHandle, TaskSnapshot, TaskStatus};

use crate::api::BackendApi;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::poll::PollConfig;

/// Client for the forecasting backend's asynchronous task protocol.
///
/// Holds no per-task state: handles are independent and may be polled
/// concurrently from clones of the same client (the underlying
/// connection pool is shared). Abandoning an in-flight
/// [`await_completion`](Self::await_completion) future at any await
/// point simply stops polling; the remote task keeps executing.
#[derive(Debug, Clone)]
pub struct TaskClient {
    api: BackendApi,
}

impl TaskClient {
    /// Build a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self {
            api: BackendApi::new(config)?,
        })
    }

    /// Build a client around an existing [`BackendApi`].
    pub fn with_api(api: BackendApi) -> Self {
        Self { api }
    }

    /// Submit a task and return its handle.
    ///
    /// The payload is validated before anything is sent; a partial
    /// optional group (e.g. two of four bounding-box corners) fails
    /// here without a network call. Transport failures on submission
    /// surface immediately and are never retried.
    pub async fn submit(&self, request: &TaskRequest) -> Result<TaskHandle, ClientError> {
        request.validate()?;

        let data = self.api.submit(request).await?;
        tracing::info!(
            kind = %request.kind(),
            task_id = %data.task_id,
            "Task submitted",
        );

        Ok(TaskHandle {
            kind: request.kind(),
            task_id: data.task_id,
        })
    }

    /// Fetch the task's current status snapshot. Read-only.
    pub async fn poll(&self, handle: &TaskHandle) -> Result<TaskSnapshot, ClientError> {
        self.api.poll(handle).await
    }

    /// Poll `handle` until it reaches a terminal state or the budget
    /// in `config` elapses.
    ///
    /// Returns the task's result on `SUCCEEDED`. A `FAILED` snapshot
    /// becomes [`ClientError::TaskFailed`] and is never retried.
    /// Transient transport failures are retried at the same interval
    /// up to [`PollConfig::max_transient_retries`] consecutive times;
    /// the counter resets on any successful poll. When the timeout
    /// elapses first, [`ClientError::TimeoutExceeded`] is returned and
    /// the handle stays valid, so a later call can resume polling.
    pub async fn await_completion(
        &self,
        handle: &TaskHandle,
        config: &PollConfig,
    ) -> Result<serde_json::Value, ClientError> {
        let started = Instant::now();
        let mut consecutive_failures = 0u32;
        let mut last_status: Option<TaskStatus> = None;

        loop {
            match self.poll(handle).await {
                Ok(snapshot) => {
                    consecutive_failures = 0;
                    trace_transition(handle, last_status, snapshot.status);
                    last_status = Some(snapshot.status);

                    match snapshot.status {
                        TaskStatus::Succeeded => {
                            tracing::info!(task_id = %handle.task_id, "Task succeeded");
                            return Ok(snapshot.result.unwrap_or(serde_json::Value::Null));
                        }
                        TaskStatus::Failed => {
                            let message = snapshot
                                .error
                                .unwrap_or_else(|| "task failed without a message".into());
                            tracing::warn!(
                                task_id = %handle.task_id,
                                error = %message,
                                "Task failed",
                            );
                            return Err(ClientError::TaskFailed { message });
                        }
                        TaskStatus::Submitted | TaskStatus::InProgress => {}
                    }
                }
                Err(e) if e.is_transient() => {
                    consecutive_failures += 1;
                    if !config.within_retry_budget(consecutive_failures) {
                        tracing::error!(
                            task_id = %handle.task_id,
                            consecutive_failures,
                            error = %e,
                            "Poll retry budget exhausted",
                        );
                        return Err(e);
                    }
                    tracing::warn!(
                        task_id = %handle.task_id,
                        attempt = consecutive_failures,
                        error = %e,
                        "Transient poll failure, will retry",
                    );
                }
                Err(e) => return Err(e),
            }

            let elapsed = started.elapsed();
            if elapsed >= config.timeout {
                tracing::info!(
                    task_id = %handle.task_id,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Polling budget elapsed, task still running",
                );
                return Err(ClientError::TimeoutExceeded { elapsed });
            }

            tokio::time::sleep(config.poll_interval).await;
        }
    }
}

/// Log status changes; the backend is the source of truth, so an
/// illegal transition (e.g. out of a terminal state) is only warned
/// about, never acted on.
fn trace_transition(handle: &TaskHandle, from: Option<TaskStatus>, to: TaskStatus) {
    let Some(from) = from else {
        tracing::debug!(task_id = %handle.task_id, status = %to, "First poll");
        return;
    };
    if from == to {
        return;
    }
    if from.can_transition(to) {
        tracing::debug!(
            task_id = %handle.task_id,
            from = %from,
            to = %to,
            "Task status changed",
        );
    } else {
        tracing::warn!(
            task_id = %handle.task_id,
            from = %from,
            to = %to,
            "Backend reported an illegal status transition",
        );
    }
}
