//! Backend response envelope.
//!
//! Every backend response wraps its payload in
//! `{success, message, data, status}`. The envelope is decoded
//! explicitly at each call site; there is no global response
//! interceptor mutating payloads behind the caller's back.

use serde::Deserialize;

use crate::error::ClientError;

/// The backend's uniform response wrapper.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the backend accepted and handled the request.
    pub success: bool,
    /// Human-readable message, mostly used when `success` is false.
    #[serde(default)]
    pub message: String,
    /// Kind-specific payload; `null` or absent on rejection.
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    /// Backend-side status label (informational).
    #[serde(default)]
    pub status: String,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload, mapping a `success = false` envelope to
    /// [`ClientError::Rejected`] and a missing payload to
    /// [`ClientError::MissingData`].
    pub fn into_data(self) -> Result<T, ClientError> {
        if !self.success {
            return Err(ClientError::Rejected {
                message: self.message,
            });
        }
        self.data.ok_or(ClientError::MissingData)
    }
}
