//! Async client for the sea-ice forecasting backend.
//!
//! Submits long-running prediction and analysis tasks over HTTP,
//! obtains a task handle, and polls it to a terminal state with
//! bounded retries for transient transport failures and a resumable
//! client-side timeout.

pub mod api;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod poll;

pub use client::TaskClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use poll::PollConfig;
