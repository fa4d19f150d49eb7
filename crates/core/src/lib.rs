//! Domain types for the sea-ice forecasting task protocol.
//!
//! Pure types and validation rules shared by the client and any future
//! tooling: task identifiers, the task status state machine, and the
//! canonical request payload for each task kind. No I/O lives here.

pub mod error;
pub mod request;
pub mod task;
pub mod types;
