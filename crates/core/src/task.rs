//! Task lifecycle types: kinds, status state machine, handles, and
//! poll snapshots.
//!
//! A task is a server-side unit of asynchronous work. The backend is
//! the sole source of truth for its status; these types only describe
//! what the backend reports and which status progressions are legal.

use serde::{Deserialize, Serialize};

use crate::types::TaskId;

// ---------------------------------------------------------------------------
// Task kinds
// ---------------------------------------------------------------------------

/// The four endpoint families the backend exposes.
///
/// Every kind follows the same submit/poll contract; only the submit
/// path and the request body shape differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Daily sea-ice concentration prediction.
    DayPrediction,
    /// Monthly sea-ice concentration prediction.
    MonthPrediction,
    /// Monthly dynamics analysis over a date range, optionally
    /// restricted to a bounding box.
    DynamicsAnalysis,
    /// Model interpretability analysis, optionally restricted to a
    /// grid position and input variable.
    ModelInterpreter,
}

impl TaskKind {
    /// Path the submit POST is sent to, relative to the API base URL.
    pub fn submit_path(&self) -> &'static str {
        match self {
            TaskKind::DayPrediction => "/predict/day",
            TaskKind::MonthPrediction => "/predict/month",
            TaskKind::DynamicsAnalysis => "/dynamics/analysis",
            TaskKind::ModelInterpreter => "/model/interpreter",
        }
    }

    /// Path the status GET is sent to for a given task id.
    ///
    /// Every kind polls at `<submit path>/{task_id}`.
    pub fn poll_path(&self, task_id: &str) -> String {
        format!("{}/{}", self.submit_path(), task_id)
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TaskKind::DayPrediction => "day_prediction",
            TaskKind::MonthPrediction => "month_prediction",
            TaskKind::DynamicsAnalysis => "dynamics_analysis",
            TaskKind::ModelInterpreter => "model_interpreter",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Status state machine
// ---------------------------------------------------------------------------

/// Task status as reported by the backend.
///
/// Wire form is SCREAMING_SNAKE_CASE (`"IN_PROGRESS"` etc.).
/// `Submitted` and `InProgress` are both non-terminal and are treated
/// identically by the polling loop except for telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Submitted,
    InProgress,
    Succeeded,
    Failed,
}

impl TaskStatus {
    /// Whether this status admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Succeeded | TaskStatus::Failed)
    }

    /// Returns the set of statuses legally reachable from `self`.
    ///
    /// Terminal states return an empty slice. Observing the same
    /// status twice in a row is not a transition and is always fine.
    pub fn valid_transitions(&self) -> &'static [TaskStatus] {
        match self {
            // Submitted -> InProgress, or straight to a terminal state
            // when the task finishes between two polls.
            TaskStatus::Submitted => &[
                TaskStatus::InProgress,
                TaskStatus::Succeeded,
                TaskStatus::Failed,
            ],
            // InProgress -> terminal only.
            TaskStatus::InProgress => &[TaskStatus::Succeeded, TaskStatus::Failed],
            // Terminal states: no way out.
            TaskStatus::Succeeded | TaskStatus::Failed => &[],
        }
    }

    /// Check whether moving from `self` to `to` is a legal transition.
    pub fn can_transition(&self, to: TaskStatus) -> bool {
        self.valid_transitions().contains(&to)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TaskStatus::Submitted => "SUBMITTED",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Succeeded => "SUCCEEDED",
            TaskStatus::Failed => "FAILED",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Handles and snapshots
// ---------------------------------------------------------------------------

/// Reference to a submitted task.
///
/// Cheap to clone and carries no live connection state, so handles
/// can be polled concurrently and remain valid after a client-side
/// timeout (the task keeps executing remotely).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskHandle {
    /// Endpoint family the task was submitted to.
    pub kind: TaskKind,
    /// Server-assigned identifier.
    pub task_id: TaskId,
}

/// One poll's view of a task.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskSnapshot {
    /// Current status reported by the backend.
    pub status: TaskStatus,
    /// Domain-specific result; only meaningful when `status` is
    /// `Succeeded`.
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    /// Human-readable failure message; only meaningful when `status`
    /// is `Failed`.
    #[serde(default)]
    pub error: Option<String>,
}
