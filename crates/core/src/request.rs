//! Canonical request payloads for each task kind.
//!
//! One schema per kind, using the backend's snake_case field names.
//! Optional parameter groups (the dynamics bounding box, the
//! interpreter position/variable selector) are all-or-none: a request
//! with only part of a group present fails validation and must never
//! reach the wire.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::CoreError;
use crate::task::TaskKind;

/// Daily prediction request: forecast from `start_date` using the
/// uploaded observation images.
#[derive(Debug, Clone, Serialize)]
pub struct DayPredictionRequest {
    pub start_date: NaiveDate,
    pub image_paths: Vec<String>,
}

/// Monthly prediction request. Same shape as the daily one; the
/// backend interprets `start_date` at month granularity.
#[derive(Debug, Clone, Serialize)]
pub struct MonthPredictionRequest {
    pub start_date: NaiveDate,
    pub image_paths: Vec<String>,
}

/// Monthly dynamics analysis over `[start_time, end_time]`.
///
/// `x1..y2` describe an optional bounding box restricting the analysis
/// region; either all four corners are set or none.
#[derive(Debug, Clone, Serialize)]
pub struct DynamicsAnalysisRequest {
    pub start_time: NaiveDate,
    pub end_time: NaiveDate,
    pub grad_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grad_month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x1: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y1: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y2: Option<f64>,
}

/// Model interpretability analysis over `[start_time, end_time]` with
/// a forecast lead of `pred_gap` days.
///
/// `position`/`variable` select a single grid cell and input variable
/// to explain; either both are set or neither.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInterpreterRequest {
    pub start_time: NaiveDate,
    pub end_time: NaiveDate,
    pub pred_gap: u32,
    pub grad_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,
}

/// A validated-on-submit request for any task kind.
///
/// Serializes to the kind-specific body (untagged), so the enum can be
/// handed straight to the HTTP layer.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum TaskRequest {
    DayPrediction(DayPredictionRequest),
    MonthPrediction(MonthPredictionRequest),
    DynamicsAnalysis(DynamicsAnalysisRequest),
    ModelInterpreter(ModelInterpreterRequest),
}

impl TaskRequest {
    /// The endpoint family this request targets.
    pub fn kind(&self) -> TaskKind {
        match self {
            TaskRequest::DayPrediction(_) => TaskKind::DayPrediction,
            TaskRequest::MonthPrediction(_) => TaskKind::MonthPrediction,
            TaskRequest::DynamicsAnalysis(_) => TaskKind::DynamicsAnalysis,
            TaskRequest::ModelInterpreter(_) => TaskKind::ModelInterpreter,
        }
    }

    /// Validate the payload before transmission.
    ///
    /// Runs the kind-specific rules below; a failure here means the
    /// request must not be sent at all.
    pub fn validate(&self) -> Result<(), CoreError> {
        match self {
            TaskRequest::DayPrediction(req) => validate_prediction(&req.image_paths),
            TaskRequest::MonthPrediction(req) => validate_prediction(&req.image_paths),
            TaskRequest::DynamicsAnalysis(req) => validate_dynamics(req),
            TaskRequest::ModelInterpreter(req) => validate_interpreter(req),
        }
    }
}

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

/// Prediction submissions need at least one observation image.
fn validate_prediction(image_paths: &[String]) -> Result<(), CoreError> {
    if image_paths.is_empty() {
        return Err(CoreError::Validation(
            "image_paths must contain at least one image".into(),
        ));
    }
    Ok(())
}

/// Dynamics analysis: ordered date range, non-empty gradient type,
/// all-or-none bounding box.
fn validate_dynamics(req: &DynamicsAnalysisRequest) -> Result<(), CoreError> {
    validate_date_range(req.start_time, req.end_time)?;
    validate_grad_type(&req.grad_type)?;

    let present = [req.x1, req.y1, req.x2, req.y2]
        .iter()
        .filter(|c| c.is_some())
        .count();
    if present != 0 && present != 4 {
        return Err(CoreError::Validation(format!(
            "bounding box requires all of x1, y1, x2, y2 ({present} of 4 given)"
        )));
    }
    Ok(())
}

/// Interpreter analysis: ordered date range, positive lead time,
/// non-empty gradient type, all-or-none position/variable selector.
fn validate_interpreter(req: &ModelInterpreterRequest) -> Result<(), CoreError> {
    validate_date_range(req.start_time, req.end_time)?;
    validate_grad_type(&req.grad_type)?;

    if req.pred_gap == 0 {
        return Err(CoreError::Validation(
            "pred_gap must be at least 1".into(),
        ));
    }
    match (&req.position, &req.variable) {
        (Some(_), None) | (None, Some(_)) => Err(CoreError::Validation(
            "position and variable must be given together".into(),
        )),
        _ => Ok(()),
    }
}

fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), CoreError> {
    if end < start {
        return Err(CoreError::Validation(format!(
            "end_time {end} precedes start_time {start}"
        )));
    }
    Ok(())
}

fn validate_grad_type(grad_type: &str) -> Result<(), CoreError> {
    if grad_type.trim().is_empty() {
        return Err(CoreError::Validation("grad_type must not be empty".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn dynamics() -> DynamicsAnalysisRequest {
        DynamicsAnalysisRequest {
            start_time: date("2020-01-01"),
            end_time: date("2020-06-01"),
            grad_type: "mean".into(),
            grad_month: Some(3),
            x1: None,
            y1: None,
            x2: None,
            y2: None,
        }
    }

    fn interpreter() -> ModelInterpreterRequest {
        ModelInterpreterRequest {
            start_time: date("2020-01-01"),
            end_time: date("2020-01-20"),
            pred_gap: 7,
            grad_type: "mean".into(),
            position: None,
            variable: None,
        }
    }

    // -----------------------------------------------------------------------
    // Prediction requests
    // -----------------------------------------------------------------------

    #[test]
    fn day_prediction_with_images_is_valid() {
        let req = TaskRequest::DayPrediction(DayPredictionRequest {
            start_date: date("2020-01-01"),
            image_paths: vec!["a.png".into()],
        });
        assert!(req.validate().is_ok());
    }

    #[test]
    fn day_prediction_without_images_is_rejected() {
        let req = TaskRequest::DayPrediction(DayPredictionRequest {
            start_date: date("2020-01-01"),
            image_paths: vec![],
        });
        assert_matches!(req.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn month_prediction_without_images_is_rejected() {
        let req = TaskRequest::MonthPrediction(MonthPredictionRequest {
            start_date: date("2020-01-01"),
            image_paths: vec![],
        });
        assert_matches!(req.validate(), Err(CoreError::Validation(_)));
    }

    // -----------------------------------------------------------------------
    // Bounding box group
    // -----------------------------------------------------------------------

    #[test]
    fn dynamics_without_bounding_box_is_valid() {
        assert!(TaskRequest::DynamicsAnalysis(dynamics()).validate().is_ok());
    }

    #[test]
    fn dynamics_with_full_bounding_box_is_valid() {
        let req = DynamicsAnalysisRequest {
            x1: Some(10.0),
            y1: Some(20.0),
            x2: Some(30.0),
            y2: Some(40.0),
            ..dynamics()
        };
        assert!(TaskRequest::DynamicsAnalysis(req).validate().is_ok());
    }

    #[test]
    fn dynamics_with_partial_bounding_box_is_rejected() {
        let req = DynamicsAnalysisRequest {
            x1: Some(10.0),
            y1: Some(20.0),
            ..dynamics()
        };
        assert_matches!(
            TaskRequest::DynamicsAnalysis(req).validate(),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn dynamics_with_single_corner_is_rejected() {
        let req = DynamicsAnalysisRequest {
            y2: Some(40.0),
            ..dynamics()
        };
        assert_matches!(
            TaskRequest::DynamicsAnalysis(req).validate(),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn dynamics_with_reversed_dates_is_rejected() {
        let req = DynamicsAnalysisRequest {
            start_time: date("2020-06-01"),
            end_time: date("2020-01-01"),
            ..dynamics()
        };
        assert_matches!(
            TaskRequest::DynamicsAnalysis(req).validate(),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn dynamics_with_empty_grad_type_is_rejected() {
        let req = DynamicsAnalysisRequest {
            grad_type: "  ".into(),
            ..dynamics()
        };
        assert_matches!(
            TaskRequest::DynamicsAnalysis(req).validate(),
            Err(CoreError::Validation(_))
        );
    }

    // -----------------------------------------------------------------------
    // Interpreter selector group
    // -----------------------------------------------------------------------

    #[test]
    fn interpreter_without_selector_is_valid() {
        assert!(TaskRequest::ModelInterpreter(interpreter())
            .validate()
            .is_ok());
    }

    #[test]
    fn interpreter_with_full_selector_is_valid() {
        let req = ModelInterpreterRequest {
            position: Some("120,45".into()),
            variable: Some("SIC".into()),
            ..interpreter()
        };
        assert!(TaskRequest::ModelInterpreter(req).validate().is_ok());
    }

    #[test]
    fn interpreter_with_position_only_is_rejected() {
        let req = ModelInterpreterRequest {
            position: Some("120,45".into()),
            ..interpreter()
        };
        assert_matches!(
            TaskRequest::ModelInterpreter(req).validate(),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn interpreter_with_variable_only_is_rejected() {
        let req = ModelInterpreterRequest {
            variable: Some("SIC".into()),
            ..interpreter()
        };
        assert_matches!(
            TaskRequest::ModelInterpreter(req).validate(),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn interpreter_with_zero_pred_gap_is_rejected() {
        let req = ModelInterpreterRequest {
            pred_gap: 0,
            ..interpreter()
        };
        assert_matches!(
            TaskRequest::ModelInterpreter(req).validate(),
            Err(CoreError::Validation(_))
        );
    }

    // -----------------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------------

    #[test]
    fn absent_optional_fields_are_omitted_from_the_body() {
        let body = serde_json::to_value(TaskRequest::DynamicsAnalysis(dynamics())).unwrap();
        let obj = body.as_object().unwrap();
        assert!(!obj.contains_key("x1"));
        assert!(!obj.contains_key("y2"));
        assert_eq!(obj["grad_type"], "mean");
        assert_eq!(obj["start_time"], "2020-01-01");
    }

    #[test]
    fn full_bounding_box_is_serialized() {
        let req = DynamicsAnalysisRequest {
            x1: Some(10.0),
            y1: Some(20.0),
            x2: Some(30.0),
            y2: Some(40.0),
            ..dynamics()
        };
        let body = serde_json::to_value(TaskRequest::DynamicsAnalysis(req)).unwrap();
        assert_eq!(body["x1"], 10.0);
        assert_eq!(body["y2"], 40.0);
    }

    #[test]
    fn request_kind_matches_variant() {
        assert_eq!(
            TaskRequest::DynamicsAnalysis(dynamics()).kind(),
            TaskKind::DynamicsAnalysis
        );
        assert_eq!(
            TaskRequest::ModelInterpreter(interpreter()).kind(),
            TaskKind::ModelInterpreter
        );
    }
}
