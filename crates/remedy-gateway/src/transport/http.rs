//! HTTP handlers for decision, status, and demo endpoints.

use std::time::Instant;

use axum::{
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde_json::json;

use remedy_core::error::{ClientCode, RemedyError};
use remedy_core::{Decision, SystemStatus};

use crate::app_state::AppState;
use crate::demo::{self, scenarios::ScenarioCatalog, DemoDecisionView, ValidationReport};
use crate::transport::codec;

/// Client-visible error response.
#[derive(Debug)]
pub struct ApiError(pub RemedyError);

impl From<RemedyError> for ApiError {
    fn from(e: RemedyError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        let status = match code {
            ClientCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ClientCode::BadRequest
            | ClientCode::UnknownEnvironment
            | ClientCode::UnknownEventType
            | ClientCode::UnsupportedVersion => StatusCode::BAD_REQUEST,
        };
        let body = Json(json!({
            "error": code.as_str(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}

/// Map axum's body extraction failure onto the JSON error contract.
/// The router's `DefaultBodyLimit` surfaces oversized bodies here as 413.
fn body_rejection(rejection: BytesRejection, max_body_bytes: usize) -> RemedyError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        RemedyError::PayloadTooLarge(max_body_bytes)
    } else {
        RemedyError::BadRequest(format!("unreadable request body: {}", rejection.body_text()))
    }
}

/// Boundary validation, engine call, and bookkeeping shared by both decision routes.
fn run_decision(
    state: &AppState,
    body: Result<Bytes, BytesRejection>,
) -> Result<Decision, ApiError> {
    let max_body_bytes = state.cfg().gateway.max_body_bytes;
    let decoded = body
        .map_err(|r| body_rejection(r, max_body_bytes))
        .and_then(|b| codec::decode(&b, max_body_bytes));
    let input = match decoded {
        Ok(input) => input,
        Err(e) => {
            let code = e.client_code().as_str();
            state.metrics().rejected_requests.inc(&[("code", code)]);
            tracing::warn!(code, error = %e, "decision request rejected");
            return Err(e.into());
        }
    };

    let started = Instant::now();
    let decision = state
        .engine()
        .decide(input.environment, input.event_type, input.event_data);
    let m = state.metrics();
    m.decide_duration
        .observe(&[("environment", decision.environment.as_str())], started.elapsed());
    m.decisions.inc(&[
        ("environment", decision.environment.as_str()),
        ("event_type", decision.event_type.as_str()),
        ("final_action", decision.final_action.as_str()),
        ("filtered", if decision.action_filtered { "true" } else { "false" }),
    ]);

    tracing::info!(
        environment = %decision.environment,
        event_type = %decision.event_type,
        final_action = %decision.final_action,
        "decision made"
    );

    state.record_decision(&decision);
    Ok(decision)
}

/// `POST /v1/decision`: field-exact decision record.
pub async fn decide(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Decision>, ApiError> {
    run_decision(&state, body).map(Json)
}

/// `POST /api/decision`: demo-shaped view of the same decision.
pub async fn decide_demo(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<DemoDecisionView>, ApiError> {
    run_decision(&state, body).map(|d| Json(DemoDecisionView::from(d)))
}

/// `GET /api/status`
pub async fn status(State(state): State<AppState>) -> Json<SystemStatus> {
    Json(state.engine().status())
}

/// `GET /api/demo/scenarios`
pub async fn scenarios() -> Json<ScenarioCatalog> {
    Json(demo::catalog())
}

/// `GET /api/demo/validate`
pub async fn validate(State(state): State<AppState>) -> Json<ValidationReport> {
    Json(demo::run_validation(state.engine()))
}
