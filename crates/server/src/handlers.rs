use std::{convert::Infallible, sync::Arc};

use pendulum_engine::{ControllerError, SimulationController, Status};
use pendulum_physics::{EngineFault, ParameterOverrides, PhysicalParameters};
use serde::Serialize;
use serde_json::json;
use tokio::task::{self, JoinError};
use tracing::{debug, error};
use warp::{
    Rejection,
    http::StatusCode,
    reject::{MethodNotAllowed, PayloadTooLarge, UnsupportedMediaType},
    reply::{self, Json, WithStatus},
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusBody {
    status: &'static str,
    run: u64,
    tick: u64,
    elapsed: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    fault: Option<String>,
    parameters: PhysicalParameters,
}

pub(crate) fn coords(controller: Arc<SimulationController>) -> Json {
    reply::json(&controller.coordinates())
}

pub(crate) async fn update(
    overrides: ParameterOverrides,
    controller: Arc<SimulationController>,
) -> Result<WithStatus<Json>, Infallible> {
    debug!(?overrides, "update requested");
    let outcome = task::spawn_blocking(move || controller.reconfigure(&overrides)).await;
    Ok(acknowledge(outcome))
}

pub(crate) async fn restart(
    controller: Arc<SimulationController>,
) -> Result<WithStatus<Json>, Infallible> {
    let outcome = task::spawn_blocking(move || controller.restart()).await;
    Ok(acknowledge(outcome))
}

pub(crate) async fn status(
    controller: Arc<SimulationController>,
) -> Result<WithStatus<Json>, Infallible> {
    // Reading the status may briefly wait on a lifecycle transition.
    let reading = task::spawn_blocking(move || (controller.status(), controller.snapshot())).await;

    let (status, frame) = match reading {
        Ok(reading) => reading,
        Err(err) => return Ok(internal(&err)),
    };
    let (status, fault) = match status {
        Status::Running => ("running", None),
        Status::Stopped => ("stopped", None),
        Status::Faulted(fault) => ("faulted", Some(fault)),
    };

    let body = StatusBody {
        status,
        run: frame.run,
        tick: frame.tick,
        elapsed: frame.elapsed,
        fault: fault.as_ref().map(EngineFault::to_string),
        parameters: frame.parameters,
    };
    Ok(reply::with_status(reply::json(&body), StatusCode::OK))
}

/// Renders a rejection as `{"error": ...}` with a matching status code.
pub(crate) async fn rejection(err: Rejection) -> Result<WithStatus<Json>, Infallible> {
    let (code, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "not found".to_string())
    } else if let Some(cause) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, cause.to_string())
    } else if err.find::<PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "request body too large".to_string())
    } else if err.find::<UnsupportedMediaType>().is_some() {
        (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "expected a JSON body".to_string(),
        )
    } else if err.find::<MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "method not allowed".to_string())
    } else {
        error!(?err, "unhandled rejection");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal error".to_string(),
        )
    };

    Ok(error_reply(&message, code))
}

fn acknowledge(outcome: Result<Result<(), ControllerError>, JoinError>) -> WithStatus<Json> {
    match outcome {
        Ok(Ok(())) => reply::with_status(reply::json(&json!({ "status": "ok" })), StatusCode::OK),
        Ok(Err(err @ ControllerError::Validation(_))) => {
            error_reply(&err.to_string(), StatusCode::BAD_REQUEST)
        }
        Ok(Err(err)) => internal(&err),
        Err(err) => internal(&err),
    }
}

fn internal(err: &dyn std::error::Error) -> WithStatus<Json> {
    error!(%err, "request failed");
    error_reply(&err.to_string(), StatusCode::INTERNAL_SERVER_ERROR)
}

fn error_reply(message: &str, code: StatusCode) -> WithStatus<Json> {
    reply::with_status(reply::json(&json!({ "error": message })), code)
}
