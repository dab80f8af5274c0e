use crate::AppState;

use se_bus::{PublishOutcome, TYPE_KEY, UpdateBus};

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Debug, Serialize)]
pub struct PublishResponse {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(flatten)]
    pub outcome: PublishOutcome,
}

/// POST /events
///
/// Publishing is best-effort: once the body names an event type the request
/// is accepted, and the outcome only reports what happened.
pub async fn publish_event(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return bad_request(&rejection.body_text()),
    };

    let Value::Object(mut payload) = body else {
        return bad_request("event body must be a JSON object");
    };

    let event_type = match payload.remove(TYPE_KEY) {
        Some(Value::String(event_type)) => event_type,
        _ => return bad_request("event body must carry a string 'type'"),
    };

    let outcome = state.bus.publish(&event_type, payload);

    (
        StatusCode::ACCEPTED,
        Json(PublishResponse {
            event_type,
            outcome,
        }),
    )
        .into_response()
}

fn bad_request(message: &str) -> Response {
    log::warn!("Rejected event: {}", message);
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": { "code": "BAD_REQUEST", "message": message } })),
    )
        .into_response()
}
