use axum::{
    extract::{connect_info::ConnectInfo, rejection::JsonRejection, State},
    http::{header::USER_AGENT, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use shared::{ContactRequest, ContactResponse};
use std::net::SocketAddr;
use uuid::Uuid;

use crate::{
    error::{IntakeError, IntakeResult},
    rate_limit::client_origin,
    state::AppState,
    validation::{requests::build_submission, Validatable},
};

fn map_json_rejection(err: JsonRejection) -> IntakeError {
    let message = match err {
        JsonRejection::JsonDataError(e) => format!("Invalid JSON data: {}", e.body_text()),
        JsonRejection::JsonSyntaxError(e) => format!("JSON syntax error: {}", e.body_text()),
        JsonRejection::MissingJsonContentType(_) => {
            "Content-Type must be application/json".to_string()
        }
        JsonRejection::BytesRejection(_) => "Failed to read request body".to_string(),
        _ => "Invalid JSON payload".to_string(),
    };
    IntakeError::Format(message)
}

/// Contact-form intake. Rate limiting has already run in middleware by
/// the time this handler executes; the remaining steps are honeypot,
/// sanitize, validate, persist.
pub async fn submit_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> IntakeResult<(StatusCode, Json<ContactResponse>)> {
    let origin = client_origin(&headers, connect_info.map(|c| c.0));
    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let Json(mut req) = payload.map_err(map_json_rejection)?;

    // Honeypot: hidden field filled in means an automated submitter.
    // Answer with a success shape so the bot learns nothing, but skip
    // persistence entirely. The returned id was never stored.
    if req.website.as_deref().is_some_and(|w| !w.is_empty()) {
        tracing::info!(origin = %origin, "honeypot triggered, dropping submission");
        return Ok((
            StatusCode::CREATED,
            Json(ContactResponse {
                message: "Message received successfully!".to_string(),
                id: Uuid::new_v4(),
            }),
        ));
    }

    req.sanitize();
    req.validate().map_err(IntakeError::Validation)?;

    let submission = build_submission(req, Some(origin), user_agent);
    let id = state.store.insert(submission).await?;

    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            message: "Thank you! We'll get back to you within 24 hours.".to_string(),
            id,
        }),
    ))
}

/// Liveness check: fixed message plus current server time. No side
/// effects, never fails.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let uptime = state.started_at.elapsed().as_secs();
    (
        StatusCode::OK,
        Json(json!({
            "message": "Contact API is healthy",
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "uptime_secs": uptime,
        })),
    )
}

pub async fn route_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({"error": "Route not found"})))
}
