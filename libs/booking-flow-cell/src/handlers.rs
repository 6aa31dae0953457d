use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{BookingEvent, BookingPreset};
use crate::services::BookingSessionStore;

/// Start a booking, optionally pre-seeded ("book this doctor").
#[axum::debug_handler]
pub async fn create_session(
    State(store): State<Arc<BookingSessionStore>>,
    Json(preset): Json<BookingPreset>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let response = store.open(preset).await?;
    Ok((StatusCode::CREATED, Json(json!(response))))
}

#[axum::debug_handler]
pub async fn get_session(
    State(store): State<Arc<BookingSessionStore>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let booking = store.view(session_id).await?;

    Ok(Json(json!({
        "session_id": session_id,
        "booking": booking
    })))
}

#[axum::debug_handler]
pub async fn apply_event(
    State(store): State<Arc<BookingSessionStore>>,
    Path(session_id): Path<Uuid>,
    Json(event): Json<BookingEvent>,
) -> Result<Json<Value>, AppError> {
    let response = store.apply(session_id, event).await?;
    Ok(Json(json!(response)))
}

#[axum::debug_handler]
pub async fn confirm_session(
    State(store): State<Arc<BookingSessionStore>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    info!("Confirm request for booking session {}", session_id);
    let confirmation = store.confirm(session_id).await?;

    Ok(Json(json!({
        "success": true,
        "session_id": session_id,
        "confirmation": confirmation
    })))
}

/// Acknowledge a confirmed booking or abandon an unfinished one.
#[axum::debug_handler]
pub async fn close_session(
    State(store): State<Arc<BookingSessionStore>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let confirmed = store.close(session_id).await?;

    Ok(Json(json!({
        "session_id": session_id,
        "closed": true,
        "confirmed": confirmed
    })))
}
