// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{AppointmentFilters, RescheduleAppointmentRequest};
use crate::services::AppointmentHistoryStore;

#[axum::debug_handler]
pub async fn list_appointments(
    State(store): State<Arc<AppointmentHistoryStore>>,
    Query(filters): Query<AppointmentFilters>,
) -> Result<Json<Value>, AppError> {
    let appointments = store.list(&filters);

    Ok(Json(json!({
        "appointments": appointments,
        "total": appointments.len()
    })))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(store): State<Arc<AppointmentHistoryStore>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointment = store.get(appointment_id)?;
    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(store): State<Arc<AppointmentHistoryStore>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointment = store.cancel(appointment_id)?;
    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn reschedule_appointment(
    State(store): State<Arc<AppointmentHistoryStore>>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<RescheduleAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let appointment = store.reschedule(appointment_id, request)?;
    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn complete_appointment(
    State(store): State<Arc<AppointmentHistoryStore>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointment = store.complete(appointment_id)?;
    Ok(Json(json!(appointment)))
}
