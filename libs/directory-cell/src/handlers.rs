use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use shared_models::error::AppError;

use crate::models::{DoctorSearchFilters, HospitalSearchFilters};
use crate::services::DirectoryService;

#[axum::debug_handler]
pub async fn list_hospitals(
    State(service): State<Arc<DirectoryService>>,
    Query(filters): Query<HospitalSearchFilters>,
) -> Result<Json<Value>, AppError> {
    let hospitals = service.search_hospitals(&filters);

    Ok(Json(json!({
        "hospitals": hospitals,
        "total": hospitals.len()
    })))
}

#[axum::debug_handler]
pub async fn get_hospital(
    State(service): State<Arc<DirectoryService>>,
    Path(hospital_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let detail = service.hospital_detail(&hospital_id)?;
    Ok(Json(json!(detail)))
}

#[axum::debug_handler]
pub async fn get_hospital_doctors(
    State(service): State<Arc<DirectoryService>>,
    Path(hospital_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let doctors = service.doctors_for_hospital(&hospital_id)?;

    Ok(Json(json!({
        "hospital_id": hospital_id,
        "doctors": doctors,
        "total": doctors.len()
    })))
}

#[axum::debug_handler]
pub async fn list_doctors(
    State(service): State<Arc<DirectoryService>>,
    Query(filters): Query<DoctorSearchFilters>,
) -> Result<Json<Value>, AppError> {
    let doctors = service.search_doctors(&filters);

    Ok(Json(json!({
        "doctors": doctors,
        "total": doctors.len()
    })))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(service): State<Arc<DirectoryService>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    debug!("Doctor detail request for {}", doctor_id);
    let detail = service.doctor_detail(&doctor_id)?;
    Ok(Json(json!(detail)))
}

#[axum::debug_handler]
pub async fn get_filter_options(
    State(service): State<Arc<DirectoryService>>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(json!(service.filter_options())))
}
