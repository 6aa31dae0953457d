use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers::*;
use crate::services::DirectoryService;

pub fn create_directory_router(service: Arc<DirectoryService>) -> Router {
    Router::new()
        .route("/hospitals", get(list_hospitals))
        .route("/hospitals/{hospital_id}", get(get_hospital))
        .route("/hospitals/{hospital_id}/doctors", get(get_hospital_doctors))
        .route("/doctors", get(list_doctors))
        .route("/doctors/{doctor_id}", get(get_doctor))
        .route("/filters", get(get_filter_options))
        .with_state(service)
}
