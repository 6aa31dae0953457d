// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::services::AppointmentHistoryStore;

pub fn create_appointment_router(store: Arc<AppointmentHistoryStore>) -> Router {
    Router::new()
        .route("/", get(handlers::list_appointments))
        .route("/{appointment_id}", get(handlers::get_appointment))
        .route("/{appointment_id}/cancel", post(handlers::cancel_appointment))
        .route("/{appointment_id}/reschedule", post(handlers::reschedule_appointment))
        .route("/{appointment_id}/complete", post(handlers::complete_appointment))
        .with_state(store)
}
