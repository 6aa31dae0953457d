use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{apply_event, close_session, confirm_session, create_session, get_session};
use crate::services::BookingSessionStore;

pub fn create_booking_flow_router(store: Arc<BookingSessionStore>) -> Router {
    Router::new()
        .route("/sessions", post(create_session))
        .route("/sessions/{session_id}", get(get_session).delete(close_session))
        .route("/sessions/{session_id}/events", post(apply_event))
        .route("/sessions/{session_id}/confirm", post(confirm_session))
        .with_state(store)
}
