use std::sync::Arc;

use axum::{routing::get, Router};
use tracing::info;

use appointment_cell::{create_appointment_router, AppointmentHistoryStore};
use booking_flow_cell::{create_booking_flow_router, BookingSessionStore};
use directory_cell::{
    create_directory_router, demo_directory, load_directory_seed, DirectoryError, DirectoryService,
    ReferenceDataProvider,
};
use shared_config::AppConfig;

/// Everything the cell routers share for the lifetime of the server.
pub struct AppState {
    pub directory: Arc<dyn ReferenceDataProvider>,
    pub appointments: Arc<AppointmentHistoryStore>,
    pub sessions: Arc<BookingSessionStore>,
}

impl AppState {
    pub fn from_config(config: Arc<AppConfig>) -> Result<Self, DirectoryError> {
        let directory: Arc<dyn ReferenceDataProvider> = match &config.directory_seed_path {
            Some(path) => Arc::new(load_directory_seed(path)?),
            None => {
                info!("Using built-in demo directory");
                Arc::new(demo_directory())
            }
        };

        Ok(Self::new(directory, config.max_booking_sessions))
    }

    pub fn new(directory: Arc<dyn ReferenceDataProvider>, max_booking_sessions: usize) -> Self {
        let appointments = Arc::new(AppointmentHistoryStore::new());
        let sessions = Arc::new(BookingSessionStore::new(
            directory.clone(),
            appointments.clone(),
            max_booking_sessions,
        ));

        Self {
            directory,
            appointments,
            sessions,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic booking API is running!" }))
        .nest("/directory", create_directory_router(Arc::new(DirectoryService::new(state.directory))))
        .nest("/bookings", create_booking_flow_router(state.sessions))
        .nest("/appointments", create_appointment_router(state.appointments))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    async fn call(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn booking_shows_up_in_appointment_history() {
        let app = create_router(AppState::new(Arc::new(demo_directory()), 8));

        let (status, json) = call(
            &app,
            "POST",
            "/bookings/sessions",
            Some(r#"{"hospital_id":"h1","doctor_id":"d2","date":"2025-02-12","slot":"9:00 AM"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let session_id = json["session_id"].as_str().unwrap().to_string();

        for _ in 0..3 {
            let events = format!("/bookings/sessions/{}/events", session_id);
            call(&app, "POST", &events, Some(r#"{"type":"advance"}"#)).await;
        }

        let (status, _) = call(&app, "POST", &format!("/bookings/sessions/{}/confirm", session_id), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, json) = call(&app, "GET", "/appointments?doctor_id=d2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"], 1);
        assert_eq!(json["appointments"][0]["date"], "2025-02-12");
    }

    #[tokio::test]
    async fn directory_is_mounted() {
        let app = create_router(AppState::new(Arc::new(demo_directory()), 8));

        let (status, json) = call(&app, "GET", "/directory/doctors?hospital_id=h3", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"], 1);
    }

    #[test]
    fn missing_seed_file_fails_startup() {
        let config = AppConfig {
            directory_seed_path: Some("/nonexistent/directory.json".to_string()),
            ..AppConfig::default()
        };
        assert!(AppState::from_config(Arc::new(config)).is_err());
    }
}
