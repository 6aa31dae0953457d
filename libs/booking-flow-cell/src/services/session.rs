use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use directory_cell::ReferenceDataProvider;

use crate::error::BookingFlowError;
use crate::models::{BookingConfirmation, BookingEvent, BookingPreset, BookingSessionResponse, BookingView};
use crate::services::controller::BookingFlowController;
use crate::services::sink::AppointmentSink;

/// Open booking sessions, one controller each.
///
/// The write lock is held for the whole of an event, so a session's
/// selection is only ever touched by one request at a time.
pub struct BookingSessionStore {
    provider: Arc<dyn ReferenceDataProvider>,
    sink: Arc<dyn AppointmentSink>,
    sessions: RwLock<HashMap<Uuid, BookingFlowController>>,
    max_sessions: usize,
}

impl BookingSessionStore {
    pub fn new(
        provider: Arc<dyn ReferenceDataProvider>,
        sink: Arc<dyn AppointmentSink>,
        max_sessions: usize,
    ) -> Self {
        Self {
            provider,
            sink,
            sessions: RwLock::new(HashMap::new()),
            max_sessions,
        }
    }

    pub async fn open(&self, preset: BookingPreset) -> Result<BookingSessionResponse, BookingFlowError> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.max_sessions {
            warn!("Refusing new booking session, {} already open", sessions.len());
            return Err(BookingFlowError::SessionLimitReached { limit: self.max_sessions });
        }

        let controller = if preset.is_empty() {
            BookingFlowController::new(self.provider.clone(), self.sink.clone())
        } else {
            debug!("Opening booking session with preset {:?}", preset);
            BookingFlowController::with_preset(self.provider.clone(), self.sink.clone(), preset)
        };

        let session_id = Uuid::new_v4();
        let booking = controller.view();
        sessions.insert(session_id, controller);
        info!("Opened booking session {}", session_id);

        Ok(BookingSessionResponse {
            session_id,
            booking,
            confirmation: None,
        })
    }

    pub async fn view(&self, session_id: Uuid) -> Result<BookingView, BookingFlowError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&session_id)
            .map(BookingFlowController::view)
            .ok_or(BookingFlowError::SessionNotFound(session_id))
    }

    pub async fn apply(
        &self,
        session_id: Uuid,
        event: BookingEvent,
    ) -> Result<BookingSessionResponse, BookingFlowError> {
        let mut sessions = self.sessions.write().await;
        let controller = sessions
            .get_mut(&session_id)
            .ok_or(BookingFlowError::SessionNotFound(session_id))?;

        debug!("Session {} event {:?}", session_id, event);
        let confirmation = controller.apply(event)?;

        Ok(BookingSessionResponse {
            session_id,
            booking: controller.view(),
            confirmation,
        })
    }

    pub async fn confirm(&self, session_id: Uuid) -> Result<BookingConfirmation, BookingFlowError> {
        let mut sessions = self.sessions.write().await;
        let controller = sessions
            .get_mut(&session_id)
            .ok_or(BookingFlowError::SessionNotFound(session_id))?;

        controller.confirm()
    }

    /// Discard a session, whether it was confirmed or abandoned. Returns
    /// whether the discarded booking had been confirmed.
    pub async fn close(&self, session_id: Uuid) -> Result<bool, BookingFlowError> {
        let mut sessions = self.sessions.write().await;
        let controller = sessions
            .remove(&session_id)
            .ok_or(BookingFlowError::SessionNotFound(session_id))?;

        let confirmed = controller.selection().is_confirmed();
        if confirmed {
            info!("Closed confirmed booking session {}", session_id);
        } else {
            info!("Abandoned booking session {}", session_id);
        }
        Ok(confirmed)
    }

    pub async fn open_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }
}
