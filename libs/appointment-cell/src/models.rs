// libs/appointment-cell/src/models.rs
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use booking_flow_cell::ConfirmedBooking;
use shared_models::error::AppError;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: Uuid,
    pub hospital_id: String,
    pub doctor_id: String,
    pub date: String,
    pub slot: String,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    pub fn from_booking(id: Uuid, booking: &ConfirmedBooking) -> Self {
        let now = Utc::now();
        let notes = booking.notes.trim();
        Self {
            id,
            hospital_id: booking.hospital_id.clone(),
            doctor_id: booking.doctor_id.clone(),
            date: booking.date.clone(),
            slot: booking.slot.clone(),
            notes: (!notes.is_empty()).then(|| notes.to_string()),
            status: AppointmentStatus::Booked,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AppointmentStatus {
    #[serde(alias = "booked")]
    Booked,
    #[serde(alias = "completed")]
    Completed,
    #[serde(alias = "cancelled")]
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Booked => write!(f, "Booked"),
            AppointmentStatus::Completed => write!(f, "Completed"),
            AppointmentStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

/// History filters. Date bounds are inclusive ISO dates compared as strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentFilters {
    pub status: Option<AppointmentStatus>,
    pub doctor_id: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl AppointmentFilters {
    pub fn matches(&self, appointment: &Appointment) -> bool {
        self.status.map_or(true, |status| appointment.status == status)
            && self.doctor_id.as_deref().map_or(true, |id| appointment.doctor_id == id)
            && self.start.as_deref().map_or(true, |start| appointment.date.as_str() >= start)
            && self.end.as_deref().map_or(true, |end| appointment.date.as_str() <= end)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescheduleAppointmentRequest {
    pub date: String,
    pub slot: String,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment not found: {0}")]
    NotFound(Uuid),

    #[error("Cannot move appointment from {from} to {to}")]
    InvalidStatusTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("Invalid appointment data: {0}")]
    Validation(String),
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::NotFound(_) => AppError::NotFound(err.to_string()),
            AppointmentError::InvalidStatusTransition { .. } => AppError::Conflict(err.to_string()),
            AppointmentError::Validation(_) => AppError::ValidationError(err.to_string()),
        }
    }
}
