use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use directory_cell::{Doctor, Hospital};

// ==============================================================================
// WIZARD STEPS
// ==============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStep {
    #[default]
    Hospital,
    Doctor,
    Date,
    Slot,
}

impl BookingStep {
    pub const ALL: [BookingStep; 4] = [
        BookingStep::Hospital,
        BookingStep::Doctor,
        BookingStep::Date,
        BookingStep::Slot,
    ];

    pub fn index(self) -> u8 {
        match self {
            BookingStep::Hospital => 0,
            BookingStep::Doctor => 1,
            BookingStep::Date => 2,
            BookingStep::Slot => 3,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    pub fn is_last(self) -> bool {
        self == BookingStep::Slot
    }

    pub fn label(self) -> &'static str {
        match self {
            BookingStep::Hospital => "Select Hospital",
            BookingStep::Doctor => "Select Doctor",
            BookingStep::Date => "Select Date",
            BookingStep::Slot => "Select Time Slot",
        }
    }
}

impl fmt::Display for BookingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStep::Hospital => write!(f, "hospital"),
            BookingStep::Doctor => write!(f, "doctor"),
            BookingStep::Date => write!(f, "date"),
            BookingStep::Slot => write!(f, "time slot"),
        }
    }
}

// ==============================================================================
// SELECTION STATE
// ==============================================================================

/// The in-progress booking owned by one session.
///
/// Fields are only mutated through [`crate::services::transition::reduce`],
/// which keeps the hospital -> doctor -> date -> slot chain consistent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingSelection {
    pub(crate) step: BookingStep,
    pub(crate) hospital_id: Option<String>,
    pub(crate) doctor_id: Option<String>,
    pub(crate) date: Option<String>,
    pub(crate) slot: Option<String>,
    pub(crate) notes: String,
    pub(crate) confirmed: bool,
}

impl BookingSelection {
    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn hospital_id(&self) -> Option<&str> {
        self.hospital_id.as_deref()
    }

    pub fn doctor_id(&self) -> Option<&str> {
        self.doctor_id.as_deref()
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn slot(&self) -> Option<&str> {
        self.slot.as_deref()
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// Whether the field behind `step` holds a value. Gating additionally
    /// requires the hospital to exist, see [`crate::services::transition::can_advance`].
    pub fn is_filled(&self, step: BookingStep) -> bool {
        match step {
            BookingStep::Hospital => self.hospital_id.is_some(),
            BookingStep::Doctor => self.doctor_id.is_some(),
            BookingStep::Date => self.date.is_some(),
            BookingStep::Slot => self.slot.is_some(),
        }
    }
}

/// Initial values carried into a new booking, e.g. from a doctor's profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingPreset {
    pub hospital_id: Option<String>,
    pub doctor_id: Option<String>,
    pub date: Option<String>,
    pub slot: Option<String>,
}

impl BookingPreset {
    /// "Book this doctor": preselects the doctor together with their hospital.
    pub fn for_doctor(doctor: &Doctor, date: Option<&str>, slot: Option<&str>) -> Self {
        Self {
            hospital_id: Some(doctor.hospital_id.clone()),
            doctor_id: Some(doctor.id.clone()),
            date: date.map(str::to_string),
            slot: slot.map(str::to_string),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hospital_id.is_none() && self.doctor_id.is_none() && self.date.is_none() && self.slot.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BookingEvent {
    SelectHospital { hospital_id: String },
    SelectDoctor { doctor_id: String },
    SelectDate { date: String },
    SelectSlot { slot: String },
    UpdateNotes { notes: String },
    Advance,
    Retreat,
    Confirm,
}

// ==============================================================================
// CONFIRMATION
// ==============================================================================

/// The completed booking handed to the appointment history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmedBooking {
    pub hospital_id: String,
    pub doctor_id: String,
    pub date: String,
    pub slot: String,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub appointment_id: Uuid,
    pub booking: ConfirmedBooking,
    pub confirmed_at: DateTime<Utc>,
}

// ==============================================================================
// VIEW MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepProgress {
    pub step: BookingStep,
    pub label: String,
    pub complete: bool,
    pub current: bool,
}

/// Choices a client should offer for the current selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingOptions {
    pub hospitals: Vec<Hospital>,
    pub doctors: Vec<Doctor>,
    pub dates: Vec<String>,
    pub slots: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingView {
    pub selection: BookingSelection,
    pub steps: Vec<StepProgress>,
    pub can_advance: bool,
    pub can_confirm: bool,
    pub hospital: Option<Hospital>,
    pub doctor: Option<Doctor>,
    pub options: BookingOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingSessionResponse {
    pub session_id: Uuid,
    pub booking: BookingView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<BookingConfirmation>,
}
