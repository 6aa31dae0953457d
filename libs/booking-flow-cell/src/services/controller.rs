use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use directory_cell::ReferenceDataProvider;

use crate::error::BookingFlowError;
use crate::models::{
    BookingConfirmation, BookingEvent, BookingOptions, BookingPreset, BookingSelection, BookingStep,
    BookingView, StepProgress,
};
use crate::services::sink::AppointmentSink;
use crate::services::transition::{can_advance, confirm_selection, reduce, seed_selection};

/// Owns one booking selection and forwards confirmed bookings to the sink.
pub struct BookingFlowController {
    provider: Arc<dyn ReferenceDataProvider>,
    sink: Arc<dyn AppointmentSink>,
    selection: BookingSelection,
}

impl BookingFlowController {
    pub fn new(provider: Arc<dyn ReferenceDataProvider>, sink: Arc<dyn AppointmentSink>) -> Self {
        Self {
            provider,
            sink,
            selection: BookingSelection::default(),
        }
    }

    pub fn with_preset(
        provider: Arc<dyn ReferenceDataProvider>,
        sink: Arc<dyn AppointmentSink>,
        preset: BookingPreset,
    ) -> Self {
        let selection = seed_selection(preset, provider.as_ref());
        Self {
            provider,
            sink,
            selection,
        }
    }

    pub fn selection(&self) -> &BookingSelection {
        &self.selection
    }

    /// Apply one event. Returns the confirmation when the event was a
    /// successful `Confirm`.
    pub fn apply(&mut self, event: BookingEvent) -> Result<Option<BookingConfirmation>, BookingFlowError> {
        if event == BookingEvent::Confirm {
            return self.confirm().map(Some);
        }

        self.selection = reduce(&self.selection, event, self.provider.as_ref())?.selection;
        Ok(None)
    }

    pub fn set_hospital(&mut self, hospital_id: &str) -> Result<(), BookingFlowError> {
        self.apply(BookingEvent::SelectHospital { hospital_id: hospital_id.to_string() })
            .map(|_| ())
    }

    pub fn set_doctor(&mut self, doctor_id: &str) -> Result<(), BookingFlowError> {
        self.apply(BookingEvent::SelectDoctor { doctor_id: doctor_id.to_string() })
            .map(|_| ())
    }

    pub fn set_date(&mut self, date: &str) -> Result<(), BookingFlowError> {
        self.apply(BookingEvent::SelectDate { date: date.to_string() })
            .map(|_| ())
    }

    pub fn set_slot(&mut self, slot: &str) -> Result<(), BookingFlowError> {
        self.apply(BookingEvent::SelectSlot { slot: slot.to_string() })
            .map(|_| ())
    }

    pub fn set_notes(&mut self, notes: &str) -> Result<(), BookingFlowError> {
        self.apply(BookingEvent::UpdateNotes { notes: notes.to_string() })
            .map(|_| ())
    }

    pub fn can_advance(&self, step: BookingStep) -> bool {
        can_advance(&self.selection, step, self.provider.as_ref())
    }

    /// Move to the next step if the current one is complete. Returns the step
    /// the wizard is on afterwards.
    pub fn advance(&mut self) -> Result<BookingStep, BookingFlowError> {
        self.apply(BookingEvent::Advance)?;
        Ok(self.selection.step())
    }

    pub fn retreat(&mut self) -> Result<BookingStep, BookingFlowError> {
        self.apply(BookingEvent::Retreat)?;
        Ok(self.selection.step())
    }

    /// Freeze the selection and hand the booking to the sink. Only allowed on
    /// the time slot step with every field chosen.
    pub fn confirm(&mut self) -> Result<BookingConfirmation, BookingFlowError> {
        let (selection, booking) = confirm_selection(&self.selection).map_err(|err| {
            warn!("Booking confirmation rejected: {}", err);
            err
        })?;
        self.selection = selection;

        let appointment_id = self.sink.record_booking(&booking);
        info!(
            "Booking confirmed as appointment {} (doctor {} on {} at {})",
            appointment_id, booking.doctor_id, booking.date, booking.slot
        );

        Ok(BookingConfirmation {
            appointment_id,
            booking,
            confirmed_at: Utc::now(),
        })
    }

    pub fn view(&self) -> BookingView {
        let selection = &self.selection;
        let provider = self.provider.as_ref();

        let steps = BookingStep::ALL
            .iter()
            .map(|&step| StepProgress {
                step,
                label: step.label().to_string(),
                complete: can_advance(selection, step, provider),
                current: step == selection.step(),
            })
            .collect();

        let doctors = match selection.hospital_id() {
            Some(hospital_id) => provider.doctors_for_hospital(hospital_id),
            None => provider.doctors(),
        };
        let dates = selection
            .doctor_id()
            .map(|doctor_id| provider.available_dates(doctor_id))
            .unwrap_or_default();
        let slots = match (selection.doctor_id(), selection.date()) {
            (Some(doctor_id), Some(date)) => provider.slots(doctor_id, date),
            _ => Vec::new(),
        };

        BookingView {
            selection: selection.clone(),
            steps,
            can_advance: !selection.step().is_last() && can_advance(selection, selection.step(), provider),
            can_confirm: confirm_selection(selection).is_ok(),
            hospital: selection.hospital_id().and_then(|id| provider.hospital(id)),
            doctor: selection.doctor_id().and_then(|id| provider.doctor(id)),
            options: BookingOptions {
                hospitals: provider.hospitals(),
                doctors,
                dates,
                slots,
            },
        }
    }
}
