// libs/appointment-cell/src/services/history.rs
use std::sync::{PoisonError, RwLock};

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use booking_flow_cell::{AppointmentSink, ConfirmedBooking};

use crate::models::{
    Appointment, AppointmentError, AppointmentFilters, AppointmentStatus, RescheduleAppointmentRequest,
};
use crate::services::lifecycle::AppointmentLifecycleService;

/// In-memory appointment history, in booking order.
#[derive(Default)]
pub struct AppointmentHistoryStore {
    appointments: RwLock<Vec<Appointment>>,
    lifecycle: AppointmentLifecycleService,
}

impl AppointmentHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_appointments(appointments: Vec<Appointment>) -> Self {
        Self {
            appointments: RwLock::new(appointments),
            lifecycle: AppointmentLifecycleService::new(),
        }
    }

    pub fn list(&self, filters: &AppointmentFilters) -> Vec<Appointment> {
        self.appointments
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|appointment| filters.matches(appointment))
            .cloned()
            .collect()
    }

    pub fn get(&self, appointment_id: Uuid) -> Result<Appointment, AppointmentError> {
        self.appointments
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|appointment| appointment.id == appointment_id)
            .cloned()
            .ok_or(AppointmentError::NotFound(appointment_id))
    }

    pub fn cancel(&self, appointment_id: Uuid) -> Result<Appointment, AppointmentError> {
        let appointment = self.update(appointment_id, AppointmentStatus::Cancelled, |_| {})?;
        info!("Appointment {} cancelled", appointment_id);
        Ok(appointment)
    }

    pub fn complete(&self, appointment_id: Uuid) -> Result<Appointment, AppointmentError> {
        let appointment = self.update(appointment_id, AppointmentStatus::Completed, |_| {})?;
        info!("Appointment {} completed", appointment_id);
        Ok(appointment)
    }

    pub fn reschedule(
        &self,
        appointment_id: Uuid,
        request: RescheduleAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        let date = request.date.trim();
        let slot = request.slot.trim();
        if date.is_empty() || slot.is_empty() {
            return Err(AppointmentError::Validation(
                "reschedule needs both a date and a slot".to_string(),
            ));
        }

        let appointment = self.update(appointment_id, AppointmentStatus::Booked, |appointment| {
            appointment.date = date.to_string();
            appointment.slot = slot.to_string();
        })?;
        info!("Appointment {} rescheduled to {} at {}", appointment_id, appointment.date, appointment.slot);
        Ok(appointment)
    }

    fn update<F>(
        &self,
        appointment_id: Uuid,
        new_status: AppointmentStatus,
        change: F,
    ) -> Result<Appointment, AppointmentError>
    where
        F: FnOnce(&mut Appointment),
    {
        let mut appointments = self.appointments.write().unwrap_or_else(PoisonError::into_inner);
        let appointment = appointments
            .iter_mut()
            .find(|appointment| appointment.id == appointment_id)
            .ok_or(AppointmentError::NotFound(appointment_id))?;

        self.lifecycle
            .validate_status_transition(appointment.status, new_status)?;

        change(appointment);
        appointment.status = new_status;
        appointment.updated_at = Utc::now();
        Ok(appointment.clone())
    }
}

impl AppointmentSink for AppointmentHistoryStore {
    fn record_booking(&self, booking: &ConfirmedBooking) -> Uuid {
        let appointment = Appointment::from_booking(Uuid::new_v4(), booking);
        let id = appointment.id;

        self.appointments
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(appointment);

        info!("Recorded appointment {} for doctor {}", id, booking.doctor_id);
        id
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn booking(date: &str, slot: &str) -> ConfirmedBooking {
        ConfirmedBooking {
            hospital_id: "h1".to_string(),
            doctor_id: "d1".to_string(),
            date: date.to_string(),
            slot: slot.to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn recorded_bookings_are_booked() {
        let store = AppointmentHistoryStore::new();
        let id = store.record_booking(&booking("2025-02-10", "9:00 AM"));

        let appointment = store.get(id).unwrap();
        assert_eq!(appointment.status, AppointmentStatus::Booked);
        assert_eq!(appointment.notes, None);
    }

    #[test]
    fn filters_by_status_and_inclusive_date_range() {
        let store = AppointmentHistoryStore::new();
        store.record_booking(&booking("2025-02-09", "9:00 AM"));
        let kept = store.record_booking(&booking("2025-02-10", "9:00 AM"));
        let cancelled = store.record_booking(&booking("2025-02-11", "9:00 AM"));
        store.record_booking(&booking("2025-02-12", "9:00 AM"));
        store.cancel(cancelled).unwrap();

        let range = AppointmentFilters {
            start: Some("2025-02-10".to_string()),
            end: Some("2025-02-11".to_string()),
            ..Default::default()
        };
        assert_eq!(store.list(&range).len(), 2);

        let booked_in_range = AppointmentFilters {
            status: Some(AppointmentStatus::Booked),
            ..range
        };
        let found = store.list(&booked_in_range);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, kept);
    }

    #[test]
    fn completed_appointments_cannot_be_cancelled_or_rescheduled() {
        let store = AppointmentHistoryStore::new();
        let id = store.record_booking(&booking("2025-02-10", "9:00 AM"));
        store.complete(id).unwrap();

        assert_matches!(
            store.cancel(id),
            Err(AppointmentError::InvalidStatusTransition { from: AppointmentStatus::Completed, .. })
        );
        let request = RescheduleAppointmentRequest {
            date: "2025-02-11".to_string(),
            slot: "10:00 AM".to_string(),
        };
        assert_matches!(store.reschedule(id, request), Err(AppointmentError::InvalidStatusTransition { .. }));
    }

    #[test]
    fn reschedule_reinstates_cancelled_appointment() {
        let store = AppointmentHistoryStore::new();
        let id = store.record_booking(&booking("2025-02-10", "9:00 AM"));
        store.cancel(id).unwrap();

        let request = RescheduleAppointmentRequest {
            date: "2025-02-11".to_string(),
            slot: "10:00 AM".to_string(),
        };
        let appointment = store.reschedule(id, request).unwrap();
        assert_eq!(appointment.status, AppointmentStatus::Booked);
        assert_eq!(appointment.date, "2025-02-11");
        assert_eq!(appointment.slot, "10:00 AM");
    }

    #[test]
    fn reschedule_requires_date_and_slot() {
        let store = AppointmentHistoryStore::new();
        let id = store.record_booking(&booking("2025-02-10", "9:00 AM"));
        let request = RescheduleAppointmentRequest {
            date: "2025-02-11".to_string(),
            slot: " ".to_string(),
        };
        assert_matches!(store.reschedule(id, request), Err(AppointmentError::Validation(_)));
        assert_eq!(store.get(id).unwrap().slot, "9:00 AM");
    }

    #[test]
    fn unknown_appointment_is_not_found() {
        let store = AppointmentHistoryStore::new();
        let id = Uuid::new_v4();
        assert_matches!(store.get(id), Err(AppointmentError::NotFound(missing)) if missing == id);
    }
}
