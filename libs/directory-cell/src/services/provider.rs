use crate::models::{AvailabilityCalendar, Doctor, Hospital};

/// Read-only access to the hospitals, doctors and slot calendars a booking is
/// made against.
///
/// Lookups return owned values so an implementation backed by a remote store
/// does not have to hand out borrows of its internals.
pub trait ReferenceDataProvider: Send + Sync {
    fn hospitals(&self) -> Vec<Hospital>;

    fn hospital(&self, hospital_id: &str) -> Option<Hospital>;

    fn doctors(&self) -> Vec<Doctor>;

    fn doctor(&self, doctor_id: &str) -> Option<Doctor>;

    /// Dates with at least one slot, earliest first.
    fn available_dates(&self, doctor_id: &str) -> Vec<String>;

    fn slots(&self, doctor_id: &str, date: &str) -> Vec<String>;

    fn doctors_for_hospital(&self, hospital_id: &str) -> Vec<Doctor> {
        self.doctors()
            .into_iter()
            .filter(|doctor| doctor.works_at(hospital_id))
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    hospitals: Vec<Hospital>,
    doctors: Vec<Doctor>,
    calendar: AvailabilityCalendar,
}

impl InMemoryDirectory {
    pub fn new(hospitals: Vec<Hospital>, doctors: Vec<Doctor>, calendar: AvailabilityCalendar) -> Self {
        Self {
            hospitals,
            doctors,
            calendar,
        }
    }

    pub fn calendar(&self) -> &AvailabilityCalendar {
        &self.calendar
    }

    pub fn hospital_count(&self) -> usize {
        self.hospitals.len()
    }

    pub fn doctor_count(&self) -> usize {
        self.doctors.len()
    }
}

impl ReferenceDataProvider for InMemoryDirectory {
    fn hospitals(&self) -> Vec<Hospital> {
        self.hospitals.clone()
    }

    fn hospital(&self, hospital_id: &str) -> Option<Hospital> {
        self.hospitals.iter().find(|h| h.id == hospital_id).cloned()
    }

    fn doctors(&self) -> Vec<Doctor> {
        self.doctors.clone()
    }

    fn doctor(&self, doctor_id: &str) -> Option<Doctor> {
        self.doctors.iter().find(|d| d.id == doctor_id).cloned()
    }

    fn available_dates(&self, doctor_id: &str) -> Vec<String> {
        self.calendar.available_dates(doctor_id)
    }

    fn slots(&self, doctor_id: &str, date: &str) -> Vec<String> {
        self.calendar.slots_for(doctor_id, date).to_vec()
    }
}
