use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

// ==============================================================================
// REFERENCE ENTITIES
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hospital {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub services: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialization: String,
    #[serde(alias = "hospitalId")]
    pub hospital_id: String,
    #[serde(default)]
    pub rating: f32,
}

impl Doctor {
    pub fn works_at(&self, hospital_id: &str) -> bool {
        self.hospital_id == hospital_id
    }
}

/// Bookable slots per doctor, keyed by ISO date.
///
/// Dates are kept in a `BTreeMap`, so the "first available date" of a doctor
/// is the earliest one. A date whose slot list is empty is treated exactly
/// like a date that is not present at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct AvailabilityCalendar(HashMap<String, BTreeMap<String, Vec<String>>>);

impl AvailabilityCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slots<I, S>(mut self, doctor_id: &str, date: &str, slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert_slots(doctor_id, date, slots);
        self
    }

    pub fn insert_slots<I, S>(&mut self, doctor_id: &str, date: &str, slots: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0
            .entry(doctor_id.to_string())
            .or_default()
            .insert(date.to_string(), slots.into_iter().map(Into::into).collect());
    }

    pub fn available_dates(&self, doctor_id: &str) -> Vec<String> {
        self.0
            .get(doctor_id)
            .map(|dates| {
                dates
                    .iter()
                    .filter(|(_, slots)| !slots.is_empty())
                    .map(|(date, _)| date.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn slots_for(&self, doctor_id: &str, date: &str) -> &[String] {
        self.0
            .get(doctor_id)
            .and_then(|dates| dates.get(date))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The non-empty part of a doctor's calendar.
    pub fn schedule_for(&self, doctor_id: &str) -> BTreeMap<String, Vec<String>> {
        self.0
            .get(doctor_id)
            .map(|dates| {
                dates
                    .iter()
                    .filter(|(_, slots)| !slots.is_empty())
                    .map(|(date, slots)| (date.clone(), slots.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn doctor_ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// On-disk shape of a directory seed file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectorySeed {
    pub hospitals: Vec<Hospital>,
    pub doctors: Vec<Doctor>,
    #[serde(default)]
    pub availability: AvailabilityCalendar,
}

// ==============================================================================
// QUERY / RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HospitalSearchFilters {
    pub search: Option<String>,
    pub location: Option<String>,
    pub service: Option<String>,
    pub min_rating: Option<f32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DoctorSearchFilters {
    pub search: Option<String>,
    pub specialization: Option<String>,
    pub hospital_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterOptions {
    pub locations: Vec<String>,
    pub services: Vec<String>,
    pub specializations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HospitalDetailResponse {
    pub hospital: Hospital,
    pub doctors: Vec<Doctor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorDetailResponse {
    pub doctor: Doctor,
    pub hospital: Option<Hospital>,
    pub availability: BTreeMap<String, Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_dates_are_not_available() {
        let calendar = AvailabilityCalendar::new()
            .with_slots("d1", "2025-02-11", ["10:00 AM"])
            .with_slots("d1", "2025-02-10", Vec::<String>::new());

        assert_eq!(calendar.available_dates("d1"), vec!["2025-02-11".to_string()]);
        assert!(calendar.slots_for("d1", "2025-02-10").is_empty());
        assert!(!calendar.schedule_for("d1").contains_key("2025-02-10"));
    }

    #[test]
    fn dates_come_back_in_calendar_order() {
        let calendar = AvailabilityCalendar::new()
            .with_slots("d1", "2025-02-12", ["9:00 AM"])
            .with_slots("d1", "2025-02-10", ["9:00 AM"]);

        assert_eq!(calendar.available_dates("d1"), vec!["2025-02-10", "2025-02-12"]);
    }

    #[test]
    fn unknown_doctor_has_no_slots() {
        let calendar = AvailabilityCalendar::new();
        assert!(calendar.available_dates("missing").is_empty());
        assert!(calendar.slots_for("missing", "2025-02-10").is_empty());
    }

    #[test]
    fn doctor_accepts_camel_and_snake_hospital_key() {
        let camel: Doctor = serde_json::from_str(
            r#"{"id":"d1","name":"Dr. A","specialization":"Cardiology","hospitalId":"h1"}"#,
        ).unwrap();
        let snake: Doctor = serde_json::from_str(
            r#"{"id":"d1","name":"Dr. A","specialization":"Cardiology","hospital_id":"h1"}"#,
        ).unwrap();
        assert_eq!(camel, snake);
    }
}
