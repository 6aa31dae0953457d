use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::DirectoryError;
use crate::models::{AvailabilityCalendar, DirectorySeed, Doctor, Hospital};
use crate::services::provider::InMemoryDirectory;

/// Load and validate a JSON directory seed.
pub fn load_directory_seed(path: impl AsRef<Path>) -> Result<InMemoryDirectory, DirectoryError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| DirectoryError::SeedIo {
        path: path.display().to_string(),
        source,
    })?;

    let seed: DirectorySeed = serde_json::from_str(&raw)?;
    let directory = directory_from_seed(seed)?;

    info!(
        "Loaded directory seed from {} ({} hospitals, {} doctors)",
        path.display(),
        directory.hospital_count(),
        directory.doctor_count()
    );

    Ok(directory)
}

pub fn directory_from_seed(seed: DirectorySeed) -> Result<InMemoryDirectory, DirectoryError> {
    let mut hospital_ids = HashSet::new();
    for hospital in &seed.hospitals {
        if !hospital_ids.insert(hospital.id.as_str()) {
            return Err(DirectoryError::InvalidSeed(format!("duplicate hospital id '{}'", hospital.id)));
        }
    }

    let mut doctor_ids = HashSet::new();
    for doctor in &seed.doctors {
        if !doctor_ids.insert(doctor.id.as_str()) {
            return Err(DirectoryError::InvalidSeed(format!("duplicate doctor id '{}'", doctor.id)));
        }
        if !hospital_ids.contains(doctor.hospital_id.as_str()) {
            return Err(DirectoryError::InvalidSeed(format!(
                "doctor '{}' references unknown hospital '{}'",
                doctor.id, doctor.hospital_id
            )));
        }
    }

    for doctor_id in seed.availability.doctor_ids() {
        if !doctor_ids.contains(doctor_id) {
            warn!("Availability listed for unknown doctor '{}', it will never be offered", doctor_id);
        }
    }

    Ok(InMemoryDirectory::new(seed.hospitals, seed.doctors, seed.availability))
}

/// Built-in directory served when no seed file is configured.
pub fn demo_directory() -> InMemoryDirectory {
    let hospitals = vec![
        hospital("h1", "City General Hospital", "Downtown", 4.6, &["Cardiology", "Emergency", "Radiology"]),
        hospital("h2", "Lakeside Medical Center", "Lakeside", 4.3, &["Pediatrics", "Dermatology", "Emergency"]),
        hospital("h3", "Northview Clinic", "Northview", 4.1, &["Orthopedics", "Physiotherapy"]),
    ];

    let doctors = vec![
        doctor("d1", "Dr. Sarah Johnson", "Cardiology", "h1", 4.8),
        doctor("d2", "Dr. Michael Chen", "Radiology", "h1", 4.5),
        doctor("d3", "Dr. Emily Davis", "Pediatrics", "h2", 4.7),
        doctor("d4", "Dr. James Wilson", "Dermatology", "h2", 4.2),
        doctor("d5", "Dr. Olivia Brown", "Orthopedics", "h3", 4.6),
    ];

    let calendar = AvailabilityCalendar::new()
        .with_slots("d1", "2025-02-10", ["9:00 AM", "9:30 AM", "10:00 AM"])
        .with_slots("d1", "2025-02-11", ["10:00 AM", "11:30 AM", "2:00 PM"])
        .with_slots("d2", "2025-02-10", ["1:00 PM", "1:30 PM"])
        .with_slots("d2", "2025-02-12", ["9:00 AM"])
        .with_slots("d3", "2025-02-11", ["8:30 AM", "9:00 AM", "3:30 PM"])
        .with_slots("d3", "2025-02-13", ["10:00 AM"])
        .with_slots("d4", "2025-02-14", ["11:00 AM", "4:00 PM"])
        .with_slots("d5", "2025-02-12", ["9:30 AM", "10:30 AM"])
        .with_slots("d5", "2025-02-15", Vec::<String>::new());

    InMemoryDirectory::new(hospitals, doctors, calendar)
}

fn hospital(id: &str, name: &str, location: &str, rating: f32, services: &[&str]) -> Hospital {
    Hospital {
        id: id.to_string(),
        name: name.to_string(),
        location: location.to_string(),
        rating,
        services: services.iter().map(|s| s.to_string()).collect(),
    }
}

fn doctor(id: &str, name: &str, specialization: &str, hospital_id: &str, rating: f32) -> Doctor {
    Doctor {
        id: id.to_string(),
        name: name.to_string(),
        specialization: specialization.to_string(),
        hospital_id: hospital_id.to_string(),
        rating,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use assert_matches::assert_matches;

    use super::*;
    use crate::services::provider::ReferenceDataProvider;

    #[test]
    fn demo_directory_is_a_valid_seed() {
        let demo = demo_directory();
        let seed = DirectorySeed {
            hospitals: demo.hospitals(),
            doctors: demo.doctors(),
            availability: demo.calendar().clone(),
        };
        assert!(directory_from_seed(seed).is_ok());
    }

    #[test]
    fn demo_doctor_with_only_empty_dates_is_unbookable() {
        assert_eq!(demo_directory().available_dates("d5"), vec!["2025-02-12".to_string()]);
    }

    #[test]
    fn loads_seed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "hospitals": [{{"id": "h1", "name": "Test Hospital", "location": "Test"}}],
                "doctors": [{{"id": "d1", "name": "Dr. Test", "specialization": "General", "hospitalId": "h1"}}],
                "availability": {{"d1": {{"2025-02-10": ["9:00 AM", "9:30 AM"]}}}}
            }}"#
        )
        .unwrap();

        let directory = load_directory_seed(file.path()).unwrap();
        assert_eq!(directory.hospital("h1").unwrap().name, "Test Hospital");
        assert_eq!(directory.slots("d1", "2025-02-10"), vec!["9:00 AM", "9:30 AM"]);
    }

    #[test]
    fn missing_seed_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_directory_seed(dir.path().join("missing.json"));
        assert_matches!(result, Err(DirectoryError::SeedIo { .. }));
    }

    #[test]
    fn malformed_seed_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert_matches!(load_directory_seed(file.path()), Err(DirectoryError::SeedParse(_)));
    }

    #[test]
    fn rejects_doctor_at_unknown_hospital() {
        let seed = DirectorySeed {
            hospitals: vec![],
            doctors: vec![doctor("d1", "Dr. Test", "General", "h9", 0.0)],
            availability: AvailabilityCalendar::new(),
        };
        assert_matches!(directory_from_seed(seed), Err(DirectoryError::InvalidSeed(msg)) if msg.contains("h9"));
    }

    #[test]
    fn rejects_duplicate_hospital_ids() {
        let seed = DirectorySeed {
            hospitals: vec![
                hospital("h1", "A", "X", 0.0, &[]),
                hospital("h1", "B", "Y", 0.0, &[]),
            ],
            doctors: vec![],
            availability: AvailabilityCalendar::new(),
        };
        assert_matches!(directory_from_seed(seed), Err(DirectoryError::InvalidSeed(_)));
    }
}
