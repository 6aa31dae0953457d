use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use crate::error::DirectoryError;
use crate::models::{
    Doctor, DoctorDetailResponse, DoctorSearchFilters, FilterOptions, Hospital,
    HospitalDetailResponse, HospitalSearchFilters,
};
use crate::services::provider::ReferenceDataProvider;

pub struct DirectoryService {
    provider: Arc<dyn ReferenceDataProvider>,
}

impl DirectoryService {
    pub fn new(provider: Arc<dyn ReferenceDataProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> Arc<dyn ReferenceDataProvider> {
        Arc::clone(&self.provider)
    }

    pub fn search_hospitals(&self, filters: &HospitalSearchFilters) -> Vec<Hospital> {
        debug!("Searching hospitals with filters: {:?}", filters);

        let search = normalized_search(filters.search.as_deref());
        self.provider
            .hospitals()
            .into_iter()
            .filter(|h| search.as_deref().map_or(true, |s| h.name.to_lowercase().contains(s)))
            .filter(|h| filters.location.as_deref().map_or(true, |loc| h.location == loc))
            .filter(|h| {
                filters
                    .service
                    .as_deref()
                    .map_or(true, |svc| h.services.iter().any(|offered| offered == svc))
            })
            .filter(|h| filters.min_rating.map_or(true, |min| h.rating >= min))
            .collect()
    }

    pub fn search_doctors(&self, filters: &DoctorSearchFilters) -> Vec<Doctor> {
        debug!("Searching doctors with filters: {:?}", filters);

        let search = normalized_search(filters.search.as_deref());
        self.provider
            .doctors()
            .into_iter()
            .filter(|d| search.as_deref().map_or(true, |s| d.name.to_lowercase().contains(s)))
            .filter(|d| {
                filters
                    .specialization
                    .as_deref()
                    .map_or(true, |spec| d.specialization == spec)
            })
            .filter(|d| filters.hospital_id.as_deref().map_or(true, |id| d.works_at(id)))
            .collect()
    }

    /// Distinct values for the search menus, sorted.
    pub fn filter_options(&self) -> FilterOptions {
        let hospitals = self.provider.hospitals();
        let locations: BTreeSet<String> = hospitals.iter().map(|h| h.location.clone()).collect();
        let services: BTreeSet<String> = hospitals.iter().flat_map(|h| h.services.iter().cloned()).collect();
        let specializations: BTreeSet<String> = self
            .provider
            .doctors()
            .into_iter()
            .map(|d| d.specialization)
            .collect();

        FilterOptions {
            locations: locations.into_iter().collect(),
            services: services.into_iter().collect(),
            specializations: specializations.into_iter().collect(),
        }
    }

    pub fn hospital_detail(&self, hospital_id: &str) -> Result<HospitalDetailResponse, DirectoryError> {
        let hospital = self
            .provider
            .hospital(hospital_id)
            .ok_or_else(|| DirectoryError::HospitalNotFound(hospital_id.to_string()))?;

        Ok(HospitalDetailResponse {
            doctors: self.provider.doctors_for_hospital(hospital_id),
            hospital,
        })
    }

    pub fn doctors_for_hospital(&self, hospital_id: &str) -> Result<Vec<Doctor>, DirectoryError> {
        if self.provider.hospital(hospital_id).is_none() {
            return Err(DirectoryError::HospitalNotFound(hospital_id.to_string()));
        }
        Ok(self.provider.doctors_for_hospital(hospital_id))
    }

    pub fn doctor_detail(&self, doctor_id: &str) -> Result<DoctorDetailResponse, DirectoryError> {
        let doctor = self
            .provider
            .doctor(doctor_id)
            .ok_or_else(|| DirectoryError::DoctorNotFound(doctor_id.to_string()))?;

        let availability = self
            .provider
            .available_dates(doctor_id)
            .into_iter()
            .map(|date| {
                let slots = self.provider.slots(doctor_id, &date);
                (date, slots)
            })
            .collect();

        Ok(DoctorDetailResponse {
            hospital: self.provider.hospital(&doctor.hospital_id),
            doctor,
            availability,
        })
    }
}

fn normalized_search(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::services::seed::demo_directory;

    fn service() -> DirectoryService {
        DirectoryService::new(Arc::new(demo_directory()))
    }

    #[test]
    fn hospital_search_is_case_insensitive() {
        let filters = HospitalSearchFilters {
            search: Some("  LAKESIDE ".to_string()),
            ..Default::default()
        };
        let found = service().search_hospitals(&filters);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "h2");
    }

    #[test]
    fn hospital_filters_combine() {
        let filters = HospitalSearchFilters {
            service: Some("Emergency".to_string()),
            min_rating: Some(4.5),
            ..Default::default()
        };
        let ids: Vec<String> = service().search_hospitals(&filters).into_iter().map(|h| h.id).collect();
        assert_eq!(ids, vec!["h1"]);
    }

    #[test]
    fn doctor_search_by_hospital_and_specialization() {
        let filters = DoctorSearchFilters {
            hospital_id: Some("h1".to_string()),
            specialization: Some("Radiology".to_string()),
            ..Default::default()
        };
        let ids: Vec<String> = service().search_doctors(&filters).into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["d2"]);
    }

    #[test]
    fn empty_filters_return_everything() {
        let service = service();
        assert_eq!(service.search_hospitals(&HospitalSearchFilters::default()).len(), 3);
        assert_eq!(service.search_doctors(&DoctorSearchFilters::default()).len(), 5);
    }

    #[test]
    fn filter_options_are_distinct_and_sorted() {
        let options = service().filter_options();
        assert_eq!(options.locations, vec!["Downtown", "Lakeside", "Northview"]);
        assert_eq!(options.services.iter().filter(|s| *s == "Emergency").count(), 1);
        assert!(options.specializations.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn doctor_detail_lists_bookable_dates_only() {
        let detail = service().doctor_detail("d5").unwrap();
        assert_eq!(detail.hospital.unwrap().id, "h3");
        assert_eq!(detail.availability.keys().collect::<Vec<_>>(), vec!["2025-02-12"]);
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let service = service();
        assert_matches!(service.hospital_detail("h9"), Err(DirectoryError::HospitalNotFound(_)));
        assert_matches!(service.doctors_for_hospital("h9"), Err(DirectoryError::HospitalNotFound(_)));
        assert_matches!(service.doctor_detail("d9"), Err(DirectoryError::DoctorNotFound(_)));
    }
}
