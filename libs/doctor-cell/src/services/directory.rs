// libs/doctor-cell/src/services/directory.rs
use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{AvailabilitySlot, DirectoryError, DoctorSummary, UNKNOWN_DOCTOR};
use crate::services::availability::AvailabilityIndex;

/// Sentinel accepted wherever a specialty filter is given as text.
pub const ALL_SPECIALTIES: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SpecialtyFilter {
    #[default]
    All,
    Only(String),
}

impl SpecialtyFilter {
    pub fn matches(&self, specialty: &str) -> bool {
        match self {
            SpecialtyFilter::All => true,
            SpecialtyFilter::Only(wanted) => wanted == specialty,
        }
    }
}

impl From<&str> for SpecialtyFilter {
    fn from(raw: &str) -> Self {
        if raw == ALL_SPECIALTIES {
            SpecialtyFilter::All
        } else {
            SpecialtyFilter::Only(raw.to_string())
        }
    }
}

impl From<String> for SpecialtyFilter {
    fn from(raw: String) -> Self {
        SpecialtyFilter::from(raw.as_str())
    }
}

impl From<SpecialtyFilter> for String {
    fn from(filter: SpecialtyFilter) -> Self {
        match filter {
            SpecialtyFilter::All => ALL_SPECIALTIES.to_string(),
            SpecialtyFilter::Only(specialty) => specialty,
        }
    }
}

impl FromStr for SpecialtyFilter {
    type Err = std::convert::Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(SpecialtyFilter::from(raw))
    }
}

/// Name search plus specialty selection over a doctor list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryFilter {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub specialty: SpecialtyFilter,
}

impl DirectoryFilter {
    pub fn new(query: impl Into<String>, specialty: impl Into<SpecialtyFilter>) -> Self {
        Self {
            query: query.into(),
            specialty: specialty.into(),
        }
    }

    pub fn matches(&self, doctor: &DoctorSummary) -> bool {
        let matches_search = doctor
            .name
            .to_lowercase()
            .contains(&self.query.to_lowercase());

        matches_search && self.specialty.matches(&doctor.specialty)
    }

    /// Matching doctors in input order.
    pub fn apply<'a>(&self, doctors: &'a [DoctorSummary]) -> Vec<&'a DoctorSummary> {
        doctors.iter().filter(|doctor| self.matches(doctor)).collect()
    }
}

/// Doctors whose name contains `query` (ignoring case) and whose specialty is
/// exactly `specialty`, or any specialty when it is `"all"`.
pub fn filter<'a>(doctors: &'a [DoctorSummary], query: &str, specialty: &str) -> Vec<&'a DoctorSummary> {
    DirectoryFilter::new(query, specialty).apply(doctors)
}

/// Distinct specialties in first-seen order, for building filter options.
pub fn specialties(doctors: &[DoctorSummary]) -> Vec<&str> {
    let mut seen = HashSet::new();
    doctors
        .iter()
        .map(|doctor| doctor.specialty.as_str())
        .filter(|specialty| seen.insert(*specialty))
        .collect()
}

/// Display name for `doctor_id`, or [`UNKNOWN_DOCTOR`] when it is not listed.
pub fn resolve_doctor_name(doctors: &[DoctorSummary], doctor_id: Uuid) -> &str {
    doctors
        .iter()
        .find(|doctor| doctor.id == doctor_id)
        .map(|doctor| doctor.name.as_str())
        .unwrap_or(UNKNOWN_DOCTOR)
}

/// A loaded doctor directory together with each doctor's availability.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    doctors: Vec<DoctorSummary>,
    availability: HashMap<Uuid, AvailabilityIndex>,
}

impl Directory {
    pub fn new(
        doctors: Vec<DoctorSummary>,
        availability: HashMap<Uuid, Vec<AvailabilitySlot>>,
    ) -> Result<Self, DirectoryError> {
        let mut ids = HashSet::new();
        for doctor in &doctors {
            if !ids.insert(doctor.id) {
                return Err(DirectoryError::DuplicateDoctor { id: doctor.id });
            }
        }

        let mut indexes = HashMap::with_capacity(availability.len());
        for (id, slots) in availability {
            if !ids.contains(&id) {
                return Err(DirectoryError::UnknownDoctor { id });
            }
            let index = AvailabilityIndex::new(slots)
                .map_err(|source| DirectoryError::Availability { id, source })?;
            indexes.insert(id, index);
        }

        info!(
            "Loaded directory with {} doctors, {} with availability",
            doctors.len(),
            indexes.len()
        );

        Ok(Self {
            doctors,
            availability: indexes,
        })
    }

    pub fn doctors(&self) -> &[DoctorSummary] {
        &self.doctors
    }

    pub fn doctor(&self, doctor_id: Uuid) -> Option<&DoctorSummary> {
        self.doctors.iter().find(|doctor| doctor.id == doctor_id)
    }

    pub fn search(&self, filter: &DirectoryFilter) -> Vec<&DoctorSummary> {
        let found = filter.apply(&self.doctors);
        debug!("Directory search {:?} matched {} doctors", filter, found.len());
        found
    }

    /// Availability snapshot for a doctor; empty when none was supplied.
    pub fn availability(&self, doctor_id: Uuid) -> AvailabilityIndex {
        self.availability
            .get(&doctor_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn doctor_name(&self, doctor_id: Uuid) -> &str {
        resolve_doctor_name(&self.doctors, doctor_id)
    }
}
