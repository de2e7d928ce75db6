// libs/doctor-cell/tests/directory_test.rs
use std::collections::HashMap;

use assert_matches::assert_matches;
use uuid::Uuid;

use doctor_cell::{
    filter, resolve_doctor_name, specialties, AvailabilitySlot, Directory, DirectoryError,
    DirectoryFilter, DoctorSummary, UNKNOWN_DOCTOR,
};
use shared_utils::test_utils::{
    date, sample_doctors, sample_directory, MockSeedResponses, TestDoctor, SARAH_ID,
};

fn names(doctors: &[&DoctorSummary]) -> Vec<String> {
    doctors.iter().map(|d| d.name.clone()).collect()
}

#[test]
fn test_no_constraints_is_identity() {
    let doctors = sample_doctors();

    let result: Vec<DoctorSummary> = filter(&doctors, "", "all").into_iter().cloned().collect();
    assert_eq!(result, doctors);
}

#[test]
fn test_name_search_is_case_insensitive_substring() {
    let doctors = sample_doctors();

    assert_eq!(names(&filter(&doctors, "sarah", "all")), vec!["Dr. Sarah Johnson"]);
    assert_eq!(names(&filter(&doctors, "CHEN", "all")), vec!["Dr. Michael Chen"]);
    // "Dr." is part of every name
    assert_eq!(filter(&doctors, "dr.", "all").len(), 3);
    assert!(filter(&doctors, "house", "all").is_empty());
}

#[test]
fn test_specialty_is_exact_match() {
    let doctors = sample_doctors();

    assert_eq!(names(&filter(&doctors, "", "Dermatology")), vec!["Dr. Michael Chen"]);
    assert!(filter(&doctors, "", "dermatology").is_empty());
    assert!(filter(&doctors, "", "Pediatrics").is_empty());
}

#[test]
fn test_predicates_are_anded() {
    let doctors = sample_doctors();

    assert!(filter(&doctors, "sarah", "Dermatology").is_empty());
    assert_eq!(names(&filter(&doctors, "an", "Neurologist")), vec!["Dr. Anish Sonar"]);
}

#[test]
fn test_filter_preserves_input_order() {
    let doctors = vec![
        TestDoctor::new("Dr. Zoe Adams", "Cardiology").to_summary(),
        TestDoctor::new("Dr. Adam Brook", "Dermatology").to_summary(),
        TestDoctor::new("Dr. Ada Clark", "Cardiology").to_summary(),
    ];

    assert_eq!(
        names(&filter(&doctors, "ada", "all")),
        vec!["Dr. Zoe Adams", "Dr. Adam Brook", "Dr. Ada Clark"]
    );
    assert_eq!(
        names(&filter(&doctors, "ada", "Cardiology")),
        vec!["Dr. Zoe Adams", "Dr. Ada Clark"]
    );
}

#[test]
fn test_filter_is_idempotent() {
    let doctors = sample_doctors();

    for (query, specialty) in [("", "all"), ("a", "all"), ("son", "Neurologist"), ("x", "Cardiology")] {
        let once: Vec<DoctorSummary> = filter(&doctors, query, specialty).into_iter().cloned().collect();
        let twice: Vec<DoctorSummary> = filter(&once, query, specialty).into_iter().cloned().collect();
        assert_eq!(once, twice, "filter({:?}, {:?}) should be idempotent", query, specialty);
    }
}

#[test]
fn test_typed_filter_matches_string_form() {
    let doctors = sample_doctors();
    let typed = DirectoryFilter::new("sarah", "Cardiology");

    assert_eq!(typed.apply(&doctors), filter(&doctors, "sarah", "Cardiology"));
}

#[test]
fn test_specialties_in_first_seen_order() {
    let mut doctors = sample_doctors();
    doctors.push(TestDoctor::new("Dr. Second Cardiologist", "Cardiology").to_summary());

    assert_eq!(specialties(&doctors), vec!["Cardiology", "Dermatology", "Neurologist"]);
}

#[test]
fn test_unknown_doctor_name_falls_back() {
    let doctors = sample_doctors();

    assert_eq!(resolve_doctor_name(&doctors, SARAH_ID), "Dr. Sarah Johnson");
    assert_eq!(resolve_doctor_name(&doctors, Uuid::from_u128(99)), UNKNOWN_DOCTOR);
    assert_eq!(resolve_doctor_name(&[], SARAH_ID), "Unknown Doctor");
}

#[test]
fn test_directory_lookups() {
    let directory = sample_directory();

    assert_eq!(directory.doctor(SARAH_ID).map(|d| d.name.as_str()), Some("Dr. Sarah Johnson"));
    assert!(directory.doctor(Uuid::from_u128(99)).is_none());
    assert_eq!(directory.availability(SARAH_ID).times_for(date("2024-03-10")).len(), 3);
    assert!(directory.availability(Uuid::from_u128(99)).is_empty());
}

#[test]
fn test_directory_rejects_duplicate_ids() {
    let mut doctors = sample_doctors();
    doctors.push(TestDoctor::new("Dr. Impostor", "Cardiology").with_id(SARAH_ID).to_summary());

    let result = Directory::new(doctors, HashMap::new());
    assert_matches!(result, Err(DirectoryError::DuplicateDoctor { id }) if id == SARAH_ID);
}

#[test]
fn test_directory_rejects_orphan_availability() {
    let stranger = Uuid::from_u128(42);
    let mut availability = HashMap::new();
    availability.insert(stranger, vec![AvailabilitySlot::new(date("2024-03-10"), ["10:00 AM"])]);

    let result = Directory::new(sample_doctors(), availability);
    assert_matches!(result, Err(DirectoryError::UnknownDoctor { id }) if id == stranger);
}

#[test]
fn test_directory_rejects_invalid_slots() {
    let mut availability = HashMap::new();
    availability.insert(SARAH_ID, vec![AvailabilitySlot::new(date("2024-03-10"), Vec::<String>::new())]);

    let result = Directory::new(sample_doctors(), availability);
    assert_matches!(result, Err(DirectoryError::Availability { id, .. }) if id == SARAH_ID);
}

#[test]
fn test_directory_from_seed_records() {
    let id = Uuid::from_u128(7);
    let doctors: Vec<DoctorSummary> = serde_json::from_value(serde_json::json!([
        MockSeedResponses::doctor_json(id, "Dr. Jane Roe", "Pediatrics")
    ]))
    .unwrap();
    let slots: Vec<AvailabilitySlot> = serde_json::from_value(serde_json::json!([
        MockSeedResponses::slot_json("2024-03-12", &["9:30 AM", "10:30 AM"]),
        MockSeedResponses::slot_json("2024-03-13", &["4:00 PM"]),
    ]))
    .unwrap();
    let mut availability = HashMap::new();
    availability.insert(id, slots);

    let directory = Directory::new(doctors, availability).unwrap();

    assert_eq!(directory.doctor_name(id), "Dr. Jane Roe");
    assert!(directory.doctor(id).unwrap().consultation_fee.is_none());
    assert_eq!(directory.availability(id).times_for(date("2024-03-12")), ["9:30 AM", "10:30 AM"]);
    assert_eq!(filter(directory.doctors(), "", "Pediatrics").len(), 1);
}
