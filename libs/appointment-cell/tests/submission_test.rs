// libs/appointment-cell/tests/submission_test.rs
use std::sync::Arc;

use assert_matches::assert_matches;
use tokio_test::block_on;
use uuid::Uuid;

use appointment_cell::{
    AppointmentBook, AppointmentRecord, AppointmentStatus, BookingRequest, BookingSubmitter,
    PatientContact, PaymentStatus, SubmissionError,
};
use shared_utils::test_utils::{date, MockSeedResponses, TestConfig, ANISH_ID, SARAH_ID};

fn request(doctor_id: Uuid, time: &str) -> BookingRequest {
    BookingRequest {
        doctor_id,
        date: date("2024-03-10"),
        time: time.to_string(),
        reason: "Routine check-up".to_string(),
    }
}

fn patient(name: &str, phone: &str) -> PatientContact {
    PatientContact {
        name: name.to_string(),
        phone: phone.to_string(),
    }
}

fn seeded(status: &str) -> AppointmentRecord {
    serde_json::from_value(MockSeedResponses::appointment_json(
        Uuid::from_u128(101),
        SARAH_ID,
        status,
        "unpaid",
    ))
    .unwrap()
}

fn book_with(records: Vec<AppointmentRecord>) -> AppointmentBook {
    AppointmentBook::new(&TestConfig::default().to_app_config(), records)
}

#[test]
fn test_new_booking_is_pending_and_unpaid() {
    let book = book_with(Vec::new());

    let record = block_on(book.submit(request(SARAH_ID, "11:30 AM"), patient("Priya", "12345"))).unwrap();

    assert_eq!(record.status, AppointmentStatus::Pending);
    assert_eq!(record.payment_status, PaymentStatus::Unpaid);
    assert_eq!(record.location, "Test Clinic, Room 1");
    assert_eq!(record.duration_minutes, 30);
    assert_eq!(record.reason, "Routine check-up");
    assert_eq!(record.patient.name, "Priya");
    assert_eq!(book.len(), 1);
    assert_eq!(book.appointments()[0], record);
}

#[test]
fn test_config_drives_location_and_duration() {
    let config = TestConfig {
        clinic_location: "Annex, Floor 2".to_string(),
        appointment_minutes: 45,
    }
    .to_app_config();
    let book = AppointmentBook::new(&config, Vec::new());

    let record = block_on(book.submit(request(ANISH_ID, "10:00 AM"), patient("Ravi", "555"))).unwrap();

    assert_eq!(record.location, "Annex, Floor 2");
    assert_eq!(record.duration_minutes, 45);
}

#[test]
fn test_taken_slot_is_refused() {
    let book = book_with(vec![seeded("confirmed")]);

    let result = block_on(book.submit(request(SARAH_ID, "10:00 AM"), patient("Priya", "12345")));

    assert_matches!(
        result,
        Err(SubmissionError::SlotTaken { ref time, .. }) if time == "10:00 AM"
    );
    assert_eq!(book.len(), 1);
}

#[test]
fn test_same_time_for_another_doctor_is_free() {
    let book = book_with(vec![seeded("pending")]);

    let result = block_on(book.submit(request(ANISH_ID, "10:00 AM"), patient("Priya", "12345")));

    assert!(result.is_ok());
    assert_eq!(book.len(), 2);
}

#[test]
fn test_cancelled_appointment_frees_the_slot() {
    let book = book_with(vec![seeded("cancelled")]);

    let result = block_on(book.submit(request(SARAH_ID, "10:00 AM"), patient("Priya", "12345")));

    assert!(result.is_ok());
}

#[test]
fn test_patient_details_are_required() {
    let book = book_with(Vec::new());

    let missing_name = block_on(book.submit(request(SARAH_ID, "2:00 PM"), patient("", "12345")));
    assert_matches!(missing_name, Err(SubmissionError::InvalidPatient(ref msg)) if msg.contains("name"));

    let missing_phone = block_on(book.submit(request(SARAH_ID, "2:00 PM"), patient("Priya", "   ")));
    assert_matches!(missing_phone, Err(SubmissionError::InvalidPatient(ref msg)) if msg.contains("phone"));

    assert!(book.is_empty());
}

#[tokio::test]
async fn test_book_works_behind_the_trait_object() {
    let book = Arc::new(book_with(Vec::new()));
    let submitter: Arc<dyn BookingSubmitter> = book.clone();

    let first = submitter.submit(request(SARAH_ID, "10:00 AM"), patient("A", "1")).await.unwrap();
    let second = submitter.submit(request(SARAH_ID, "11:30 AM"), patient("B", "2")).await.unwrap();

    assert_ne!(first.id, second.id);
    let ids: Vec<Uuid> = book.appointments().iter().map(|record| record.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
}
