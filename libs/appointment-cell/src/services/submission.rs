// libs/appointment-cell/src/services/submission.rs
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_config::AppConfig;

use crate::models::{
    AppointmentRecord, AppointmentStatus, BookingRequest, PaymentStatus, PatientContact,
    SubmissionError,
};

/// Receives booking requests once a session has been submitted.
///
/// Implementations own persistence and conflict detection. The booking core
/// only hands requests over and reports whatever comes back.
#[async_trait]
pub trait BookingSubmitter: Send + Sync {
    async fn submit(
        &self,
        request: BookingRequest,
        patient: PatientContact,
    ) -> Result<AppointmentRecord, SubmissionError>;
}

/// In-memory appointment ledger used by the host application.
///
/// Starts from the seeded records and accepts new bookings as `pending` and
/// `unpaid`, refusing a doctor/date/time that is already taken by an
/// appointment that was not cancelled.
pub struct AppointmentBook {
    records: RwLock<Vec<AppointmentRecord>>,
    location: String,
    duration_minutes: u32,
}

impl AppointmentBook {
    pub fn new(config: &AppConfig, seeded: Vec<AppointmentRecord>) -> Self {
        debug!("Appointment book starting with {} records", seeded.len());
        Self {
            records: RwLock::new(seeded),
            location: config.clinic_location.clone(),
            duration_minutes: config.appointment_minutes,
        }
    }

    /// Snapshot of every record, seeded ones first, then in booking order.
    pub fn appointments(&self) -> Vec<AppointmentRecord> {
        match self.records.read() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.appointments().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn validate_patient(patient: &PatientContact) -> Result<(), SubmissionError> {
        if patient.name.trim().is_empty() {
            return Err(SubmissionError::InvalidPatient("name is required".to_string()));
        }
        if patient.phone.trim().is_empty() {
            return Err(SubmissionError::InvalidPatient("phone is required".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl BookingSubmitter for AppointmentBook {
    async fn submit(
        &self,
        request: BookingRequest,
        patient: PatientContact,
    ) -> Result<AppointmentRecord, SubmissionError> {
        Self::validate_patient(&patient)?;

        let mut records = match self.records.write() {
            Ok(records) => records,
            Err(poisoned) => poisoned.into_inner(),
        };

        let taken = records.iter().any(|record| {
            record.doctor_id == request.doctor_id
                && record.date == request.date
                && record.time == request.time
                && record.status != AppointmentStatus::Cancelled
        });
        if taken {
            warn!(
                "Slot {} on {} for doctor {} already booked",
                request.time, request.date, request.doctor_id
            );
            return Err(SubmissionError::SlotTaken {
                date: request.date,
                time: request.time,
            });
        }

        let record = AppointmentRecord {
            id: Uuid::new_v4(),
            doctor_id: request.doctor_id,
            patient,
            date: request.date,
            time: request.time,
            reason: request.reason,
            duration_minutes: self.duration_minutes,
            status: AppointmentStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            location: self.location.clone(),
        };
        records.push(record.clone());

        info!("Appointment {} booked for doctor {}", record.id, record.doctor_id);
        Ok(record)
    }
}
