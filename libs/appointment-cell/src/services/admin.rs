// libs/appointment-cell/src/services/admin.rs
use tracing::debug;

use doctor_cell::{resolve_doctor_name, DoctorSummary};

use crate::models::{AppointmentRecord, AppointmentRow};

/// Flatten a record into a table row, resolving the doctor's display name.
pub fn appointment_row(record: &AppointmentRecord, doctors: &[DoctorSummary]) -> AppointmentRow {
    AppointmentRow {
        id: record.id,
        date: record.date,
        time: record.time.clone(),
        doctor_name: resolve_doctor_name(doctors, record.doctor_id).to_string(),
        location: record.location.clone(),
        patient_name: record.patient.name.clone(),
        patient_phone: record.patient.phone.clone(),
        reason: record.reason.clone(),
        duration_minutes: record.duration_minutes,
        status: record.status,
        status_tone: record.status.tone(),
        payment_status: record.payment_status,
        payment_tone: record.payment_status.tone(),
    }
}

/// Rows for the admin appointments table, in record order.
pub fn appointment_rows(records: &[AppointmentRecord], doctors: &[DoctorSummary]) -> Vec<AppointmentRow> {
    debug!("Rendering {} appointment rows", records.len());
    records
        .iter()
        .map(|record| appointment_row(record, doctors))
        .collect()
}
