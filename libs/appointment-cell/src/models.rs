// libs/appointment-cell/src/models.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::NaiveDate;
use std::fmt;

// ==============================================================================
// BOOKING SESSION MODELS
// ==============================================================================

/// Where a booking session stands. Derived from the selection, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingState {
    Empty,
    DateChosen,
    TimeChosen,
}

impl fmt::Display for BookingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingState::Empty => write!(f, "empty"),
            BookingState::DateChosen => write!(f, "date_chosen"),
            BookingState::TimeChosen => write!(f, "time_chosen"),
        }
    }
}

/// The in-progress choices of one booking session.
///
/// A set `time` always belongs to the set `date`; only
/// [`crate::services::session::BookingSession`] mutates a selection, and it
/// keeps that invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSelection {
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub reason: String,
}

impl BookingSelection {
    pub fn state(&self) -> BookingState {
        match (&self.date, &self.time) {
            (Some(_), Some(_)) => BookingState::TimeChosen,
            (Some(_), None) => BookingState::DateChosen,
            _ => BookingState::Empty,
        }
    }

    pub fn date_label(&self) -> String {
        self.date
            .map(|date| date.format("%-d %b %Y").to_string())
            .unwrap_or_else(|| "Select date".to_string())
    }

    pub fn time_label(&self) -> &str {
        self.time.as_deref().unwrap_or("Select time")
    }
}

/// What a successful submit hands to the submission collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub time: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientContact {
    pub name: String,
    pub phone: String,
}

// ==============================================================================
// APPOINTMENT RECORD MODELS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub patient: PatientContact,
    pub date: NaiveDate,
    pub time: String,
    #[serde(default)]
    pub reason: String,
    pub duration_minutes: u32,
    pub status: AppointmentStatus,
    pub payment_status: PaymentStatus,
    pub location: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl AppointmentStatus {
    pub fn tone(&self) -> BadgeTone {
        match self {
            AppointmentStatus::Confirmed => BadgeTone::Green,
            AppointmentStatus::Pending => BadgeTone::Yellow,
            AppointmentStatus::Cancelled => BadgeTone::Red,
            AppointmentStatus::Completed => BadgeTone::Blue,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unpaid,
    Partial,
    Paid,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Unpaid => write!(f, "unpaid"),
            PaymentStatus::Partial => write!(f, "partial"),
            PaymentStatus::Paid => write!(f, "paid"),
        }
    }
}

impl PaymentStatus {
    pub fn tone(&self) -> BadgeTone {
        match self {
            PaymentStatus::Paid => BadgeTone::Green,
            PaymentStatus::Unpaid => BadgeTone::Red,
            PaymentStatus::Partial => BadgeTone::Yellow,
        }
    }
}

/// Colour family a renderer uses for a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTone {
    Green,
    Yellow,
    Red,
    Blue,
}

/// One line of the admin appointments table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRow {
    pub id: Uuid,
    pub date: NaiveDate,
    pub time: String,
    pub doctor_name: String,
    pub location: String,
    pub patient_name: String,
    pub patient_phone: String,
    pub reason: String,
    pub duration_minutes: u32,
    pub status: AppointmentStatus,
    pub status_tone: BadgeTone,
    pub payment_status: PaymentStatus,
    pub payment_tone: BadgeTone,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("Validation error: time {time} not offered for selected date {date}")]
    TimeNotOffered { date: NaiveDate, time: String },

    #[error("Validation error: choose a date before choosing a time")]
    NoDateSelected,

    #[error("Invalid state: a booking needs both a date and a time before it can be submitted")]
    NotSubmittable,
}

impl BookingError {
    /// Validation errors reject a single choice; the rest signal misuse of the
    /// session.
    pub fn is_validation(&self) -> bool {
        matches!(self, BookingError::TimeNotOffered { .. } | BookingError::NoDateSelected)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("Slot {time} on {date} is already booked")]
    SlotTaken { date: NaiveDate, time: String },

    #[error("Invalid patient details: {0}")]
    InvalidPatient(String),
}
