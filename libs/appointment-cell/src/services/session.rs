// libs/appointment-cell/src/services/session.rs
use chrono::NaiveDate;
use tracing::{debug, info, warn};
use uuid::Uuid;

use doctor_cell::AvailabilityIndex;

use crate::models::{BookingError, BookingRequest, BookingSelection, BookingState};

/// One patient's booking attempt with one doctor.
///
/// The session owns its availability snapshot and its selection. Every
/// transition either applies fully or leaves the selection untouched.
#[derive(Debug, Clone)]
pub struct BookingSession {
    doctor_id: Uuid,
    availability: AvailabilityIndex,
    selection: BookingSelection,
}

impl BookingSession {
    pub fn new(doctor_id: Uuid, availability: AvailabilityIndex) -> Self {
        debug!("Starting booking session for doctor {}", doctor_id);
        Self {
            doctor_id,
            availability,
            selection: BookingSelection::default(),
        }
    }

    pub fn doctor_id(&self) -> Uuid {
        self.doctor_id
    }

    pub fn availability(&self) -> &AvailabilityIndex {
        &self.availability
    }

    pub fn selection(&self) -> &BookingSelection {
        &self.selection
    }

    pub fn state(&self) -> BookingState {
        self.selection.state()
    }

    /// Times offered on the selected date; empty while no date is chosen.
    pub fn available_times(&self) -> &[String] {
        match self.selection.date {
            Some(date) => self.availability.times_for(date),
            None => &[],
        }
    }

    /// Select `date`. Moving to a different date drops the chosen time.
    ///
    /// Dates without offered times are accepted; `choose_time` rejects every
    /// time for them.
    pub fn choose_date(&mut self, date: NaiveDate) {
        if self.selection.date != Some(date) {
            if let Some(dropped) = self.selection.time.take() {
                debug!("Date changed to {}, clearing time {}", date, dropped);
            }
            self.selection.date = Some(date);
        }

        if self.availability.times_for(date).is_empty() {
            debug!("Doctor {} offers no times on {}", self.doctor_id, date);
        }
    }

    pub fn choose_time(&mut self, time: &str) -> Result<(), BookingError> {
        let date = self.selection.date.ok_or(BookingError::NoDateSelected)?;

        if !self.availability.offers(date, time) {
            warn!("Rejected time {} for doctor {} on {}", time, self.doctor_id, date);
            return Err(BookingError::TimeNotOffered {
                date,
                time: time.to_string(),
            });
        }

        self.selection.time = Some(time.to_string());
        Ok(())
    }

    pub fn set_reason(&mut self, reason: impl Into<String>) {
        self.selection.reason = reason.into();
    }

    pub fn is_submittable(&self) -> bool {
        self.state() == BookingState::TimeChosen
    }

    /// Turn the selection into a booking request and start over from `Empty`.
    pub fn submit(&mut self) -> Result<BookingRequest, BookingError> {
        if !self.is_submittable() {
            warn!("Submit attempted for doctor {} in state {}", self.doctor_id, self.state());
            return Err(BookingError::NotSubmittable);
        }

        let (date, time) = match (self.selection.date, &self.selection.time) {
            (Some(date), Some(time)) => (date, time.clone()),
            _ => return Err(BookingError::NotSubmittable),
        };
        let reason = std::mem::take(&mut self.selection).reason;

        info!("Booking request ready: doctor {} on {} at {}", self.doctor_id, date, time);

        Ok(BookingRequest {
            doctor_id: self.doctor_id,
            date,
            time,
            reason,
        })
    }
}
