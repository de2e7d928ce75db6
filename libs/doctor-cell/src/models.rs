use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::NaiveDate;
use thiserror::Error;

/// Display-name fallback for a doctor id missing from the directory.
pub const UNKNOWN_DOCTOR: &str = "Unknown Doctor";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorSummary {
    pub id: Uuid,
    pub name: String,
    pub specialty: String,
    pub years_experience: u32,
    pub is_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    /// Consultation charge in whole rupees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consultation_fee: Option<u32>,
}

impl DoctorSummary {
    pub fn availability_label(&self) -> &'static str {
        if self.is_available {
            "Available Now"
        } else {
            "Currently Unavailable"
        }
    }

    /// What a renderer should show for this doctor. Blank image references
    /// count as absent.
    pub fn portrait(&self) -> Portrait {
        match self.image.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Portrait::Photo(url.to_string()),
            _ => Portrait::Initials(initials(&self.name)),
        }
    }

    pub fn fee_label(&self) -> Option<String> {
        self.consultation_fee.map(format_rupees)
    }
}

/// Rupee amount with Indian digit grouping, e.g. `₹1,50,000`.
pub fn format_rupees(amount: u32) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("₹{}", digits);
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("₹{},{}", groups.join(","), tail)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Portrait {
    Photo(String),
    Initials(String),
}

/// Up to two uppercase initials, skipping a leading "Dr." title.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter(|word| !word.eq_ignore_ascii_case("dr.") && !word.eq_ignore_ascii_case("dr"))
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub date: NaiveDate,
    pub times: Vec<String>,
}

impl AvailabilitySlot {
    pub fn new<I, S>(date: NaiveDate, times: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            date,
            times: times.into_iter().map(Into::into).collect(),
        }
    }
}

// DTO for a doctor's availability as the directory routes return it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorAvailabilityResponse {
    pub doctor_id: Uuid,
    pub doctor_name: String,
    pub specialty: String,
    pub available_slots: Vec<AvailabilitySlot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AvailabilityError {
    #[error("availability slot on {date} offers no times")]
    EmptySlot { date: NaiveDate },

    #[error("availability date {date} appears more than once")]
    DuplicateDate { date: NaiveDate },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    #[error("doctor id {id} appears more than once in the directory")]
    DuplicateDoctor { id: Uuid },

    #[error("availability supplied for doctor {id} who is not in the directory")]
    UnknownDoctor { id: Uuid },

    #[error("invalid availability for doctor {id}: {source}")]
    Availability {
        id: Uuid,
        #[source]
        source: AvailabilityError,
    },
}
