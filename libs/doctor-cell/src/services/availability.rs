// libs/doctor-cell/src/services/availability.rs
use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{AvailabilityError, AvailabilitySlot};

/// A doctor's offered times, keyed by date.
///
/// The index is an immutable snapshot: it is built once from the slots the
/// availability source supplies and replaced wholesale when they change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityIndex {
    slots: BTreeMap<NaiveDate, Vec<String>>,
}

impl AvailabilityIndex {
    /// Build an index, rejecting slots with no times and dates listed twice.
    pub fn new<I>(slots: I) -> Result<Self, AvailabilityError>
    where
        I: IntoIterator<Item = AvailabilitySlot>,
    {
        let mut index = BTreeMap::new();

        for slot in slots {
            if slot.times.is_empty() {
                return Err(AvailabilityError::EmptySlot { date: slot.date });
            }
            if index.insert(slot.date, slot.times).is_some() {
                return Err(AvailabilityError::DuplicateDate { date: slot.date });
            }
        }

        debug!("Built availability index with {} dates", index.len());
        Ok(Self { slots: index })
    }

    /// Times offered on `date`, in the order the source listed them.
    /// An unknown date yields an empty slice.
    pub fn times_for(&self, date: NaiveDate) -> &[String] {
        self.slots.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Dates with at least one offered time, ascending.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.slots.keys().copied()
    }

    pub fn offers(&self, date: NaiveDate, time: &str) -> bool {
        self.times_for(date).iter().any(|offered| offered == time)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// The index back in slot form, dates ascending.
    pub fn to_slots(&self) -> Vec<AvailabilitySlot> {
        self.slots
            .iter()
            .map(|(date, times)| AvailabilitySlot {
                date: *date,
                times: times.clone(),
            })
            .collect()
    }
}
