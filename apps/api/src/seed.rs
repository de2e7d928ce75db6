use std::collections::HashMap;
use std::fs;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use appointment_cell::AppointmentRecord;
use doctor_cell::{AvailabilitySlot, Directory, DoctorSummary};
use shared_config::AppConfig;

const DEMO_SEED: &str = include_str!("../seed/demo.json");

/// Startup data: the doctor directory, per-doctor slots and the appointments
/// shown on the admin page.
#[derive(Debug, Deserialize)]
pub struct SeedData {
    pub doctors: Vec<DoctorSummary>,
    #[serde(default)]
    pub availability: HashMap<Uuid, Vec<AvailabilitySlot>>,
    #[serde(default)]
    pub appointments: Vec<AppointmentRecord>,
}

impl SeedData {
    pub fn load(config: &AppConfig) -> Result<Self> {
        let seed = match &config.seed_path {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read seed file {}", path.display()))?;
                Self::parse(&raw)
                    .with_context(|| format!("Invalid seed file {}", path.display()))?
            }
            None => Self::parse(DEMO_SEED).context("Built-in demo seed is invalid")?,
        };

        info!(
            "Loaded seed: {} doctors, {} with availability, {} appointments",
            seed.doctors.len(),
            seed.availability.len(),
            seed.appointments.len()
        );
        Ok(seed)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Split the seed into the directory and the appointment records.
    pub fn into_parts(self) -> Result<(Directory, Vec<AppointmentRecord>)> {
        let directory = Directory::new(self.doctors, self.availability)
            .context("Seed directory is inconsistent")?;
        Ok((directory, self.appointments))
    }
}
