use std::collections::HashMap;

use chrono::NaiveDate;
use serde_json::json;
use uuid::Uuid;

use doctor_cell::{AvailabilitySlot, Directory, DoctorSummary};
use shared_config::AppConfig;

pub const SARAH_ID: Uuid = Uuid::from_u128(1);
pub const MICHAEL_ID: Uuid = Uuid::from_u128(2);
pub const ANISH_ID: Uuid = Uuid::from_u128(3);

pub struct TestConfig {
    pub clinic_location: String,
    pub appointment_minutes: u32,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            clinic_location: "Test Clinic, Room 1".to_string(),
            appointment_minutes: 30,
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            clinic_location: self.clinic_location.clone(),
            appointment_minutes: self.appointment_minutes,
            ..AppConfig::default()
        }
    }
}

pub struct TestDoctor {
    pub id: Uuid,
    pub name: String,
    pub specialty: String,
    pub years_experience: u32,
    pub is_available: bool,
    pub image: Option<String>,
    pub about: Option<String>,
    pub consultation_fee: Option<u32>,
}

impl Default for TestDoctor {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: "Dr. Test Doctor".to_string(),
            specialty: "General Practice".to_string(),
            years_experience: 5,
            is_available: true,
            image: None,
            about: None,
            consultation_fee: None,
        }
    }
}

impl TestDoctor {
    pub fn new(name: &str, specialty: &str) -> Self {
        Self {
            name: name.to_string(),
            specialty: specialty.to_string(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.is_available = false;
        self
    }

    pub fn with_image(mut self, image: &str) -> Self {
        self.image = Some(image.to_string());
        self
    }

    pub fn with_fee(mut self, fee: u32) -> Self {
        self.consultation_fee = Some(fee);
        self
    }

    pub fn with_about(mut self, about: &str) -> Self {
        self.about = Some(about.to_string());
        self
    }

    pub fn to_summary(&self) -> DoctorSummary {
        DoctorSummary {
            id: self.id,
            name: self.name.clone(),
            specialty: self.specialty.clone(),
            years_experience: self.years_experience,
            is_available: self.is_available,
            image: self.image.clone(),
            about: self.about.clone(),
            consultation_fee: self.consultation_fee,
        }
    }
}

pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("fixture dates are ISO formatted")
}

/// The three-doctor directory from the patient-facing demo.
pub fn sample_doctors() -> Vec<DoctorSummary> {
    vec![
        TestDoctor {
            years_experience: 15,
            ..TestDoctor::new("Dr. Sarah Johnson", "Cardiology")
                .with_id(SARAH_ID)
                .with_image("/doctor1.jpg")
                .with_about("Preventive cardiology and heart failure management.")
                .with_fee(1500)
        }
        .to_summary(),
        TestDoctor {
            years_experience: 10,
            ..TestDoctor::new("Dr. Michael Chen", "Dermatology").with_id(MICHAEL_ID).unavailable()
        }
        .to_summary(),
        TestDoctor {
            years_experience: 5,
            ..TestDoctor::new("Dr. Anish Sonar", "Neurologist").with_id(ANISH_ID).with_image("/anish.png")
        }
        .to_summary(),
    ]
}

/// Dr. Sarah Johnson's offered slots.
pub fn sample_slots() -> Vec<AvailabilitySlot> {
    vec![
        AvailabilitySlot::new(date("2024-03-10"), ["10:00 AM", "11:30 AM", "2:00 PM"]),
        AvailabilitySlot::new(date("2024-03-11"), ["09:00 AM", "12:00 PM", "3:00 PM"]),
    ]
}

pub fn sample_directory() -> Directory {
    let mut availability = HashMap::new();
    availability.insert(SARAH_ID, sample_slots());
    Directory::new(sample_doctors(), availability).expect("sample directory is consistent")
}

pub struct MockSeedResponses;

impl MockSeedResponses {
    pub fn doctor_json(id: Uuid, name: &str, specialty: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "specialty": specialty,
            "years_experience": 8,
            "is_available": true
        })
    }

    pub fn slot_json(date: &str, times: &[&str]) -> serde_json::Value {
        json!({
            "date": date,
            "times": times
        })
    }

    pub fn appointment_json(id: Uuid, doctor_id: Uuid, status: &str, payment_status: &str) -> serde_json::Value {
        json!({
            "id": id,
            "doctor_id": doctor_id,
            "patient": { "name": "Test Patient", "phone": "+91 98765 43210" },
            "date": "2024-03-10",
            "time": "10:00 AM",
            "reason": "Routine check-up",
            "duration_minutes": 30,
            "status": status,
            "payment_status": payment_status,
            "location": "Test Clinic, Room 1"
        })
    }
}
