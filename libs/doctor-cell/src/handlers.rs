use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::DoctorAvailabilityResponse;
use crate::services::{specialties, Directory, DirectoryFilter, SpecialtyFilter};

// Query parameters for the directory search
#[derive(Debug, Deserialize)]
pub struct DoctorSearchQuery {
    pub query: Option<String>,
    pub specialty: Option<String>,
}

impl From<DoctorSearchQuery> for DirectoryFilter {
    fn from(params: DoctorSearchQuery) -> Self {
        DirectoryFilter {
            query: params.query.unwrap_or_default(),
            specialty: params
                .specialty
                .map(SpecialtyFilter::from)
                .unwrap_or_default(),
        }
    }
}

fn find_doctor<'a>(
    directory: &'a Directory,
    doctor_id: Uuid,
) -> Result<&'a crate::models::DoctorSummary, AppError> {
    directory
        .doctor(doctor_id)
        .ok_or_else(|| AppError::NotFound(format!("Doctor {} not found", doctor_id)))
}

#[axum::debug_handler]
pub async fn search_doctors(
    State(directory): State<Arc<Directory>>,
    Query(params): Query<DoctorSearchQuery>,
) -> Result<Json<Value>, AppError> {
    let filter = DirectoryFilter::from(params);
    let doctors = directory.search(&filter);

    Ok(Json(json!({
        "doctors": doctors,
        "total": doctors.len()
    })))
}

#[axum::debug_handler]
pub async fn list_specialties(
    State(directory): State<Arc<Directory>>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(json!({
        "specialties": specialties(directory.doctors())
    })))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(directory): State<Arc<Directory>>,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let doctor = find_doctor(&directory, doctor_id)?;

    Ok(Json(json!({
        "doctor": doctor,
        "availability_label": doctor.availability_label(),
        "fee_label": doctor.fee_label(),
        "portrait": doctor.portrait()
    })))
}

#[axum::debug_handler]
pub async fn get_doctor_availability(
    State(directory): State<Arc<Directory>>,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<DoctorAvailabilityResponse>, AppError> {
    let doctor = find_doctor(&directory, doctor_id)?;
    let index = directory.availability(doctor_id);
    debug!("Doctor {} offers {} dates", doctor_id, index.len());

    Ok(Json(DoctorAvailabilityResponse {
        doctor_id,
        doctor_name: doctor.name.clone(),
        specialty: doctor.specialty.clone(),
        available_slots: index.to_slots(),
    }))
}

#[axum::debug_handler]
pub async fn get_times_for_date(
    State(directory): State<Arc<Directory>>,
    Path((doctor_id, date)): Path<(Uuid, NaiveDate)>,
) -> Result<Json<Value>, AppError> {
    find_doctor(&directory, doctor_id)?;
    let index = directory.availability(doctor_id);

    Ok(Json(json!({
        "doctor_id": doctor_id,
        "date": date,
        "times": index.times_for(date)
    })))
}
