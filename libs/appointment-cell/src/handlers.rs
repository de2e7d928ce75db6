// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};
use uuid::Uuid;

use doctor_cell::Directory;
use shared_models::error::AppError;

use crate::models::{
    AppointmentRecord, BookingError, BookingState, PatientContact, SubmissionError,
};
use crate::services::desk::BookingDesk;
use crate::services::session::BookingSession;

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        if err.is_validation() {
            AppError::ValidationError(err.to_string())
        } else {
            AppError::Conflict(err.to_string())
        }
    }
}

impl From<SubmissionError> for AppError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::SlotTaken { .. } => AppError::Conflict(err.to_string()),
            SubmissionError::InvalidPatient(_) => AppError::ValidationError(err.to_string()),
        }
    }
}

// Request bodies
#[derive(Debug, Deserialize)]
pub struct OpenSessionRequest {
    pub doctor_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ChooseDateRequest {
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct ChooseTimeRequest {
    pub time: String,
}

#[derive(Debug, Deserialize)]
pub struct SetReasonRequest {
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Deserialize)]
pub struct SubmitSessionRequest {
    pub patient: PatientContact,
}

/// What the booking page needs to render a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub doctor_id: Uuid,
    pub state: BookingState,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub reason: String,
    pub date_label: String,
    pub time_label: String,
    pub available_dates: Vec<NaiveDate>,
    pub available_times: Vec<String>,
    pub submittable: bool,
    pub consultation_fee: Option<u32>,
    pub total_amount_label: Option<String>,
}

impl SessionView {
    pub fn new(session_id: Uuid, session: &BookingSession, directory: &Directory) -> Self {
        let selection = session.selection();
        let doctor = directory.doctor(session.doctor_id());
        Self {
            session_id,
            doctor_id: session.doctor_id(),
            state: session.state(),
            date: selection.date,
            time: selection.time.clone(),
            reason: selection.reason.clone(),
            date_label: selection.date_label(),
            time_label: selection.time_label().to_string(),
            available_dates: session.availability().dates().collect(),
            available_times: session.available_times().to_vec(),
            submittable: session.is_submittable(),
            consultation_fee: doctor.and_then(|d| d.consultation_fee),
            total_amount_label: doctor.and_then(|d| d.fee_label()),
        }
    }
}

fn session_not_found(session_id: Uuid) -> AppError {
    AppError::NotFound(format!("Booking session {} not found", session_id))
}

/// Run a transition against a stored session and render the result.
async fn update_session<F>(
    desk: &BookingDesk,
    session_id: Uuid,
    transition: F,
) -> Result<Json<SessionView>, AppError>
where
    F: FnOnce(&mut BookingSession) -> Result<(), BookingError>,
{
    let session = desk
        .update_session(session_id, transition)
        .await
        .ok_or_else(|| session_not_found(session_id))??;

    Ok(Json(SessionView::new(session_id, &session, desk.directory())))
}

#[axum::debug_handler]
pub async fn open_session(
    State(desk): State<Arc<BookingDesk>>,
    Json(request): Json<OpenSessionRequest>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let doctor = desk
        .directory()
        .doctor(request.doctor_id)
        .ok_or_else(|| AppError::NotFound(format!("Doctor {} not found", request.doctor_id)))?;

    if !doctor.is_available {
        return Err(AppError::Conflict(format!(
            "{} is not accepting bookings",
            doctor.name
        )));
    }

    let (session_id, session) = desk.open_session(request.doctor_id).await;
    Ok((
        StatusCode::CREATED,
        Json(SessionView::new(session_id, &session, desk.directory())),
    ))
}

#[axum::debug_handler]
pub async fn get_session(
    State(desk): State<Arc<BookingDesk>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = desk
        .session(session_id)
        .await
        .ok_or_else(|| session_not_found(session_id))?;

    Ok(Json(SessionView::new(session_id, &session, desk.directory())))
}

#[axum::debug_handler]
pub async fn choose_date(
    State(desk): State<Arc<BookingDesk>>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<ChooseDateRequest>,
) -> Result<Json<SessionView>, AppError> {
    update_session(&desk, session_id, |session| {
        session.choose_date(request.date);
        Ok(())
    })
    .await
}

#[axum::debug_handler]
pub async fn choose_time(
    State(desk): State<Arc<BookingDesk>>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<ChooseTimeRequest>,
) -> Result<Json<SessionView>, AppError> {
    update_session(&desk, session_id, |session| session.choose_time(&request.time)).await
}

#[axum::debug_handler]
pub async fn set_reason(
    State(desk): State<Arc<BookingDesk>>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SetReasonRequest>,
) -> Result<Json<SessionView>, AppError> {
    update_session(&desk, session_id, |session| {
        session.set_reason(request.reason);
        Ok(())
    })
    .await
}

/// Submit a session and hand the request to the submission collaborator.
///
/// The session leaves the store for the duration of the submission, so a
/// concurrent abandon or second submit sees it as gone. A rejected booking
/// puts it back with the patient's selection intact.
#[axum::debug_handler]
pub async fn submit_session(
    State(desk): State<Arc<BookingDesk>>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SubmitSessionRequest>,
) -> Result<(StatusCode, Json<AppointmentRecord>), AppError> {
    let stored = desk
        .take_session(session_id)
        .await
        .ok_or_else(|| session_not_found(session_id))?;

    let mut attempt = stored.clone();
    let booking = match attempt.submit() {
        Ok(booking) => booking,
        Err(err) => {
            desk.restore_session(session_id, stored).await;
            return Err(err.into());
        }
    };

    match desk.submitter().submit(booking, request.patient).await {
        Ok(record) => {
            info!("Session {} produced appointment {}", session_id, record.id);
            Ok((StatusCode::CREATED, Json(record)))
        }
        Err(err) => {
            warn!("Submission for session {} rejected: {}", session_id, err);
            desk.restore_session(session_id, stored).await;
            Err(err.into())
        }
    }
}

#[axum::debug_handler]
pub async fn abandon_session(
    State(desk): State<Arc<BookingDesk>>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if desk.close_session(session_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(session_not_found(session_id))
    }
}

#[axum::debug_handler]
pub async fn list_admin_appointments(
    State(desk): State<Arc<BookingDesk>>,
) -> Result<Json<Value>, AppError> {
    let rows = desk.admin_rows();

    Ok(Json(json!({
        "appointments": rows,
        "total": rows.len()
    })))
}
