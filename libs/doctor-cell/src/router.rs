use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::services::Directory;

pub fn doctor_routes(directory: Arc<Directory>) -> Router {
    // Directory browsing is public; nothing here mutates state.
    Router::new()
        .route("/", get(handlers::search_doctors))
        .route("/specialties", get(handlers::list_specialties))
        .route("/{doctor_id}", get(handlers::get_doctor))
        .route("/{doctor_id}/availability", get(handlers::get_doctor_availability))
        .route("/{doctor_id}/availability/{date}", get(handlers::get_times_for_date))
        .with_state(directory)
}
