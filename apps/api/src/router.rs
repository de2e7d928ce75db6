use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use appointment_cell::{appointment_routes, BookingDesk};
use doctor_cell::doctor_routes;

pub fn create_router(desk: Arc<BookingDesk>) -> Router {
    let directory = desk.directory_handle();

    Router::new()
        .route("/", get(|| async { "DocSphere API is running!" }))
        .nest("/doctors", doctor_routes(directory))
        .nest("/appointments", appointment_routes(desk))
}
