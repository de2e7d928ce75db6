use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers;
use crate::services::desk::BookingDesk;

pub fn appointment_routes(desk: Arc<BookingDesk>) -> Router {
    // Patient booking flow
    let session_routes = Router::new()
        .route("/sessions", post(handlers::open_session))
        .route(
            "/sessions/{session_id}",
            get(handlers::get_session).delete(handlers::abandon_session),
        )
        .route("/sessions/{session_id}/date", put(handlers::choose_date))
        .route("/sessions/{session_id}/time", put(handlers::choose_time))
        .route("/sessions/{session_id}/reason", put(handlers::set_reason))
        .route("/sessions/{session_id}/submit", post(handlers::submit_session));

    // Admin view (read-only)
    let admin_routes = Router::new()
        .route("/admin", get(handlers::list_admin_appointments));

    Router::new()
        .merge(session_routes)
        .merge(admin_routes)
        .with_state(desk)
}
