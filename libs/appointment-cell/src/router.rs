use std::sync::Arc;

use axum::{
    Router,
    routing::{get, patch, post},
};

use shared_config::AppConfig;

use crate::handlers;

/// Every route expects `Authorization: Bearer <token>`; the token is
/// forwarded to the data store, which enforces access.
pub fn appointment_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", post(handlers::book_appointment))
        .route("/preview", post(handlers::preview_booking))
        .route("/patients/{patient_id}", get(handlers::get_patient_appointments))
        .route("/doctors/{doctor_id}", get(handlers::get_doctor_appointments))
        .route("/{appointment_id}/state", patch(handlers::update_appointment_state))
        .with_state(state)
}
