use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::services::DoctorService;

// ==============================================================================
// PUBLIC HANDLERS (bearer token optional, anon key otherwise)
// ==============================================================================

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<String>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<Json<Value>, AppError> {
    let token = auth.as_ref().map(|TypedHeader(a)| a.token());
    let doctor_service = DoctorService::new(&state);

    let doctor = doctor_service.get_doctor(&doctor_id, token).await?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn get_doctor_slots(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<String>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<Json<Value>, AppError> {
    let token = auth.as_ref().map(|TypedHeader(a)| a.token());
    let doctor_service = DoctorService::new(&state);

    let slots = doctor_service.get_slots(&doctor_id, token).await?;

    Ok(Json(json!({
        "success": true,
        "doctor_id": slots.doctor_id,
        "doctor_name": slots.doctor_name,
        "ticket_price": slots.ticket_price,
        "slots": slots.slots,
    })))
}
