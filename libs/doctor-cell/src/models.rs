use serde::{Deserialize, Serialize};
use thiserror::Error;

use scheduling_cell::{SchedulingError, TimeSlotRecord, WeeklyAvailability};
use shared_models::error::AppError;
use shared_database::supabase::to_app_error;

pub const DEFAULT_DOCTOR_NAME: &str = "Unknown Doctor";
pub const DEFAULT_DOCTOR_PHONE: &str = "Not available";
pub const DEFAULT_AVATAR_URL: &str =
    "https://static.vecteezy.com/system/resources/thumbnails/009/292/244/small/default-avatar-icon-of-social-media-user-vector.jpg";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub photo: Option<String>,
    pub specialization: Option<String>,
    pub ticket_price: Option<f64>,
    #[serde(default)]
    pub time_slots: Vec<TimeSlotRecord>,
}

impl Doctor {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(DEFAULT_DOCTOR_NAME)
    }

    pub fn display_phone(&self) -> &str {
        self.phone
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(DEFAULT_DOCTOR_PHONE)
    }

    pub fn display_photo(&self) -> &str {
        self.photo
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(DEFAULT_AVATAR_URL)
    }

    pub fn availability(&self) -> Result<WeeklyAvailability, DoctorError> {
        Ok(WeeklyAvailability::from_time_slots(&self.time_slots)?)
    }
}

/// What a patient sees before picking a slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorSlotsResponse {
    pub doctor_id: String,
    pub doctor_name: String,
    pub ticket_price: Option<f64>,
    pub slots: Vec<String>,
}

#[derive(Error, Debug)]
pub enum DoctorError {
    #[error("Doctor not found: {0}")]
    NotFound(String),

    #[error("Doctor availability is invalid: {0}")]
    InvalidAvailability(#[from] SchedulingError),

    #[error("Malformed doctor record: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl From<DoctorError> for AppError {
    fn from(err: DoctorError) -> Self {
        match err {
            DoctorError::NotFound(id) => AppError::NotFound(format!("Doctor {} not found", id)),
            DoctorError::InvalidAvailability(e) => AppError::Internal(format!("Doctor availability is invalid: {}", e)),
            DoctorError::Malformed(e) => AppError::Store(e.to_string()),
            DoctorError::Store(e) => to_app_error(&e),
        }
    }
}
