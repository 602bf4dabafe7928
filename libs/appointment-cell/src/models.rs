use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use doctor_cell::models::{Doctor, DoctorError, DEFAULT_AVATAR_URL};
use scheduling_cell::{EtaWarning, QueueAssignment, SchedulingError};
use shared_database::supabase::to_app_error;
use shared_models::error::AppError;

pub const DEFAULT_TICKET_PRICE: &str = "100";
pub const DEFAULT_GENDER: &str = "Unknown";

// ==============================================================================
// APPOINTMENT RECORD
// ==============================================================================

/// Appointment state as stored. New bookings start `Unconfirmed`; the
/// doctor then marks the visit done or the patient as not having come.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppointmentState {
    #[serde(rename = "un")]
    Unconfirmed,
    #[serde(rename = "done")]
    Done,
    #[serde(rename = "not come")]
    NotCome,
}

impl AppointmentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentState::Unconfirmed => "un",
            AppointmentState::Done => "done",
            AppointmentState::NotCome => "not come",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, AppointmentState::Unconfirmed)
    }

    pub fn can_transition_to(&self, target: &AppointmentState) -> bool {
        use AppointmentState::*;
        matches!((self, target), (Unconfirmed, Done) | (Unconfirmed, NotCome))
    }
}

impl fmt::Display for AppointmentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub photo: Option<String>,
    pub gender: Option<String>,
}

impl PatientSummary {
    /// Fill in the avatar and gender the booking form leaves blank.
    pub fn with_defaults(mut self) -> Self {
        if self.photo.as_deref().map_or(true, |p| p.trim().is_empty()) {
            self.photo = Some(DEFAULT_AVATAR_URL.to_string());
        }
        if self.gender.as_deref().map_or(true, |g| g.trim().is_empty()) {
            self.gender = Some(DEFAULT_GENDER.to_string());
        }
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DoctorSummary {
    pub id: String,
    pub name: String,
    pub photo: Option<String>,
    pub phone: Option<String>,
}

impl From<&Doctor> for DoctorSummary {
    fn from(doctor: &Doctor) -> Self {
        Self {
            id: doctor.id.clone(),
            name: doctor.display_name().to_string(),
            photo: Some(doctor.display_photo().to_string()),
            phone: Some(doctor.display_phone().to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: String,
    pub user: PatientSummary,
    pub doctor_id: String,
    pub ticket_price: String,
    pub created_at: DateTime<Utc>,
    pub state: AppointmentState,
    /// Standard slot label; bookings are counted per doctor and label.
    pub time_slot: String,
    pub is_paid: bool,
    pub queue_number: u64,
    pub expected_time: String,
    pub doctor: DoctorSummary,
}

// ==============================================================================
// REQUESTS AND RESPONSES
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub doctor_id: String,
    pub time_slot: String,
    pub day_of_week: Option<String>,
    pub patient: PatientSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewBookingRequest {
    pub doctor_id: String,
    pub time_slot: String,
    pub day_of_week: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingPreview {
    pub doctor_id: String,
    pub time_slot: String,
    pub queue_number: u64,
    pub expected_time: String,
    pub expected_start_minute: u16,
    pub visit_date: NaiveDate,
    pub days_until: u32,
    pub warnings: Vec<EtaWarning>,
}

impl BookingPreview {
    pub fn from_assignment(doctor_id: &str, assignment: &QueueAssignment) -> Self {
        Self {
            doctor_id: doctor_id.to_string(),
            time_slot: assignment.time_slot.clone(),
            queue_number: assignment.queue_number,
            expected_time: assignment.expected_time(),
            expected_start_minute: assignment.expected_start.get(),
            visit_date: assignment.visit_date,
            days_until: assignment.days_until,
            warnings: assignment.warnings.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStateRequest {
    pub state: AppointmentState,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug)]
pub enum AppointmentError {
    #[error(transparent)]
    Scheduling(#[from] SchedulingError),

    #[error(transparent)]
    Doctor(#[from] DoctorError),

    #[error("Appointment not found: {0}")]
    NotFound(String),

    #[error("Appointment cannot move from '{from}' to '{to}'")]
    InvalidStateTransition {
        from: AppointmentState,
        to: AppointmentState,
    },

    #[error("Malformed appointment record: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::Scheduling(e) => AppError::Scheduling(e.to_string()),
            AppointmentError::Doctor(e) => e.into(),
            AppointmentError::NotFound(id) => AppError::NotFound(format!("Appointment {} not found", id)),
            e @ AppointmentError::InvalidStateTransition { .. } => AppError::Conflict(e.to_string()),
            AppointmentError::Malformed(e) => AppError::Store(e.to_string()),
            AppointmentError::Store(e) => to_app_error(&e),
        }
    }
}
