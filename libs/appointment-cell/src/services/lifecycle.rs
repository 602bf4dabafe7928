use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{Appointment, AppointmentError, AppointmentState};

pub struct AppointmentLifecycleService {
    supabase: SupabaseClient,
}

impl AppointmentLifecycleService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub fn validate_state_transition(
        &self,
        current: AppointmentState,
        next: AppointmentState,
    ) -> Result<(), AppointmentError> {
        if !current.can_transition_to(&next) {
            warn!("Invalid state transition attempted: {} -> {}", current, next);
            return Err(AppointmentError::InvalidStateTransition { from: current, to: next });
        }
        Ok(())
    }

    pub async fn get_appointment(
        &self,
        appointment_id: &str,
        auth_token: &str,
    ) -> Result<Appointment, AppointmentError> {
        let path = format!("/rest/v1/appointments?id=eq.{}", urlencoding::encode(appointment_id));
        let rows = self.fetch(&path, auth_token).await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| AppointmentError::NotFound(appointment_id.to_string()))
    }

    /// Unconfirmed bookings a patient still has coming up.
    pub async fn get_patient_appointments(
        &self,
        patient_id: &str,
        auth_token: &str,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let path = format!(
            "/rest/v1/appointments?user->>id=eq.{}&state=eq.{}&order=created_at.desc",
            urlencoding::encode(patient_id),
            urlencoding::encode(AppointmentState::Unconfirmed.as_str())
        );
        self.fetch(&path, auth_token).await
    }

    /// A doctor's unconfirmed bookings in queue order.
    pub async fn get_doctor_appointments(
        &self,
        doctor_id: &str,
        auth_token: &str,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let path = format!(
            "/rest/v1/appointments?doctor_id=eq.{}&state=eq.{}&order=time_slot.asc,queue_number.asc",
            urlencoding::encode(doctor_id),
            urlencoding::encode(AppointmentState::Unconfirmed.as_str())
        );
        self.fetch(&path, auth_token).await
    }

    pub async fn update_state(
        &self,
        appointment_id: &str,
        next: AppointmentState,
        auth_token: &str,
    ) -> Result<Appointment, AppointmentError> {
        let current = self.get_appointment(appointment_id, auth_token).await?;
        self.validate_state_transition(current.state, next)?;

        let path = format!("/rest/v1/appointments?id=eq.{}", urlencoding::encode(appointment_id));
        let result: Vec<Value> = self.supabase.request_with_headers(
            Method::PATCH,
            &path,
            Some(auth_token),
            Some(json!({ "state": next })),
            Some(SupabaseClient::return_representation()),
        ).await?;

        let updated: Appointment = match result.into_iter().next() {
            Some(row) => serde_json::from_value(row)?,
            None => return Err(AppointmentError::NotFound(appointment_id.to_string())),
        };

        info!("Appointment {} moved {} -> {}", appointment_id, current.state, updated.state);
        Ok(updated)
    }

    async fn fetch(&self, path: &str, auth_token: &str) -> Result<Vec<Appointment>, AppointmentError> {
        debug!("Fetching appointments: {}", path);

        let rows: Vec<Value> = self.supabase.request(
            Method::GET,
            path,
            Some(auth_token),
            None,
        ).await?;

        let appointments = rows.into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<Appointment>, _>>()?;

        Ok(appointments)
    }
}
