use reqwest::Method;
use serde_json::Value;
use tracing::{debug, warn};

use scheduling_cell::WeeklyAvailability;
use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{Doctor, DoctorError, DoctorSlotsResponse};

pub struct DoctorService {
    supabase: SupabaseClient,
}

impl DoctorService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// Fetch one doctor. Without a token the anon key is used, which is
    /// enough for the public directory.
    pub async fn get_doctor(
        &self,
        doctor_id: &str,
        auth_token: Option<&str>,
    ) -> Result<Doctor, DoctorError> {
        debug!("Fetching doctor profile: {}", doctor_id);

        let path = format!(
            "/rest/v1/doctors?id=eq.{}&select=*",
            urlencoding::encode(doctor_id)
        );
        let result: Vec<Value> = self.supabase.request(
            Method::GET,
            &path,
            auth_token,
            None,
        ).await?;

        let row = result
            .into_iter()
            .next()
            .ok_or_else(|| DoctorError::NotFound(doctor_id.to_string()))?;

        Ok(serde_json::from_value(row)?)
    }

    pub async fn get_availability(
        &self,
        doctor_id: &str,
        auth_token: Option<&str>,
    ) -> Result<WeeklyAvailability, DoctorError> {
        let doctor = self.get_doctor(doctor_id, auth_token).await?;
        doctor.availability().inspect_err(|e| {
            warn!("Doctor {} has unusable time slots: {}", doctor_id, e);
        })
    }

    /// Slot labels for the booking form, one per weekly window.
    pub async fn get_slots(
        &self,
        doctor_id: &str,
        auth_token: Option<&str>,
    ) -> Result<DoctorSlotsResponse, DoctorError> {
        let doctor = self.get_doctor(doctor_id, auth_token).await?;
        let availability = doctor.availability()?;

        debug!("Doctor {} has {} bookable windows", doctor_id, availability.len());

        Ok(DoctorSlotsResponse {
            doctor_id: doctor.id.clone(),
            doctor_name: doctor.display_name().to_string(),
            ticket_price: doctor.ticket_price,
            slots: availability.slot_labels(),
        })
    }
}
