use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info, warn};
use uuid::Uuid;

use doctor_cell::services::DoctorService;
use scheduling_cell::{QueueAssignment, SlotRequest, SlotScheduler, WeeklyAvailability};
use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{
    Appointment, AppointmentError, AppointmentState, BookAppointmentRequest,
    BookingPreview, DoctorSummary, PreviewBookingRequest, DEFAULT_TICKET_PRICE,
};

pub struct AppointmentBookingService {
    supabase: SupabaseClient,
    doctors: DoctorService,
    scheduler: SlotScheduler,
}

impl AppointmentBookingService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            doctors: DoctorService::new(config),
            scheduler: SlotScheduler::from_app_config(config),
        }
    }

    /// Number of appointments already stored for this doctor under this
    /// slot label, whatever their state. Pass the standard label spelling.
    pub async fn count_bookings_for_slot(
        &self,
        doctor_id: &str,
        time_slot: &str,
        auth_token: &str,
    ) -> Result<i64, AppointmentError> {
        let path = format!(
            "/rest/v1/appointments?doctor_id=eq.{}&time_slot=eq.{}&select=id",
            urlencoding::encode(doctor_id),
            urlencoding::encode(time_slot)
        );

        let rows: Vec<Value> = self.supabase.request(
            Method::GET,
            &path,
            Some(auth_token),
            None,
        ).await?;

        debug!("Doctor {} has {} bookings for '{}'", doctor_id, rows.len(), time_slot);
        Ok(rows.len() as i64)
    }

    /// Validate a slot and report the queue number and expected time the
    /// patient would get, without storing anything.
    pub async fn preview_booking(
        &self,
        request: &PreviewBookingRequest,
        auth_token: &str,
    ) -> Result<BookingPreview, AppointmentError> {
        let availability = self.doctors
            .get_availability(&request.doctor_id, Some(auth_token))
            .await?;

        let assignment = self.assign(
            &availability,
            &request.doctor_id,
            &request.time_slot,
            request.day_of_week.as_deref(),
            auth_token,
        ).await?;

        Ok(BookingPreview::from_assignment(&request.doctor_id, &assignment))
    }

    /// Validate, assign a queue position and store the appointment.
    ///
    /// The count and the insert are two separate store calls with nothing
    /// held in between, so concurrent bookings for the same slot can be
    /// given the same queue number.
    pub async fn book_appointment(
        &self,
        request: BookAppointmentRequest,
        auth_token: &str,
    ) -> Result<Appointment, AppointmentError> {
        let doctor = self.doctors.get_doctor(&request.doctor_id, Some(auth_token)).await?;
        let availability = doctor.availability()?;

        let assignment = self.assign(
            &availability,
            &request.doctor_id,
            &request.time_slot,
            request.day_of_week.as_deref(),
            auth_token,
        ).await?;

        let appointment = Appointment {
            id: Uuid::new_v4().to_string(),
            user: request.patient.with_defaults(),
            doctor_id: request.doctor_id.clone(),
            ticket_price: doctor
                .ticket_price
                .map(|price| price.to_string())
                .unwrap_or_else(|| DEFAULT_TICKET_PRICE.to_string()),
            created_at: Utc::now(),
            state: AppointmentState::Unconfirmed,
            time_slot: assignment.time_slot.clone(),
            is_paid: false,
            queue_number: assignment.queue_number,
            expected_time: assignment.expected_time(),
            doctor: DoctorSummary::from(&doctor),
        };

        let created = self.insert_appointment(&appointment, auth_token).await?;

        info!(
            "Booked appointment {} with doctor {} for '{}' (queue #{}, expected {})",
            created.id, created.doctor_id, created.time_slot, created.queue_number, created.expected_time
        );

        Ok(created)
    }

    async fn assign(
        &self,
        availability: &WeeklyAvailability,
        doctor_id: &str,
        time_slot: &str,
        day_of_week: Option<&str>,
        auth_token: &str,
    ) -> Result<QueueAssignment, AppointmentError> {
        let slot_request = SlotRequest::new(day_of_week.unwrap_or_default(), time_slot);

        // Rejected slots never reach the store.
        let slot = self.scheduler
            .validate(availability, &slot_request)
            .inspect_err(|e| debug!("Slot '{}' rejected for doctor {}: {}", time_slot, doctor_id, e))?;

        let label = slot.label();
        let existing = self.count_bookings_for_slot(doctor_id, &label, auth_token).await?;

        let assignment = self.scheduler.validate_and_assign(
            availability,
            &SlotRequest::new(day_of_week.unwrap_or_default(), &label),
            existing,
        )?;

        if assignment.has_warnings() {
            warn!(
                "Queue #{} for doctor {} '{}' is expected at {} ({:?})",
                assignment.queue_number, doctor_id, assignment.time_slot, assignment.expected_time(), assignment.warnings
            );
        }

        Ok(assignment)
    }

    async fn insert_appointment(
        &self,
        appointment: &Appointment,
        auth_token: &str,
    ) -> Result<Appointment, AppointmentError> {
        let body = json!(appointment);

        let result: Vec<Value> = self.supabase.request_with_headers(
            Method::POST,
            "/rest/v1/appointments",
            Some(auth_token),
            Some(body),
            Some(SupabaseClient::return_representation()),
        ).await?;

        match result.into_iter().next() {
            Some(row) => Ok(serde_json::from_value(row)?),
            None => Err(anyhow::anyhow!("Store returned no row for appointment {}", appointment.id).into()),
        }
    }
}
