use std::sync::Arc;
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::{Role, User};

pub struct TestConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub slot_service_minutes: u32,
    pub reject_past_booking_days: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "test-anon-key".to_string(),
            slot_service_minutes: 15,
            reject_past_booking_days: false,
        }
    }
}

impl TestConfig {
    /// Point the store at a mock server.
    pub fn with_store_url(url: &str) -> Self {
        Self {
            supabase_url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_anon_key: self.supabase_anon_key.clone(),
            slot_service_minutes: self.slot_service_minutes,
            reject_past_booking_days: self.reject_past_booking_days,
            ..AppConfig::default()
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl TestUser {
    pub fn new(name: &str, email: &str, role: Role) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role,
        }
    }

    pub fn patient(email: &str) -> Self {
        Self::new("Test Patient", email, Role::Patient)
    }

    pub fn doctor(email: &str) -> Self {
        Self::new("Dr. Test", email, Role::Doctor)
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            name: Some(self.name.clone()),
            email: Some(self.email.clone()),
            role: Some(self.role),
            photo: None,
            created_at: Some(Utc::now()),
        }
    }
}

pub struct MockStoreResponses;

impl MockStoreResponses {
    /// A `doctors` row with the given `(day, startingTime, endingTime)` slots.
    pub fn doctor_response(doctor_id: &str, slots: &[(&str, &str, &str)]) -> Value {
        let time_slots: Vec<Value> = slots
            .iter()
            .map(|(day, start, end)| json!({
                "day": day,
                "startingTime": start,
                "endingTime": end
            }))
            .collect();

        json!({
            "id": doctor_id,
            "name": "Dr. Test",
            "email": "doctor@example.com",
            "phone": "+880100000000",
            "photo": null,
            "specialization": "Cardiology",
            "ticket_price": 500.0,
            "time_slots": time_slots
        })
    }

    pub fn appointment_response(
        appointment_id: &str,
        patient_id: &str,
        doctor_id: &str,
        time_slot: &str,
        queue_number: u64,
        state: &str,
    ) -> Value {
        json!({
            "id": appointment_id,
            "user": {
                "id": patient_id,
                "name": "Test Patient",
                "email": "patient@example.com",
                "photo": null,
                "gender": "Unknown"
            },
            "doctor_id": doctor_id,
            "ticket_price": "500",
            "created_at": "2026-10-19T08:00:00Z",
            "state": state,
            "time_slot": time_slot,
            "is_paid": false,
            "queue_number": queue_number,
            "expected_time": "9:15 am",
            "doctor": {
                "id": doctor_id,
                "name": "Dr. Test",
                "photo": null,
                "phone": "+880100000000"
            }
        })
    }

    /// Rows as returned by a `select=id` count query.
    pub fn id_rows(count: usize) -> Value {
        let rows: Vec<Value> = (0..count)
            .map(|_| json!({ "id": Uuid::new_v4().to_string() }))
            .collect();
        Value::Array(rows)
    }

    pub fn error_response(message: &str, code: &str) -> Value {
        json!({
            "message": message,
            "code": code
        })
    }
}
