use std::env;
use tracing::warn;

const DEFAULT_SLOT_SERVICE_MINUTES: u32 = 15;
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    /// Fixed service time each queued patient is expected to take.
    pub slot_service_minutes: u32,
    /// Reject bookings for weekdays that already passed in the current
    /// Sunday-first week. Off by default, which keeps the rolling-week
    /// behaviour where every day is bookable.
    pub reject_past_booking_days: bool,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            supabase_url: env::var("SUPABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_URL not set, using empty value");
                    String::new()
                }),
            supabase_anon_key: env::var("SUPABASE_ANON_PUBLIC_KEY")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_ANON_PUBLIC_KEY not set, using empty value");
                    String::new()
                }),
            slot_service_minutes: parse_var("SLOT_SERVICE_MINUTES", DEFAULT_SLOT_SERVICE_MINUTES),
            reject_past_booking_days: parse_var("REJECT_PAST_BOOKING_DAYS", false),
            port: parse_var("PORT", DEFAULT_PORT),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty()
            && !self.supabase_anon_key.is_empty()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
            slot_service_minutes: DEFAULT_SLOT_SERVICE_MINUTES,
            reject_past_booking_days: false,
            port: DEFAULT_PORT,
        }
    }
}

fn parse_var<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value '{}', using default {}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}
