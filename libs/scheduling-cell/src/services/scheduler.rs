use chrono::{Datelike, Duration, Local, NaiveDate};

use shared_config::AppConfig;

use crate::error::Result;
use crate::models::{ParsedSlot, QueueAssignment, SchedulerConfig, SlotRequest, WeeklyAvailability};
use crate::SchedulingError;
use crate::services::{queue, slot_label, validator};

/// Validates a requested slot and assigns its queue position.
///
/// The scheduler holds no state between calls and performs no locking.
/// Two callers that read the same booking count from the store will be
/// handed the same queue number; callers needing unique numbers must
/// serialise bookings per (provider, slot) or use an atomic counter in
/// the store.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlotScheduler {
    config: SchedulerConfig,
}

impl SlotScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    pub fn from_app_config(config: &AppConfig) -> Self {
        Self::new(SchedulerConfig::from_app_config(config))
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Runs against the local calendar date.
    pub fn validate_and_assign(
        &self,
        availability: &WeeklyAvailability,
        request: &SlotRequest,
        existing_booking_count: i64,
    ) -> Result<QueueAssignment> {
        let today = Local::now().date_naive();
        self.validate_and_assign_on(availability, request, existing_booking_count, today)
    }

    /// Every check short of queue projection, against the local date.
    /// Callers use the returned slot's `label()` to count existing bookings.
    pub fn validate(
        &self,
        availability: &WeeklyAvailability,
        request: &SlotRequest,
    ) -> Result<ParsedSlot> {
        self.validate_on(availability, request, Local::now().date_naive())
            .map(|(slot, _)| slot)
    }

    /// Parse, look up the day's window, check containment, the label's end
    /// and the day, then project queue number and expected time. Stops at
    /// the first failure.
    pub fn validate_and_assign_on(
        &self,
        availability: &WeeklyAvailability,
        request: &SlotRequest,
        existing_booking_count: i64,
        today: NaiveDate,
    ) -> Result<QueueAssignment> {
        let (slot, days_until) = self.validate_on(availability, request, today)?;

        // slot.end equals the window's end once validated.
        let projection = queue::project(
            slot.start,
            slot.end,
            existing_booking_count,
            self.config.service_minutes,
        )?;

        Ok(QueueAssignment {
            day: slot.day,
            time_slot: slot.label(),
            queue_number: projection.queue_number,
            expected_start: projection.expected_start,
            days_until,
            visit_date: today + Duration::days(i64::from(days_until)),
            warnings: projection.warnings,
        })
    }

    fn validate_on(
        &self,
        availability: &WeeklyAvailability,
        request: &SlotRequest,
        today: NaiveDate,
    ) -> Result<(ParsedSlot, u32)> {
        let slot = slot_label::parse_request(request)?;

        let window = availability
            .window_for_day(slot.day)
            .ok_or(SchedulingError::NoAvailabilityOnDay(slot.day))?;

        validator::check_containment(window, slot.start)?;
        validator::check_window_end(window, &slot)?;

        let days_until = validator::check_day(
            self.config.past_day_policy,
            slot.day,
            today.weekday(),
        )?;

        Ok((slot, days_until))
    }
}
