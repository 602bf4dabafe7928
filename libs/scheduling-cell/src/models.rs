use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use shared_config::AppConfig;

use crate::error::{Result, SchedulingError};
use crate::services::time_codec;

pub const MINUTES_PER_DAY: u16 = 24 * 60;
pub const DEFAULT_SERVICE_MINUTES: u32 = 15;

// ==============================================================================
// TIME OF DAY
// ==============================================================================

/// Minute offset from midnight, always in `[0, 1440)`.
///
/// Displays as a 12-hour clock string (`"9:05 am"`) and parses from either
/// 12-hour (`"9:05 AM"`) or 24-hour (`"09:05"`, `"09:05:00"`) text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct MinuteOfDay(u16);

impl MinuteOfDay {
    pub fn new(minute: u16) -> Result<Self> {
        if minute >= MINUTES_PER_DAY {
            return Err(SchedulingError::InvalidInput(format!(
                "minute of day {} is outside [0, {})",
                minute, MINUTES_PER_DAY
            )));
        }
        Ok(Self(minute))
    }

    pub fn get(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }

    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(u32::from(self.hour()), u32::from(self.minute()), 0)
            .unwrap_or(NaiveTime::MIN)
    }
}

impl TryFrom<u16> for MinuteOfDay {
    type Error = SchedulingError;

    fn try_from(value: u16) -> Result<Self> {
        Self::new(value)
    }
}

impl From<MinuteOfDay> for u16 {
    fn from(value: MinuteOfDay) -> Self {
        value.0
    }
}

impl fmt::Display for MinuteOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&time_codec::render(*self))
    }
}

impl FromStr for MinuteOfDay {
    type Err = SchedulingError;

    fn from_str(s: &str) -> Result<Self> {
        time_codec::parse(s)
    }
}

pub fn day_name(day: &Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

// ==============================================================================
// AVAILABILITY
// ==============================================================================

/// One recurring weekly opening: `[start, end)` on `day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    pub day: Weekday,
    pub start: MinuteOfDay,
    pub end: MinuteOfDay,
}

/// A provider's weekly schedule, at most one window per day, kept in the
/// order it was supplied. Build it with `WeeklyAvailability::new` or
/// `WeeklyAvailability::from_time_slots`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WeeklyAvailability {
    pub(crate) windows: Vec<AvailabilityWindow>,
}

/// A time slot as the data store keeps it on the doctor record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotRecord {
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub starting_time: String,
    #[serde(default)]
    pub ending_time: String,
}

impl TimeSlotRecord {
    pub fn new(day: &str, starting_time: &str, ending_time: &str) -> Self {
        Self {
            day: day.to_string(),
            starting_time: starting_time.to_string(),
            ending_time: ending_time.to_string(),
        }
    }

    /// Profile editors leave half-filled rows behind; those never become
    /// bookable windows.
    pub fn is_complete(&self) -> bool {
        !self.day.trim().is_empty()
            && !self.starting_time.trim().is_empty()
            && !self.ending_time.trim().is_empty()
    }
}

// ==============================================================================
// REQUESTS AND RESULTS
// ==============================================================================

/// What the patient picked: a day and the label of one advertised window,
/// formatted `"<Day>: <start> - <end>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRequest {
    #[serde(default)]
    pub day_of_week: String,
    pub window_label: String,
}

impl SlotRequest {
    pub fn new(day_of_week: &str, window_label: &str) -> Self {
        Self {
            day_of_week: day_of_week.to_string(),
            window_label: window_label.to_string(),
        }
    }

    /// Request whose day is taken from the label itself.
    pub fn from_label(window_label: &str) -> Self {
        Self::new("", window_label)
    }
}

/// A slot label broken into its parts. `start` is the requested start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedSlot {
    pub day: Weekday,
    pub start: MinuteOfDay,
    pub end: MinuteOfDay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EtaWarning {
    /// The expected time is at or after the window's closing time.
    PastWindowEnd,
    /// The expected time reached midnight and wrapped to the next day's clock.
    DayRollover,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueAssignment {
    pub day: Weekday,
    /// The chosen window's label in its standard spelling, the key
    /// bookings are counted and stored under.
    pub time_slot: String,
    pub queue_number: u64,
    pub expected_start: MinuteOfDay,
    /// Days from today to the next occurrence of `day`, 0 for today.
    pub days_until: u32,
    pub visit_date: NaiveDate,
    pub warnings: Vec<EtaWarning>,
}

impl QueueAssignment {
    pub fn expected_time(&self) -> String {
        self.expected_start.to_string()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

// ==============================================================================
// CONFIGURATION
// ==============================================================================

/// How the scheduler treats a requested weekday relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PastDayPolicy {
    /// Rolling seven-day week: the offset `(target - today + 7) % 7` can
    /// never be negative, so every weekday is accepted as "upcoming".
    #[default]
    RollingWeek,
    /// Sunday-first calendar week: a weekday earlier than today is
    /// rejected with `PastDay`.
    RejectEarlierInWeek,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    pub service_minutes: u32,
    pub past_day_policy: PastDayPolicy,
}

impl SchedulerConfig {
    pub fn new(service_minutes: u32, past_day_policy: PastDayPolicy) -> Result<Self> {
        if service_minutes == 0 {
            return Err(SchedulingError::InvalidInput(
                "service minutes must be positive".to_string(),
            ));
        }
        Ok(Self { service_minutes, past_day_policy })
    }

    pub fn from_app_config(config: &AppConfig) -> Self {
        let past_day_policy = if config.reject_past_booking_days {
            PastDayPolicy::RejectEarlierInWeek
        } else {
            PastDayPolicy::RollingWeek
        };

        Self {
            service_minutes: if config.slot_service_minutes == 0 {
                DEFAULT_SERVICE_MINUTES
            } else {
                config.slot_service_minutes
            },
            past_day_policy,
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            service_minutes: DEFAULT_SERVICE_MINUTES,
            past_day_policy: PastDayPolicy::RollingWeek,
        }
    }
}
