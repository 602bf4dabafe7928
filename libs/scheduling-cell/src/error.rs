use chrono::Weekday;
use thiserror::Error;

use crate::models::{day_name, MinuteOfDay};

/// Every variant is recoverable by re-prompting the patient; the
/// `Display` text is suitable for showing to them directly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    #[error("Invalid time format: {0}")]
    FormatError(String),

    #[error("The doctor is on leave on {}.", day_name(.0))]
    NoAvailabilityOnDay(Weekday),

    #[error("The selected time {requested} is outside the doctor's working hours ({start} - {end}).")]
    OutsideWorkingHours {
        requested: MinuteOfDay,
        start: MinuteOfDay,
        end: MinuteOfDay,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Availability lists {} more than once.", day_name(.0))]
    DuplicateDay(Weekday),

    #[error("Cannot book appointments in the past ({} has already passed this week).", day_name(.0))]
    PastDay(Weekday),
}

pub type Result<T> = std::result::Result<T, SchedulingError>;
