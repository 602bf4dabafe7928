use crate::error::{Result, SchedulingError};
use crate::models::{EtaWarning, MinuteOfDay, MINUTES_PER_DAY};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueProjection {
    pub queue_number: u64,
    pub expected_start: MinuteOfDay,
    pub warnings: Vec<EtaWarning>,
}

/// `queue_number = existing + 1`, expected start is
/// `(start + queue_number * service_minutes) mod 1440`.
///
/// The result is not checked against the window; running past
/// `window_end` or midnight only adds a warning.
pub fn project(
    start: MinuteOfDay,
    window_end: MinuteOfDay,
    existing_bookings: i64,
    service_minutes: u32,
) -> Result<QueueProjection> {
    let existing = u64::try_from(existing_bookings).map_err(|_| {
        SchedulingError::InvalidInput(format!(
            "booking count must not be negative, got {}",
            existing_bookings
        ))
    })?;

    let queue_number = existing.saturating_add(1);
    let unwrapped = queue_number
        .saturating_mul(u64::from(service_minutes))
        .saturating_add(u64::from(start.get()));

    let mut warnings = Vec::new();
    if unwrapped >= u64::from(window_end.get()) {
        warnings.push(EtaWarning::PastWindowEnd);
    }
    if unwrapped >= u64::from(MINUTES_PER_DAY) {
        warnings.push(EtaWarning::DayRollover);
    }

    let wrapped = (unwrapped % u64::from(MINUTES_PER_DAY)) as u16;

    Ok(QueueProjection {
        queue_number,
        expected_start: MinuteOfDay::new(wrapped)?,
        warnings,
    })
}
