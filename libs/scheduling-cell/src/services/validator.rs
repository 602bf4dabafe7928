use chrono::Weekday;

use crate::error::{Result, SchedulingError};
use crate::models::{day_name, AvailabilityWindow, MinuteOfDay, ParsedSlot, PastDayPolicy};

pub fn check_containment(window: &AvailabilityWindow, requested: MinuteOfDay) -> Result<()> {
    if window.contains(requested) {
        Ok(())
    } else {
        Err(SchedulingError::OutsideWorkingHours {
            requested,
            start: window.start,
            end: window.end,
        })
    }
}

/// A slot label must end where the window ends.
pub fn check_window_end(window: &AvailabilityWindow, slot: &ParsedSlot) -> Result<()> {
    if slot.end != window.end {
        return Err(SchedulingError::InvalidInput(format!(
            "slot ends at {} but the doctor's {} window ends at {}",
            slot.end,
            day_name(&window.day),
            window.end
        )));
    }
    Ok(())
}

/// Returns the number of days until `target`, counting today as 0.
pub fn check_day(policy: PastDayPolicy, target: Weekday, today: Weekday) -> Result<u32> {
    let target_index = i64::from(target.num_days_from_sunday());
    let today_index = i64::from(today.num_days_from_sunday());
    let days_until = (target_index - today_index + 7) % 7;

    match policy {
        PastDayPolicy::RollingWeek => {
            // The modulo keeps this in 0..7, so no day is ever rejected here.
            if days_until < 0 {
                return Err(SchedulingError::PastDay(target));
            }
        }
        PastDayPolicy::RejectEarlierInWeek => {
            if target_index < today_index {
                return Err(SchedulingError::PastDay(target));
            }
        }
    }

    Ok(days_until as u32)
}
