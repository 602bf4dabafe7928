//! Slot labels of the form `"Monday: 9:00 am - 12:00 pm"`.
//!
//! The label is what patients pick from and what the data store keeps on
//! each appointment, so existing bookings are counted by exact label match.

use chrono::Weekday;

use crate::error::{Result, SchedulingError};
use crate::models::{day_name, AvailabilityWindow, MinuteOfDay, ParsedSlot, SlotRequest};
use crate::services::{availability::parse_weekday, time_codec};

pub fn format_label(window: &AvailabilityWindow) -> String {
    format_parts(window.day, window.start, window.end)
}

impl ParsedSlot {
    /// Standard spelling, so `"monday: 09:00 AM - 12:00 PM"` and
    /// `"Monday: 9:00 am - 12:00 pm"` name the same slot.
    pub fn label(&self) -> String {
        format_parts(self.day, self.start, self.end)
    }
}

fn format_parts(day: Weekday, start: MinuteOfDay, end: MinuteOfDay) -> String {
    format!(
        "{}: {} - {}",
        day_name(&day),
        time_codec::render(start),
        time_codec::render(end)
    )
}

pub fn parse_label(label: &str) -> Result<ParsedSlot> {
    let (day_text, range) = label
        .split_once(": ")
        .ok_or_else(|| invalid(label, "expected '<Day>: <start> - <end>'"))?;

    let day = parse_weekday(day_text)?;

    let (start_text, end_text) = range
        .split_once('-')
        .ok_or_else(|| invalid(label, "time range must contain '-'"))?;

    Ok(ParsedSlot {
        day,
        start: time_codec::parse(start_text)?,
        end: time_codec::parse(end_text)?,
    })
}

/// Parse the request's label and check that its day agrees with the
/// request's own day field. A blank day field defers to the label.
pub fn parse_request(request: &SlotRequest) -> Result<ParsedSlot> {
    let slot = parse_label(&request.window_label)?;

    if !request.day_of_week.trim().is_empty() {
        let requested_day: Weekday = parse_weekday(&request.day_of_week)?;
        if requested_day != slot.day {
            return Err(SchedulingError::InvalidInput(format!(
                "requested day {} does not match slot label '{}'",
                day_name(&requested_day),
                request.window_label
            )));
        }
    }

    Ok(slot)
}

fn invalid(label: &str, reason: &str) -> SchedulingError {
    SchedulingError::InvalidInput(format!("malformed slot label '{}': {}", label, reason))
}
