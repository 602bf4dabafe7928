//! Conversion between clock strings and `MinuteOfDay`.
//!
//! Accepted input:
//! - 12-hour `"H:MM AM"` / `"H:MM pm"`, meridiem in any case, hour 1-12
//!   with or without zero padding.
//! - 24-hour `"HH:MM"` or `"HH:MM:SS"` (seconds are dropped), hour 0-23.
//!
//! Output is always `"H:MM am|pm"`: unpadded hour, padded minute,
//! lowercase meridiem, midnight as `12:00 am`.

use crate::error::{Result, SchedulingError};
use crate::models::MinuteOfDay;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

pub fn parse(input: &str) -> Result<MinuteOfDay> {
    let trimmed = input.trim();
    let (clock, meridiem) = split_meridiem(trimmed);

    let parts: Vec<&str> = clock.split(':').map(str::trim).collect();
    let (hour_text, minute_text) = match (meridiem, parts.as_slice()) {
        (_, [h, m]) => (*h, *m),
        (None, [h, m, s]) => {
            let seconds = parse_digits(s, input)?;
            if seconds > 59 {
                return Err(format_error(input, "seconds must be between 0 and 59"));
            }
            (*h, *m)
        }
        _ => return Err(format_error(input, "expected H:MM")),
    };

    let hour = parse_digits(hour_text, input)?;
    let minute = parse_digits(minute_text, input)?;
    if minute > 59 {
        return Err(format_error(input, "minutes must be between 0 and 59"));
    }

    let hour = match meridiem {
        Some(meridiem) => {
            if !(1..=12).contains(&hour) {
                return Err(format_error(input, "12-hour clock hour must be between 1 and 12"));
            }
            to_24_hour(hour, meridiem)
        }
        None => {
            if hour > 23 {
                return Err(format_error(input, "hour must be between 0 and 23"));
            }
            hour
        }
    };

    MinuteOfDay::new(hour * 60 + minute)
}

pub fn render(time: MinuteOfDay) -> String {
    time.to_naive_time().format("%-I:%M %P").to_string()
}

/// `"HH:MM"`, the form the data store keeps on doctor time slots.
pub fn render_24h(time: MinuteOfDay) -> String {
    time.to_naive_time().format("%H:%M").to_string()
}

fn to_24_hour(hour: u16, meridiem: Meridiem) -> u16 {
    match (meridiem, hour) {
        (Meridiem::Am, 12) => 0,
        (Meridiem::Pm, 12) => 12,
        (Meridiem::Pm, h) => h + 12,
        (Meridiem::Am, h) => h,
    }
}

fn split_meridiem(text: &str) -> (&str, Option<Meridiem>) {
    if text.len() < 2 || !text.is_char_boundary(text.len() - 2) {
        return (text, None);
    }

    let (clock, suffix) = text.split_at(text.len() - 2);
    let meridiem = if suffix.eq_ignore_ascii_case("am") {
        Meridiem::Am
    } else if suffix.eq_ignore_ascii_case("pm") {
        Meridiem::Pm
    } else {
        return (text, None);
    };

    (clock.trim_end(), Some(meridiem))
}

fn parse_digits(text: &str, input: &str) -> Result<u16> {
    if text.is_empty() || text.len() > 2 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format_error(input, "expected one or two digits"));
    }
    text.parse::<u16>()
        .map_err(|_| format_error(input, "expected one or two digits"))
}

fn format_error(input: &str, reason: &str) -> SchedulingError {
    SchedulingError::FormatError(format!("'{}': {}", input, reason))
}
