use chrono::Weekday;

use crate::error::{Result, SchedulingError};
use crate::models::{AvailabilityWindow, MinuteOfDay, TimeSlotRecord, WeeklyAvailability};
use crate::services::{slot_label, time_codec};

/// Accepts three-letter and full English day names in any case.
pub fn parse_weekday(text: &str) -> Result<Weekday> {
    let day = match text.trim().to_ascii_lowercase().as_str() {
        "sun" | "sunday" => Weekday::Sun,
        "mon" | "monday" => Weekday::Mon,
        "tue" | "tuesday" => Weekday::Tue,
        "wed" | "wednesday" => Weekday::Wed,
        "thu" | "thursday" => Weekday::Thu,
        "fri" | "friday" => Weekday::Fri,
        "sat" | "saturday" => Weekday::Sat,
        _ => {
            return Err(SchedulingError::InvalidInput(format!(
                "unrecognised day of week '{}'",
                text
            )))
        }
    };
    Ok(day)
}

impl AvailabilityWindow {
    pub fn new(day: Weekday, start: MinuteOfDay, end: MinuteOfDay) -> Result<Self> {
        if start >= end {
            return Err(SchedulingError::InvalidInput(format!(
                "window start {} must be before end {}",
                start, end
            )));
        }
        Ok(Self { day, start, end })
    }

    /// Half-open: the closing minute itself is not bookable.
    pub fn contains(&self, minute: MinuteOfDay) -> bool {
        self.start <= minute && minute < self.end
    }

    pub fn label(&self) -> String {
        slot_label::format_label(self)
    }
}

impl WeeklyAvailability {
    /// Fails with `DuplicateDay` if two windows share a weekday.
    pub fn new<I>(windows: I) -> Result<Self>
    where
        I: IntoIterator<Item = AvailabilityWindow>,
    {
        let mut collected: Vec<AvailabilityWindow> = Vec::new();
        for window in windows {
            if window.start >= window.end {
                return Err(SchedulingError::InvalidInput(format!(
                    "window start {} must be before end {}",
                    window.start, window.end
                )));
            }
            if collected.iter().any(|existing| existing.day == window.day) {
                return Err(SchedulingError::DuplicateDay(window.day));
            }
            collected.push(window);
        }
        Ok(Self { windows: collected })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from the store's time slot rows. Incomplete rows are skipped;
    /// anything else that does not parse is an error.
    pub fn from_time_slots(records: &[TimeSlotRecord]) -> Result<Self> {
        let windows = records
            .iter()
            .filter(|record| record.is_complete())
            .map(|record| {
                AvailabilityWindow::new(
                    parse_weekday(&record.day)?,
                    time_codec::parse(&record.starting_time)?,
                    time_codec::parse(&record.ending_time)?,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(windows)
    }

    /// Window lookup by day name, e.g. `"mon"` or `"MONDAY"`.
    pub fn window_for(&self, day: &str) -> Result<&AvailabilityWindow> {
        let weekday = parse_weekday(day)?;
        self.window_for_day(weekday)
            .ok_or(SchedulingError::NoAvailabilityOnDay(weekday))
    }

    pub fn window_for_day(&self, day: Weekday) -> Option<&AvailabilityWindow> {
        self.windows.iter().find(|window| window.day == day)
    }

    pub fn windows(&self) -> &[AvailabilityWindow] {
        &self.windows
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Labels in the order the windows were supplied.
    pub fn slot_labels(&self) -> Vec<String> {
        self.windows.iter().map(AvailabilityWindow::label).collect()
    }

    pub fn to_time_slots(&self) -> Vec<TimeSlotRecord> {
        self.windows
            .iter()
            .map(|window| TimeSlotRecord {
                day: crate::models::day_name(&window.day).to_ascii_lowercase(),
                starting_time: time_codec::render_24h(window.start),
                ending_time: time_codec::render_24h(window.end),
            })
            .collect()
    }
}
