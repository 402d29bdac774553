use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::debug;

use shared_utils::rules::parse_time_of_day;

use crate::models::{DayName, DaySchedule, Exception, ExceptionStatus, SlotStatus, TimeSlot};

/// Upcoming exceptions shown inline on a slot card.
pub const INLINE_EXCEPTION_LIMIT: usize = 2;

/// `"09:00"` → `"9:00 AM"`. Unparseable input is returned as-is.
pub fn format_time_display(raw: &str) -> String {
    match parse_time_of_day(raw) {
        Some(time) => time.format("%-I:%M %p").to_string(),
        None => raw.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionView {
    pub expected_date_of_exception: Option<String>,
    pub date: Option<NaiveDate>,
    pub status: ExceptionStatus,
    pub label: String,
}

impl ExceptionView {
    fn from_exception(exception: &Exception) -> Self {
        let date = exception.date();
        let label = match date {
            Some(d) => format!("{} · {}", d.format("%a, %b %-d"), exception.status.label()),
            None => exception.status.label().to_string(),
        };
        Self {
            expected_date_of_exception: (!exception.expected_date_of_exception.is_empty())
                .then(|| exception.expected_date_of_exception.clone()),
            date,
            status: exception.status.clone(),
            label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotView {
    pub start_time: String,
    pub end_time: String,
    pub start_formatted: String,
    pub end_formatted: String,
    pub max_patients_in_the_slot: i32,
    pub is_active: bool,
    pub status: SlotStatus,
    pub recurring: bool,
    pub exceptions: Vec<ExceptionView>,
    pub upcoming_exceptions: Vec<ExceptionView>,
    pub more_count: usize,
    pub has_exceptions: bool,
}

impl SlotView {
    fn build(slot: &TimeSlot, today: NaiveDate) -> Self {
        let exceptions: Vec<ExceptionView> =
            slot.exceptions.iter().map(ExceptionView::from_exception).collect();

        let mut upcoming: Vec<ExceptionView> = exceptions
            .iter()
            .filter(|e| e.date.is_some_and(|d| d >= today))
            .cloned()
            .collect();
        upcoming.sort_by_key(|e| e.date);
        let more_count = upcoming.len().saturating_sub(INLINE_EXCEPTION_LIMIT);
        upcoming.truncate(INLINE_EXCEPTION_LIMIT);

        Self {
            start_time: slot.start_time.clone(),
            end_time: slot.end_time.clone(),
            start_formatted: format_time_display(&slot.start_time),
            end_formatted: format_time_display(&slot.end_time),
            max_patients_in_the_slot: slot.max_patients_in_the_slot,
            is_active: slot.is_active,
            status: slot.status.clone(),
            recurring: slot.recurring,
            has_exceptions: !exceptions.is_empty(),
            exceptions,
            upcoming_exceptions: upcoming,
            more_count,
        }
    }

    /// Badge text for upcoming exceptions beyond the inline ones.
    pub fn more_label(&self) -> Option<String> {
        (self.more_count > 0).then(|| format!("+{} more", self.more_count))
    }

    pub fn time_range(&self) -> String {
        format!("{} - {}", self.start_formatted, self.end_formatted)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayView {
    pub day: DayName,
    pub slots: Vec<SlotView>,
}

/// Read-only Monday-to-Sunday grid of a doctor's schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyScheduleView {
    pub days: Vec<DayView>,
    pub has_schedule: bool,
}

impl WeeklyScheduleView {
    pub fn build(schedule: &[DaySchedule], today: NaiveDate) -> Self {
        let days: Vec<DayView> = DayName::WEEK
            .iter()
            .map(|day| DayView {
                day: *day,
                slots: schedule
                    .iter()
                    .filter(|entry| entry.day() == Some(*day))
                    .flat_map(|entry| entry.slots.iter())
                    .map(|slot| SlotView::build(slot, today))
                    .collect(),
            })
            .collect();

        let has_schedule = days.iter().any(|d| !d.slots.is_empty());
        debug!(
            "Built weekly view from {} day entries (has_schedule = {})",
            schedule.len(),
            has_schedule
        );

        Self { days, has_schedule }
    }

    pub fn build_for_today(schedule: &[DaySchedule]) -> Self {
        Self::build(schedule, Local::now().date_naive())
    }

    pub fn day(&self, day: DayName) -> Option<&DayView> {
        self.days.iter().find(|d| d.day == day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_twelve_hour_times() {
        assert_eq!(format_time_display("09:00"), "9:00 AM");
        assert_eq!(format_time_display("13:30"), "1:30 PM");
        assert_eq!(format_time_display("00:15"), "12:15 AM");
        assert_eq!(format_time_display("12:00:00"), "12:00 PM");
    }

    #[test]
    fn keeps_unparseable_times_verbatim() {
        assert_eq!(format_time_display("9ish"), "9ish");
        assert_eq!(format_time_display(""), "");
    }

    #[test]
    fn exception_label_includes_date_when_parseable() {
        let view = ExceptionView::from_exception(&Exception::new("2025-03-14", ExceptionStatus::Holiday));
        assert_eq!(view.label, "Fri, Mar 14 · Holiday");

        let view = ExceptionView::from_exception(&Exception::new("", ExceptionStatus::Leave));
        assert_eq!(view.label, "Leave");
        assert_eq!(view.expected_date_of_exception, None);
    }
}
