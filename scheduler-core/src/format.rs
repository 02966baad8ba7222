//! Display formatting and form-input parsing for zoned timestamps

use chrono::{DateTime, Days, LocalResult, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

use crate::error::{Result, SchedulerError};

/// Full English month name, e.g. "March"
pub fn month_name<Z: TimeZone>(at: &DateTime<Z>) -> String
where
    Z::Offset: std::fmt::Display,
{
    at.format("%B").to_string()
}

/// Relative display used in tables and reports:
///
/// - `Today - 9:05 AM` for times later today (relative to `now`)
/// - `Thursday - 9:05 AM` up to six days ahead
/// - `04/07/24 - 9:05 AM` otherwise
pub fn to_display(at: &DateTime<Tz>, now: &DateTime<Tz>) -> String {
    let today = now.date_naive();
    let date = at.date_naive();

    if date == today {
        return at.format("Today - %-I:%M %p").to_string();
    }
    let week_end = today.checked_add_days(Days::new(6)).unwrap_or(today);
    if date > today && date <= week_end {
        return at.format("%A - %-I:%M %p").to_string();
    }
    at.format("%d/%m/%y - %-I:%M %p").to_string()
}

/// Timestamp written to the login activity log, e.g. `03/04/2024 at 09:05 AM EST`
pub fn attempt_display(at: &DateTime<Tz>) -> String {
    at.format("%m/%d/%Y at %I:%M %p %Z").to_string()
}

/// 12-hour form value, e.g. `9:05 AM`
pub fn clock_display(at: &DateTime<Tz>) -> String {
    at.format("%-I:%M %p").to_string()
}

/// Parse a form date (`YYYY-MM-DD`) and 12-hour time (`h:mm AM`) in `zone`.
///
/// Local times that fall into a DST gap, or are ambiguous in a DST fold, are
/// rejected instead of guessed.
pub fn parse_local(date: &str, time: &str, zone: Tz) -> Result<DateTime<Tz>> {
    let day = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| SchedulerError::invalid_input("date", format!("'{}': {}", date, e)))?;
    let clock = parse_clock(time)?;

    match zone.from_local_datetime(&day.and_time(clock)) {
        LocalResult::Single(at) => Ok(at),
        LocalResult::Ambiguous(_, _) => Err(SchedulerError::invalid_input(
            "time",
            format!("{} {} is ambiguous in {} (daylight saving change)", date, time, zone),
        )),
        LocalResult::None => Err(SchedulerError::invalid_input(
            "time",
            format!("{} {} does not exist in {} (daylight saving change)", date, time, zone),
        )),
    }
}

fn parse_clock(time: &str) -> Result<NaiveTime> {
    let normalized = time.trim().to_uppercase();
    NaiveTime::parse_from_str(&normalized, "%I:%M %p")
        .or_else(|_| NaiveTime::parse_from_str(&normalized, "%I:%M%p"))
        .map_err(|_| {
            SchedulerError::invalid_input("time", format!("'{}' (expected e.g. 9:30 AM)", time))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::New_York;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Tz> {
        New_York.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn display_today_week_and_beyond() {
        // 2024-03-04 is a Monday
        let now = at(2024, 3, 4, 8, 0);

        assert_eq!(to_display(&at(2024, 3, 4, 14, 30), &now), "Today - 2:30 PM");
        assert_eq!(to_display(&at(2024, 3, 7, 9, 5), &now), "Thursday - 9:05 AM");
        assert_eq!(to_display(&at(2024, 3, 20, 9, 5), &now), "20/03/24 - 9:05 AM");
        assert_eq!(to_display(&at(2024, 3, 1, 9, 5), &now), "01/03/24 - 9:05 AM");
    }

    #[test]
    fn month_names() {
        assert_eq!(month_name(&at(2024, 11, 4, 8, 0)), "November");
    }

    #[test]
    fn attempt_line_timestamp() {
        assert_eq!(attempt_display(&at(2024, 3, 4, 9, 5)), "03/04/2024 at 09:05 AM EST");
    }

    #[test]
    fn parse_form_values() {
        let parsed = parse_local("2024-03-04", "1:15 pm", New_York).unwrap();
        assert_eq!(parsed, at(2024, 3, 4, 13, 15));

        let parsed = parse_local("2024-03-04", "12:00AM", New_York).unwrap();
        assert_eq!(parsed, at(2024, 3, 4, 0, 0));
    }

    #[test]
    fn rejects_dst_gap_and_garbage() {
        // 2:30 AM on 2024-03-10 never happens in New York
        assert!(parse_local("2024-03-10", "2:30 AM", New_York).is_err());
        assert!(parse_local("2024-13-01", "9:00 AM", New_York).is_err());
        assert!(parse_local("2024-03-04", "25:00", New_York).is_err());
    }
}
