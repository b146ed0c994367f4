//! Date utilities for daily reset hour handling.

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Timelike};

/// Study-day date for `now`.
///
/// Before `daily_reset_hour` the study day is still the previous calendar day,
/// so a late-night session counts towards the day it started in.
pub fn study_day<Tz: TimeZone>(now: DateTime<Tz>, daily_reset_hour: u32) -> NaiveDate {
    if now.hour() < daily_reset_hour {
        (now - Duration::days(1)).date_naive()
    } else {
        now.date_naive()
    }
}

/// Get adjusted "today" in local time based on `daily_reset_hour`.
pub fn adjusted_today(daily_reset_hour: u32) -> NaiveDate {
    study_day(Local::now(), daily_reset_hour)
}
