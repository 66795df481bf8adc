use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

use crate::model::{DUE_FORMAT, Priority};

/// Time used when only a date is given, matching the entry form's default.
pub const DEFAULT_DUE_HOUR: u32 = 12;

pub fn parse_due(s: &str) -> Result<NaiveDateTime, String> {
    parse_due_from(s, Local::now().date_naive())
}

pub fn parse_due_from(s: &str, today: NaiveDate) -> Result<NaiveDateTime, String> {
    let s = s.trim().to_lowercase();
    let (day, time) = match s.split_once(' ') {
        Some((day, time)) => (day.trim(), Some(time.trim())),
        None => (s.as_str(), None),
    };

    let time = match time {
        Some(t) => NaiveTime::parse_from_str(t, "%H:%M")
            .map_err(|_| format!("expected HH:MM, got '{t}'"))?,
        None => NaiveTime::from_hms_opt(DEFAULT_DUE_HOUR, 0, 0).ok_or("invalid default time")?,
    };

    let date = match day {
        "today" => today,
        "tomorrow" => today.succ_opt().ok_or("date overflow")?,
        _ => NaiveDate::parse_from_str(day, "%d.%m.%Y")
            .or_else(|_| NaiveDate::parse_from_str(day, "%Y-%m-%d"))
            .map_err(|_| "expected today|tomorrow|DD.MM.YYYY|YYYY-MM-DD [HH:MM]".to_string())?,
    };

    Ok(date.and_time(time))
}

/// Due time used when none is given: today at the default hour.
pub fn default_due() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.date()
        .and_hms_opt(DEFAULT_DUE_HOUR, 0, 0)
        .unwrap_or(now)
}

pub fn format_due(due: NaiveDateTime) -> String {
    due.format(DUE_FORMAT).to_string()
}

pub fn priority_rank(p: Priority) -> u8 {
    match p {
        Priority::High => 0,
        Priority::Medium => 1,
        Priority::Low => 2,
    }
}
