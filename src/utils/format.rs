use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};
use thiserror::Error;
use unicode_width::UnicodeWidthStr;

/// Morning (before noon) marker.
pub const AM_MARKER: &str = "ص";
/// Afternoon/evening marker.
pub const PM_MARKER: &str = "م";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("'{0}' has no ':' separator")]
    MissingSeparator(String),
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("time out of range: {hour}:{minute}")]
    OutOfRange { hour: u32, minute: u32 },
}

/// Parse a 24-hour "HH:MM" time of day.
///
/// Anything after the first whitespace is ignored, so service values such as
/// `"04:45 (+03)"` parse as `04:45`.
pub fn parse_time_of_day(s: &str) -> Result<NaiveTime, FormatError> {
    let token = s.split_whitespace().next().unwrap_or("");
    let (h, m) = token
        .split_once(':')
        .ok_or_else(|| FormatError::MissingSeparator(s.to_string()))?;
    let hour: u32 = h
        .trim()
        .parse()
        .map_err(|_| FormatError::NotANumber(h.to_string()))?;
    let minute: u32 = m
        .trim()
        .parse()
        .map_err(|_| FormatError::NotANumber(m.to_string()))?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or(FormatError::OutOfRange { hour, minute })
}

/// Convert "HH:MM" to a 12-hour display string, e.g. `"15:30"` -> `"3:30 م"`.
pub fn format_12h(time24: &str) -> Result<String, FormatError> {
    Ok(format_time_12h(parse_time_of_day(time24)?))
}

pub fn format_time_12h(t: NaiveTime) -> String {
    let (hour12, marker) = twelve_hour(t.hour());
    format!("{}:{:02} {}", hour12, t.minute(), marker)
}

/// 12-hour wall clock with seconds, used by the dashboard header.
pub fn format_clock(t: NaiveTime) -> String {
    let (hour12, marker) = twelve_hour(t.hour());
    format!("{}:{:02}:{:02} {}", hour12, t.minute(), t.second(), marker)
}

fn twelve_hour(hour: u32) -> (u32, &'static str) {
    let marker = if hour >= 12 { PM_MARKER } else { AM_MARKER };
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    (hour12, marker)
}

/// Format a NaiveTime to "HH:MM"
pub fn format_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sat => "السبت",
        Weekday::Sun => "الأحد",
        Weekday::Mon => "الاثنين",
        Weekday::Tue => "الثلاثاء",
        Weekday::Wed => "الأربعاء",
        Weekday::Thu => "الخميس",
        Weekday::Fri => "الجمعة",
    }
}

/// Arabic weekday plus numeric day/month/year, e.g. `"السبت 02/05/2026"`.
pub fn format_date(date: NaiveDate) -> String {
    format!("{} {}", weekday_name(date.weekday()), date.format("%d/%m/%Y"))
}

/// Right-pad to a terminal display width. Arabic labels are not one column per byte.
pub fn pad_display(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}
