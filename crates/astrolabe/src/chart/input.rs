//! Request input: birth/event records and their validation.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

lazy_static! {
    static ref DATE_RE: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("static regex");
    static ref TIME_RE: Regex = Regex::new(r"^\d{2}:\d{2}$").expect("static regex");
}

/// Largest accepted distance from UTC, in hours
pub const MAX_TZ_OFFSET: i32 = 14;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    Date(String),
    #[error("Invalid time '{0}', expected HH:MM")]
    Time(String),
    #[error("Invalid tz_offset {0}, expected a whole number of hours between -14 and 14")]
    TzOffset(i32),
    #[error("Missing required parameter '{0}'")]
    MissingParameter(String),
    #[error("Invalid value '{value}' for parameter '{name}'")]
    InvalidParameter { name: String, value: String },
}

/// Date, time and place of a chart, as given by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthData {
    /// YYYY-MM-DD, local civil date
    pub date: String,
    /// HH:MM, local civil time
    pub time: String,
    /// Free-text place name resolved by the geocoder
    pub place: String,
    /// Hours east of UTC
    pub tz_offset: i32,
}

impl BirthData {
    pub fn new(date: &str, time: &str, place: &str, tz_offset: i32) -> Self {
        Self {
            date: date.to_string(),
            time: time.to_string(),
            place: place.to_string(),
            tz_offset,
        }
    }

    /// Local date-time shifted to UTC
    pub fn moment_ut(&self) -> Result<NaiveDateTime, ValidationError> {
        to_universal_time(&self.date, &self.time, self.tz_offset)
    }

    /// Same record at another local date and time
    pub fn at(&self, date: &str, time: &str) -> Self {
        Self {
            date: date.to_string(),
            time: time.to_string(),
            ..self.clone()
        }
    }
}

pub fn parse_date(date: &str) -> Result<NaiveDate, ValidationError> {
    if !DATE_RE.is_match(date) {
        return Err(ValidationError::Date(date.to_string()));
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| ValidationError::Date(date.to_string()))
}

pub fn parse_time(time: &str) -> Result<NaiveTime, ValidationError> {
    if !TIME_RE.is_match(time) {
        return Err(ValidationError::Time(time.to_string()));
    }
    NaiveTime::parse_from_str(time, "%H:%M").map_err(|_| ValidationError::Time(time.to_string()))
}

/// Local civil date and time at `tz_offset` hours east of UTC, converted to UTC.
pub fn to_universal_time(
    date: &str,
    time: &str,
    tz_offset: i32,
) -> Result<NaiveDateTime, ValidationError> {
    if !(-MAX_TZ_OFFSET..=MAX_TZ_OFFSET).contains(&tz_offset) {
        return Err(ValidationError::TzOffset(tz_offset));
    }
    let local = parse_date(date)?.and_time(parse_time(time)?);
    Ok(local - Duration::hours(tz_offset as i64))
}
