//! Sample time resolution.
//!
//! Cruise tables describe sample times in many ways: separate calendar
//! components, a full timestamp string, a date string plus a time-of-day
//! string, a day-of-year with seconds of day, and so on. This module turns
//! whichever combination is present into one canonical time per row,
//! expressed as seconds since 1970-01-01T00:00:00Z.
//!
//! # Strategy precedence
//!
//! The strategy is chosen once per table from the columns that exist (not
//! from the values in any row). The first strategy whose columns are all
//! present wins:
//!
//! 1. year, month, day, hour, minute (second optional)
//! 2. year, month, day, time-of-day string
//! 3. year, day of year, second of day
//! 4. timestamp string
//! 5. date string, time-of-day string
//! 6. date string, hour, minute (second optional)
//! 7. year, fractional day of year
//!
//! The day-of-year triple (3) outranks the timestamp string (4); only the
//! fractional day-of-year form (7) comes after the string forms. When none of
//! the above apply, an explicit `time` column (already in epoch seconds) is
//! used. Otherwise the table's time columns are incomplete and resolution
//! fails for the whole table.
//!
//! # Row-level failures
//!
//! A row with a malformed string or an out-of-range component resolves to
//! `None` and is listed in [`TimeResolution::failures`]; other rows are
//! unaffected.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use cruise_model::Value;
use thiserror::Error;

use crate::error::{Result, TableError};
use crate::roles::{RoleIndex, SemanticRole};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// How sample times are derived for a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeStrategy {
    CalendarComponents,
    CalendarDateTimeOfDay,
    DayOfYearSecondOfDay,
    TimestampString,
    DateStringTimeOfDay,
    DateStringComponents,
    FractionalDayOfYear,
    EpochSeconds,
}

impl TimeStrategy {
    /// All strategies, in precedence order.
    pub const PRECEDENCE: [Self; 8] = [
        Self::CalendarComponents,
        Self::CalendarDateTimeOfDay,
        Self::DayOfYearSecondOfDay,
        Self::TimestampString,
        Self::DateStringTimeOfDay,
        Self::DateStringComponents,
        Self::FractionalDayOfYear,
        Self::EpochSeconds,
    ];

    /// Columns that must exist for this strategy to be selected.
    pub fn required_roles(self) -> &'static [SemanticRole] {
        use SemanticRole as R;
        match self {
            Self::CalendarComponents => &[R::Year, R::Month, R::Day, R::Hour, R::Minute],
            Self::CalendarDateTimeOfDay => &[R::Year, R::Month, R::Day, R::TimeOfDay],
            Self::DayOfYearSecondOfDay => &[R::Year, R::DayOfYear, R::SecondOfDay],
            Self::TimestampString => &[R::Timestamp],
            Self::DateStringTimeOfDay => &[R::Date, R::TimeOfDay],
            Self::DateStringComponents => &[R::Date, R::Hour, R::Minute],
            Self::FractionalDayOfYear => &[R::Year, R::DayOfYear],
            Self::EpochSeconds => &[R::Time],
        }
    }

    /// First strategy whose required columns are all present.
    pub fn select(roles: &RoleIndex) -> Option<Self> {
        Self::PRECEDENCE
            .into_iter()
            .find(|strategy| roles.has_all(strategy.required_roles()))
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::CalendarComponents => "year, month, day, hour, minute, second",
            Self::CalendarDateTimeOfDay => "year, month, day, time of day",
            Self::DayOfYearSecondOfDay => "year, day of year, second of day",
            Self::TimestampString => "date-time string",
            Self::DateStringTimeOfDay => "date string, time of day",
            Self::DateStringComponents => "date string, hour, minute, second",
            Self::FractionalDayOfYear => "year, fractional day of year",
            Self::EpochSeconds => "time in epoch seconds",
        }
    }
}

impl fmt::Display for TimeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Why a single row's time could not be resolved.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimeParseError {
    #[error("{0} is missing")]
    MissingComponent(&'static str),

    #[error("{component} value {value} is not a number")]
    NotNumeric {
        component: &'static str,
        value: String,
    },

    #[error("{component} value {value} is out of range")]
    OutOfRange { component: &'static str, value: f64 },

    #[error("invalid date {0:?}")]
    InvalidDate(String),

    #[error("invalid time of day {0:?}")]
    InvalidTimeOfDay(String),

    #[error("invalid date-time {0:?}")]
    InvalidTimestamp(String),
}

/// A row whose time did not resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct RowTimeFailure {
    pub row: usize,
    pub reason: TimeParseError,
}

/// Result of resolving sample times for every row of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeResolution {
    pub strategy: TimeStrategy,
    /// Seconds since 1970-01-01T00:00:00Z, `None` where the row failed.
    pub times: Vec<Option<f64>>,
    pub failures: Vec<RowTimeFailure>,
}

impl TimeResolution {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn resolved_count(&self) -> usize {
        self.times.iter().filter(|time| time.is_some()).count()
    }

    /// One-line summary of the failed rows, suitable for a single report
    /// entry.
    pub fn summary(&self) -> String {
        const SHOWN: usize = 5;
        if self.failures.is_empty() {
            return format!("all {} row(s) resolved", self.times.len());
        }
        let mut parts: Vec<String> = self
            .failures
            .iter()
            .take(SHOWN)
            .map(|failure| format!("row {}: {}", failure.row, failure.reason))
            .collect();
        if self.failures.len() > SHOWN {
            parts.push(format!("and {} more", self.failures.len() - SHOWN));
        }
        parts.join("; ")
    }
}

/// Resolve one canonical time per row.
///
/// Fails only when no strategy applies to the available columns.
pub fn resolve_times(roles: &RoleIndex, rows: &[Vec<Option<Value>>]) -> Result<TimeResolution> {
    let strategy = TimeStrategy::select(roles).ok_or(TableError::IncompleteTimeSpecification)?;
    tracing::debug!(%strategy, rows = rows.len(), "resolving sample times");

    let mut times = Vec::with_capacity(rows.len());
    let mut failures = Vec::new();
    for (row_idx, row) in rows.iter().enumerate() {
        let view = RowView { roles, row };
        match view.resolve(strategy) {
            Ok(time) => times.push(Some(time)),
            Err(reason) => {
                tracing::trace!(row = row_idx, %reason, "sample time unresolved");
                times.push(None);
                failures.push(RowTimeFailure {
                    row: row_idx,
                    reason,
                });
            }
        }
    }

    if !failures.is_empty() {
        tracing::warn!(
            %strategy,
            failed = failures.len(),
            rows = rows.len(),
            "some sample times could not be resolved"
        );
    }

    Ok(TimeResolution {
        strategy,
        times,
        failures,
    })
}

type RowResult<T> = std::result::Result<T, TimeParseError>;

struct RowView<'a> {
    roles: &'a RoleIndex,
    row: &'a [Option<Value>],
}

impl RowView<'_> {
    fn resolve(&self, strategy: TimeStrategy) -> RowResult<f64> {
        use SemanticRole as R;
        match strategy {
            TimeStrategy::CalendarComponents => {
                let date = calendar_date(
                    self.number(R::Year)?,
                    self.number(R::Month)?,
                    self.number(R::Day)?,
                )?;
                let second = self.optional_number(R::Second)?.unwrap_or(0.0);
                combine(date, self.number(R::Hour)?, self.number(R::Minute)?, second)
            }
            TimeStrategy::CalendarDateTimeOfDay => {
                let date = calendar_date(
                    self.number(R::Year)?,
                    self.number(R::Month)?,
                    self.number(R::Day)?,
                )?;
                let (hour, minute, second) = parse_time_of_day(self.text(R::TimeOfDay)?)?;
                combine(date, hour, minute, second)
            }
            TimeStrategy::DayOfYearSecondOfDay => {
                let day_of_year = self.number(R::DayOfYear)?;
                let date = ordinal_date(self.number(R::Year)?, day_of_year.floor())?;
                let seconds = self.number(R::SecondOfDay)?;
                if !(0.0..SECONDS_PER_DAY).contains(&seconds) {
                    return Err(TimeParseError::OutOfRange {
                        component: R::SecondOfDay.field_name(),
                        value: seconds,
                    });
                }
                Ok(midnight(date) + seconds)
            }
            TimeStrategy::TimestampString => parse_timestamp(self.text(R::Timestamp)?),
            TimeStrategy::DateStringTimeOfDay => {
                let date = parse_date(self.text(R::Date)?)?;
                let (hour, minute, second) = parse_time_of_day(self.text(R::TimeOfDay)?)?;
                combine(date, hour, minute, second)
            }
            TimeStrategy::DateStringComponents => {
                let date = parse_date(self.text(R::Date)?)?;
                let second = self.optional_number(R::Second)?.unwrap_or(0.0);
                combine(date, self.number(R::Hour)?, self.number(R::Minute)?, second)
            }
            TimeStrategy::FractionalDayOfYear => {
                let day_of_year = self.number(R::DayOfYear)?;
                let date = ordinal_date(self.number(R::Year)?, day_of_year.floor())?;
                // Millisecond rounding keeps 0.2604166667 days at 06:15:00.
                let seconds =
                    ((day_of_year - day_of_year.floor()) * SECONDS_PER_DAY * 1000.0).round()
                        / 1000.0;
                Ok(midnight(date) + seconds)
            }
            TimeStrategy::EpochSeconds => self.number(R::Time),
        }
    }

    fn cell(&self, role: SemanticRole) -> Option<&Value> {
        let column = self.roles.get(role)?;
        self.row.get(column)?.as_ref()
    }

    fn optional_number(&self, role: SemanticRole) -> RowResult<Option<f64>> {
        let Some(value) = self.cell(role) else {
            return Ok(None);
        };
        let number = match value {
            Value::Integer(number) => f64::from(*number),
            Value::Real(number) => *number,
            Value::Text(text) => {
                text.trim()
                    .parse::<f64>()
                    .map_err(|_| TimeParseError::NotNumeric {
                        component: role.field_name(),
                        value: text.clone(),
                    })?
            }
        };
        if number.is_finite() {
            Ok(Some(number))
        } else {
            Ok(None)
        }
    }

    fn number(&self, role: SemanticRole) -> RowResult<f64> {
        self.optional_number(role)?
            .ok_or(TimeParseError::MissingComponent(role.field_name()))
    }

    fn text(&self, role: SemanticRole) -> RowResult<&str> {
        match self.cell(role) {
            Some(Value::Text(text)) if !text.trim().is_empty() => Ok(text.trim()),
            _ => Err(TimeParseError::MissingComponent(role.field_name())),
        }
    }
}

fn whole(component: &'static str, value: f64, min: f64, max: f64) -> RowResult<u32> {
    if value.fract() != 0.0 || value < min || value > max {
        return Err(TimeParseError::OutOfRange { component, value });
    }
    Ok(value as u32)
}

fn calendar_date(year: f64, month: f64, day: f64) -> RowResult<NaiveDate> {
    let year_value = whole(SemanticRole::Year.field_name(), year, 1.0, 9999.0)?;
    let month_value = whole(SemanticRole::Month.field_name(), month, 1.0, 12.0)?;
    let day_value = whole(SemanticRole::Day.field_name(), day, 1.0, 31.0)?;
    NaiveDate::from_ymd_opt(year_value as i32, month_value, day_value).ok_or_else(|| {
        TimeParseError::InvalidDate(format!("{year_value:04}-{month_value:02}-{day_value:02}"))
    })
}

fn ordinal_date(year: f64, day_of_year: f64) -> RowResult<NaiveDate> {
    let year_value = whole(SemanticRole::Year.field_name(), year, 1.0, 9999.0)?;
    let ordinal = whole(SemanticRole::DayOfYear.field_name(), day_of_year, 1.0, 366.0)?;
    NaiveDate::from_yo_opt(year_value as i32, ordinal).ok_or(TimeParseError::OutOfRange {
        component: SemanticRole::DayOfYear.field_name(),
        value: day_of_year,
    })
}

fn midnight(date: NaiveDate) -> f64 {
    date.and_time(NaiveTime::default()).and_utc().timestamp() as f64
}

fn combine(date: NaiveDate, hour: f64, minute: f64, second: f64) -> RowResult<f64> {
    let hour = whole(SemanticRole::Hour.field_name(), hour, 0.0, 23.0)?;
    let minute = whole(SemanticRole::Minute.field_name(), minute, 0.0, 59.0)?;
    if !(0.0..60.0).contains(&second) {
        return Err(TimeParseError::OutOfRange {
            component: SemanticRole::Second.field_name(),
            value: second,
        });
    }
    Ok(midnight(date) + f64::from(hour * 3600 + minute * 60) + second)
}

fn all_digits(text: &str, min_len: usize, max_len: usize) -> bool {
    (min_len..=max_len).contains(&text.len()) && text.bytes().all(|b| b.is_ascii_digit())
}

/// Parse `YYYY-MM-DD`.
fn parse_date(text: &str) -> RowResult<NaiveDate> {
    let invalid = || TimeParseError::InvalidDate(text.to_string());
    let mut parts = text.split('-');
    let (Some(year), Some(month), Some(day), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };
    if !all_digits(year, 4, 4) || !all_digits(month, 1, 2) || !all_digits(day, 1, 2) {
        return Err(invalid());
    }
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    let day: u32 = day.parse().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// Parse `HH:MM:SS[.sss]` into hour, minute, and (fractional) second.
fn parse_time_of_day(text: &str) -> RowResult<(f64, f64, f64)> {
    let invalid = || TimeParseError::InvalidTimeOfDay(text.to_string());
    let mut parts = text.split(':');
    let (Some(hour), Some(minute), Some(second), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };
    if !all_digits(hour, 1, 2) || !all_digits(minute, 1, 2) {
        return Err(invalid());
    }
    let (whole_seconds, fraction) = match second.split_once('.') {
        Some((whole_part, fraction)) => (whole_part, Some(fraction)),
        None => (second, None),
    };
    if !all_digits(whole_seconds, 1, 2) || fraction.is_some_and(|f| !all_digits(f, 1, 9)) {
        return Err(invalid());
    }
    let hour: u32 = hour.parse().map_err(|_| invalid())?;
    let minute: u32 = minute.parse().map_err(|_| invalid())?;
    let second: f64 = second.parse().map_err(|_| invalid())?;
    if hour > 23 || minute > 59 || second >= 60.0 {
        return Err(invalid());
    }
    Ok((f64::from(hour), f64::from(minute), second))
}

/// Parse `YYYY-MM-DD HH:MM:SS[.sss]`; `T` may replace the space and a
/// trailing `Z` is accepted.
fn parse_timestamp(text: &str) -> RowResult<f64> {
    let invalid = || TimeParseError::InvalidTimestamp(text.to_string());
    let trimmed = text.strip_suffix('Z').unwrap_or(text);
    let (date, time) = trimmed
        .split_once(['T', ' '])
        .ok_or_else(invalid)?;
    let date = parse_date(date.trim()).map_err(|_| invalid())?;
    let (hour, minute, second) = parse_time_of_day(time.trim()).map_err(|_| invalid())?;
    combine(date, hour, minute, second).map_err(|_| invalid())
}

/// Calendar components of a canonical time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeParts {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub hour: i32,
    pub minute: i32,
    /// Seconds with fraction, rounded to microseconds.
    pub second: f64,
}

/// Split epoch seconds into UTC calendar components.
pub fn decompose_time(time: f64) -> Option<TimeParts> {
    let datetime = to_datetime(time)?;
    let micros = f64::from(datetime.and_utc().timestamp_subsec_micros());
    Some(TimeParts {
        year: datetime.year(),
        month: datetime.month() as i32,
        day: datetime.day() as i32,
        hour: datetime.hour() as i32,
        minute: datetime.minute() as i32,
        second: f64::from(datetime.second()) + micros / 1.0e6,
    })
}

/// Render epoch seconds as `YYYY-MM-DD HH:MM:SS` (with milliseconds when
/// present).
pub fn format_time(time: f64) -> Option<String> {
    let datetime = to_datetime(time)?;
    if datetime.nanosecond() == 0 {
        Some(datetime.format("%Y-%m-%d %H:%M:%S").to_string())
    } else {
        Some(datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string())
    }
}

fn to_datetime(time: f64) -> Option<NaiveDateTime> {
    if !time.is_finite() {
        return None;
    }
    let mut seconds = time.floor();
    let mut micros = ((time - seconds) * 1.0e6).round();
    if micros >= 1.0e6 {
        seconds += 1.0;
        micros -= 1.0e6;
    }
    let nanos = (micros as u32) * 1000;
    DateTime::from_timestamp(seconds as i64, nanos).map(|utc| utc.naive_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_rejects_malformed() {
        assert!(parse_date("2014-01-13").is_ok());
        assert!(parse_date("2014-1-3").is_ok());
        assert!(parse_date("14-01-13").is_err());
        assert!(parse_date("2014/01/13").is_err());
        assert!(parse_date("2014-02-30").is_err());
        assert!(parse_date("2014-01-13-01").is_err());
    }

    #[test]
    fn parse_time_of_day_with_fraction() {
        assert_eq!(parse_time_of_day("06:15:30.5"), Ok((6.0, 15.0, 30.5)));
        assert!(parse_time_of_day("06:15").is_err());
        assert!(parse_time_of_day("24:00:00").is_err());
        assert!(parse_time_of_day("06:15:-1").is_err());
    }

    #[test]
    fn parse_timestamp_separators() {
        let expected = 1_389_593_700.0;
        assert_eq!(parse_timestamp("2014-01-13 06:15:00"), Ok(expected));
        assert_eq!(parse_timestamp("2014-01-13T06:15:00Z"), Ok(expected));
        assert!(parse_timestamp("2014-01-13").is_err());
    }

    #[test]
    fn combine_rejects_fractional_hour() {
        let date = NaiveDate::from_ymd_opt(2014, 1, 13).unwrap();
        assert!(combine(date, 6.5, 0.0, 0.0).is_err());
        assert!(combine(date, 6.0, 60.0, 0.0).is_err());
    }

    #[test]
    fn decompose_rounds_to_microseconds() {
        let parts = decompose_time(1_389_593_700.25).unwrap();
        assert_eq!((parts.year, parts.month, parts.day), (2014, 1, 13));
        assert_eq!((parts.hour, parts.minute), (6, 15));
        assert!((parts.second - 0.25).abs() < 1e-9);
    }

    #[test]
    fn format_time_renders_utc() {
        assert_eq!(
            format_time(1_389_593_700.0).as_deref(),
            Some("2014-01-13 06:15:00")
        );
        assert_eq!(format_time(f64::NAN), None);
    }
}
