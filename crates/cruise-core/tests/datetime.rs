//! Tests for sample time resolution.
//!
//! Each precedence test builds a single row whose columns satisfy two
//! adjacent strategies with deliberately conflicting values, then checks the
//! higher-precedence strategy wins.

use cruise_core::{StandardizedTable, TableError, TimeParseError, TimeStrategy, format_time};
use cruise_model::{FieldRegistry, Value, names};
use proptest::prelude::*;

/// 2014-01-13 06:15:00 UTC.
const EXPECTED: f64 = 1_389_593_700.0;
/// 2014-01-13 07:00:00 UTC, the conflicting interpretation.
const CONFLICT: f64 = 1_389_596_400.0;

fn single_row(cells: &[(&str, Value)]) -> StandardizedTable {
    let registry = FieldRegistry::standard_data();
    let fields = cells
        .iter()
        .map(|(name, _)| registry.resolve(name).unwrap().clone())
        .collect();
    let row = cells.iter().map(|(_, value)| Some(value.clone())).collect();
    StandardizedTable::from_typed(fields, vec![row]).unwrap()
}

fn assert_resolves(table: &StandardizedTable, strategy: TimeStrategy, expected: f64) {
    let resolution = table.resolve_times().unwrap();
    assert_eq!(resolution.strategy, strategy);
    assert_eq!(resolution.times, vec![Some(expected)]);
    assert!(resolution.is_complete());
}

// =========================================================================
// Precedence between adjacent strategies
// =========================================================================

#[test]
fn test_calendar_components_before_time_of_day() {
    let table = single_row(&[
        (names::YEAR, Value::Integer(2014)),
        (names::MONTH_OF_YEAR, Value::Integer(1)),
        (names::DAY_OF_MONTH, Value::Integer(13)),
        (names::HOUR_OF_DAY, Value::Integer(6)),
        (names::MINUTE_OF_HOUR, Value::Integer(15)),
        (names::TIME_OF_DAY, Value::text("07:00:00")),
    ]);
    assert_resolves(&table, TimeStrategy::CalendarComponents, EXPECTED);
}

#[test]
fn test_calendar_time_of_day_before_day_of_year_seconds() {
    let table = single_row(&[
        (names::YEAR, Value::Integer(2014)),
        (names::MONTH_OF_YEAR, Value::Integer(1)),
        (names::DAY_OF_MONTH, Value::Integer(13)),
        (names::TIME_OF_DAY, Value::text("06:15:00")),
        (names::DAY_OF_YEAR, Value::Real(13.0)),
        (names::SECOND_OF_DAY, Value::Real(25_200.0)),
    ]);
    assert_resolves(&table, TimeStrategy::CalendarDateTimeOfDay, EXPECTED);
}

#[test]
fn test_day_of_year_seconds_before_timestamp_string() {
    let table = single_row(&[
        (names::YEAR, Value::Integer(2014)),
        (names::DAY_OF_YEAR, Value::Real(13.0)),
        (names::SECOND_OF_DAY, Value::Real(22_500.0)),
        (names::TIMESTAMP, Value::text("2014-01-13 07:00:00")),
    ]);
    assert_resolves(&table, TimeStrategy::DayOfYearSecondOfDay, EXPECTED);
}

#[test]
fn test_timestamp_string_before_date_and_time_of_day() {
    let table = single_row(&[
        (names::TIMESTAMP, Value::text("2014-01-13 06:15:00")),
        (names::DATE, Value::text("2014-01-13")),
        (names::TIME_OF_DAY, Value::text("07:00:00")),
    ]);
    assert_resolves(&table, TimeStrategy::TimestampString, EXPECTED);
}

#[test]
fn test_date_and_time_of_day_before_date_and_components() {
    let table = single_row(&[
        (names::DATE, Value::text("2014-01-13")),
        (names::TIME_OF_DAY, Value::text("06:15:00")),
        (names::HOUR_OF_DAY, Value::Integer(7)),
        (names::MINUTE_OF_HOUR, Value::Integer(0)),
    ]);
    assert_resolves(&table, TimeStrategy::DateStringTimeOfDay, EXPECTED);
}

#[test]
fn test_date_and_components_before_fractional_day_of_year() {
    let table = single_row(&[
        (names::DATE, Value::text("2014-01-13")),
        (names::HOUR_OF_DAY, Value::Integer(6)),
        (names::MINUTE_OF_HOUR, Value::Integer(15)),
        (names::YEAR, Value::Integer(2014)),
        (names::DAY_OF_YEAR, Value::Real(13.291_666_666_7)),
    ]);
    assert_resolves(&table, TimeStrategy::DateStringComponents, EXPECTED);
}

#[test]
fn test_fractional_day_of_year_before_epoch_seconds() {
    let table = single_row(&[
        (names::YEAR, Value::Integer(2014)),
        (names::DAY_OF_YEAR, Value::Real(13.260_416_666_7)),
        (names::TIME, Value::Real(CONFLICT)),
    ]);
    assert_resolves(&table, TimeStrategy::FractionalDayOfYear, EXPECTED);
}

#[test]
fn test_epoch_seconds_used_as_is() {
    let table = single_row(&[(names::TIME, Value::Real(CONFLICT))]);
    assert_resolves(&table, TimeStrategy::EpochSeconds, CONFLICT);
}

// =========================================================================
// Row-level tolerance
// =========================================================================

#[test]
fn test_out_of_range_month_fails_only_its_row() {
    let registry = FieldRegistry::standard_data();
    let fields = [
        names::YEAR,
        names::MONTH_OF_YEAR,
        names::DAY_OF_MONTH,
        names::HOUR_OF_DAY,
        names::MINUTE_OF_HOUR,
    ]
    .iter()
    .map(|name| registry.resolve(name).unwrap().clone())
    .collect();
    let rows = (0..10)
        .map(|idx| {
            let month = if idx == 4 { 13 } else { 1 };
            vec![
                Some(Value::Integer(2014)),
                Some(Value::Integer(month)),
                Some(Value::Integer(13)),
                Some(Value::Integer(6)),
                Some(Value::Integer(idx)),
            ]
        })
        .collect();
    let table = StandardizedTable::from_typed(fields, rows).unwrap();

    let resolution = table.resolve_times().unwrap();

    assert_eq!(resolution.times.len(), 10);
    assert_eq!(resolution.resolved_count(), 9);
    assert_eq!(resolution.times[4], None);
    for (idx, time) in resolution.times.iter().enumerate() {
        if idx != 4 {
            assert_eq!(*time, Some(EXPECTED - 15.0 * 60.0 + idx as f64 * 60.0));
        }
    }
    assert_eq!(resolution.failures.len(), 1);
    assert_eq!(resolution.failures[0].row, 4);
    assert_eq!(
        resolution.failures[0].reason,
        TimeParseError::OutOfRange {
            component: names::MONTH_OF_YEAR,
            value: 13.0
        }
    );
    assert!(resolution.summary().starts_with("row 4: month value 13"));
}

#[test]
fn test_malformed_timestamp_fails_only_its_row() {
    let registry = FieldRegistry::standard_data();
    let fields = vec![registry.resolve(names::TIMESTAMP).unwrap().clone()];
    let rows = vec![
        vec![Some(Value::text("2014-01-13T06:15:00Z"))],
        vec![Some(Value::text("13/01/2014 06:15"))],
        vec![None],
    ];
    let table = StandardizedTable::from_typed(fields, rows).unwrap();

    let resolution = table.resolve_times().unwrap();

    assert_eq!(resolution.times, vec![Some(EXPECTED), None, None]);
    assert!(matches!(
        resolution.failures[1].reason,
        TimeParseError::MissingComponent(names::TIMESTAMP)
    ));
}

#[test]
fn test_missing_seconds_default_to_zero() {
    let table = single_row(&[
        (names::DATE, Value::text("2014-01-13")),
        (names::HOUR_OF_DAY, Value::Integer(6)),
        (names::MINUTE_OF_HOUR, Value::Integer(15)),
    ]);
    assert_resolves(&table, TimeStrategy::DateStringComponents, EXPECTED);
}

// =========================================================================
// Schema-level failure
// =========================================================================

#[test]
fn test_incomplete_specification() {
    let table = single_row(&[
        (names::YEAR, Value::Integer(2014)),
        (names::MONTH_OF_YEAR, Value::Integer(1)),
        (names::HOUR_OF_DAY, Value::Integer(6)),
    ]);
    let err = table.resolve_times().unwrap_err();
    assert!(matches!(err, TableError::IncompleteTimeSpecification));
    assert_eq!(err.to_string(), "incomplete specification of sample time");
}

proptest! {
    #[test]
    fn formatted_times_resolve_back(seconds in 0i64..4_102_444_800) {
        let time = seconds as f64;
        let text = format_time(time).unwrap();
        let table = single_row(&[(names::TIMESTAMP, Value::Text(text))]);
        let resolution = table.resolve_times().unwrap();
        prop_assert_eq!(resolution.times, vec![Some(time)]);
    }
}
