//! Composing day/month/year components into a calendar date
//!
//! Copyright (c) 2025 Formgate Team
//! Licensed under the Apache-2.0 license

use crate::validation::value::FieldValue;
use chrono::{NaiveDate, NaiveTime, SecondsFormat};

/// Month names accepted by the date-of-birth month picker, in calendar order
pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// 1-based month number for an English month name
pub fn month_from_name(name: &str) -> Option<u32> {
    MONTHS
        .iter()
        .position(|m| *m == name)
        .map(|i| i as u32 + 1)
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a month, `None` for months outside 1..=12
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 if is_leap_year(year) => Some(29),
        2 => Some(28),
        _ => None,
    }
}

/// Compose components into a real date
///
/// Out-of-range components never roll over into the next month: 31 February
/// is `None`, not 3 March.
pub fn compose(day: i64, month: u32, year: i64) -> Option<NaiveDate> {
    let year = i32::try_from(year).ok()?;
    let day = u32::try_from(day).ok()?;
    let max_day = days_in_month(year, month)?;
    if day == 0 || day > max_day {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Compose the named components of a composite value into a real date
///
/// The month component may be a month name or a number in 1..=12.
pub fn compose_value(value: &FieldValue, day: &str, month: &str, year: &str) -> Option<NaiveDate> {
    let day = value.component(day)?.as_integer()?;
    let month = match value.component(month)? {
        FieldValue::Text(name) => month_from_name(name)?,
        FieldValue::Integer(n) => u32::try_from(*n).ok()?,
        FieldValue::Composite(_) => return None,
    };
    let year = value.component(year)?.as_integer()?;
    compose(day, month, year)
}

/// Canonical payload encoding of a date: midnight UTC in RFC 3339 with milliseconds
pub fn canonical_timestamp(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn test_compose_february() {
        assert!(compose(29, 2, 2024).is_some());
        assert!(compose(29, 2, 2023).is_none());
        assert!(compose(31, 2, 2023).is_none());
        assert!(compose(28, 2, 2023).is_some());
    }

    #[test]
    fn test_compose_rejects_out_of_range() {
        assert!(compose(0, 1, 2000).is_none());
        assert!(compose(31, 4, 2000).is_none());
        assert!(compose(-1, 1, 2000).is_none());
        assert!(compose(1, 13, 2000).is_none());
        assert!(compose(1, 1, i64::MAX).is_none());
    }

    #[test]
    fn test_month_names() {
        assert_eq!(month_from_name("January"), Some(1));
        assert_eq!(month_from_name("December"), Some(12));
        assert_eq!(month_from_name("june"), None);
        assert_eq!(month_from_name(""), None);
    }

    #[test]
    fn test_compose_value_accepts_names_and_numbers() {
        let by_name = FieldValue::Composite(
            [
                ("day".to_string(), FieldValue::Integer(29)),
                ("month".to_string(), FieldValue::text("February")),
                ("year".to_string(), FieldValue::Integer(2024)),
            ]
            .into_iter()
            .collect(),
        );
        assert!(compose_value(&by_name, "day", "month", "year").is_some());

        let by_number = FieldValue::Composite(
            [
                ("day".to_string(), FieldValue::Integer(29)),
                ("month".to_string(), FieldValue::Integer(2)),
                ("year".to_string(), FieldValue::Integer(2023)),
            ]
            .into_iter()
            .collect(),
        );
        assert!(compose_value(&by_number, "day", "month", "year").is_none());
        assert!(compose_value(&FieldValue::text("2024-02-29"), "day", "month", "year").is_none());
    }

    #[test]
    fn test_canonical_timestamp() {
        let date = compose(29, 2, 2024).unwrap();
        assert_eq!(canonical_timestamp(date), "2024-02-29T00:00:00.000Z");
    }
}
