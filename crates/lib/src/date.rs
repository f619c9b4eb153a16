use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::Deserialize;

static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date regex is valid"));

/// Whether `date` is written as `YYYY-MM-DD` and names a real calendar day.
#[must_use]
pub fn is_valid_date(date: &str) -> bool {
    if !DATE_SHAPE.is_match(date) {
        return false;
    }
    parse_triple(date).is_some_and(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).is_some())
}

/// Splits a date string into its `year`, `month` and `day` components, only
/// when it consists of exactly three dash-separated parts.
pub(crate) fn split_components(date: &str) -> Option<(String, String, String)> {
    let [year, month, day] = date.split('-').collect::<Vec<_>>()[..] else {
        return None;
    };
    Some((year.to_owned(), month.to_owned(), day.to_owned()))
}

fn parse_triple(date: &str) -> Option<(i32, u32, u32)> {
    let (year, month, day) = split_components(date.trim())?;
    ymd_from_parts(
        year.trim().parse().ok()?,
        month.trim().parse().ok()?,
        day.trim().parse().ok()?,
    )
}

fn ymd_from_parts(year: i64, month: i64, day: i64) -> Option<(i32, u32, u32)> {
    Some((
        i32::try_from(year).ok()?,
        u32::try_from(month).ok()?,
        u32::try_from(day).ok()?,
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DatePart {
    Number(i64),
    Text(String),
}

impl DatePart {
    fn as_number(&self) -> Option<i64> {
        match self {
            DatePart::Number(n) => Some(*n),
            DatePart::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<i64> for DatePart {
    fn from(n: i64) -> Self {
        DatePart::Number(n)
    }
}

impl From<&str> for DatePart {
    fn from(s: &str) -> Self {
        DatePart::Text(s.to_owned())
    }
}

/// Anything a post can be looked up by date with.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DateKey {
    Parts {
        year: DatePart,
        month: DatePart,
        day: DatePart,
    },
    Text(String),
    #[serde(skip_deserializing)]
    Date(NaiveDate),
}

impl DateKey {
    /// Normalizes the key into a `(year, month, day)` triple, or `None` when
    /// it cannot be read as one.
    #[must_use]
    pub fn ymd(&self) -> Option<(i32, u32, u32)> {
        match self {
            DateKey::Text(text) => parse_triple(text),
            DateKey::Date(date) => Some((date.year(), date.month(), date.day())),
            DateKey::Parts { year, month, day } => {
                ymd_from_parts(year.as_number()?, month.as_number()?, day.as_number()?)
            }
        }
    }
}

impl From<&str> for DateKey {
    fn from(text: &str) -> Self {
        DateKey::Text(text.to_owned())
    }
}

impl From<String> for DateKey {
    fn from(text: String) -> Self {
        DateKey::Text(text)
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        DateKey::Date(date)
    }
}

impl From<(i32, u32, u32)> for DateKey {
    fn from((year, month, day): (i32, u32, u32)) -> Self {
        DateKey::Parts {
            year: DatePart::Number(year.into()),
            month: DatePart::Number(month.into()),
            day: DatePart::Number(day.into()),
        }
    }
}

#[cfg(test)]
mod test {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::{is_valid_date, split_components, DateKey, DatePart};

    macro_rules! deserial {
        ($tokens:tt) => {
            serde_json::from_value::<DateKey>(json!($tokens)).unwrap()
        };
    }

    #[test]
    fn valid_dates() {
        assert!(is_valid_date("2025-01-20"));
        assert!(is_valid_date("2024-02-29"));
    }

    #[test]
    fn invalid_dates() {
        assert!(!is_valid_date("2023-02-29"));
        assert!(!is_valid_date("2025-04-31"));
        assert!(!is_valid_date("2025-13-01"));
        assert!(!is_valid_date("2025-1-20"));
        assert!(!is_valid_date(" 2025-01-20"));
        assert!(!is_valid_date("No date"));
        assert!(!is_valid_date(""));
    }

    #[test]
    fn components_need_three_parts() {
        assert_eq!(
            Some(("2025".to_owned(), "01".to_owned(), "20".to_owned())),
            split_components("2025-01-20")
        );
        assert_eq!(None, split_components("2025-01"));
        assert_eq!(None, split_components("No date"));
    }

    #[test]
    fn key_shapes_normalize_to_the_same_triple() {
        let expected = Some((2025, 1, 15));
        assert_eq!(expected, DateKey::from("2025-01-15").ymd());
        assert_eq!(
            expected,
            DateKey::from(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()).ymd()
        );
        assert_eq!(expected, DateKey::from((2025_i32, 1_u32, 15_u32)).ymd());
        assert_eq!(
            expected,
            DateKey::Parts {
                year: DatePart::from("2025"),
                month: DatePart::from("01"),
                day: DatePart::from(15_i64),
            }
            .ymd()
        );
    }

    #[test]
    fn key_deserializes_from_json() {
        assert_eq!(
            Some((2025, 1, 15)),
            deserial!({ "year": 2025, "month": "1", "day": "15" }).ymd()
        );
        assert_eq!(Some((2025, 1, 15)), deserial!("2025-01-15").ymd());
    }

    #[test]
    fn malformed_keys_are_not_found() {
        assert_eq!(None, DateKey::from("yesterday").ymd());
        assert_eq!(None, DateKey::from("2025-01").ymd());
        assert_eq!(
            None,
            deserial!({ "year": "twenty", "month": 1, "day": 1 }).ymd()
        );
        assert_eq!(None, deserial!({ "year": 2025, "month": -1, "day": 1 }).ymd());
    }
}
