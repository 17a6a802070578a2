use std::collections::HashMap;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

/// Key/value metadata attached to a site file. Absent keys are simply not present.
pub type Metadata = HashMap<String, MetadataValue>;

/// Date-time formats accepted in a metadata block, tried in order
const DATE_TIME_FORMATS: [&str; 2] = ["%Y/%m/%d %H:%M:%S", "%Y/%m/%d %H:%M"];

/// Date-only format accepted in a metadata block
const DATE_FORMAT: &str = "%Y/%m/%d";

/// A typed metadata value
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    DateTime(NaiveDateTime),
    Date(NaiveDate),
    String(String),
}

impl MetadataValue {
    /// Coerce a trimmed raw value. The first matching rule wins:
    /// boolean literal, integer, float, date-time, date, raw string.
    pub fn coerce(raw: &str) -> Self {
        match raw {
            "true" => return MetadataValue::Bool(true),
            "false" => return MetadataValue::Bool(false),
            _ => {}
        }

        if let Ok(value) = raw.parse::<i64>() {
            return MetadataValue::Integer(value);
        }

        // `inf` and `NaN` stay strings
        if let Ok(value) = raw.parse::<f64>() {
            if value.is_finite() {
                return MetadataValue::Float(value);
            }
        }

        for format in DATE_TIME_FORMATS {
            if let Ok(value) = NaiveDateTime::parse_from_str(raw, format) {
                return MetadataValue::DateTime(value);
            }
        }

        if let Ok(value) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
            return MetadataValue::Date(value);
        }

        MetadataValue::String(raw.to_string())
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Bool(value) => write!(f, "{}", value),
            MetadataValue::Integer(value) => write!(f, "{}", value),
            MetadataValue::Float(value) => write!(f, "{}", value),
            MetadataValue::DateTime(value) => write!(f, "{}", value.format("%Y-%m-%d %H:%M:%S")),
            MetadataValue::Date(value) => write!(f, "{}", value.format("%Y-%m-%d")),
            MetadataValue::String(value) => write!(f, "{}", value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_precedence() {
        assert_eq!(MetadataValue::coerce("true"), MetadataValue::Bool(true));
        assert_eq!(MetadataValue::coerce("false"), MetadataValue::Bool(false));
        assert_eq!(MetadataValue::coerce("2024"), MetadataValue::Integer(2024));
        assert_eq!(MetadataValue::coerce("-7"), MetadataValue::Integer(-7));
        assert_eq!(MetadataValue::coerce("3.5"), MetadataValue::Float(3.5));
        assert_eq!(
            MetadataValue::coerce("2024/01/05"),
            MetadataValue::Date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())
        );
    }

    #[test]
    fn test_coerce_booleans_are_case_sensitive() {
        assert_eq!(MetadataValue::coerce("True"), MetadataValue::String("True".to_string()));
        assert_eq!(MetadataValue::coerce("FALSE"), MetadataValue::String("FALSE".to_string()));
    }

    #[test]
    fn test_coerce_date_times() {
        let expected = NaiveDate::from_ymd_opt(2023, 12, 24)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap();
        assert_eq!(MetadataValue::coerce("2023/12/24 18:30"), MetadataValue::DateTime(expected));

        let with_seconds = NaiveDate::from_ymd_opt(2023, 12, 24)
            .unwrap()
            .and_hms_opt(18, 30, 15)
            .unwrap();
        assert_eq!(MetadataValue::coerce("2023/12/24 18:30:15"), MetadataValue::DateTime(with_seconds));
    }

    #[test]
    fn test_coerce_falls_back_to_string() {
        assert_eq!(MetadataValue::coerce("Home"), MetadataValue::String("Home".to_string()));
        assert_eq!(MetadataValue::coerce("2024-01-05"), MetadataValue::String("2024-01-05".to_string()));
        assert_eq!(MetadataValue::coerce("NaN"), MetadataValue::String("NaN".to_string()));
        assert_eq!(MetadataValue::coerce(""), MetadataValue::String(String::new()));
    }
}
