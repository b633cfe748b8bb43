//! Count and flag columns of the incident table.
//!
//! Infosiga leaves these cells empty when the count is zero or the flag is
//! not set, so missing means `0` here, unlike every other column.

use infosiga_common::parse_i64;

/// Outcome of coercing a count or flag cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorValue {
    Value(i64),
    Invalid,
}

impl IndicatorValue {
    pub const fn value(&self) -> Option<i64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Invalid => None,
        }
    }
}

/// Coerces a vehicle or victim count.
///
/// Missing becomes `0`; integers and integral decimals are kept.
pub fn parse_count(raw: Option<&str>) -> IndicatorValue {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => IndicatorValue::Value(0),
        Some(value) => parse_i64(value).map_or(IndicatorValue::Invalid, IndicatorValue::Value),
    }
}

/// Coerces an `S`/`N` incident sub-type flag to `1`/`0`.
///
/// Missing becomes `0`.
pub fn parse_flag(raw: Option<&str>) -> IndicatorValue {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => IndicatorValue::Value(0),
        Some(value) if value.eq_ignore_ascii_case("S") => IndicatorValue::Value(1),
        Some(value) if value.eq_ignore_ascii_case("N") => IndicatorValue::Value(0),
        Some(_) => IndicatorValue::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_missing_is_zero() {
        assert_eq!(parse_count(None), IndicatorValue::Value(0));
        assert_eq!(parse_count(Some(" ")), IndicatorValue::Value(0));
    }

    #[test]
    fn test_count_keeps_numbers() {
        assert_eq!(parse_count(Some("3")), IndicatorValue::Value(3));
        assert_eq!(parse_count(Some("2.0")), IndicatorValue::Value(2));
        assert_eq!(parse_count(Some("dois")), IndicatorValue::Invalid);
        assert_eq!(parse_count(Some("1.5")), IndicatorValue::Invalid);
    }

    #[test]
    fn test_flags() {
        assert_eq!(parse_flag(Some("S")), IndicatorValue::Value(1));
        assert_eq!(parse_flag(Some("s")), IndicatorValue::Value(1));
        assert_eq!(parse_flag(Some("N")), IndicatorValue::Value(0));
        assert_eq!(parse_flag(None), IndicatorValue::Value(0));
        assert_eq!(parse_flag(Some("X")), IndicatorValue::Invalid);
        assert_eq!(parse_flag(Some("X")).value(), None);
    }
}
