//! Clock parsing to seconds-of-day.

use chrono::{DateTime, NaiveTime, Timelike};

use crate::InputError;

/// Parses a clock value into integer seconds.
///
/// Accepted forms:
/// - plain integer seconds (`"34215"`)
/// - a clock string (`"09:30:15"` or `"9:30:15"`)
/// - an RFC 3339 timestamp (`"2024-06-01T10:30:00+02:00"`), collapsed to
///   its local seconds-of-day
///
/// All punch sources feeding one runner must stick to forms that share a
/// time base; the engine compares the resulting integers directly.
pub fn parse_clock(value: &str) -> Result<i64, InputError> {
    let value = value.trim();
    if let Ok(seconds) = value.parse::<i64>() {
        return Ok(seconds);
    }
    if let Ok(time) = NaiveTime::parse_from_str(value, "%H:%M:%S") {
        return Ok(seconds_of_day(time));
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(seconds_of_day(timestamp.time()));
    }
    Err(InputError::Clock {
        value: value.to_string(),
    })
}

fn seconds_of_day(time: NaiveTime) -> i64 {
    i64::from(time.num_seconds_from_midnight())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integer_seconds() {
        assert_eq!(parse_clock("34215").unwrap(), 34_215);
        assert_eq!(parse_clock("0").unwrap(), 0);
    }

    #[test]
    fn parses_clock_string() {
        assert_eq!(parse_clock("09:30:15").unwrap(), 9 * 3600 + 30 * 60 + 15);
        assert_eq!(parse_clock("9:30:15").unwrap(), 9 * 3600 + 30 * 60 + 15);
        assert_eq!(parse_clock("00:00:00").unwrap(), 0);
    }

    #[test]
    fn collapses_rfc3339_to_seconds_of_day() {
        assert_eq!(
            parse_clock("2024-06-01T10:30:00+02:00").unwrap(),
            10 * 3600 + 30 * 60
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_clock("half past nine").is_err());
        assert!(parse_clock("10:75:00").is_err());
        assert!(parse_clock("").is_err());
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(parse_clock(" 10:00:00 ").unwrap(), 36_000);
    }
}
