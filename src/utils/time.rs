use chrono::{NaiveTime, Timelike};

use crate::error::AppError;

/// Parse a departure time of day. Seconds are accepted and dropped.
pub(crate) fn parse_time_of_day(s: &str) -> Result<NaiveTime, AppError> {
    let trimmed = s.trim();
    // Try HHMM
    if trimmed.len() == 4 && trimmed.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(t) = NaiveTime::parse_from_str(trimmed, "%H%M") {
            return Ok(t);
        }
    }
    // Try HH:MM, then HH:MM:SS
    for fmt in ["%H:%M", "%H:%M:%S"] {
        if let Ok(t) = NaiveTime::parse_from_str(trimmed, fmt) {
            return Ok(t.with_second(0).unwrap_or(t));
        }
    }
    Err(AppError::InvalidTime {
        input: trimmed.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_colon_form() {
        let t = parse_time_of_day("14:30").unwrap();
        assert_eq!(t.format("%H:%M").to_string(), "14:30");
    }

    #[test]
    fn parses_compact_form() {
        let t = parse_time_of_day("0905").unwrap();
        assert_eq!(t.format("%H:%M").to_string(), "09:05");
    }

    #[test]
    fn drops_seconds() {
        let t = parse_time_of_day("23:59:42").unwrap();
        assert_eq!(t.format("%H:%M:%S").to_string(), "23:59:00");
    }

    #[test]
    fn trims_whitespace() {
        assert!(parse_time_of_day("  07:00 ").is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        let err = parse_time_of_day("25:99").unwrap_err();
        assert!(err.to_string().contains("25:99"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_time_of_day("noon").is_err());
        assert!(parse_time_of_day("").is_err());
    }
}
