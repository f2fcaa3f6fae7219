//! Timestamp parsing and display formatting for transcript times.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimecodeError {
    #[error("malformed timestamp '{0}'")]
    Malformed(String),
}

/// Convert a textual timestamp into seconds.
///
/// Accepts either `H:MM:SS[.mmm]` or a bare number of seconds. The value is
/// taken at face value, no range checks are applied beyond parse success.
pub fn parse_timestamp(timestamp: &str) -> Result<f64, TimecodeError> {
    let malformed = || TimecodeError::Malformed(timestamp.to_string());
    let parts: Vec<&str> = timestamp.split(':').collect();
    match parts.as_slice() {
        [seconds] => seconds.trim().parse::<f64>().map_err(|_| malformed()),
        [hours, minutes, seconds] => {
            let hours: i64 = hours.trim().parse().map_err(|_| malformed())?;
            let minutes: i64 = minutes.trim().parse().map_err(|_| malformed())?;
            let seconds: f64 = seconds.trim().parse().map_err(|_| malformed())?;
            Ok(hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds)
        }
        _ => Err(malformed()),
    }
}

/// Format seconds as `MM:SS`, or `HH:MM:SS` once there is a whole hour.
/// Sub-second remainders are truncated.
pub fn format_time(seconds: f64) -> String {
    let total = seconds as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_timestamps() {
        let secs = parse_timestamp("00:22:10.660").unwrap();
        assert!((secs - 1330.66).abs() < 1e-9);
    }

    #[test]
    fn parses_bare_seconds() {
        assert_eq!(parse_timestamp("5").unwrap(), 5.0);
        assert_eq!(parse_timestamp("12.25").unwrap(), 12.25);
    }

    #[test]
    fn rejects_two_token_timestamps() {
        assert!(matches!(
            parse_timestamp("10:20"),
            Err(TimecodeError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("abc").is_err());
        assert!(parse_timestamp("aa:bb:cc").is_err());
    }

    #[test]
    fn formats_without_hours() {
        assert_eq!(format_time(125.0), "02:05");
        assert_eq!(format_time(125.9), "02:05");
    }

    #[test]
    fn formats_with_hours() {
        assert_eq!(format_time(3725.0), "01:02:05");
    }

    #[test]
    fn formats_zero() {
        assert_eq!(format_time(0.0), "00:00");
    }
}
