//! Rendering of remaining-watch durations for log output.

use std::time::Duration;

/// Format a duration as total minutes and zero-padded seconds.
///
/// The minutes figure is not wrapped at an hour: 125 seconds renders as
/// `"2:05"`, 3725 seconds as `"62:05"`.
pub fn format_remaining(remaining: Duration) -> String {
    let total = remaining.as_secs();
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pads_seconds_to_two_digits() {
        assert_eq!(format_remaining(Duration::from_secs(125)), "2:05");
    }

    #[test]
    fn test_zero_duration() {
        assert_eq!(format_remaining(Duration::from_secs(0)), "0:00");
    }

    #[test]
    fn test_minutes_do_not_wrap_at_an_hour() {
        assert_eq!(format_remaining(Duration::from_secs(3725)), "62:05");
    }

    #[test]
    fn test_subsecond_part_is_dropped() {
        assert_eq!(format_remaining(Duration::from_millis(59_900)), "0:59");
    }
}
