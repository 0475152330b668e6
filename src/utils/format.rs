//! Display formatting

/// Render seconds as `MM:SS`.
///
/// Both fields are padded to two digits; the minute field keeps growing past
/// 99 instead of rolling over into hours.
pub fn format_time(total_seconds: u64) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(59), "00:59");
        assert_eq!(format_time(60), "01:00");
        assert_eq!(format_time(600), "10:00");
        assert_eq!(format_time(3661), "61:01");
    }

    #[test]
    fn test_format_time_long_durations() {
        assert_eq!(format_time(7500), "125:00");
        assert_eq!(format_time(5999), "99:59");
        assert_eq!(format_time(6000), "100:00");
    }
}
