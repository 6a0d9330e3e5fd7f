/// Formats a media position as `minutes:seconds`
///
/// Seconds are zero-padded below ten; minutes are never wrapped into hours.
/// Non-finite and negative positions render as `0:00`.
#[must_use]
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let whole = seconds.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time_table() {
        let cases = [
            (0.0, "0:00"),
            (5.0, "0:05"),
            (9.99, "0:09"),
            (10.0, "0:10"),
            (59.9, "0:59"),
            (60.0, "1:00"),
            (65.0, "1:05"),
            (600.5, "10:00"),
            (3661.0, "61:01"),
        ];
        for (input, expected) in cases {
            assert_eq!(format_time(input), expected, "input {input}");
        }
    }

    #[test]
    fn test_format_time_invalid_input() {
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
        assert_eq!(format_time(f64::NEG_INFINITY), "0:00");
        assert_eq!(format_time(-3.0), "0:00");
    }
}
