//! Display formatting for raw violation time tokens.
//!
//! Upstream times are nominally 24-hour `HHMM` but arrive with inconsistent
//! length (`"730"`) and an optional trailing observation letter (`"0730A"`).

/// Formats a raw time token as a 12-hour clock string such as `"7:30 AM"`.
///
/// Non-digits are stripped and the remaining digits are left-padded with
/// zeros to four characters *before* the hour and minute are sliced out, so
/// `"730"` becomes `"0730"` and not `"73"` + `"0"`. Hours are not range
/// checked: `"9900"` renders as `"3:00 PM"`. An empty token is returned
/// unchanged.
#[must_use]
pub fn format_violation_time(token: &str) -> String {
    if token.is_empty() {
        return token.to_string();
    }

    let digits: String = token.chars().filter(char::is_ascii_digit).collect();
    let padded = format!("{digits:0>4}");

    let (hour_digits, rest) = padded.split_at(2);
    let minute_digits = &rest[..2];

    let Ok(hour) = hour_digits.parse::<u32>() else {
        return token.to_string();
    };

    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    let meridiem = if hour >= 12 { "PM" } else { "AM" };

    format!("{display_hour}:{minute_digits} {meridiem}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_reference_tokens() {
        assert_eq!(format_violation_time("0730A"), "7:30 AM");
        assert_eq!(format_violation_time("730"), "7:30 AM");
        assert_eq!(format_violation_time("1430"), "2:30 PM");
        assert_eq!(format_violation_time(""), "");
        assert_eq!(format_violation_time("0000"), "12:00 AM");
        assert_eq!(format_violation_time("1200"), "12:00 PM");
    }

    #[test]
    fn pads_whole_token_before_slicing() {
        assert_eq!(format_violation_time("5"), "12:05 AM");
        assert_eq!(format_violation_time("45"), "12:45 AM");
        assert_eq!(format_violation_time("945P"), "9:45 AM");
    }

    #[test]
    fn ignores_trailing_observation_letter() {
        assert_eq!(format_violation_time("1145P"), "11:45 AM");
        assert_eq!(format_violation_time("2359A"), "11:59 PM");
    }

    #[test]
    fn out_of_range_hours_pass_through_the_same_arithmetic() {
        assert_eq!(format_violation_time("9900"), "3:00 PM");
        assert_eq!(format_violation_time("2400"), "12:00 PM");
        assert_eq!(format_violation_time("0075"), "12:75 AM");
    }

    #[test]
    fn extra_digits_use_the_first_four() {
        assert_eq!(format_violation_time("12345"), "12:34 PM");
    }

    #[test]
    fn digitless_token_pads_to_midnight() {
        assert_eq!(format_violation_time("A"), "12:00 AM");
    }
}
