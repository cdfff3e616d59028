//! Keystroke masking for date and time inputs.

/// Length of a complete `DD/MM/YYYY` mask.
pub const DATE_MASK_LEN: usize = 10;

/// Length of a complete `HH:MM` mask.
pub const TIME_MASK_LEN: usize = 5;

const DATE_DIGITS: usize = 8;
const TIME_DIGITS: usize = 4;

/// Keep only ASCII digits, at most `limit` of them.
pub(crate) fn digits(raw: &str, limit: usize) -> String {
    raw.chars().filter(char::is_ascii_digit).take(limit).collect()
}

/// Format raw keystrokes as a (possibly partial) `DD/MM/YYYY` mask.
///
/// Separators appear only once the digits after them exist, so the output
/// tracks what the user has typed so far: `"1"`, `"15"`, `"15/0"`,
/// `"15/06/2"`, `"15/06/2025"`. Anything beyond eight digits is dropped.
pub fn format_digits_as_date(raw: &str) -> String {
    let digits = digits(raw, DATE_DIGITS);
    match digits.len() {
        0..=2 => digits,
        3..=4 => format!("{}/{}", &digits[..2], &digits[2..]),
        _ => format!("{}/{}/{}", &digits[..2], &digits[2..4], &digits[4..]),
    }
}

/// Format raw keystrokes as a (possibly partial) `HH:MM` mask.
pub fn format_digits_as_time(raw: &str) -> String {
    let digits = digits(raw, TIME_DIGITS);
    if digits.len() <= 2 {
        digits
    } else {
        format!("{}:{}", &digits[..2], &digits[2..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_mask_brackets() {
        assert_eq!(format_digits_as_date(""), "");
        assert_eq!(format_digits_as_date("1"), "1");
        assert_eq!(format_digits_as_date("15"), "15");
        assert_eq!(format_digits_as_date("150"), "15/0");
        assert_eq!(format_digits_as_date("1506"), "15/06");
        assert_eq!(format_digits_as_date("15062"), "15/06/2");
        assert_eq!(format_digits_as_date("15062025"), "15/06/2025");
    }

    #[test]
    fn test_date_mask_strips_and_truncates() {
        assert_eq!(format_digits_as_date("15/06/2025"), "15/06/2025");
        assert_eq!(format_digits_as_date("15-06-2025 extra 99"), "15/06/2025");
        assert_eq!(format_digits_as_date("abc"), "");
        assert_eq!(format_digits_as_date("150620251234"), "15/06/2025");
    }

    #[test]
    fn test_date_mask_handles_backspace_over_separator() {
        // Deleting the digit after a separator leaves the separator behind in
        // the raw text; re-masking drops it.
        assert_eq!(format_digits_as_date("15/"), "15");
        assert_eq!(format_digits_as_date("15/06/"), "15/06");
    }

    #[test]
    fn test_time_mask() {
        assert_eq!(format_digits_as_time(""), "");
        assert_eq!(format_digits_as_time("0"), "0");
        assert_eq!(format_digits_as_time("02"), "02");
        assert_eq!(format_digits_as_time("023"), "02:3");
        assert_eq!(format_digits_as_time("0230"), "02:30");
        assert_eq!(format_digits_as_time("02:30:45"), "02:30");
    }

    #[test]
    fn test_non_ascii_digits_are_ignored() {
        // Arabic-Indic digits are numeric but not ASCII.
        assert_eq!(format_digits_as_date("\u{0661}\u{0662}12"), "12");
    }
}
