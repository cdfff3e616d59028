//! Shared field rules.

use crate::date_input::{validate_date_field, Clock, DatePolicy, InvalidReason};

use super::errors::FormErrors;

pub(crate) const DATE_FORMAT_MESSAGE: &str = "Enter a valid date (DD/MM/YYYY)";

/// Trimmed text that must be present and at least `min` characters long.
pub(crate) fn text_min(
    errors: &mut FormErrors,
    field: &'static str,
    value: &str,
    min: usize,
    required: &str,
    too_short: &str,
) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(field, required);
    } else if trimmed.chars().count() < min {
        errors.push(field, too_short);
    }
    trimmed.to_string()
}

/// Trimmed text that must be present.
pub(crate) fn text_required(
    errors: &mut FormErrors,
    field: &'static str,
    value: &str,
    required: &str,
) -> String {
    text_min(errors, field, value, 1, required, required)
}

/// Trimmed text, `None` when blank.
pub(crate) fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Indian mobile number: exactly ten digits, the first one 6–9.
pub(crate) fn is_mobile_number(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().all(u8::is_ascii_digit)
        && matches!(bytes[0], b'6'..=b'9')
}

/// Any input containing exactly ten digits once punctuation is removed.
pub(crate) fn ten_digits(value: &str) -> Option<String> {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    (digits.len() == 10).then_some(digits)
}

/// A finite number greater than zero.
pub(crate) fn positive_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n > 0.0)
}

/// Messages a date field shows for each failure.
pub(crate) struct DateMessages<'a> {
    pub required: &'a str,
    pub malformed: &'a str,
    pub policy: &'a str,
}

/// Run a date field through the input engine and translate the reason.
pub(crate) fn date_field<C>(
    errors: &mut FormErrors,
    field: &'static str,
    value: &str,
    policy: DatePolicy,
    clock: &C,
    messages: &DateMessages<'_>,
) -> Option<crate::date_input::CalendarDate>
where
    C: Clock + ?Sized,
{
    match validate_date_field(value, policy, clock) {
        Ok(date) => Some(date),
        Err(reason) => {
            let message = match reason {
                InvalidReason::Required => messages.required,
                InvalidReason::Malformed => messages.malformed,
                InvalidReason::InPast | InvalidReason::InFuture | InvalidReason::Expired => {
                    messages.policy
                }
            };
            errors.push(field, message);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_number() {
        assert!(is_mobile_number("9876543210"));
        assert!(is_mobile_number("6000000000"));
        assert!(!is_mobile_number("5876543210"));
        assert!(!is_mobile_number("987654321"));
        assert!(!is_mobile_number("98765 43210"));
        assert!(!is_mobile_number("+919876543210"));
    }

    #[test]
    fn test_ten_digits_strips_punctuation() {
        assert_eq!(ten_digits("(987) 654-3210"), Some("9876543210".to_string()));
        assert_eq!(ten_digits("12345"), None);
    }

    #[test]
    fn test_positive_number() {
        assert_eq!(positive_number(" 15000 "), Some(15000.0));
        assert_eq!(positive_number("12.5"), Some(12.5));
        assert_eq!(positive_number("0"), None);
        assert_eq!(positive_number("-3"), None);
        assert_eq!(positive_number("abc"), None);
        assert_eq!(positive_number("inf"), None);
    }

    #[test]
    fn test_text_min_trims() {
        let mut errors = FormErrors::new();
        assert_eq!(text_min(&mut errors, "name", "  Al  ", 2, "req", "short"), "Al");
        assert!(errors.is_empty());
        text_min(&mut errors, "name", " A ", 2, "req", "short");
        assert_eq!(errors.get("name"), Some("short"));
    }
}
