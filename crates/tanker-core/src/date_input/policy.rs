//! Temporal constraints on entered dates.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::clock::Clock;
use super::mask::{DATE_MASK_LEN, TIME_MASK_LEN};
use super::parse::{parse_date, parse_time, CalendarDate, Meridiem, TimeOfDay};

/// The constraint a date field enforces relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePolicy {
    /// Any real calendar date.
    #[default]
    Any,
    /// Today or later (bookings, service due dates).
    NotInPast,
    /// Today or earlier (joining dates).
    NotInFuture,
    /// Strictly after today (licence and insurance expiry).
    NotExpired,
}

/// Why a date or time input was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    Required,
    Malformed,
    InPast,
    InFuture,
    Expired,
}

impl InvalidReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Malformed => "malformed",
            Self::InPast => "in_past",
            Self::InFuture => "in_future",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of checking a date against a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum ValidationOutcome {
    Valid,
    Invalid(InvalidReason),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn reason(&self) -> Option<InvalidReason> {
        match self {
            Self::Valid => None,
            Self::Invalid(reason) => Some(*reason),
        }
    }
}

/// Check `date` against `policy`, comparing calendar days only.
pub fn validate_against_policy<C>(date: CalendarDate, policy: DatePolicy, clock: &C) -> ValidationOutcome
where
    C: Clock + ?Sized,
{
    let today = clock.today();
    let violation = match policy {
        DatePolicy::Any => None,
        DatePolicy::NotInPast => (date < today).then_some(InvalidReason::InPast),
        DatePolicy::NotInFuture => (date > today).then_some(InvalidReason::InFuture),
        DatePolicy::NotExpired => (date <= today).then_some(InvalidReason::Expired),
    };

    match violation {
        Some(reason) => ValidationOutcome::Invalid(reason),
        None => ValidationOutcome::Valid,
    }
}

/// Full check of a date field as a form submits it.
///
/// Empty input is `Required`; anything shorter than a full `DD/MM/YYYY`
/// mask, or not a real date, is `Malformed`; the policy decides the rest.
pub fn validate_date_field<C>(
    raw: &str,
    policy: DatePolicy,
    clock: &C,
) -> Result<CalendarDate, InvalidReason>
where
    C: Clock + ?Sized,
{
    if raw.trim().is_empty() {
        return Err(InvalidReason::Required);
    }
    if raw.len() < DATE_MASK_LEN {
        return Err(InvalidReason::Malformed);
    }
    let date = parse_date(raw).ok_or(InvalidReason::Malformed)?;
    match validate_against_policy(date, policy, clock) {
        ValidationOutcome::Valid => Ok(date),
        ValidationOutcome::Invalid(reason) => Err(reason),
    }
}

/// Full check of an `HH:MM` field as a form submits it.
pub fn validate_time_field(raw: &str, meridiem: Meridiem) -> Result<TimeOfDay, InvalidReason> {
    if raw.trim().is_empty() {
        return Err(InvalidReason::Required);
    }
    if raw.len() < TIME_MASK_LEN {
        return Err(InvalidReason::Malformed);
    }
    parse_time(raw, meridiem).ok_or(InvalidReason::Malformed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_input::FixedClock;

    fn date(mask: &str) -> CalendarDate {
        parse_date(mask).expect("valid test date")
    }

    fn clock(mask: &str) -> FixedClock {
        FixedClock::new(date(mask))
    }

    #[test]
    fn test_not_in_past_boundaries() {
        let entered = date("15/06/2025");
        assert_eq!(
            validate_against_policy(entered, DatePolicy::NotInPast, &clock("16/06/2025")),
            ValidationOutcome::Invalid(InvalidReason::InPast)
        );
        assert!(validate_against_policy(entered, DatePolicy::NotInPast, &clock("15/06/2025")).is_valid());
        assert!(validate_against_policy(entered, DatePolicy::NotInPast, &clock("14/06/2025")).is_valid());
    }

    #[test]
    fn test_not_expired_requires_strictly_future() {
        let today = clock("15/06/2025");
        assert_eq!(
            validate_against_policy(date("15/06/2025"), DatePolicy::NotExpired, &today).reason(),
            Some(InvalidReason::Expired)
        );
        assert_eq!(
            validate_against_policy(date("01/01/2020"), DatePolicy::NotExpired, &today).reason(),
            Some(InvalidReason::Expired)
        );
        assert!(validate_against_policy(date("16/06/2025"), DatePolicy::NotExpired, &today).is_valid());
    }

    #[test]
    fn test_not_in_future() {
        let today = clock("15/06/2025");
        assert_eq!(
            validate_against_policy(date("16/06/2025"), DatePolicy::NotInFuture, &today).reason(),
            Some(InvalidReason::InFuture)
        );
        assert!(validate_against_policy(date("15/06/2025"), DatePolicy::NotInFuture, &today).is_valid());
        assert!(validate_against_policy(date("01/01/1999"), DatePolicy::NotInFuture, &today).is_valid());
    }

    #[test]
    fn test_any_policy_accepts_everything() {
        let today = clock("15/06/2025");
        for mask in ["01/01/1000", "15/06/2025", "31/12/9999"] {
            assert!(validate_against_policy(date(mask), DatePolicy::Any, &today).is_valid());
        }
    }

    #[test]
    fn test_date_field_pipeline() {
        let today = clock("15/06/2025");
        assert_eq!(
            validate_date_field("", DatePolicy::Any, &today),
            Err(InvalidReason::Required)
        );
        assert_eq!(
            validate_date_field("   ", DatePolicy::Any, &today),
            Err(InvalidReason::Required)
        );
        assert_eq!(
            validate_date_field("15/06/202", DatePolicy::Any, &today),
            Err(InvalidReason::Malformed)
        );
        assert_eq!(
            validate_date_field("31/02/2025", DatePolicy::Any, &today),
            Err(InvalidReason::Malformed)
        );
        assert_eq!(
            validate_date_field("14/06/2025", DatePolicy::NotInPast, &today),
            Err(InvalidReason::InPast)
        );
        assert_eq!(
            validate_date_field("20/06/2025", DatePolicy::NotInPast, &today),
            Ok(date("20/06/2025"))
        );
    }

    #[test]
    fn test_time_field_pipeline() {
        assert_eq!(validate_time_field("", Meridiem::Am), Err(InvalidReason::Required));
        assert_eq!(validate_time_field("2:30", Meridiem::Am), Err(InvalidReason::Malformed));
        assert_eq!(validate_time_field("13:00", Meridiem::Am), Err(InvalidReason::Malformed));
        assert_eq!(
            validate_time_field("02:30", Meridiem::Pm),
            Ok(TimeOfDay { hour24: 14, minute: 30 })
        );
    }

    #[test]
    fn test_outcome_serialization() {
        let invalid = ValidationOutcome::Invalid(InvalidReason::InPast);
        assert_eq!(
            serde_json::to_value(invalid).unwrap(),
            serde_json::json!({"outcome": "invalid", "reason": "in_past"})
        );
        assert_eq!(
            serde_json::to_value(ValidationOutcome::Valid).unwrap(),
            serde_json::json!({"outcome": "valid"})
        );
    }
}
