//! Date and time input engine.
//!
//! Every form that takes a date or a time funnels keystrokes through this
//! module:
//!
//! - **mask**: turn raw keystrokes into `DD/MM/YYYY` and `HH:MM` masks
//! - **parse**: turn a completed mask into a `CalendarDate` or `TimeOfDay`
//! - **policy**: check a date against a temporal constraint
//! - **clock**: the source of "today"
//!
//! All operations are pure. Failures are reported as `None` or
//! `ValidationOutcome::Invalid`, never as errors or panics.

mod clock;
mod mask;
mod parse;
mod policy;

pub use clock::{Clock, FixedClock, SystemClock};
pub use mask::{format_digits_as_date, format_digits_as_time, DATE_MASK_LEN, TIME_MASK_LEN};
pub use parse::{parse_date, parse_time, CalendarDate, Meridiem, ParseMeridiemError, TimeOfDay};
pub use policy::{
    validate_against_policy, validate_date_field, validate_time_field, DatePolicy,
    InvalidReason, ValidationOutcome,
};
