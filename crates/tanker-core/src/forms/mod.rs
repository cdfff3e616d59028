//! Field validation for every data-entry screen.
//!
//! A form holds the raw text of its inputs (date and time fields already
//! masked by `date_input`). `validate` either produces the matching `New*`
//! record or a `FormErrors` with one message per failing field, in field
//! order.

mod account;
mod bank;
mod booking;
mod driver;
mod errors;
mod expense;
mod rules;
mod vehicle;

pub use account::{LoginForm, ProfileForm, ProfileUpdate, RegistrationForm};
pub use bank::BankAccountForm;
pub use booking::BookingForm;
pub use driver::DriverForm;
pub use errors::{FieldError, FormErrors};
pub use expense::DieselExpenseForm;
pub use vehicle::VehicleForm;
