//! Book-a-tanker form.

use serde::{Deserialize, Serialize};

use crate::date_input::{validate_time_field, Clock, DatePolicy, Meridiem};
use crate::storage::{NewOrder, Order, TankerSize};

use super::errors::FormErrors;
use super::rules::{date_field, optional_text, text_required, DateMessages, DATE_FORMAT_MESSAGE};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingForm {
    pub name: String,
    pub address: String,
    /// `DD/MM/YYYY` mask
    pub date: String,
    /// `HH:MM` mask, read with `meridiem`
    pub time: String,
    pub meridiem: Meridiem,
    pub tanker_size: Option<TankerSize>,
    pub agency: String,
    pub comments: String,
}

impl BookingForm {
    /// Start a new booking from a previous order: same address, size and
    /// agency; everything else left blank.
    pub fn reorder(order: &Order) -> Self {
        Self {
            address: order.address.clone(),
            tanker_size: Some(order.tanker_size),
            agency: order.agency.clone(),
            ..Self::default()
        }
    }

    /// Validate the booking. Delivery may be today but not earlier.
    pub fn validate<C>(&self, clock: &C) -> Result<NewOrder, FormErrors>
    where
        C: Clock + ?Sized,
    {
        let mut errors = FormErrors::new();

        let name = text_required(&mut errors, "name", &self.name, "Name is required");
        let address = text_required(&mut errors, "address", &self.address, "Address is required");

        let date = date_field(
            &mut errors,
            "date",
            &self.date,
            DatePolicy::NotInPast,
            clock,
            &DateMessages {
                required: DATE_FORMAT_MESSAGE,
                malformed: DATE_FORMAT_MESSAGE,
                policy: "Date cannot be in the past",
            },
        );

        let time = match validate_time_field(&self.time, self.meridiem) {
            Ok(time) => Some(time),
            Err(_) => {
                errors.push("time", "Enter a valid time (HH:MM)");
                None
            }
        };

        if self.tanker_size.is_none() {
            errors.push("tankerSize", "Select tanker quantity");
        }

        let agency = text_required(&mut errors, "agency", &self.agency, "Agency is required");

        match (date, time, self.tanker_size) {
            (Some(date), Some(time), Some(tanker_size)) if errors.is_empty() => Ok(NewOrder {
                name,
                address,
                date,
                time,
                tanker_size,
                agency,
                comments: optional_text(&self.comments),
                user_id: None,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_input::{parse_date, FixedClock, TimeOfDay};
    use chrono::Utc;
    use uuid::Uuid;

    fn clock() -> FixedClock {
        FixedClock::new(parse_date("15/06/2025").unwrap())
    }

    fn valid_form() -> BookingForm {
        BookingForm {
            name: "Asha Patil".into(),
            address: "12 Lake Road, Pune".into(),
            date: "15/06/2025".into(),
            time: "07:15".into(),
            meridiem: Meridiem::Pm,
            tanker_size: Some(TankerSize::TenThousand),
            agency: "Blue Water Suppliers".into(),
            comments: "  ".into(),
        }
    }

    #[test]
    fn test_valid_booking_today() {
        let order = valid_form().validate(&clock()).expect("valid booking");
        assert_eq!(order.time, TimeOfDay { hour24: 19, minute: 15 });
        assert_eq!(order.comments, None);
        assert_eq!(order.tanker_size, TankerSize::TenThousand);
    }

    #[test]
    fn test_booking_in_past() {
        let form = BookingForm {
            date: "14/06/2025".into(),
            ..valid_form()
        };
        let errors = form.validate(&clock()).unwrap_err();
        assert_eq!(errors.get("date"), Some("Date cannot be in the past"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_missing_everything() {
        let errors = BookingForm::default().validate(&clock()).unwrap_err();
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("address"), Some("Address is required"));
        assert_eq!(errors.get("date"), Some(DATE_FORMAT_MESSAGE));
        assert_eq!(errors.get("time"), Some("Enter a valid time (HH:MM)"));
        assert_eq!(errors.get("tankerSize"), Some("Select tanker quantity"));
        assert_eq!(errors.get("agency"), Some("Agency is required"));
    }

    #[test]
    fn test_invalid_time() {
        let form = BookingForm {
            time: "13:00".into(),
            ..valid_form()
        };
        let errors = form.validate(&clock()).unwrap_err();
        assert_eq!(errors.get("time"), Some("Enter a valid time (HH:MM)"));
    }

    #[test]
    fn test_reorder_prefills() {
        let new = valid_form().validate(&clock()).unwrap();
        let order = Order::from_new(new, Uuid::new_v4(), Utc::now());
        let form = BookingForm::reorder(&order);
        assert_eq!(form.address, "12 Lake Road, Pune");
        assert_eq!(form.agency, "Blue Water Suppliers");
        assert_eq!(form.tanker_size, Some(TankerSize::TenThousand));
        assert!(form.date.is_empty());
        assert!(form.name.is_empty());
    }
}
