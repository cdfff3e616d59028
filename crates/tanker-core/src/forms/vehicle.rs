//! Add-vehicle form.

use serde::{Deserialize, Serialize};

use crate::date_input::{Clock, DatePolicy};
use crate::storage::NewVehicle;

use super::errors::FormErrors;
use super::rules::{date_field, positive_number, text_required, DateMessages, DATE_FORMAT_MESSAGE};

const PAST_DATE_MESSAGE: &str = "Cannot accept past date";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleForm {
    pub vehicle_number: String,
    pub capacity: String,
    pub last_service_date: String,
    pub next_service_date: String,
    pub insurance_expiry_date: String,
}

impl VehicleForm {
    /// Validate the form. The last service may be any date; the next service
    /// and insurance expiry may not lie in the past.
    pub fn validate<C>(&self, clock: &C) -> Result<NewVehicle, FormErrors>
    where
        C: Clock + ?Sized,
    {
        let mut errors = FormErrors::new();

        let vehicle_number = text_required(
            &mut errors,
            "vehicleNumber",
            &self.vehicle_number,
            "Vehicle number is required",
        )
        .to_ascii_uppercase();

        let capacity_liters = if self.capacity.trim().is_empty() {
            errors.push("capacity", "Capacity is required");
            None
        } else {
            let capacity = positive_number(&self.capacity);
            if capacity.is_none() {
                errors.push("capacity", "Please enter a valid capacity");
            }
            capacity
        };

        let last_service_date = date_field(
            &mut errors,
            "lastServiceDate",
            &self.last_service_date,
            DatePolicy::Any,
            clock,
            &DateMessages {
                required: "Last service date is required",
                malformed: DATE_FORMAT_MESSAGE,
                policy: DATE_FORMAT_MESSAGE,
            },
        );

        let next_service_date = date_field(
            &mut errors,
            "nextServiceDate",
            &self.next_service_date,
            DatePolicy::NotInPast,
            clock,
            &DateMessages {
                required: "Next service date is required",
                malformed: DATE_FORMAT_MESSAGE,
                policy: PAST_DATE_MESSAGE,
            },
        );

        let insurance_expiry_date = date_field(
            &mut errors,
            "insuranceExpiryDate",
            &self.insurance_expiry_date,
            DatePolicy::NotInPast,
            clock,
            &DateMessages {
                required: "Insurance expiry date is required",
                malformed: DATE_FORMAT_MESSAGE,
                policy: PAST_DATE_MESSAGE,
            },
        );

        match (
            capacity_liters,
            last_service_date,
            next_service_date,
            insurance_expiry_date,
        ) {
            (Some(capacity_liters), Some(last), Some(next), Some(insurance))
                if errors.is_empty() =>
            {
                Ok(NewVehicle {
                    vehicle_number,
                    capacity_liters,
                    last_service_date: last,
                    next_service_date: next,
                    insurance_expiry_date: insurance,
                })
            }
            _ => Err(errors),
        }
    }
}
