//! Add-driver form.

use serde::{Deserialize, Serialize};

use crate::date_input::{Clock, DatePolicy};
use crate::storage::NewDriver;

use super::errors::FormErrors;
use super::rules::{
    date_field, is_mobile_number, positive_number, text_min, DateMessages, DATE_FORMAT_MESSAGE,
};

const PHONE_MESSAGE: &str = "Enter a valid 10-digit phone number";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverForm {
    pub name: String,
    pub phone_number: String,
    pub license_number: String,
    pub license_expiry_date: String,
    pub address: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub joining_date: String,
    pub monthly_salary: String,
}

impl DriverForm {
    /// Validate every field. The licence must still be valid tomorrow and the
    /// driver cannot have joined in the future.
    pub fn validate<C>(&self, clock: &C) -> Result<NewDriver, FormErrors>
    where
        C: Clock + ?Sized,
    {
        let mut errors = FormErrors::new();

        let name = text_min(
            &mut errors,
            "name",
            &self.name,
            2,
            "Name is required",
            "Name must be at least 2 characters",
        );

        let phone_number = self.phone_number.trim().to_string();
        if phone_number.is_empty() {
            errors.push("phoneNumber", "Phone number is required");
        } else if !is_mobile_number(&phone_number) {
            errors.push("phoneNumber", PHONE_MESSAGE);
        }

        let license_number = text_min(
            &mut errors,
            "licenseNumber",
            &self.license_number,
            5,
            "License number is required",
            "License number must be at least 5 characters",
        );

        let license_expiry_date = date_field(
            &mut errors,
            "licenseExpiryDate",
            &self.license_expiry_date,
            DatePolicy::NotExpired,
            clock,
            &DateMessages {
                required: DATE_FORMAT_MESSAGE,
                malformed: DATE_FORMAT_MESSAGE,
                policy: "License must not be expired",
            },
        );

        let address = text_min(
            &mut errors,
            "address",
            &self.address,
            10,
            "Address is required",
            "Address must be at least 10 characters",
        );

        let emergency_contact_name = text_min(
            &mut errors,
            "emergencyContactName",
            &self.emergency_contact_name,
            2,
            "Emergency contact name is required",
            "Emergency contact name must be at least 2 characters",
        );

        let emergency_contact_phone = self.emergency_contact_phone.trim().to_string();
        if emergency_contact_phone.is_empty() {
            errors.push("emergencyContactPhone", "Emergency contact phone is required");
        } else if !is_mobile_number(&emergency_contact_phone) {
            errors.push("emergencyContactPhone", PHONE_MESSAGE);
        }

        let joining_date = date_field(
            &mut errors,
            "joiningDate",
            &self.joining_date,
            DatePolicy::NotInFuture,
            clock,
            &DateMessages {
                required: DATE_FORMAT_MESSAGE,
                malformed: DATE_FORMAT_MESSAGE,
                policy: "Joining date cannot be in the future",
            },
        );

        let monthly_salary = if self.monthly_salary.trim().is_empty() {
            errors.push("monthlySalary", "Monthly salary is required");
            None
        } else {
            let salary = positive_number(&self.monthly_salary);
            if salary.is_none() {
                errors.push("monthlySalary", "Enter a valid salary amount");
            }
            salary
        };

        match (license_expiry_date, joining_date, monthly_salary) {
            (Some(license_expiry_date), Some(joining_date), Some(monthly_salary))
                if errors.is_empty() =>
            {
                Ok(NewDriver {
                    name,
                    phone_number,
                    license_number,
                    license_expiry_date,
                    address,
                    emergency_contact_name,
                    emergency_contact_phone,
                    joining_date,
                    monthly_salary,
                })
            }
            _ => Err(errors),
        }
    }
}
