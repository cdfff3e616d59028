//! Registration, login and personal-information forms.

use serde::{Deserialize, Serialize};

use crate::storage::{NewUser, Role};

use super::errors::FormErrors;
use super::rules::{optional_text, ten_digits, text_min};

const MIN_PASSWORD_LEN: usize = 6;

fn phone_field(errors: &mut FormErrors, value: &str, invalid: &str) -> String {
    if value.trim().is_empty() {
        errors.push("phoneNumber", "Phone number is required");
        return String::new();
    }
    match ten_digits(value) {
        Some(digits) => digits,
        None => {
            errors.push("phoneNumber", invalid);
            String::new()
        }
    }
}

fn password_field(errors: &mut FormErrors, value: &str) {
    if value.is_empty() {
        errors.push("password", "Password is required");
    } else if value.chars().count() < MIN_PASSWORD_LEN {
        errors.push("password", "Password must be at least 6 characters");
    }
}

/// Account sign-up for customers and admins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub role: Role,
    pub full_name: String,
    pub phone_number: String,
    pub password: String,
    pub confirm_password: String,
    pub address: String,
}

impl RegistrationForm {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            full_name: String::new(),
            phone_number: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            address: String::new(),
        }
    }

    pub fn validate(&self) -> Result<NewUser, FormErrors> {
        let mut errors = FormErrors::new();

        let name = text_min(
            &mut errors,
            "fullName",
            &self.full_name,
            2,
            "Full name is required",
            "Full name must be at least 2 characters",
        );
        let phone_number = phone_field(
            &mut errors,
            &self.phone_number,
            "Please enter a valid 10-digit phone number",
        );
        password_field(&mut errors, &self.password);

        if self.confirm_password.is_empty() {
            errors.push("confirmPassword", "Please confirm your password");
        } else if self.password != self.confirm_password {
            errors.push("confirmPassword", "Passwords do not match");
        }

        let address = text_min(
            &mut errors,
            "address",
            &self.address,
            10,
            "Address is required",
            "Please enter a complete address",
        );

        errors.into_result(|| NewUser {
            name,
            phone_number,
            role: self.role,
            address: Some(address),
            password: self.password.clone(),
        })
    }
}

/// Credentials as entered on any login screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    pub phone_number: String,
    pub password: String,
}

impl LoginForm {
    /// Returns the normalized ten-digit phone number.
    pub fn validate(&self) -> Result<String, FormErrors> {
        let mut errors = FormErrors::new();
        let phone_number = phone_field(
            &mut errors,
            &self.phone_number,
            "Enter a valid 10-digit phone number",
        );
        password_field(&mut errors, &self.password);
        errors.into_result(|| phone_number)
    }
}

/// Editable personal information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    pub full_name: String,
    pub phone_number: String,
    pub address: String,
}

/// A validated profile edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: String,
    pub phone_number: String,
    pub address: Option<String>,
}

impl ProfileForm {
    pub fn validate(&self) -> Result<ProfileUpdate, FormErrors> {
        let mut errors = FormErrors::new();
        let name = text_min(
            &mut errors,
            "fullName",
            &self.full_name,
            1,
            "Full name is required",
            "Full name is required",
        );
        let phone_number = phone_field(
            &mut errors,
            &self.phone_number,
            "Please enter a valid 10-digit phone number",
        );
        errors.into_result(|| ProfileUpdate {
            name,
            phone_number,
            address: optional_text(&self.address),
        })
    }
}
