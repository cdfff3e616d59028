//! Diesel expense form.

use serde::{Deserialize, Serialize};

use crate::storage::NewDieselExpense;

use super::errors::FormErrors;
use super::rules::{optional_text, positive_number, text_required};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DieselExpenseForm {
    pub vehicle_number: String,
    pub amount: String,
    pub quantity: String,
    pub location: String,
    pub notes: String,
}

impl DieselExpenseForm {
    pub fn validate(&self) -> Result<NewDieselExpense, FormErrors> {
        let mut errors = FormErrors::new();

        let vehicle_number = text_required(
            &mut errors,
            "vehicleNumber",
            &self.vehicle_number,
            "Vehicle number is required",
        )
        .to_ascii_uppercase();

        let amount = number_field(&mut errors, "amount", &self.amount, "Amount");
        let quantity = number_field(&mut errors, "quantity", &self.quantity, "Quantity");

        let location = text_required(&mut errors, "location", &self.location, "Location is required");

        match (amount, quantity) {
            (Some(amount), Some(quantity_liters)) if errors.is_empty() => Ok(NewDieselExpense {
                vehicle_number,
                amount,
                quantity_liters,
                location,
                notes: optional_text(&self.notes),
            }),
            _ => Err(errors),
        }
    }
}

fn number_field(
    errors: &mut FormErrors,
    field: &'static str,
    value: &str,
    label: &str,
) -> Option<f64> {
    if value.trim().is_empty() {
        errors.push(field, format!("{} is required", label));
        return None;
    }
    let number = positive_number(value);
    if number.is_none() {
        errors.push(field, format!("Enter a valid {}", label.to_lowercase()));
    }
    number
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_expense() {
        let form = DieselExpenseForm {
            vehicle_number: "dl-01-ab-1234".into(),
            amount: "4500".into(),
            quantity: "50.5".into(),
            location: "HP Pump, Ring Road".into(),
            notes: String::new(),
        };
        let expense = form.validate().unwrap();
        assert_eq!(expense.vehicle_number, "DL-01-AB-1234");
        assert_eq!(expense.quantity_liters, 50.5);
        assert_eq!(expense.notes, None);
    }

    #[test]
    fn test_invalid_expense() {
        let form = DieselExpenseForm {
            amount: "free".into(),
            ..DieselExpenseForm::default()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("vehicleNumber"), Some("Vehicle number is required"));
        assert_eq!(errors.get("amount"), Some("Enter a valid amount"));
        assert_eq!(errors.get("quantity"), Some("Quantity is required"));
        assert_eq!(errors.get("location"), Some("Location is required"));
    }
}
