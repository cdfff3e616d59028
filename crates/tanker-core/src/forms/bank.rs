//! Bank account form.

use serde::{Deserialize, Serialize};

use crate::storage::{BankAccount, NewBankAccount};

use super::errors::FormErrors;
use super::rules::text_required;

const MIN_ACCOUNT_NUMBER_LEN: usize = 9;
const IFSC_LEN: usize = 11;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccountForm {
    pub bank_name: String,
    pub account_number: String,
    pub confirm_account_number: String,
    pub account_holder_name: String,
    pub ifsc_code: String,
    pub branch_name: String,
}

impl BankAccountForm {
    /// Prefill for editing; the confirmation matches the stored number.
    pub fn edit(account: &BankAccount) -> Self {
        Self {
            bank_name: account.bank_name.clone(),
            account_number: account.account_number.clone(),
            confirm_account_number: account.account_number.clone(),
            account_holder_name: account.account_holder_name.clone(),
            ifsc_code: account.ifsc_code.clone(),
            branch_name: account.branch_name.clone(),
        }
    }

    pub fn validate(&self) -> Result<NewBankAccount, FormErrors> {
        let mut errors = FormErrors::new();

        let bank_name = text_required(&mut errors, "bankName", &self.bank_name, "Bank name is required");

        let account_number = self.account_number.trim().to_string();
        if account_number.is_empty() {
            errors.push("accountNumber", "Account number is required");
        } else if account_number.chars().count() < MIN_ACCOUNT_NUMBER_LEN {
            errors.push("accountNumber", "Account number must be at least 9 digits");
        }

        let confirm = self.confirm_account_number.trim();
        if confirm.is_empty() {
            errors.push("confirmAccountNumber", "Confirm account number is required");
        } else if confirm != account_number {
            errors.push("confirmAccountNumber", "Account numbers do not match");
        }

        let account_holder_name = text_required(
            &mut errors,
            "accountHolderName",
            &self.account_holder_name,
            "Account holder name is required",
        );

        let ifsc_code = self.ifsc_code.trim().to_ascii_uppercase();
        if ifsc_code.is_empty() {
            errors.push("ifscCode", "IFSC code is required");
        } else if ifsc_code.chars().count() != IFSC_LEN {
            errors.push("ifscCode", "IFSC code must be 11 characters");
        }

        let branch_name = text_required(
            &mut errors,
            "branchName",
            &self.branch_name,
            "Branch name is required",
        );

        errors.into_result(|| NewBankAccount {
            bank_name,
            account_number,
            account_holder_name,
            ifsc_code,
            branch_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> BankAccountForm {
        BankAccountForm {
            bank_name: "State Bank of India".into(),
            account_number: "123456789012".into(),
            confirm_account_number: "123456789012".into(),
            account_holder_name: "Asha Patil".into(),
            ifsc_code: "sbin0001234".into(),
            branch_name: "Kothrud".into(),
        }
    }

    #[test]
    fn test_valid_account_uppercases_ifsc() {
        let account = valid_form().validate().unwrap();
        assert_eq!(account.ifsc_code, "SBIN0001234");
    }

    #[test]
    fn test_account_rules() {
        let form = BankAccountForm {
            account_number: "12345".into(),
            confirm_account_number: "12346".into(),
            ifsc_code: "SBIN".into(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get("accountNumber"),
            Some("Account number must be at least 9 digits")
        );
        assert_eq!(
            errors.get("confirmAccountNumber"),
            Some("Account numbers do not match")
        );
        assert_eq!(errors.get("ifscCode"), Some("IFSC code must be 11 characters"));
    }

    #[test]
    fn test_empty_form() {
        let errors = BankAccountForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 6);
        assert_eq!(errors.get("bankName"), Some("Bank name is required"));
        assert_eq!(errors.get("branchName"), Some("Branch name is required"));
    }
}
