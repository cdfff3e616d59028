//! Error reporting and exit codes.

use tanker_core::forms::FormErrors;
use tanker_core::TankerError;

use crate::ui::{render, UiContext};

const VALIDATION_MESSAGE: &str = "Please fix the highlighted fields";

/// Suggested next step for a failed command, if there is an obvious one.
pub fn hint_for(err: &anyhow::Error) -> Option<&'static str> {
    match err.downcast_ref::<TankerError>()? {
        TankerError::NotFound(_) => {
            Some("List records first, then use a full id or a longer prefix.")
        }
        TankerError::Storage(_) => {
            Some("Check that --data-dir or TANKER_DATA_DIR is a writable directory.")
        }
        TankerError::Serialization(_) => {
            Some("A data file is damaged; restore it or remove it to start over.")
        }
        TankerError::Validation(_) | TankerError::InvalidInput(_) | TankerError::Crypto(_) => None,
    }
}

/// Print the error in the current output mode and exit with status 1.
pub fn exit_with_error(ui: &UiContext, err: &anyhow::Error) -> ! {
    log::debug!("Command failed: {:?}", err);
    let fields = match err.downcast_ref::<TankerError>() {
        Some(TankerError::Validation(errors)) => Some(errors),
        _ => err.downcast_ref::<FormErrors>(),
    };
    let message = match (fields, err.downcast_ref::<TankerError>()) {
        (Some(_), _) => VALIDATION_MESSAGE.to_string(),
        (None, Some(TankerError::InvalidInput(message))) => message.clone(),
        (None, _) => err.to_string(),
    };
    render::print_error(ui, &message, fields, hint_for(err));
    std::process::exit(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hints() {
        let not_found = anyhow::Error::from(TankerError::NotFound("order BK-1".into()));
        assert!(hint_for(&not_found).is_some());
        let invalid = anyhow::Error::from(TankerError::InvalidInput("bad".into()));
        assert!(hint_for(&invalid).is_none());
        assert!(hint_for(&anyhow::anyhow!("plain")).is_none());
    }
}
