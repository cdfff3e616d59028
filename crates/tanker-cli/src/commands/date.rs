use serde_json::json;

use tanker_core::date_input::{
    format_digits_as_date, format_digits_as_time, validate_date_field, DatePolicy,
    ValidationOutcome, DATE_MASK_LEN, TIME_MASK_LEN,
};
use tanker_core::TankerError;

use crate::app::AppContext;
use crate::cli::{CheckDateArgs, MaskCommand};
use crate::ui::{badge, kv, print, print_json, Badge};

pub fn handle_mask(ctx: &AppContext, command: &MaskCommand) -> anyhow::Result<()> {
    let (kind, input, masked, complete_len) = match command {
        MaskCommand::Date { input } => ("date", input, format_digits_as_date(input), DATE_MASK_LEN),
        MaskCommand::Time { input } => ("time", input, format_digits_as_time(input), TIME_MASK_LEN),
    };
    let complete = masked.len() == complete_len;

    let ui = ctx.ui();
    if ui.mode.is_json() {
        return print_json(&json!({
            "kind": kind,
            "input": input,
            "masked": masked,
            "complete": complete,
        }));
    }
    if ui.mode.is_pretty() {
        print(ui, &kv(ui, "Masked", &masked));
        print(ui, &kv(ui, "Complete", if complete { "yes" } else { "no" }));
    } else {
        println!("{}", masked);
    }
    Ok(())
}

pub fn handle_check_date(ctx: &AppContext, args: &CheckDateArgs) -> anyhow::Result<()> {
    let masked = format_digits_as_date(&args.input);
    let policy = DatePolicy::from(args.policy);
    let result = validate_date_field(&masked, policy, ctx.clock());
    let outcome = match result {
        Ok(_) => ValidationOutcome::Valid,
        Err(reason) => ValidationOutcome::Invalid(reason),
    };
    log::debug!("check-date {} under {:?}: {:?}", masked, policy, outcome);

    let ui = ctx.ui();
    if ui.mode.is_json() {
        print_json(&json!({
            "masked": masked,
            "policy": policy,
            "today": ctx.clock().today(),
            "date": result.ok(),
            "result": outcome,
        }))?;
    } else if let Ok(date) = result {
        if !ctx.quiet() {
            print(ui, &badge(ui, Badge::Ok, &format!("{} is valid", date)));
        }
    }

    match outcome.reason() {
        None => Ok(()),
        Some(reason) => Err(TankerError::InvalidInput(format!("{} is invalid: {}", masked, reason)).into()),
    }
}
