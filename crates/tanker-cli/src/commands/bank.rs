use serde_json::json;

use tanker_core::forms::BankAccountForm;
use tanker_core::storage::BankAccount;

use crate::app::AppContext;
use crate::cli::{BankAccountArgs, BankCommand, BankUpdateArgs};
use crate::output::{account_json, account_row, ACCOUNT_HEADERS};
use crate::ui::{header, hint, print, print_json, receipt, table};

use super::validated;

pub fn handle_bank(ctx: &AppContext, command: &BankCommand) -> anyhow::Result<()> {
    match command {
        BankCommand::Add(args) => add_account(ctx, args),
        BankCommand::List => list_accounts(ctx),
        BankCommand::Update { id, fields } => update_account(ctx, id, fields),
        BankCommand::Primary { id } => {
            let mut store = ctx.open_store()?;
            let account = store.set_primary_bank_account(id)?;
            log::info!("Primary payout account is now {}", account.id);
            report(ctx, &account, "Primary account set")
        }
        BankCommand::Delete { id } => {
            let mut store = ctx.open_store()?;
            let removed = store.delete_bank_account(id)?;
            log::info!("Deleted bank account {}", removed.id);
            let ui = ctx.ui();
            if ui.mode.is_json() {
                return print_json(&json!({ "removed": account_json(&removed) }));
            }
            if !ctx.quiet() {
                print(
                    ui,
                    &receipt(
                        ui,
                        "Account deleted",
                        &[("Account", removed.masked_account_number())],
                    ),
                );
            }
            Ok(())
        }
    }
}

fn report(ctx: &AppContext, account: &BankAccount, title: &str) -> anyhow::Result<()> {
    let ui = ctx.ui();
    if ui.mode.is_json() {
        return print_json(&account_json(account));
    }
    if !ctx.quiet() {
        print(
            ui,
            &receipt(
                ui,
                title,
                &[
                    ("ID", account.id.to_string()),
                    ("Bank", account.bank_name.clone()),
                    ("Account", account.masked_account_number()),
                    ("Primary", if account.is_primary { "yes" } else { "no" }.to_string()),
                ],
            ),
        );
    }
    Ok(())
}

fn add_account(ctx: &AppContext, args: &BankAccountArgs) -> anyhow::Result<()> {
    let form = BankAccountForm {
        bank_name: args.bank.clone(),
        account_number: args.account_number.clone(),
        confirm_account_number: args
            .confirm_account_number
            .clone()
            .unwrap_or_else(|| args.account_number.clone()),
        account_holder_name: args.holder.clone(),
        ifsc_code: args.ifsc.clone(),
        branch_name: args.branch.clone(),
    };
    let new_account = validated(form.validate())?;

    let mut store = ctx.open_store()?;
    let account = store.add_bank_account(new_account, ctx.clock())?;
    log::info!("Added bank account {}", account.id);
    report(ctx, &account, "Account added")
}

fn update_account(ctx: &AppContext, id: &str, fields: &BankUpdateArgs) -> anyhow::Result<()> {
    let mut store = ctx.open_store()?;
    let existing = store.find_bank_account(id)?;

    let mut form = BankAccountForm::edit(&existing);
    if let Some(bank) = &fields.bank {
        form.bank_name = bank.clone();
    }
    if let Some(number) = &fields.account_number {
        form.account_number = number.clone();
        form.confirm_account_number = number.clone();
    }
    if let Some(confirm) = &fields.confirm_account_number {
        form.confirm_account_number = confirm.clone();
    }
    if let Some(holder) = &fields.holder {
        form.account_holder_name = holder.clone();
    }
    if let Some(ifsc) = &fields.ifsc {
        form.ifsc_code = ifsc.clone();
    }
    if let Some(branch) = &fields.branch {
        form.branch_name = branch.clone();
    }
    let changes = validated(form.validate())?;

    let account = store.update_bank_account(&existing.id.to_string(), changes)?;
    log::info!("Updated bank account {}", account.id);
    report(ctx, &account, "Account updated")
}

fn list_accounts(ctx: &AppContext) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let accounts = store.bank_accounts()?;

    let ui = ctx.ui();
    if ui.mode.is_json() {
        return print_json(&serde_json::Value::Array(
            accounts.iter().map(account_json).collect(),
        ));
    }
    print(ui, &header(ui, "bank", Some(&format!("{} accounts", accounts.len()))));
    if accounts.is_empty() {
        if !ctx.quiet() {
            print(ui, &hint(ui, "No accounts yet. Add one with `tanker bank add`."));
        }
        return Ok(());
    }
    let rows: Vec<Vec<String>> = accounts.iter().map(account_row).collect();
    print(ui, &table(ui, &ACCOUNT_HEADERS, &rows));
    Ok(())
}
