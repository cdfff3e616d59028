use serde_json::json;

use tanker_core::export::{expenses_file_name, expenses_to_csv};
use tanker_core::forms::DieselExpenseForm;
use tanker_core::history::{expenses_in, ExpensePeriod, ExpenseSummary};

use crate::app::AppContext;
use crate::cli::{ExpenseAddArgs, ExpenseCommand, PeriodArgs};
use crate::output::{expense_row, EXPENSE_HEADERS};
use crate::ui::{blank_line, header, hint, kv, print, print_json, receipt, rupees, table};

use super::{validated, write_export};

pub fn handle_expense(ctx: &AppContext, command: &ExpenseCommand) -> anyhow::Result<()> {
    match command {
        ExpenseCommand::Add(args) => add_expense(ctx, args),
        ExpenseCommand::List(period) => list_expenses(ctx, period),
        ExpenseCommand::Export { period, dir } => {
            let period = resolve_period(ctx, period);
            let store = ctx.open_store()?;
            let expenses = expenses_in(&store.expenses()?, period);
            let path = write_export(dir, &expenses_file_name(period), &expenses_to_csv(&expenses))?;

            let ui = ctx.ui();
            if ui.mode.is_json() {
                return print_json(&json!({
                    "period": period.to_string(),
                    "rows": expenses.len(),
                    "path": path,
                }));
            }
            if !ctx.quiet() {
                print(
                    ui,
                    &receipt(
                        ui,
                        "Expenses exported",
                        &[
                            ("Period", period.to_string()),
                            ("Rows", expenses.len().to_string()),
                            ("Path", path.display().to_string()),
                        ],
                    ),
                );
            }
            Ok(())
        }
    }
}

/// Month or year to report on, defaulting to the current month.
fn resolve_period(ctx: &AppContext, args: &PeriodArgs) -> ExpensePeriod {
    let today = ctx.clock().today();
    let year = args.year.unwrap_or_else(|| today.year());
    if args.whole_year {
        ExpensePeriod::Year(year)
    } else {
        ExpensePeriod::Month {
            year,
            month: args.month.unwrap_or_else(|| today.month()),
        }
    }
}

fn add_expense(ctx: &AppContext, args: &ExpenseAddArgs) -> anyhow::Result<()> {
    let form = DieselExpenseForm {
        vehicle_number: args.vehicle.clone(),
        amount: args.amount.clone(),
        quantity: args.quantity.clone(),
        location: args.location.clone(),
        notes: args.notes.clone().unwrap_or_default(),
    };
    let new_expense = validated(form.validate())?;

    let mut store = ctx.open_store()?;
    let expense = store.add_expense(new_expense, ctx.clock())?;

    let ui = ctx.ui();
    if ui.mode.is_json() {
        return print_json(&serde_json::to_value(&expense)?);
    }
    if !ctx.quiet() {
        print(
            ui,
            &receipt(
                ui,
                "Expense recorded",
                &[
                    ("Vehicle", expense.vehicle_number.clone()),
                    ("Amount", rupees(ui, expense.amount)),
                    ("Quantity", format!("{} L", expense.quantity_liters)),
                    ("Date", expense.date.to_mask()),
                ],
            ),
        );
    }
    Ok(())
}

fn list_expenses(ctx: &AppContext, args: &PeriodArgs) -> anyhow::Result<()> {
    let period = resolve_period(ctx, args);
    let store = ctx.open_store()?;
    let expenses = expenses_in(&store.expenses()?, period);
    let summary = ExpenseSummary::of(&expenses);

    let ui = ctx.ui();
    if ui.mode.is_json() {
        return print_json(&json!({
            "period": period.to_string(),
            "summary": summary,
            "expenses": expenses,
        }));
    }

    print(ui, &header(ui, "expenses", Some(&period.to_string())));
    let lines = [
        kv(ui, "Fillings", &summary.fillings.to_string()),
        kv(ui, "Total Liters", &format!("{:.2}", summary.total_liters)),
        kv(ui, "Total Amount", &rupees(ui, summary.total_amount)),
        kv(ui, "Avg Per Liter", &format!("{:.2}", summary.average_price_per_liter)),
    ];
    for line in lines {
        print(ui, &line);
    }
    if expenses.is_empty() {
        if !ctx.quiet() {
            print(ui, &hint(ui, "No fill-ups in this period."));
        }
        return Ok(());
    }
    blank_line(ui);
    let rows: Vec<Vec<String>> = expenses.iter().map(|e| expense_row(ui, e)).collect();
    print(ui, &table(ui, &EXPENSE_HEADERS, &rows));
    Ok(())
}
