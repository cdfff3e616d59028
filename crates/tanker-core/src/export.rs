//! CSV export of order history and diesel expenses.

use chrono::{DateTime, Utc};

use crate::history::ExpensePeriod;
use crate::storage::{DieselExpense, Order};

pub const ORDERS_HEADER: &str =
    "S.No,Booking ID,Date,Time,Status,Agency,Tanker Size,Amount (₹),Address";
pub const EXPENSES_HEADER: &str = "Vehicle Number,Amount,Quantity (L),Location,Notes,Date";

/// Cells starting with these are read as formulas by spreadsheet apps.
fn is_formula_like(value: &str) -> bool {
    matches!(
        value.trim_start().chars().next(),
        Some('=') | Some('+') | Some('-') | Some('@')
    )
}

fn neutralize(value: &str) -> String {
    if is_formula_like(value) {
        format!("'{}", value)
    } else {
        value.to_string()
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Escape a free-text cell.
pub fn csv_escape(value: &str) -> String {
    let safe = neutralize(value);
    if safe.contains([',', '"', '\n', '\r']) {
        quote(&safe)
    } else {
        safe
    }
}

/// One row per order, numbered from 1. The address column is always quoted.
pub fn orders_to_csv(orders: &[Order]) -> String {
    let mut lines = vec![ORDERS_HEADER.to_string()];
    for (index, order) in orders.iter().enumerate() {
        let row = [
            (index + 1).to_string(),
            csv_escape(&order.booking_id),
            order.date.to_mask(),
            order.time().to_display_12h(),
            order.status.label().to_string(),
            csv_escape(&order.agency),
            order.tanker_size.to_string(),
            order.total_amount.to_string(),
            quote(&neutralize(&order.address)),
        ];
        lines.push(row.join(","));
    }
    lines.join("\n")
}

pub fn expenses_to_csv(expenses: &[DieselExpense]) -> String {
    let mut out = String::from(EXPENSES_HEADER);
    out.push('\n');
    for expense in expenses {
        let row = [
            csv_escape(&expense.vehicle_number),
            expense.amount.to_string(),
            expense.quantity_liters.to_string(),
            csv_escape(&expense.location),
            csv_escape(expense.notes.as_deref().unwrap_or_default()),
            expense.date.to_mask(),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

/// `Order_History_<millis>.csv`, unique per export.
pub fn orders_file_name(now: DateTime<Utc>) -> String {
    format!("Order_History_{}.csv", now.timestamp_millis())
}

/// `diesel_expenses_Jun_2025.csv` or `diesel_expenses_2025.csv`.
pub fn expenses_file_name(period: ExpensePeriod) -> String {
    format!("diesel_expenses_{}.csv", period.file_label())
}
