//! Table rows and detail views.

use tanker_core::storage::{BankAccount, DieselExpense, Driver, Order, Vehicle};

use crate::ui::theme::{status_style, styled};
use crate::ui::{kv, print, rupees, UiContext};

pub const ORDER_HEADERS: [&str; 7] = [
    "Booking", "Date", "Time", "Status", "Size", "Amount", "Agency",
];
pub const DRIVER_HEADERS: [&str; 5] = ["ID", "Name", "Phone", "License", "Expires"];
pub const VEHICLE_HEADERS: [&str; 5] = [
    "Number", "Capacity (L)", "Next Service", "Insurance", "ID",
];
pub const EXPENSE_HEADERS: [&str; 5] = ["Date", "Vehicle", "Liters", "Amount", "Location"];
pub const ACCOUNT_HEADERS: [&str; 5] = ["ID", "Bank", "Account", "IFSC", "Primary"];

fn short_id(id: &uuid::Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}

/// Plain rows are space-separated, so multi-word cells use compact forms
/// there: 24-hour time, status slug, bare amount.
pub fn order_row(ctx: &UiContext, order: &Order) -> Vec<String> {
    let (time, status, amount) = if ctx.mode.is_pretty() {
        (
            order.time().to_display_12h(),
            styled(order.status.label(), status_style(order.status), ctx.color),
            rupees(ctx, f64::from(order.total_amount)),
        )
    } else {
        (
            order.time().to_string(),
            order.status.as_str().to_string(),
            order.total_amount.to_string(),
        )
    };
    vec![
        order.booking_id.clone(),
        order.date.to_mask(),
        time,
        status,
        order.tanker_size.to_string(),
        amount,
        order.agency.clone(),
    ]
}

pub fn driver_row(driver: &Driver) -> Vec<String> {
    vec![
        short_id(&driver.id),
        driver.name.clone(),
        driver.phone_number.clone(),
        driver.license_number.clone(),
        driver.license_expiry_date.to_mask(),
    ]
}

pub fn vehicle_row(vehicle: &Vehicle) -> Vec<String> {
    vec![
        vehicle.vehicle_number.clone(),
        vehicle.capacity_liters.to_string(),
        vehicle.next_service_date.to_mask(),
        vehicle.insurance_expiry_date.to_mask(),
        short_id(&vehicle.id),
    ]
}

pub fn expense_row(ctx: &UiContext, expense: &DieselExpense) -> Vec<String> {
    vec![
        expense.date.to_mask(),
        expense.vehicle_number.clone(),
        expense.quantity_liters.to_string(),
        if ctx.mode.is_pretty() {
            rupees(ctx, expense.amount)
        } else {
            expense.amount.to_string()
        },
        expense.location.clone(),
    ]
}

pub fn account_row(account: &BankAccount) -> Vec<String> {
    vec![
        short_id(&account.id),
        account.bank_name.clone(),
        account.masked_account_number(),
        account.ifsc_code.clone(),
        if account.is_primary { "yes" } else { "no" }.to_string(),
    ]
}

/// Full order detail as key-value lines.
pub fn print_order(ctx: &UiContext, order: &Order) {
    let status = styled(order.status.label(), status_style(order.status), ctx.color);
    let lines = [
        kv(ctx, "Booking ID", &order.booking_id),
        kv(ctx, "Name", &order.name),
        kv(ctx, "Address", &order.address),
        kv(ctx, "Date", &order.date.to_mask()),
        kv(ctx, "Time", &order.time().to_display_12h()),
        kv(ctx, "Tanker Size", order.tanker_size.as_str()),
        kv(ctx, "Agency", &order.agency),
        kv(ctx, "Amount", &rupees(ctx, f64::from(order.total_amount))),
        kv(ctx, "Status", &status),
    ];
    for line in lines {
        print(ctx, &line);
    }
    if let Some(comments) = &order.comments {
        print(ctx, &kv(ctx, "Comments", comments));
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::ui::OutputMode;
    use tanker_core::date_input::{parse_date, parse_time, Meridiem};
    use tanker_core::storage::{NewOrder, TankerSize};

    #[test]
    fn test_plain_order_row_is_compact() {
        let ctx = UiContext {
            color: false,
            unicode: false,
            mode: OutputMode::Plain,
        };
        let order = Order::from_new(
            NewOrder {
                name: "Asha".into(),
                address: "12 Lake Road, Pune".into(),
                date: parse_date("20/06/2025").unwrap(),
                time: parse_time("09:30", Meridiem::Pm).unwrap(),
                tanker_size: TankerSize::TenThousand,
                agency: "BlueWater".into(),
                comments: None,
                user_id: None,
            },
            Uuid::new_v4(),
            Utc::now(),
        );
        let row = order_row(&ctx, &order);
        assert_eq!(&row[1..], ["20/06/2025", "21:30", "pending", "10k", "600", "BlueWater"]);
    }
}
