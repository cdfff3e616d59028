use serde_json::json;

use tanker_core::date_input::{format_digits_as_date, format_digits_as_time};
use tanker_core::export::{orders_file_name, orders_to_csv};
use tanker_core::forms::BookingForm;
use tanker_core::history::{
    orders_in_month, status_counts, track_orders, MonthSummary, OrderFilter, OrderSort,
};
use tanker_core::storage::{Order, User};
use tanker_core::Screen;

use crate::app::{session_user, AppContext, Store};
use crate::cli::{BookArgs, OrdersCommand, OrdersHistoryArgs, OrdersListArgs, ReorderArgs, SessionArgs};
use crate::output::{order_json, orders_json, order_row, print_order, ORDER_HEADERS};
use crate::ui::{blank_line, header, hint, kv, print, print_json, receipt, rupees, table};

use super::{validated, write_export};

pub fn handle_book(ctx: &AppContext, args: &BookArgs) -> anyhow::Result<()> {
    let mut store = ctx.open_store()?;
    let user = session_user(&store, &args.session)?;

    let form = BookingForm {
        name: args
            .name
            .clone()
            .or_else(|| user.as_ref().map(|u| u.name.clone()))
            .unwrap_or_default(),
        address: args
            .address
            .clone()
            .or_else(|| user.as_ref().and_then(|u| u.address.clone()))
            .unwrap_or_default(),
        date: format_digits_as_date(&args.date),
        time: format_digits_as_time(&args.time),
        meridiem: args.meridiem,
        tanker_size: args.size,
        agency: args.agency.clone(),
        comments: args.comments.clone().unwrap_or_default(),
    };
    place(ctx, &mut store, &form, user.as_ref())
}

fn place(
    ctx: &AppContext,
    store: &mut Store,
    form: &BookingForm,
    user: Option<&User>,
) -> anyhow::Result<()> {
    let mut new_order = validated(form.validate(ctx.clock()))?;
    if let Some(user) = user {
        new_order = new_order.with_user(user.id);
    }
    let order = store.place_order(new_order, ctx.clock())?;

    let ui = ctx.ui();
    if ui.mode.is_json() {
        return print_json(&order_json(&order));
    }
    if !ctx.quiet() {
        print(
            ui,
            &receipt(
                ui,
                "Booking confirmed",
                &[
                    ("Booking ID", order.booking_id.clone()),
                    ("Date", order.date.to_mask()),
                    ("Time", order.time().to_display_12h()),
                    ("Amount", rupees(ui, f64::from(order.total_amount))),
                    ("Next", Screen::TrackTanker.to_string()),
                ],
            ),
        );
    }
    Ok(())
}

pub fn handle_orders(ctx: &AppContext, command: &OrdersCommand) -> anyhow::Result<()> {
    match command {
        OrdersCommand::List(args) => list_orders(ctx, args),
        OrdersCommand::History(args) => order_history(ctx, args),
        OrdersCommand::Status { order, status } => {
            let mut store = ctx.open_store()?;
            let updated = store.set_order_status(order, *status)?;
            show_order(ctx, &updated, "Status updated")
        }
        OrdersCommand::Delete { order } => {
            let mut store = ctx.open_store()?;
            let removed = store.delete_order(order)?;
            log::info!("Deleted order {}", removed.booking_id);
            let ui = ctx.ui();
            if ui.mode.is_json() {
                return print_json(&json!({ "removed": order_json(&removed) }));
            }
            if !ctx.quiet() {
                print(
                    ui,
                    &receipt(ui, "Order deleted", &[("Booking ID", removed.booking_id)]),
                );
            }
            Ok(())
        }
        OrdersCommand::Reorder(args) => reorder(ctx, args),
    }
}

fn show_order(ctx: &AppContext, order: &Order, title: &str) -> anyhow::Result<()> {
    let ui = ctx.ui();
    if ui.mode.is_json() {
        return print_json(&order_json(order));
    }
    if !ctx.quiet() {
        print(ui, &header(ui, "orders", Some(title)));
        print_order(ui, order);
    }
    Ok(())
}

/// Orders visible to the caller: their own when signed in, otherwise all.
fn visible_orders(store: &Store, session: &SessionArgs) -> anyhow::Result<Vec<Order>> {
    match session_user(store, session)? {
        Some(user) => Ok(store.orders_for_user(user.id)?),
        None => Ok(store.orders()?),
    }
}

fn list_orders(ctx: &AppContext, args: &OrdersListArgs) -> anyhow::Result<()> {
    let filter: OrderFilter = args.filter.parse()?;
    let sort: OrderSort = args.sort.parse()?;

    let store = ctx.open_store()?;
    let orders = visible_orders(&store, &args.session)?;
    let counts = status_counts(&orders);
    let shown = track_orders(&orders, filter, sort);
    log::debug!("{} of {} orders match {}", shown.len(), orders.len(), filter.label());

    let ui = ctx.ui();
    if ui.mode.is_json() {
        let counts: serde_json::Map<String, serde_json::Value> = counts
            .iter()
            .map(|(f, n)| (f.label().to_string(), json!(n)))
            .collect();
        return print_json(&json!({
            "filter": filter.label(),
            "sort": sort.as_str(),
            "counts": counts,
            "orders": orders_json(&shown),
        }));
    }

    print(ui, &header(ui, "orders", Some(&format!("{}, {}", filter.label(), sort.label()))));
    if ui.mode.is_pretty() {
        let chips: Vec<String> = counts
            .iter()
            .map(|(f, n)| format!("{} ({})", f.label(), n))
            .collect();
        print(ui, &chips.join("  "));
        blank_line(ui);
    }
    if shown.is_empty() {
        if !ctx.quiet() {
            print(ui, &hint(ui, "No orders found. Book one with `tanker book`."));
        }
        return Ok(());
    }
    let rows: Vec<Vec<String>> = shown.iter().map(|o| order_row(ui, o)).collect();
    print(ui, &table(ui, &ORDER_HEADERS, &rows));
    Ok(())
}

fn order_history(ctx: &AppContext, args: &OrdersHistoryArgs) -> anyhow::Result<()> {
    let today = ctx.clock().today();
    let year = args.year.unwrap_or_else(|| today.year());
    let month = args.month.unwrap_or_else(|| today.month());

    let store = ctx.open_store()?;
    let orders = visible_orders(&store, &args.session)?;
    let in_month = orders_in_month(&orders, year, month);
    let summary = MonthSummary::of(&in_month);

    let exported = match &args.export {
        Some(dir) => Some(write_export(
            dir,
            &orders_file_name(ctx.clock().now()),
            &orders_to_csv(&in_month),
        )?),
        None => None,
    };

    let ui = ctx.ui();
    if ui.mode.is_json() {
        return print_json(&json!({
            "year": year,
            "month": month,
            "summary": summary,
            "orders": orders_json(&in_month),
            "exportedTo": exported,
        }));
    }

    print(ui, &header(ui, "history", Some(&format!("{:02}/{}", month, year))));
    let lines = [
        kv(ui, "Total Orders", &summary.total_orders.to_string()),
        kv(ui, "Completed", &summary.completed_orders.to_string()),
        kv(ui, "Revenue", &rupees(ui, summary.total_revenue as f64)),
    ];
    for line in lines {
        print(ui, &line);
    }
    if !in_month.is_empty() {
        blank_line(ui);
        let rows: Vec<Vec<String>> = in_month.iter().map(|o| order_row(ui, o)).collect();
        print(ui, &table(ui, &ORDER_HEADERS, &rows));
    }
    if let Some(path) = exported {
        print(ui, &kv(ui, "Exported", &path.display().to_string()));
    }
    Ok(())
}

fn reorder(ctx: &AppContext, args: &ReorderArgs) -> anyhow::Result<()> {
    let mut store = ctx.open_store()?;
    let user = session_user(&store, &args.session)?;
    let previous = store.find_order(&args.order)?;

    let mut form = BookingForm::reorder(&previous);
    form.name = args
        .name
        .clone()
        .or_else(|| user.as_ref().map(|u| u.name.clone()))
        .unwrap_or_else(|| previous.name.clone());
    form.date = format_digits_as_date(&args.date);
    form.time = format_digits_as_time(&args.time);
    form.meridiem = args.meridiem;
    form.comments = args.comments.clone().unwrap_or_default();

    place(ctx, &mut store, &form, user.as_ref())
}
