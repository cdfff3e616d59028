//! Record formatting for the CLI.
//!
//! `json` builds the `--json` documents; `text` builds table rows and
//! detail lines for plain and pretty output.

mod json;
mod text;

pub use json::{account_json, order_json, orders_json, user_json};
pub use text::{
    account_row, driver_row, expense_row, order_row, print_order, vehicle_row, ACCOUNT_HEADERS,
    DRIVER_HEADERS, EXPENSE_HEADERS, ORDER_HEADERS, VEHICLE_HEADERS,
};
