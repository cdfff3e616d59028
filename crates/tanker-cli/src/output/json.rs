//! JSON output for records.
//!
//! Stored records already serialize in camelCase; these add the derived
//! fields a script would otherwise have to compute.

use serde_json::{json, Value};

use tanker_core::storage::{BankAccount, Order, User};

pub fn order_json(order: &Order) -> Value {
    let mut value = serde_json::to_value(order).unwrap_or(Value::Null);
    if let Value::Object(map) = &mut value {
        map.insert("dateDisplay".into(), json!(order.date.to_mask()));
        map.insert("time".into(), json!(order.time().to_display_12h()));
        map.insert("statusLabel".into(), json!(order.status.label()));
    }
    value
}

pub fn orders_json(orders: &[Order]) -> Value {
    Value::Array(orders.iter().map(order_json).collect())
}

/// A user without the password hash.
pub fn user_json(user: &User) -> Value {
    json!({
        "id": user.id,
        "name": user.name,
        "phoneNumber": user.phone_number,
        "role": user.role,
        "address": user.address,
        "createdAt": user.created_at,
    })
}

pub fn account_json(account: &BankAccount) -> Value {
    let mut value = serde_json::to_value(account).unwrap_or(Value::Null);
    if let Value::Object(map) = &mut value {
        map.insert(
            "maskedAccountNumber".into(),
            json!(account.masked_account_number()),
        );
    }
    value
}
