//! Core data types for the storage layer.
//!
//! Records are stored as JSON arrays with camelCase field names. Each
//! `New*` type is what a validated form produces; the store assigns the id
//! and creation timestamp.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::date_input::{CalendarDate, TimeOfDay};
use crate::error::TankerError;

/// Who is using the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    Admin,
    Driver,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Admin => "admin",
            Self::Driver => "driver",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = TankerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "customer" => Ok(Self::Customer),
            "admin" | "owner" => Ok(Self::Admin),
            "driver" => Ok(Self::Driver),
            other => Err(TankerError::InvalidInput(format!(
                "Unknown role: {} (use customer, admin or driver)",
                other
            ))),
        }
    }
}

/// A registered account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub phone_number: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Argon2id hash, see `crate::password`
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A validated registration.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub phone_number: String,
    pub role: Role,
    pub address: Option<String>,
    pub password: String,
}

/// A driver employed by the tanker owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: Uuid,
    pub name: String,
    pub phone_number: String,
    pub license_number: String,
    pub license_expiry_date: CalendarDate,
    pub address: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub joining_date: CalendarDate,
    pub monthly_salary: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDriver {
    pub name: String,
    pub phone_number: String,
    pub license_number: String,
    pub license_expiry_date: CalendarDate,
    pub address: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub joining_date: CalendarDate,
    pub monthly_salary: f64,
}

impl Driver {
    pub fn from_new(new: NewDriver, id: Uuid, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            phone_number: new.phone_number,
            license_number: new.license_number,
            license_expiry_date: new.license_expiry_date,
            address: new.address,
            emergency_contact_name: new.emergency_contact_name,
            emergency_contact_phone: new.emergency_contact_phone,
            joining_date: new.joining_date,
            monthly_salary: new.monthly_salary,
            created_at,
        }
    }
}

/// A tanker in the fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,
    pub vehicle_number: String,
    pub capacity_liters: f64,
    pub last_service_date: CalendarDate,
    pub next_service_date: CalendarDate,
    pub insurance_expiry_date: CalendarDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewVehicle {
    pub vehicle_number: String,
    pub capacity_liters: f64,
    pub last_service_date: CalendarDate,
    pub next_service_date: CalendarDate,
    pub insurance_expiry_date: CalendarDate,
}

impl Vehicle {
    pub fn from_new(new: NewVehicle, id: Uuid, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            vehicle_number: new.vehicle_number,
            capacity_liters: new.capacity_liters,
            last_service_date: new.last_service_date,
            next_service_date: new.next_service_date,
            insurance_expiry_date: new.insurance_expiry_date,
            created_at,
        }
    }
}

/// Orderable tanker sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TankerSize {
    #[serde(rename = "10k")]
    TenThousand,
    #[serde(rename = "20k")]
    TwentyThousand,
}

impl TankerSize {
    pub fn liters(&self) -> u32 {
        match self {
            Self::TenThousand => 10_000,
            Self::TwentyThousand => 20_000,
        }
    }

    /// Price in rupees.
    pub fn price(&self) -> u32 {
        match self {
            Self::TenThousand => 600,
            Self::TwentyThousand => 1200,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TenThousand => "10k",
            Self::TwentyThousand => "20k",
        }
    }
}

impl fmt::Display for TankerSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TankerSize {
    type Err = TankerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "10k" | "10000" => Ok(Self::TenThousand),
            "20k" | "20000" => Ok(Self::TwentyThousand),
            other => Err(TankerError::InvalidInput(format!(
                "Unknown tanker size: {} (use 10k or 20k)",
                other
            ))),
        }
    }
}

/// Lifecycle of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    InTransit,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        Self::Delivered,
        Self::Cancelled,
        Self::Pending,
        Self::Confirmed,
        Self::InTransit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::InTransit => "in-transit",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Human label as shown in order lists.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::InTransit => "In Transit",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = TankerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "in-transit" => Ok(Self::InTransit),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(TankerError::InvalidInput(format!(
                "Unknown order status: {}",
                other
            ))),
        }
    }
}

/// A tanker booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub booking_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    pub name: String,
    pub address: String,
    pub date: CalendarDate,
    pub scheduled_at: NaiveDateTime,
    pub amount: u32,
    pub total_amount: u32,
    pub status: OrderStatus,
    pub tanker_size: TankerSize,
    pub agency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A validated booking form.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub name: String,
    pub address: String,
    pub date: CalendarDate,
    pub time: TimeOfDay,
    pub tanker_size: TankerSize,
    pub agency: String,
    pub comments: Option<String>,
    pub user_id: Option<Uuid>,
}

impl NewOrder {
    pub fn with_user(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

impl Order {
    /// A fresh pending order. The booking id is derived from the record id.
    pub fn from_new(new: NewOrder, id: Uuid, created_at: DateTime<Utc>) -> Self {
        let amount = new.tanker_size.price();
        let short = id.simple().to_string();
        Self {
            id,
            booking_id: format!("BK-{}", short[..8].to_ascii_uppercase()),
            user_id: new.user_id,
            name: new.name,
            address: new.address,
            date: new.date,
            scheduled_at: new.date.at(new.time),
            amount,
            total_amount: amount,
            status: OrderStatus::Pending,
            tanker_size: new.tanker_size,
            agency: new.agency,
            comments: new.comments,
            created_at,
        }
    }

    pub fn time(&self) -> TimeOfDay {
        TimeOfDay::from(self.scheduled_at.time())
    }
}

/// A diesel fill-up for one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DieselExpense {
    pub id: Uuid,
    pub vehicle_number: String,
    pub amount: f64,
    pub quantity_liters: f64,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub date: CalendarDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDieselExpense {
    pub vehicle_number: String,
    pub amount: f64,
    pub quantity_liters: f64,
    pub location: String,
    pub notes: Option<String>,
}

impl DieselExpense {
    pub fn from_new(new: NewDieselExpense, id: Uuid, date: CalendarDate) -> Self {
        Self {
            id,
            vehicle_number: new.vehicle_number,
            amount: new.amount,
            quantity_liters: new.quantity_liters,
            location: new.location,
            notes: new.notes,
            date,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    #[default]
    Savings,
    Current,
}

/// A payout bank account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    pub id: Uuid,
    pub bank_name: String,
    pub account_number: String,
    pub account_holder_name: String,
    pub ifsc_code: String,
    pub branch_name: String,
    pub account_type: AccountType,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBankAccount {
    pub bank_name: String,
    pub account_number: String,
    pub account_holder_name: String,
    pub ifsc_code: String,
    pub branch_name: String,
}

impl BankAccount {
    pub fn from_new(
        new: NewBankAccount,
        id: Uuid,
        is_primary: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            bank_name: new.bank_name,
            account_number: new.account_number,
            account_holder_name: new.account_holder_name,
            ifsc_code: new.ifsc_code,
            branch_name: new.branch_name,
            account_type: AccountType::default(),
            is_primary,
            created_at,
        }
    }

    /// Account number with all but the last four digits hidden.
    pub fn masked_account_number(&self) -> String {
        let len = self.account_number.chars().count();
        let visible: String = self.account_number.chars().skip(len.saturating_sub(4)).collect();
        format!("{}{}", "*".repeat(len.saturating_sub(4)), visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_input::{parse_date, Meridiem};

    fn new_order(size: TankerSize) -> NewOrder {
        NewOrder {
            name: "Asha".into(),
            address: "12 Lake Road, Pune".into(),
            date: parse_date("20/06/2025").unwrap(),
            time: crate::date_input::parse_time("09:30", Meridiem::Pm).unwrap(),
            tanker_size: size,
            agency: "Blue Water".into(),
            comments: None,
            user_id: None,
        }
    }

    #[test]
    fn test_order_from_new_prices_by_size() {
        let order = Order::from_new(new_order(TankerSize::TwentyThousand), Uuid::new_v4(), Utc::now());
        assert_eq!(order.amount, 1200);
        assert_eq!(order.total_amount, 1200);
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.booking_id.starts_with("BK-"));
        assert_eq!(order.booking_id.len(), 11);
        assert_eq!(order.time(), TimeOfDay { hour24: 21, minute: 30 });
    }

    #[test]
    fn test_order_json_shape() {
        let order = Order::from_new(new_order(TankerSize::TenThousand), Uuid::new_v4(), Utc::now());
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["tankerSize"], "10k");
        assert_eq!(value["status"], "pending");
        assert_eq!(value["date"], "2025-06-20");
        assert!(value.get("comments").is_none());
        assert!(value.get("bookingId").is_some());
    }

    #[test]
    fn test_status_round_trip_through_str() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        assert_eq!("in_transit".parse::<OrderStatus>().unwrap(), OrderStatus::InTransit);
        assert!("lost".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_role_and_size_parsing() {
        assert_eq!("Driver".parse::<Role>().unwrap(), Role::Driver);
        assert_eq!("owner".parse::<Role>().unwrap(), Role::Admin);
        assert!("guest".parse::<Role>().is_err());
        assert_eq!("20000".parse::<TankerSize>().unwrap(), TankerSize::TwentyThousand);
        assert!("5k".parse::<TankerSize>().is_err());
    }

    #[test]
    fn test_masked_account_number() {
        let account = BankAccount::from_new(
            NewBankAccount {
                bank_name: "SBI".into(),
                account_number: "123456789012".into(),
                account_holder_name: "Asha".into(),
                ifsc_code: "SBIN0001234".into(),
                branch_name: "Kothrud".into(),
            },
            Uuid::new_v4(),
            true,
            Utc::now(),
        );
        assert_eq!(account.masked_account_number(), "********9012");
        assert_eq!(account.account_type, AccountType::Savings);
    }
}
