//! Local persistence.
//!
//! - **traits**: `KeyValueStore` and the typed `Collection<T>`
//! - **json_file**: one JSON file per key in a data directory
//! - **memory**: `HashMap` store for tests
//! - **store**: record-level operations (`TankerStore`)
//! - **types**: stored records and their `New*` inputs

mod json_file;
mod memory;
mod store;
mod traits;
pub mod types;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use store::TankerStore;
pub use traits::{
    Collection, KeyValueStore, BANK_ACCOUNTS, DIESEL_EXPENSES, DRIVERS, ORDERS, USERS, VEHICLES,
};
pub use types::{
    AccountType, BankAccount, DieselExpense, Driver, NewBankAccount, NewDieselExpense, NewDriver,
    NewOrder, NewUser, NewVehicle, Order, OrderStatus, Role, TankerSize, User, Vehicle,
};
