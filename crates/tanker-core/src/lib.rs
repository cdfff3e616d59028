//! # Tanker Core
//!
//! Core library for Tanker - water tanker booking and fleet bookkeeping.
//!
//! This crate provides the date input engine, form validation, storage
//! abstractions, and data models independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **date_input**: Masked `DD/MM/YYYY` and `HH:MM` entry, parsing and date policies
//! - **forms**: Field validation for every data-entry screen
//! - **storage**: Key-value store trait, JSON file and in-memory backends
//! - **history**: Order filters, sorts and monthly summaries
//! - **export**: CSV export of orders and diesel expenses
//! - **screen**: Screen graph and navigation events
//! - **password**: Argon2id password hashing

pub mod date_input;
pub mod error;
pub mod export;
pub mod forms;
pub mod fs;
pub mod history;
pub mod password;
pub mod screen;
pub mod storage;

pub use date_input::{CalendarDate, Clock, DatePolicy, FixedClock, Meridiem, SystemClock};
pub use error::{Result, TankerError};
pub use screen::{Navigation, Screen};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, TankerStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
