//! Storage interfaces.
//!
//! `KeyValueStore` is the on-device blob store: string keys, string values,
//! last write wins. `Collection<T>` layers a typed JSON array over one key.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::types::{BankAccount, DieselExpense, Driver, Order, User, Vehicle};
use crate::error::Result;

/// Flat key-value persistence of string blobs.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key has never been written.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `TankerError::Storage` if the write fails.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Removing a missing key is not an error.
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// A typed list of records persisted as one JSON array.
#[derive(Debug)]
pub struct Collection<T> {
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Collection<T> {}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Load every record. A key that was never written is an empty list.
    ///
    /// # Errors
    ///
    /// Returns `TankerError::Serialization` if the stored blob is not a JSON
    /// array of `T`.
    pub fn load<S>(&self, store: &S) -> Result<Vec<T>>
    where
        S: KeyValueStore + ?Sized,
    {
        match store.get_item(self.key)? {
            Some(blob) => {
                let items: Vec<T> = serde_json::from_str(&blob).inspect_err(|e| {
                    log::warn!("Stored {} is not readable: {}", self.key, e);
                })?;
                log::debug!("Loaded {} records from {}", items.len(), self.key);
                Ok(items)
            }
            None => Ok(Vec::new()),
        }
    }

    /// Replace the stored list with `items`.
    pub fn save_all<S>(&self, store: &mut S, items: &[T]) -> Result<()>
    where
        S: KeyValueStore + ?Sized,
    {
        let blob = serde_json::to_string(items)?;
        store.set_item(self.key, &blob)?;
        log::debug!("Saved {} records to {}", items.len(), self.key);
        Ok(())
    }
}

pub const USERS: Collection<User> = Collection::new("@water_tanker_users");
pub const DRIVERS: Collection<Driver> = Collection::new("@water_tanker_drivers");
pub const VEHICLES: Collection<Vehicle> = Collection::new("@water_tanker_vehicles");
pub const ORDERS: Collection<Order> = Collection::new("@water_tanker_orders");
pub const DIESEL_EXPENSES: Collection<DieselExpense> =
    Collection::new("@water_tanker_diesel_expenses");
pub const BANK_ACCOUNTS: Collection<BankAccount> = Collection::new("@water_tanker_bank_accounts");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_missing_key_loads_empty() {
        let store = MemoryStore::new();
        assert!(DRIVERS.load(&store).unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_blob_is_an_error() {
        let mut store = MemoryStore::new();
        store.set_item(ORDERS.key(), "{not json").unwrap();
        let err = ORDERS.load(&store).unwrap_err();
        assert!(matches!(err, crate::TankerError::Serialization(_)));
    }

    #[test]
    fn test_trait_is_object_safe() {
        fn _accepts_dyn(_store: &dyn KeyValueStore) {}
    }
}
