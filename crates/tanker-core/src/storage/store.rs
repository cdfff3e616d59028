//! Record-level operations over a key-value store.
//!
//! `TankerStore` is what the screens call after a form validates: it loads
//! the relevant collection, applies the change, and writes the whole list
//! back.

use uuid::Uuid;

use super::traits::{
    Collection, KeyValueStore, BANK_ACCOUNTS, DIESEL_EXPENSES, DRIVERS, ORDERS, USERS, VEHICLES,
};
use super::types::{
    BankAccount, DieselExpense, Driver, NewBankAccount, NewDieselExpense, NewDriver, NewOrder,
    NewUser, NewVehicle, Order, OrderStatus, Role, User, Vehicle,
};
use crate::date_input::Clock;
use crate::error::{Result, TankerError};
use crate::forms::ProfileUpdate;
use crate::password::{hash_password, verify_password};

/// Shortest id prefix accepted when looking records up by hand.
const MIN_ID_PREFIX: usize = 4;

const INVALID_CREDENTIALS: &str = "Invalid phone number or password";

pub struct TankerStore<S> {
    store: S,
}

impl<S: KeyValueStore> TankerStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    fn update<T, F, R>(&mut self, collection: Collection<T>, apply: F) -> Result<R>
    where
        T: serde::Serialize + serde::de::DeserializeOwned,
        F: FnOnce(&mut Vec<T>) -> Result<R>,
    {
        let mut items = collection.load(&self.store)?;
        let result = apply(&mut items)?;
        collection.save_all(&mut self.store, &items)?;
        Ok(result)
    }

    // --- Users ---

    pub fn users(&self) -> Result<Vec<User>> {
        USERS.load(&self.store)
    }

    /// Create an account. A phone number may hold one account per role.
    ///
    /// # Errors
    ///
    /// Returns `TankerError::InvalidInput` if the phone number is taken.
    pub fn register<C: Clock + ?Sized>(&mut self, new: NewUser, clock: &C) -> Result<User> {
        let password_hash = hash_password(&new.password)?;
        self.update(USERS, |users| {
            if users
                .iter()
                .any(|u| u.phone_number == new.phone_number && u.role == new.role)
            {
                return Err(TankerError::InvalidInput(format!(
                    "A {} account with this phone number already exists",
                    new.role
                )));
            }
            let user = User {
                id: Uuid::new_v4(),
                name: new.name,
                phone_number: new.phone_number,
                role: new.role,
                address: new.address,
                password_hash,
                created_at: clock.now(),
            };
            log::info!("Registered {} account {}", user.role, user.id);
            users.push(user.clone());
            Ok(user)
        })
    }

    /// Look up an account by role and phone number and check its password.
    ///
    /// Unknown numbers and wrong passwords fail with the same message.
    pub fn authenticate(&self, role: Role, phone_number: &str, password: &str) -> Result<User> {
        let user = self
            .users()?
            .into_iter()
            .find(|u| u.role == role && u.phone_number == phone_number)
            .ok_or_else(|| TankerError::InvalidInput(INVALID_CREDENTIALS.to_string()))?;
        if !verify_password(password, &user.password_hash)? {
            log::warn!("Failed {} login for {}", role, user.id);
            return Err(TankerError::InvalidInput(INVALID_CREDENTIALS.to_string()));
        }
        Ok(user)
    }

    pub fn user(&self, id: Uuid) -> Result<User> {
        self.users()?
            .into_iter()
            .find(|u| u.id == id)
            .ok_or_else(|| TankerError::NotFound(format!("user {}", id)))
    }

    /// Apply a personal-information edit. The new phone number must not
    /// belong to another account of the same role.
    pub fn update_profile(&mut self, id: Uuid, update: ProfileUpdate) -> Result<User> {
        self.update(USERS, |users| {
            let index = users
                .iter()
                .position(|u| u.id == id)
                .ok_or_else(|| TankerError::NotFound(format!("user {}", id)))?;
            let role = users[index].role;
            if users
                .iter()
                .any(|u| u.id != id && u.role == role && u.phone_number == update.phone_number)
            {
                return Err(TankerError::InvalidInput(format!(
                    "A {} account with this phone number already exists",
                    role
                )));
            }
            let user = &mut users[index];
            user.name = update.name;
            user.phone_number = update.phone_number;
            if update.address.is_some() {
                user.address = update.address;
            }
            Ok(user.clone())
        })
    }

    // --- Drivers ---

    pub fn drivers(&self) -> Result<Vec<Driver>> {
        DRIVERS.load(&self.store)
    }

    pub fn add_driver<C: Clock + ?Sized>(&mut self, new: NewDriver, clock: &C) -> Result<Driver> {
        self.update(DRIVERS, |drivers| {
            let driver = Driver::from_new(new, Uuid::new_v4(), clock.now());
            log::info!("Added driver {}", driver.id);
            drivers.push(driver.clone());
            Ok(driver)
        })
    }

    pub fn remove_driver(&mut self, reference: &str) -> Result<Driver> {
        self.update(DRIVERS, |drivers| {
            let index = resolve_index(drivers, reference, |d| d.id, "driver")?;
            Ok(drivers.remove(index))
        })
    }

    // --- Vehicles ---

    pub fn vehicles(&self) -> Result<Vec<Vehicle>> {
        VEHICLES.load(&self.store)
    }

    pub fn add_vehicle<C: Clock + ?Sized>(
        &mut self,
        new: NewVehicle,
        clock: &C,
    ) -> Result<Vehicle> {
        self.update(VEHICLES, |vehicles| {
            if vehicles
                .iter()
                .any(|v| v.vehicle_number.eq_ignore_ascii_case(&new.vehicle_number))
            {
                return Err(TankerError::InvalidInput(format!(
                    "Vehicle {} is already in the fleet",
                    new.vehicle_number
                )));
            }
            let vehicle = Vehicle::from_new(new, Uuid::new_v4(), clock.now());
            log::info!("Added vehicle {}", vehicle.vehicle_number);
            vehicles.push(vehicle.clone());
            Ok(vehicle)
        })
    }

    pub fn remove_vehicle(&mut self, reference: &str) -> Result<Vehicle> {
        self.update(VEHICLES, |vehicles| {
            let index = vehicles
                .iter()
                .position(|v| v.vehicle_number.eq_ignore_ascii_case(reference.trim()))
                .map_or_else(|| resolve_index(vehicles, reference, |v| v.id, "vehicle"), Ok)?;
            Ok(vehicles.remove(index))
        })
    }

    // --- Orders ---

    pub fn orders(&self) -> Result<Vec<Order>> {
        ORDERS.load(&self.store)
    }

    pub fn orders_for_user(&self, user_id: Uuid) -> Result<Vec<Order>> {
        let mut orders = self.orders()?;
        orders.retain(|o| o.user_id == Some(user_id));
        Ok(orders)
    }

    pub fn place_order<C: Clock + ?Sized>(&mut self, new: NewOrder, clock: &C) -> Result<Order> {
        self.update(ORDERS, |orders| {
            let order = Order::from_new(new, Uuid::new_v4(), clock.now());
            log::info!("Placed order {}", order.booking_id);
            orders.push(order.clone());
            Ok(order)
        })
    }

    /// Find an order by booking id (`BK-…`), full id, or id prefix.
    pub fn find_order(&self, reference: &str) -> Result<Order> {
        let orders = self.orders()?;
        let index = order_index(&orders, reference)?;
        Ok(orders[index].clone())
    }

    pub fn set_order_status(&mut self, reference: &str, status: OrderStatus) -> Result<Order> {
        self.update(ORDERS, |orders| {
            let index = order_index(orders, reference)?;
            let order = &mut orders[index];
            log::info!(
                "Order {} status {} -> {}",
                order.booking_id,
                order.status,
                status
            );
            order.status = status;
            Ok(order.clone())
        })
    }

    pub fn delete_order(&mut self, reference: &str) -> Result<Order> {
        self.update(ORDERS, |orders| {
            let index = order_index(orders, reference)?;
            Ok(orders.remove(index))
        })
    }

    // --- Diesel expenses ---

    pub fn expenses(&self) -> Result<Vec<DieselExpense>> {
        DIESEL_EXPENSES.load(&self.store)
    }

    /// Record a fill-up dated today.
    pub fn add_expense<C: Clock + ?Sized>(
        &mut self,
        new: NewDieselExpense,
        clock: &C,
    ) -> Result<DieselExpense> {
        self.update(DIESEL_EXPENSES, |expenses| {
            let expense = DieselExpense::from_new(new, Uuid::new_v4(), clock.today());
            log::info!("Added diesel expense for {}", expense.vehicle_number);
            expenses.push(expense.clone());
            Ok(expense)
        })
    }

    // --- Bank accounts ---

    pub fn bank_accounts(&self) -> Result<Vec<BankAccount>> {
        BANK_ACCOUNTS.load(&self.store)
    }

    pub fn find_bank_account(&self, reference: &str) -> Result<BankAccount> {
        let accounts = self.bank_accounts()?;
        let index = resolve_index(&accounts, reference, |a| a.id, "bank account")?;
        Ok(accounts[index].clone())
    }

    /// Add an account. The first account becomes primary.
    pub fn add_bank_account<C: Clock + ?Sized>(
        &mut self,
        new: NewBankAccount,
        clock: &C,
    ) -> Result<BankAccount> {
        self.update(BANK_ACCOUNTS, |accounts| {
            let account =
                BankAccount::from_new(new, Uuid::new_v4(), accounts.is_empty(), clock.now());
            accounts.push(account.clone());
            Ok(account)
        })
    }

    /// Replace the editable fields of an account, keeping its id, type,
    /// primary flag and creation time.
    pub fn update_bank_account(
        &mut self,
        reference: &str,
        new: NewBankAccount,
    ) -> Result<BankAccount> {
        self.update(BANK_ACCOUNTS, |accounts| {
            let index = resolve_index(accounts, reference, |a| a.id, "bank account")?;
            let account = &mut accounts[index];
            account.bank_name = new.bank_name;
            account.account_number = new.account_number;
            account.account_holder_name = new.account_holder_name;
            account.ifsc_code = new.ifsc_code;
            account.branch_name = new.branch_name;
            Ok(account.clone())
        })
    }

    /// Delete an account. If it was primary, the oldest remaining account
    /// takes over.
    pub fn delete_bank_account(&mut self, reference: &str) -> Result<BankAccount> {
        self.update(BANK_ACCOUNTS, |accounts| {
            let index = resolve_index(accounts, reference, |a| a.id, "bank account")?;
            let removed = accounts.remove(index);
            if removed.is_primary {
                if let Some(first) = accounts.first_mut() {
                    first.is_primary = true;
                }
            }
            Ok(removed)
        })
    }

    /// Make exactly one account primary.
    pub fn set_primary_bank_account(&mut self, reference: &str) -> Result<BankAccount> {
        self.update(BANK_ACCOUNTS, |accounts| {
            let index = resolve_index(accounts, reference, |a| a.id, "bank account")?;
            for (i, account) in accounts.iter_mut().enumerate() {
                account.is_primary = i == index;
            }
            Ok(accounts[index].clone())
        })
    }
}

fn order_index(orders: &[Order], reference: &str) -> Result<usize> {
    let trimmed = reference.trim();
    if let Some(index) = orders
        .iter()
        .position(|o| o.booking_id.eq_ignore_ascii_case(trimmed))
    {
        return Ok(index);
    }
    resolve_index(orders, trimmed, |o| o.id, "order")
}

/// Position of the single record whose id equals or starts with `reference`.
fn resolve_index<T>(
    items: &[T],
    reference: &str,
    id: impl Fn(&T) -> Uuid,
    kind: &str,
) -> Result<usize> {
    let needle = reference.trim().to_ascii_lowercase();
    if let Ok(full) = Uuid::parse_str(&needle) {
        return items
            .iter()
            .position(|item| id(item) == full)
            .ok_or_else(|| TankerError::NotFound(format!("{} {}", kind, reference)));
    }
    if needle.len() < MIN_ID_PREFIX {
        return Err(TankerError::InvalidInput(format!(
            "Id prefix must be at least {} characters",
            MIN_ID_PREFIX
        )));
    }
    let matches: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| id(item).to_string().starts_with(&needle))
        .map(|(i, _)| i)
        .collect();
    match matches.as_slice() {
        [index] => Ok(*index),
        [] => Err(TankerError::NotFound(format!("{} {}", kind, reference))),
        _ => Err(TankerError::InvalidInput(format!(
            "Id prefix {} matches {} {} records",
            reference,
            matches.len(),
            kind
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_input::{parse_date, parse_time, FixedClock, Meridiem};
    use crate::storage::{MemoryStore, TankerSize};

    fn clock() -> FixedClock {
        FixedClock::new(parse_date("15/06/2025").unwrap())
    }

    fn store() -> TankerStore<MemoryStore> {
        TankerStore::new(MemoryStore::new())
    }

    fn new_user(role: Role) -> NewUser {
        NewUser {
            name: "Asha Patil".into(),
            phone_number: "9876543210".into(),
            role,
            address: Some("12 Lake Road, Pune".into()),
            password: "secret1".into(),
        }
    }

    fn new_account(bank: &str) -> NewBankAccount {
        NewBankAccount {
            bank_name: bank.into(),
            account_number: "123456789012".into(),
            account_holder_name: "Asha Patil".into(),
            ifsc_code: "SBIN0001234".into(),
            branch_name: "Kothrud".into(),
        }
    }

    fn new_order() -> NewOrder {
        NewOrder {
            name: "Asha".into(),
            address: "12 Lake Road, Pune".into(),
            date: parse_date("20/06/2025").unwrap(),
            time: parse_time("09:30", Meridiem::Am).unwrap(),
            tanker_size: TankerSize::TenThousand,
            agency: "Blue Water".into(),
            comments: None,
            user_id: None,
        }
    }

    #[test]
    fn test_register_and_authenticate() {
        let mut store = store();
        let user = store.register(new_user(Role::Customer), &clock()).unwrap();
        assert_ne!(user.password_hash, "secret1");

        let found = store
            .authenticate(Role::Customer, "9876543210", "secret1")
            .unwrap();
        assert_eq!(found.id, user.id);

        let wrong = store
            .authenticate(Role::Customer, "9876543210", "secret2")
            .unwrap_err();
        assert_eq!(wrong.to_string(), format!("Invalid input: {}", INVALID_CREDENTIALS));
        assert!(store.authenticate(Role::Admin, "9876543210", "secret1").is_err());
    }

    #[test]
    fn test_register_rejects_duplicate_phone_per_role() {
        let mut store = store();
        store.register(new_user(Role::Customer), &clock()).unwrap();
        assert!(store.register(new_user(Role::Customer), &clock()).is_err());
        assert!(store.register(new_user(Role::Admin), &clock()).is_ok());
        assert_eq!(store.users().unwrap().len(), 2);
    }

    #[test]
    fn test_update_profile_keeps_address_when_blank() {
        let mut store = store();
        let user = store.register(new_user(Role::Customer), &clock()).unwrap();
        let updated = store
            .update_profile(
                user.id,
                ProfileUpdate {
                    name: "Asha P".into(),
                    phone_number: "9123456780".into(),
                    address: None,
                },
            )
            .unwrap();
        assert_eq!(updated.name, "Asha P");
        assert_eq!(updated.address.as_deref(), Some("12 Lake Road, Pune"));
        assert_eq!(store.user(user.id).unwrap().phone_number, "9123456780");
    }

    #[test]
    fn test_update_profile_rejects_phone_of_same_role() {
        let mut store = store();
        let first = store.register(new_user(Role::Customer), &clock()).unwrap();
        let second = store
            .register(
                NewUser {
                    phone_number: "9123456780".into(),
                    ..new_user(Role::Customer)
                },
                &clock(),
            )
            .unwrap();
        let admin = store.register(new_user(Role::Admin), &clock()).unwrap();

        let taken = ProfileUpdate {
            name: "Ravi".into(),
            phone_number: first.phone_number.clone(),
            address: None,
        };
        let err = store.update_profile(second.id, taken.clone()).unwrap_err();
        assert!(matches!(err, TankerError::InvalidInput(_)));
        assert_eq!(store.user(second.id).unwrap().phone_number, "9123456780");
        let on_phone = store
            .users()
            .unwrap()
            .iter()
            .filter(|u| u.role == Role::Customer && u.phone_number == first.phone_number)
            .count();
        assert_eq!(on_phone, 1);
        let login = store
            .authenticate(Role::Customer, "9123456780", "secret1")
            .unwrap();
        assert_eq!(login.id, second.id);

        // Keeping your own number, or sharing it across roles, is fine.
        assert!(store.update_profile(first.id, taken.clone()).is_ok());
        assert!(store.update_profile(admin.id, taken).is_ok());
    }

    #[test]
    fn test_orders_lifecycle() {
        let mut store = store();
        let user_id = Uuid::new_v4();
        let placed = store
            .place_order(new_order().with_user(user_id), &clock())
            .unwrap();
        store.place_order(new_order(), &clock()).unwrap();
        assert_eq!(store.orders().unwrap().len(), 2);
        assert_eq!(store.orders_for_user(user_id).unwrap().len(), 1);

        let by_booking = store
            .find_order(&placed.booking_id.to_ascii_lowercase())
            .unwrap();
        assert_eq!(by_booking.id, placed.id);

        let updated = store
            .set_order_status(&placed.id.to_string()[..8], OrderStatus::Delivered)
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Delivered);

        store.delete_order(&placed.booking_id).unwrap();
        assert_eq!(store.orders().unwrap().len(), 1);
        assert!(matches!(
            store.find_order(&placed.booking_id),
            Err(TankerError::NotFound(_))
        ));
    }

    #[test]
    fn test_short_prefix_rejected() {
        let store = store();
        assert!(matches!(
            store.find_order("ab"),
            Err(TankerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_expense_dated_today() {
        let mut store = store();
        let expense = store
            .add_expense(
                NewDieselExpense {
                    vehicle_number: "MH12AB1234".into(),
                    amount: 4500.0,
                    quantity_liters: 50.0,
                    location: "Pune".into(),
                    notes: None,
                },
                &clock(),
            )
            .unwrap();
        assert_eq!(expense.date.to_mask(), "15/06/2025");
        assert_eq!(store.expenses().unwrap(), vec![expense]);
    }

    #[test]
    fn test_vehicle_numbers_unique() {
        let mut store = store();
        let vehicle = NewVehicle {
            vehicle_number: "MH12AB1234".into(),
            capacity_liters: 10_000.0,
            last_service_date: parse_date("01/05/2025").unwrap(),
            next_service_date: parse_date("01/11/2025").unwrap(),
            insurance_expiry_date: parse_date("01/01/2026").unwrap(),
        };
        store.add_vehicle(vehicle.clone(), &clock()).unwrap();
        assert!(store.add_vehicle(vehicle.clone(), &clock()).is_err());
        let lowercase = NewVehicle {
            vehicle_number: "mh12ab1234".into(),
            ..vehicle
        };
        assert!(store.add_vehicle(lowercase, &clock()).is_err());
        assert_eq!(store.vehicles().unwrap().len(), 1);
        let removed = store.remove_vehicle("mh12ab1234").unwrap();
        assert_eq!(removed.vehicle_number, "MH12AB1234");
        assert!(store.vehicles().unwrap().is_empty());
    }

    #[test]
    fn test_first_bank_account_is_primary() {
        let mut store = store();
        let first = store.add_bank_account(new_account("SBI"), &clock()).unwrap();
        let second = store.add_bank_account(new_account("HDFC"), &clock()).unwrap();
        assert!(first.is_primary);
        assert!(!second.is_primary);
    }

    #[test]
    fn test_set_primary_leaves_exactly_one() {
        let mut store = store();
        store.add_bank_account(new_account("SBI"), &clock()).unwrap();
        let second = store.add_bank_account(new_account("HDFC"), &clock()).unwrap();
        store
            .set_primary_bank_account(&second.id.to_string())
            .unwrap();
        let accounts = store.bank_accounts().unwrap();
        let primaries: Vec<_> = accounts.iter().filter(|a| a.is_primary).collect();
        assert_eq!(primaries.len(), 1);
        assert_eq!(primaries[0].id, second.id);
    }

    #[test]
    fn test_deleting_primary_promotes_first_remaining() {
        let mut store = store();
        let first = store.add_bank_account(new_account("SBI"), &clock()).unwrap();
        let second = store.add_bank_account(new_account("HDFC"), &clock()).unwrap();
        store.add_bank_account(new_account("ICICI"), &clock()).unwrap();

        store.delete_bank_account(&first.id.to_string()).unwrap();
        let accounts = store.bank_accounts().unwrap();
        assert_eq!(accounts.len(), 2);
        assert!(accounts[0].is_primary);
        assert_eq!(accounts[0].id, second.id);
        assert!(!accounts[1].is_primary);
    }

    #[test]
    fn test_update_bank_account_keeps_primary_flag() {
        let mut store = store();
        let first = store.add_bank_account(new_account("SBI"), &clock()).unwrap();
        let updated = store
            .update_bank_account(&first.id.to_string(), new_account("Canara"))
            .unwrap();
        assert_eq!(updated.bank_name, "Canara");
        assert!(updated.is_primary);
        assert_eq!(updated.created_at, first.created_at);
        let prefix = &first.id.to_string()[..6];
        assert_eq!(store.find_bank_account(prefix).unwrap().bank_name, "Canara");
    }
}
