//! Screen graph of the app.
//!
//! Every screen is a `Screen` variant and every button that moves between
//! screens is a `Navigation` event. `Screen::navigate` is the whole routing
//! table; an event that has no button on the current screen leaves it where
//! it is.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TankerError;
use crate::storage::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    #[default]
    RoleSelection,
    CustomerLogin,
    AdminLogin,
    DriverLogin,
    CustomerRegistration,
    AdminRegistration,
    CustomerDashboard,
    AdminDashboard,
    DriverDashboard,
    BookTanker,
    TrackTanker,
    OrderHistory,
    Profile,
    PersonalInformation,
    FleetManagement,
    DriversManagement,
    AddDriver,
    AddVehicle,
    DieselExpenses,
    BankAccounts,
}

/// A button press that may change the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Navigation {
    SelectRole(Role),
    CreateAccount,
    AccountCreated,
    LoggedIn,
    BookTanker,
    OrderPlaced,
    TrackTanker,
    Profile,
    PersonalInformation,
    OrderHistory,
    Fleet,
    AddVehicle,
    Drivers,
    AddDriver,
    DieselExpenses,
    BankAccounts,
    Back,
    Logout,
}

impl Screen {
    pub const ALL: [Screen; 20] = [
        Self::RoleSelection,
        Self::CustomerLogin,
        Self::AdminLogin,
        Self::DriverLogin,
        Self::CustomerRegistration,
        Self::AdminRegistration,
        Self::CustomerDashboard,
        Self::AdminDashboard,
        Self::DriverDashboard,
        Self::BookTanker,
        Self::TrackTanker,
        Self::OrderHistory,
        Self::Profile,
        Self::PersonalInformation,
        Self::FleetManagement,
        Self::DriversManagement,
        Self::AddDriver,
        Self::AddVehicle,
        Self::DieselExpenses,
        Self::BankAccounts,
    ];

    pub fn login(role: Role) -> Self {
        match role {
            Role::Customer => Self::CustomerLogin,
            Role::Admin => Self::AdminLogin,
            Role::Driver => Self::DriverLogin,
        }
    }

    pub fn dashboard(role: Role) -> Self {
        match role {
            Role::Customer => Self::CustomerDashboard,
            Role::Admin => Self::AdminDashboard,
            Role::Driver => Self::DriverDashboard,
        }
    }

    /// Role whose session this screen belongs to. `None` for role selection.
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::RoleSelection => None,
            Self::CustomerLogin
            | Self::CustomerRegistration
            | Self::CustomerDashboard
            | Self::BookTanker
            | Self::TrackTanker
            | Self::OrderHistory
            | Self::Profile
            | Self::PersonalInformation => Some(Role::Customer),
            Self::AdminLogin
            | Self::AdminRegistration
            | Self::AdminDashboard
            | Self::FleetManagement
            | Self::DriversManagement
            | Self::AddDriver
            | Self::AddVehicle
            | Self::DieselExpenses
            | Self::BankAccounts => Some(Role::Admin),
            Self::DriverLogin | Self::DriverDashboard => Some(Role::Driver),
        }
    }

    /// Where the back button leads.
    pub fn parent(&self) -> Self {
        match self {
            Self::RoleSelection
            | Self::CustomerLogin
            | Self::AdminLogin
            | Self::DriverLogin => Self::RoleSelection,
            Self::CustomerRegistration | Self::CustomerDashboard => Self::CustomerLogin,
            Self::AdminRegistration | Self::AdminDashboard => Self::AdminLogin,
            Self::DriverDashboard => Self::DriverLogin,
            Self::BookTanker | Self::TrackTanker | Self::Profile => Self::CustomerDashboard,
            Self::OrderHistory | Self::PersonalInformation => Self::Profile,
            Self::FleetManagement
            | Self::DriversManagement
            | Self::DieselExpenses
            | Self::BankAccounts => Self::AdminDashboard,
            Self::AddVehicle => Self::FleetManagement,
            Self::AddDriver => Self::DriversManagement,
        }
    }

    fn is_signed_in(&self) -> bool {
        !matches!(
            self,
            Self::RoleSelection
                | Self::CustomerLogin
                | Self::AdminLogin
                | Self::DriverLogin
                | Self::CustomerRegistration
                | Self::AdminRegistration
        )
    }

    /// Apply one navigation event.
    pub fn navigate(self, event: Navigation) -> Self {
        use Navigation as N;

        match event {
            N::Back => return self.parent(),
            N::Logout if self.is_signed_in() => return Self::RoleSelection,
            _ => {}
        }

        match self {
            Self::RoleSelection => match event {
                N::SelectRole(role) => Self::login(role),
                _ => self,
            },
            Self::CustomerLogin | Self::AdminLogin | Self::DriverLogin => match (self, event) {
                (_, N::LoggedIn) => self.role().map_or(self, Self::dashboard),
                (Self::CustomerLogin, N::CreateAccount) => Self::CustomerRegistration,
                (Self::AdminLogin, N::CreateAccount) => Self::AdminRegistration,
                _ => self,
            },
            Self::CustomerRegistration | Self::AdminRegistration => match event {
                N::AccountCreated => self.parent(),
                _ => self,
            },
            Self::CustomerDashboard => match event {
                N::BookTanker => Self::BookTanker,
                N::TrackTanker => Self::TrackTanker,
                N::Profile => Self::Profile,
                _ => self,
            },
            Self::BookTanker => match event {
                N::OrderPlaced => Self::CustomerDashboard,
                _ => self,
            },
            Self::Profile => match event {
                N::PersonalInformation => Self::PersonalInformation,
                N::OrderHistory => Self::OrderHistory,
                _ => self,
            },
            Self::AdminDashboard => match event {
                N::Fleet => Self::FleetManagement,
                N::Drivers => Self::DriversManagement,
                N::DieselExpenses => Self::DieselExpenses,
                N::BankAccounts => Self::BankAccounts,
                _ => self,
            },
            Self::FleetManagement => match event {
                N::AddVehicle => Self::AddVehicle,
                _ => self,
            },
            Self::DriversManagement => match event {
                N::AddDriver => Self::AddDriver,
                _ => self,
            },
            Self::DriverDashboard
            | Self::TrackTanker
            | Self::OrderHistory
            | Self::PersonalInformation
            | Self::AddDriver
            | Self::AddVehicle
            | Self::DieselExpenses
            | Self::BankAccounts => self,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RoleSelection => "role-selection",
            Self::CustomerLogin => "customer-login",
            Self::AdminLogin => "admin-login",
            Self::DriverLogin => "driver-login",
            Self::CustomerRegistration => "customer-registration",
            Self::AdminRegistration => "admin-registration",
            Self::CustomerDashboard => "customer-dashboard",
            Self::AdminDashboard => "admin-dashboard",
            Self::DriverDashboard => "driver-dashboard",
            Self::BookTanker => "book-tanker",
            Self::TrackTanker => "track-tanker",
            Self::OrderHistory => "order-history",
            Self::Profile => "profile",
            Self::PersonalInformation => "personal-information",
            Self::FleetManagement => "fleet-management",
            Self::DriversManagement => "drivers-management",
            Self::AddDriver => "add-driver",
            Self::AddVehicle => "add-vehicle",
            Self::DieselExpenses => "diesel-expenses",
            Self::BankAccounts => "bank-accounts",
        }
    }

    /// Header title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::RoleSelection => "Water Tanker",
            Self::CustomerLogin => "Customer Login",
            Self::AdminLogin => "Admin Login",
            Self::DriverLogin => "Driver Login",
            Self::CustomerRegistration => "Create Account",
            Self::AdminRegistration => "Admin Registration",
            Self::CustomerDashboard => "Dashboard",
            Self::AdminDashboard => "Owner Dashboard",
            Self::DriverDashboard => "Driver Dashboard",
            Self::BookTanker => "Book Tanker",
            Self::TrackTanker => "Track Orders",
            Self::OrderHistory => "Order History",
            Self::Profile => "Profile",
            Self::PersonalInformation => "Personal Information",
            Self::FleetManagement => "Fleet Management",
            Self::DriversManagement => "Drivers",
            Self::AddDriver => "Add Driver",
            Self::AddVehicle => "Add Vehicle",
            Self::DieselExpenses => "Diesel Expenses",
            Self::BankAccounts => "Bank Accounts",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Screen {
    type Err = TankerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|screen| screen.as_str() == wanted)
            .ok_or_else(|| TankerError::InvalidInput(format!("Unknown screen: {}", s.trim())))
    }
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SelectRole(role) => return write!(f, "select-role:{}", role),
            Self::CreateAccount => "create-account",
            Self::AccountCreated => "account-created",
            Self::LoggedIn => "logged-in",
            Self::BookTanker => "book-tanker",
            Self::OrderPlaced => "order-placed",
            Self::TrackTanker => "track-tanker",
            Self::Profile => "profile",
            Self::PersonalInformation => "personal-information",
            Self::OrderHistory => "order-history",
            Self::Fleet => "fleet",
            Self::AddVehicle => "add-vehicle",
            Self::Drivers => "drivers",
            Self::AddDriver => "add-driver",
            Self::DieselExpenses => "diesel-expenses",
            Self::BankAccounts => "bank-accounts",
            Self::Back => "back",
            Self::Logout => "logout",
        };
        f.write_str(name)
    }
}

/// Parses the `Display` form, e.g. `back` or `select-role:admin`.
impl FromStr for Navigation {
    type Err = TankerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        if let Some(role) = wanted.strip_prefix("select-role:") {
            return role.parse().map(Self::SelectRole);
        }
        let event = match wanted.as_str() {
            "create-account" => Self::CreateAccount,
            "account-created" => Self::AccountCreated,
            "logged-in" => Self::LoggedIn,
            "book-tanker" => Self::BookTanker,
            "order-placed" => Self::OrderPlaced,
            "track-tanker" => Self::TrackTanker,
            "profile" => Self::Profile,
            "personal-information" => Self::PersonalInformation,
            "order-history" => Self::OrderHistory,
            "fleet" => Self::Fleet,
            "add-vehicle" => Self::AddVehicle,
            "drivers" => Self::Drivers,
            "add-driver" => Self::AddDriver,
            "diesel-expenses" => Self::DieselExpenses,
            "bank-accounts" => Self::BankAccounts,
            "back" => Self::Back,
            "logout" => Self::Logout,
            _ => {
                return Err(TankerError::InvalidInput(format!(
                    "Unknown navigation event: {}",
                    s.trim()
                )))
            }
        };
        Ok(event)
    }
}
