use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use tanker_core::storage::{OrderStatus, Role, TankerSize};
use tanker_core::{DatePolicy, Meridiem, VERSION};

/// Tanker - water tanker bookings, fleet and diesel bookkeeping
#[derive(Parser)]
#[command(name = "tanker")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding the JSON data files
    #[arg(long, global = true, env = "TANKER_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Pin "today" for date checks (DD/MM/YYYY)
    #[arg(long, global = true, value_name = "DATE")]
    pub today: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, global = true, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols only
    #[arg(long, global = true)]
    pub ascii: bool,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show how raw keystrokes are masked
    Mask {
        #[command(subcommand)]
        command: MaskCommand,
    },

    /// Validate a date the way a form field would
    CheckDate(CheckDateArgs),

    /// Create a customer or admin account
    Register(RegisterArgs),

    /// Check credentials for a role
    Login(LoginArgs),

    /// Manage drivers
    Driver {
        #[command(subcommand)]
        command: DriverCommand,
    },

    /// Manage the tanker fleet
    Vehicle {
        #[command(subcommand)]
        command: VehicleCommand,
    },

    /// Book a tanker
    Book(BookArgs),

    /// Track, update and review orders
    Orders {
        #[command(subcommand)]
        command: OrdersCommand,
    },

    /// Diesel fill-ups
    Expense {
        #[command(subcommand)]
        command: ExpenseCommand,
    },

    /// Payout bank accounts
    Bank {
        #[command(subcommand)]
        command: BankCommand,
    },

    /// View or edit personal information
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },

    /// Walk the screen graph
    Navigate(NavigateArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum MaskCommand {
    /// Format input as DD/MM/YYYY
    Date {
        #[arg(value_name = "INPUT", allow_hyphen_values = true)]
        input: String,
    },
    /// Format input as HH:MM
    Time {
        #[arg(value_name = "INPUT", allow_hyphen_values = true)]
        input: String,
    },
}

/// Date policy as accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    Any,
    NotInPast,
    NotInFuture,
    NotExpired,
}

impl From<PolicyArg> for DatePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Any => DatePolicy::Any,
            PolicyArg::NotInPast => DatePolicy::NotInPast,
            PolicyArg::NotInFuture => DatePolicy::NotInFuture,
            PolicyArg::NotExpired => DatePolicy::NotExpired,
        }
    }
}

#[derive(Args)]
pub struct CheckDateArgs {
    /// Date as typed (digits are masked first)
    #[arg(value_name = "DATE", allow_hyphen_values = true)]
    pub input: String,

    /// Constraint relative to today
    #[arg(long, value_enum, default_value = "any")]
    pub policy: PolicyArg,
}

#[derive(Args)]
pub struct RegisterArgs {
    /// Account role (customer or admin)
    #[arg(long, default_value = "customer", value_parser = parse_role)]
    pub role: Role,

    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub phone: String,

    #[arg(long, env = "TANKER_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Defaults to --password
    #[arg(long)]
    pub confirm_password: Option<String>,

    #[arg(long)]
    pub address: String,
}

#[derive(Args)]
pub struct LoginArgs {
    /// Account role (customer, admin or driver)
    #[arg(long, default_value = "customer", value_parser = parse_role)]
    pub role: Role,

    #[arg(long)]
    pub phone: String,

    #[arg(long, env = "TANKER_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Subcommand)]
pub enum DriverCommand {
    /// Add a driver
    Add(DriverAddArgs),
    /// List drivers
    List,
    /// Remove a driver by id or id prefix
    Remove {
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Args)]
pub struct DriverAddArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub phone: String,

    #[arg(long)]
    pub license_number: String,

    /// DD/MM/YYYY; must be after today
    #[arg(long, value_name = "DATE")]
    pub license_expiry: String,

    #[arg(long)]
    pub address: String,

    #[arg(long)]
    pub emergency_name: String,

    #[arg(long)]
    pub emergency_phone: String,

    /// DD/MM/YYYY; today or earlier
    #[arg(long, value_name = "DATE")]
    pub joining_date: String,

    #[arg(long, value_name = "AMOUNT")]
    pub salary: String,
}

#[derive(Subcommand)]
pub enum VehicleCommand {
    /// Add a vehicle
    Add(VehicleAddArgs),
    /// List vehicles
    List,
    /// Remove a vehicle by number or id
    Remove {
        #[arg(value_name = "NUMBER")]
        number: String,
    },
}

#[derive(Args)]
pub struct VehicleAddArgs {
    #[arg(long, value_name = "NUMBER")]
    pub number: String,

    /// Capacity in liters
    #[arg(long)]
    pub capacity: String,

    #[arg(long, value_name = "DATE")]
    pub last_service: String,

    #[arg(long, value_name = "DATE")]
    pub next_service: String,

    #[arg(long, value_name = "DATE")]
    pub insurance_expiry: String,
}

/// Optional customer credentials. When given, the command acts for that
/// account.
#[derive(Args, Default)]
pub struct SessionArgs {
    /// Customer phone number
    #[arg(long, requires = "password")]
    pub phone: Option<String>,

    #[arg(long, env = "TANKER_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Args)]
pub struct BookArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Contact name (defaults to the account name)
    #[arg(long)]
    pub name: Option<String>,

    /// Delivery address (defaults to the account address)
    #[arg(long)]
    pub address: Option<String>,

    /// Delivery date, DD/MM/YYYY
    #[arg(long, value_name = "DATE")]
    pub date: String,

    /// Delivery time, HH:MM on the 12-hour clock
    #[arg(long, value_name = "TIME")]
    pub time: String,

    #[arg(long, default_value = "am", value_parser = parse_meridiem)]
    pub meridiem: Meridiem,

    /// 10k or 20k
    #[arg(long, value_parser = parse_size)]
    pub size: Option<TankerSize>,

    #[arg(long)]
    pub agency: String,

    #[arg(long)]
    pub comments: Option<String>,
}

#[derive(Subcommand)]
pub enum OrdersCommand {
    /// Filter and sort orders
    List(OrdersListArgs),
    /// Orders and revenue for one month
    History(OrdersHistoryArgs),
    /// Change an order's status
    Status {
        /// Booking id, order id, or id prefix
        #[arg(value_name = "ORDER")]
        order: String,
        #[arg(value_name = "STATUS", value_parser = parse_status)]
        status: OrderStatus,
    },
    /// Delete an order
    Delete {
        #[arg(value_name = "ORDER")]
        order: String,
    },
    /// Book again with a previous order's address, size and agency
    Reorder(ReorderArgs),
}

#[derive(Args)]
pub struct OrdersListArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// all, pending, confirmed, in-transit, delivered or cancelled
    #[arg(long, default_value = "all")]
    pub filter: String,

    /// newest-first, oldest-first, amount-high-to-low or amount-low-to-high
    #[arg(long, default_value = "newest-first")]
    pub sort: String,
}

#[derive(Args)]
pub struct OrdersHistoryArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Month number (defaults to the current month)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,

    /// Year (defaults to the current year)
    #[arg(long)]
    pub year: Option<i32>,

    /// Write the month's orders as CSV into this directory
    #[arg(long, value_name = "DIR")]
    pub export: Option<PathBuf>,
}

#[derive(Args)]
pub struct ReorderArgs {
    #[arg(value_name = "ORDER")]
    pub order: String,

    #[command(flatten)]
    pub session: SessionArgs,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long, value_name = "DATE")]
    pub date: String,

    #[arg(long, value_name = "TIME")]
    pub time: String,

    #[arg(long, default_value = "am", value_parser = parse_meridiem)]
    pub meridiem: Meridiem,

    #[arg(long)]
    pub comments: Option<String>,
}

#[derive(Subcommand)]
pub enum ExpenseCommand {
    /// Record a diesel fill-up dated today
    Add(ExpenseAddArgs),
    /// Expenses and totals for a month or year
    List(PeriodArgs),
    /// Write a period's expenses as CSV
    Export {
        #[command(flatten)]
        period: PeriodArgs,

        /// Output directory
        #[arg(long, value_name = "DIR", default_value = ".")]
        dir: PathBuf,
    },
}

#[derive(Args)]
pub struct ExpenseAddArgs {
    #[arg(long, value_name = "NUMBER")]
    pub vehicle: String,

    #[arg(long)]
    pub amount: String,

    /// Liters filled
    #[arg(long)]
    pub quantity: String,

    #[arg(long)]
    pub location: String,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args)]
pub struct PeriodArgs {
    /// Month number (defaults to the current month)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12), conflicts_with = "whole_year")]
    pub month: Option<u32>,

    /// Year (defaults to the current year)
    #[arg(long)]
    pub year: Option<i32>,

    /// Report the whole year instead of one month
    #[arg(long)]
    pub whole_year: bool,
}

#[derive(Subcommand)]
pub enum BankCommand {
    /// Add an account (the first one becomes primary)
    Add(BankAccountArgs),
    /// List accounts
    List,
    /// Edit an account
    Update {
        #[arg(value_name = "ID")]
        id: String,
        #[command(flatten)]
        fields: BankUpdateArgs,
    },
    /// Make an account the primary one
    Primary {
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Delete an account
    Delete {
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Args)]
pub struct BankAccountArgs {
    #[arg(long)]
    pub bank: String,

    #[arg(long)]
    pub account_number: String,

    /// Defaults to --account-number
    #[arg(long)]
    pub confirm_account_number: Option<String>,

    #[arg(long)]
    pub holder: String,

    #[arg(long)]
    pub ifsc: String,

    #[arg(long)]
    pub branch: String,
}

#[derive(Args)]
pub struct BankUpdateArgs {
    #[arg(long)]
    pub bank: Option<String>,

    #[arg(long)]
    pub account_number: Option<String>,

    #[arg(long)]
    pub confirm_account_number: Option<String>,

    #[arg(long)]
    pub holder: Option<String>,

    #[arg(long)]
    pub ifsc: Option<String>,

    #[arg(long)]
    pub branch: Option<String>,
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Show account details and order counts
    Show(LoginArgs),
    /// Change name, phone number or address
    Update {
        #[command(flatten)]
        login: LoginArgs,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        new_phone: Option<String>,

        #[arg(long)]
        address: Option<String>,
    },
}

#[derive(Args)]
pub struct NavigateArgs {
    /// Starting screen
    #[arg(long, default_value = "role-selection")]
    pub from: String,

    /// Events to apply in order, e.g. select-role:customer logged-in book-tanker
    #[arg(value_name = "EVENT")]
    pub events: Vec<String>,
}

fn parse_role(value: &str) -> Result<Role, String> {
    value.parse().map_err(|e: tanker_core::TankerError| e.to_string())
}

fn parse_size(value: &str) -> Result<TankerSize, String> {
    value.parse().map_err(|e: tanker_core::TankerError| e.to_string())
}

fn parse_status(value: &str) -> Result<OrderStatus, String> {
    value.parse().map_err(|e: tanker_core::TankerError| e.to_string())
}

fn parse_meridiem(value: &str) -> Result<Meridiem, String> {
    value.parse().map_err(|e: tanker_core::date_input::ParseMeridiemError| e.to_string())
}
