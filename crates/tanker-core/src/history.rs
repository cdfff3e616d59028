//! Order tracking and history views, and diesel expense reports.
//!
//! These are pure functions over loaded records; nothing here touches
//! storage.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::TankerError;
use crate::storage::{DieselExpense, Order, OrderStatus};

/// Which orders the tracking screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderFilter {
    #[default]
    All,
    Status(OrderStatus),
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        match self {
            Self::All => true,
            Self::Status(status) => order.status == *status,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All Orders",
            Self::Status(status) => status.label(),
        }
    }
}

impl FromStr for OrderFilter {
    type Err = TankerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Status)
    }
}

/// Sort order for the tracking screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderSort {
    #[default]
    NewestFirst,
    OldestFirst,
    AmountHighToLow,
    AmountLowToHigh,
}

impl OrderSort {
    pub const ALL: [OrderSort; 4] = [
        Self::NewestFirst,
        Self::OldestFirst,
        Self::AmountHighToLow,
        Self::AmountLowToHigh,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewestFirst => "newest-first",
            Self::OldestFirst => "oldest-first",
            Self::AmountHighToLow => "amount-high-to-low",
            Self::AmountLowToHigh => "amount-low-to-high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NewestFirst => "Newest First",
            Self::OldestFirst => "Oldest First",
            Self::AmountHighToLow => "Amount: High to Low",
            Self::AmountLowToHigh => "Amount: Low to High",
        }
    }

    /// Sort in place. Ties keep their stored order.
    pub fn apply(&self, orders: &mut [Order]) {
        match self {
            Self::NewestFirst => orders.sort_by(|a, b| b.scheduled_at.cmp(&a.scheduled_at)),
            Self::OldestFirst => orders.sort_by_key(|o| o.scheduled_at),
            Self::AmountHighToLow => orders.sort_by(|a, b| b.amount.cmp(&a.amount)),
            Self::AmountLowToHigh => orders.sort_by_key(|o| o.amount),
        }
    }
}

impl fmt::Display for OrderSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderSort {
    type Err = TankerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|sort| sort.as_str() == wanted)
            .ok_or_else(|| TankerError::InvalidInput(format!("Unknown sort order: {}", s.trim())))
    }
}

/// Filter then sort, as the tracking screen lists orders.
pub fn track_orders(orders: &[Order], filter: OrderFilter, sort: OrderSort) -> Vec<Order> {
    let mut selected: Vec<Order> = orders.iter().filter(|o| filter.matches(o)).cloned().collect();
    sort.apply(&mut selected);
    selected
}

/// Count of orders per filter chip: `All` first, then each status.
pub fn status_counts(orders: &[Order]) -> Vec<(OrderFilter, usize)> {
    std::iter::once(OrderFilter::All)
        .chain(OrderStatus::ALL.into_iter().map(OrderFilter::Status))
        .map(|filter| (filter, orders.iter().filter(|o| filter.matches(o)).count()))
        .collect()
}

/// Orders scheduled in the given month, newest first.
pub fn orders_in_month(orders: &[Order], year: i32, month: u32) -> Vec<Order> {
    let mut selected: Vec<Order> = orders
        .iter()
        .filter(|o| o.date.year() == year && o.date.month() == month)
        .cloned()
        .collect();
    OrderSort::NewestFirst.apply(&mut selected);
    selected
}

/// Delivered orders and their revenue for one month's orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    pub total_orders: usize,
    pub completed_orders: usize,
    pub total_revenue: u64,
}

impl MonthSummary {
    pub fn of(orders: &[Order]) -> Self {
        let delivered = orders
            .iter()
            .filter(|o| o.status == OrderStatus::Delivered);
        let (completed_orders, total_revenue) = delivered.fold((0, 0u64), |(n, sum), o| {
            (n + 1, sum + u64::from(o.total_amount))
        });
        Self {
            total_orders: orders.len(),
            completed_orders,
            total_revenue,
        }
    }
}

/// Reporting window for diesel expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpensePeriod {
    Month { year: i32, month: u32 },
    Year(i32),
}

impl ExpensePeriod {
    pub fn contains(&self, expense: &DieselExpense) -> bool {
        match *self {
            Self::Month { year, month } => {
                expense.date.year() == year && expense.date.month() == month
            }
            Self::Year(year) => expense.date.year() == year,
        }
    }

    /// Short name used in export file names, e.g. `Jun_2025` or `2025`.
    pub fn file_label(&self) -> String {
        match *self {
            Self::Month { year, month } => {
                format!("{}_{}", month_abbrev(month), year)
            }
            Self::Year(year) => year.to_string(),
        }
    }
}

impl fmt::Display for ExpensePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Month { year, month } => write!(f, "{} {}", month_abbrev(month), year),
            Self::Year(year) => write!(f, "{}", year),
        }
    }
}

fn month_abbrev(month: u32) -> &'static str {
    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    month
        .checked_sub(1)
        .and_then(|i| MONTHS.get(i as usize))
        .copied()
        .unwrap_or("???")
}

pub fn expenses_in(expenses: &[DieselExpense], period: ExpensePeriod) -> Vec<DieselExpense> {
    expenses
        .iter()
        .filter(|e| period.contains(e))
        .cloned()
        .collect()
}

/// Totals shown above the expense list.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummary {
    pub total_liters: f64,
    pub total_amount: f64,
    pub fillings: usize,
    /// Zero when no diesel was filled.
    pub average_price_per_liter: f64,
}

impl ExpenseSummary {
    pub fn of(expenses: &[DieselExpense]) -> Self {
        let total_liters: f64 = expenses.iter().map(|e| e.quantity_liters).sum();
        let total_amount: f64 = expenses.iter().map(|e| e.amount).sum();
        let average_price_per_liter = if total_liters > 0.0 {
            total_amount / total_liters
        } else {
            0.0
        };
        Self {
            total_liters,
            total_amount,
            fillings: expenses.len(),
            average_price_per_liter,
        }
    }
}
