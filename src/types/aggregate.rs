use std::{fmt, str::FromStr};

use rust_decimal::Decimal;

use super::{money, SalesError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateBy {
    Category,
    Month,
}

impl AggregateBy {
    pub const OPTIONS: [&'static str; 2] = ["category", "month"];

    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateBy::Category => "category",
            AggregateBy::Month => "month",
        }
    }
}

impl FromStr for AggregateBy {
    type Err = SalesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "category" => Ok(AggregateBy::Category),
            "month" => Ok(AggregateBy::Month),
            other => Err(SalesError::UnknownAggregate(other.to_string())),
        }
    }
}

impl fmt::Display for AggregateBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One group of an aggregation. `group` is the category (possibly NULL or
/// empty) or the sale month formatted as `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedSales {
    pub group: Option<String>,
    pub total_sales: Decimal,
    pub total_quantity: i64,
}

impl AggregatedSales {
    pub fn from_totals(group: Option<String>, total_cents: i64, total_quantity: i64) -> Self {
        Self {
            group,
            total_sales: money::from_cents(total_cents),
            total_quantity,
        }
    }

    /// Average unit price over the group; `None` when nothing was sold.
    pub fn average_price(&self) -> Option<Decimal> {
        if self.total_quantity == 0 {
            return None;
        }
        let average = self.total_sales.checked_div(Decimal::from(self.total_quantity))?;
        Some(money::round_money(average))
    }
}
