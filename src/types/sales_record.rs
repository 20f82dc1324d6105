use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{money, Product, SalesError};

/// A single sale transaction of one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesRecord {
    pub id: Uuid,
    pub product: Product,
    /// Signed so that returns can be recorded.
    pub quantity_sold: i64,
    pub total_sales_amount: Decimal,
    pub date_of_sale: DateTime<Utc>,
}

impl SalesRecord {
    pub const AMOUNT_MAX_DIGITS: u32 = 9;

    pub fn new(
        product: Product,
        quantity_sold: i64,
        total_sales_amount: Decimal,
        date_of_sale: Option<DateTime<Utc>>,
    ) -> Result<Self, SalesError> {
        let record = Self {
            id: Uuid::now_v7(),
            product,
            quantity_sold,
            total_sales_amount,
            date_of_sale: date_of_sale.unwrap_or_else(Utc::now),
        };
        record.amount_cents()?;
        Ok(record)
    }

    pub fn amount_cents(&self) -> Result<i64, SalesError> {
        money::to_cents(self.total_sales_amount, Self::AMOUNT_MAX_DIGITS).ok_or_else(|| {
            SalesError::InvalidAmount(format!(
                "{} exceeds {} digits with 2 decimal places",
                self.total_sales_amount,
                Self::AMOUNT_MAX_DIGITS
            ))
        })
    }
}

impl fmt::Display for SalesRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} * {}", self.quantity_sold, self.product)
    }
}
