use std::fmt;

use rust_decimal::Decimal;
use uuid::Uuid;

use super::money;
use super::SalesError;

/// A sellable item.
///
/// `category` distinguishes between "not set" (`None`, stored as NULL) and the
/// empty string; both can be filtered for separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub price: Decimal,
}

impl Product {
    pub const MAX_NAME_LEN: usize = 128;
    pub const MAX_CATEGORY_LEN: usize = 64;
    pub const PRICE_MAX_DIGITS: u32 = 8;

    pub fn new(
        name: impl Into<String>,
        category: Option<String>,
        price: Decimal,
    ) -> Result<Self, SalesError> {
        let product = Self {
            id: Uuid::now_v7(),
            name: name.into(),
            category,
            price,
        };
        product.validate()?;
        Ok(product)
    }

    pub fn validate(&self) -> Result<(), SalesError> {
        let name_len = self.name.chars().count();
        if name_len == 0 || name_len > Self::MAX_NAME_LEN {
            return Err(SalesError::InvalidName(name_len));
        }
        if let Some(category) = &self.category {
            let category_len = category.chars().count();
            if category_len > Self::MAX_CATEGORY_LEN {
                return Err(SalesError::InvalidCategory(category_len));
            }
        }
        if self.price <= Decimal::ZERO {
            return Err(SalesError::InvalidPrice(format!(
                "{} must be positive",
                self.price
            )));
        }
        self.price_cents()?;
        Ok(())
    }

    pub fn price_cents(&self) -> Result<i64, SalesError> {
        money::to_cents(self.price, Self::PRICE_MAX_DIGITS).ok_or_else(|| {
            SalesError::InvalidPrice(format!(
                "{} exceeds {} digits with 2 decimal places",
                self.price,
                Self::PRICE_MAX_DIGITS
            ))
        })
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.category {
            Some(category) => write!(f, "{} / {}", category, self.name),
            None => write!(f, "None / {}", self.name),
        }
    }
}
