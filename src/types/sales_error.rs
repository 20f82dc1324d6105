use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SalesError {
    #[error("product name must be 1..={max} characters, got {0}", max = super::Product::MAX_NAME_LEN)]
    InvalidName(usize),
    #[error("category must be at most {max} characters, got {0}", max = super::Product::MAX_CATEGORY_LEN)]
    InvalidCategory(usize),
    #[error("invalid price: {0}")]
    InvalidPrice(String),
    #[error("invalid total sales amount: {0}")]
    InvalidAmount(String),
    #[error("param is required. Options are [{}]", super::AggregateBy::OPTIONS.join(", "))]
    UnknownAggregate(String),
    #[error("Enter a valid date/time.")]
    InvalidDateTime(String),
}
