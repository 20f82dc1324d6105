mod aggregate;
pub mod money;
mod product;
mod sales_error;
mod sales_filter;
mod sales_record;

pub use aggregate::{AggregateBy, AggregatedSales};
pub use product::Product;
pub use sales_error::SalesError;
pub use sales_filter::{
    parse_datetime, CategoryFilter, SalesFilter, EMPTY_CATEGORY_SENTINEL, NULL_CATEGORY_SENTINEL,
};
pub use sales_record::SalesRecord;
