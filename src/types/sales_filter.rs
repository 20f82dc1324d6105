use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::SalesError;

/// Category value that selects products whose category is the empty string.
pub const EMPTY_CATEGORY_SENTINEL: &str = "EMPTY_STR";
/// Category value that selects products without a category.
pub const NULL_CATEGORY_SENTINEL: &str = "NOT_SET";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    Exact(String),
    Empty,
    Null,
}

impl CategoryFilter {
    /// Returns `None` for an empty value, which means "do not filter".
    ///
    /// A category literally named like one of the sentinels can not be
    /// selected.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "" => None,
            EMPTY_CATEGORY_SENTINEL => Some(CategoryFilter::Empty),
            NULL_CATEGORY_SENTINEL => Some(CategoryFilter::Null),
            other => Some(CategoryFilter::Exact(other.to_string())),
        }
    }
}

/// Sales record filter. Date bounds compare the UTC calendar date of the sale
/// and are both inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category: Option<CategoryFilter>,
}

impl SalesFilter {
    pub fn with_start(mut self, at: DateTime<Utc>) -> Self {
        self.start_date = Some(at.date_naive());
        self
    }

    pub fn with_end(mut self, at: DateTime<Utc>) -> Self {
        self.end_date = Some(at.date_naive());
        self
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = Some(category);
        self
    }
}

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parses a datetime query value. Naive values are taken as UTC.
pub fn parse_datetime(value: &str) -> Result<DateTime<Utc>, SalesError> {
    let trimmed = value.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(at.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }
    Err(SalesError::InvalidDateTime(value.to_string()))
}
