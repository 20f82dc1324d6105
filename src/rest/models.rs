use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{AggregatedSales, Product, SalesRecord};

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// Field name to messages, as returned with 400 responses.
pub type ValidationErrors = BTreeMap<String, Vec<String>>;

/// Raw query parameters shared by the list and aggregate endpoints.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SalesQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub category: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub aggregate_by: Option<String>,
}

impl SalesQuery {
    /// Decodes a form-encoded query string. A repeated key keeps its last
    /// value; unknown keys are ignored.
    pub fn from_raw(raw: Option<&str>) -> Self {
        let mut query = Self::default();
        let Some(raw) = raw else {
            return query;
        };
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            let slot = match key.as_ref() {
                "start_date" => &mut query.start_date,
                "end_date" => &mut query.end_date,
                "category" => &mut query.category,
                "limit" => &mut query.limit,
                "offset" => &mut query.offset,
                "aggregate_by" => &mut query.aggregate_by,
                _ => continue,
            };
            *slot = Some(value.into_owned());
        }
        query
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub category: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SalesRecordResponse {
    pub id: Uuid,
    pub product: ProductResponse,
    pub quantity_sold: i64,
    pub total_sales_amount: Decimal,
    pub date_of_sale: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AggregatedSalesResponse {
    pub group: Option<String>,
    pub total_sales: Decimal,
    pub average_price: Option<Decimal>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            category: product.category,
        }
    }
}

impl From<SalesRecord> for SalesRecordResponse {
    fn from(record: SalesRecord) -> Self {
        Self {
            id: record.id,
            product: record.product.into(),
            quantity_sold: record.quantity_sold,
            total_sales_amount: record.total_sales_amount,
            date_of_sale: record.date_of_sale,
        }
    }
}

impl From<AggregatedSales> for AggregatedSalesResponse {
    fn from(group: AggregatedSales) -> Self {
        let average_price = group.average_price();
        Self {
            group: group.group,
            total_sales: group.total_sales,
            average_price,
        }
    }
}
