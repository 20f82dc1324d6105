use uuid::Uuid;

use crate::types::{AggregateBy, AggregatedSales, Product, SalesFilter, SalesRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub limit: u64,
    pub offset: u64,
}

pub trait StorageRead {
    fn load_product(&self, id: &Uuid) -> anyhow::Result<Option<Product>>;
    fn list_products(&self) -> anyhow::Result<Vec<Product>>;
    fn count_sales_records(&self, filter: &SalesFilter) -> anyhow::Result<u64>;
    /// Records ordered by sale date, then id. `page: None` returns every match.
    fn list_sales_records(
        &self,
        filter: &SalesFilter,
        page: Option<Page>,
    ) -> anyhow::Result<Vec<SalesRecord>>;
    fn aggregate_sales(
        &self,
        filter: &SalesFilter,
        aggregate_by: AggregateBy,
    ) -> anyhow::Result<Vec<AggregatedSales>>;
}

pub trait StorageWrite {
    fn save_product(&self, product: &Product) -> anyhow::Result<()>;
    /// The referenced product must already be stored.
    fn save_sales_record(&self, record: &SalesRecord) -> anyhow::Result<()>;
    /// Removes the product and all of its sales records.
    fn delete_product(&self, id: &Uuid) -> anyhow::Result<bool>;
}

pub trait StorageTx: StorageRead + StorageWrite {
    fn commit(self) -> anyhow::Result<()>;
}

pub trait Storage: StorageRead {
    type Tx: StorageTx;

    fn begin_tx(&self) -> anyhow::Result<Self::Tx>;
}
