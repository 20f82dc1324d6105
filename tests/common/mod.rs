use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use sales_data::{
    rest::{pagination::PaginationConfig, router, AppState},
    storage::{SqliteStorage, Storage, StorageTx, StorageWrite},
    types::{Product, SalesRecord},
};
use tower::ServiceExt;

pub struct TestApp {
    pub storage: SqliteStorage,
    pub pagination: PaginationConfig,
    _dir: tempfile::TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let storage = SqliteStorage::new(dir.path().join("sales.sqlite"));
        storage.init().expect("init storage");
        Self {
            storage,
            pagination: PaginationConfig::default(),
            _dir: dir,
        }
    }

    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn product(&self, name: &str, category: Option<&str>, price: i64) -> Product {
        let product = Product::new(name, category.map(str::to_string), Decimal::from(price))
            .expect("valid product");
        let tx = self.storage.begin_tx().expect("begin tx");
        tx.save_product(&product).expect("save product");
        tx.commit().expect("commit");
        product
    }

    pub fn sale(&self, product: &Product, quantity: i64, amount: i64, at: DateTime<Utc>) {
        let record = SalesRecord::new(product.clone(), quantity, Decimal::from(amount), Some(at))
            .expect("valid record");
        let tx = self.storage.begin_tx().expect("begin tx");
        tx.save_sales_record(&record).expect("save record");
        tx.commit().expect("commit");
    }

    fn router(&self) -> Router {
        router(AppState {
            storage: self.storage.clone(),
            started_at: std::time::SystemTime::now(),
            pagination: self.pagination,
        })
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = self
            .router()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .header("host", "testserver")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).expect("json body");
        (status, body)
    }
}
