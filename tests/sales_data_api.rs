mod common;

use axum::http::StatusCode;
use chrono::{Duration, TimeZone, Utc};
use sales_data::rest::pagination::PaginationConfig;
use serde_json::json;

use common::TestApp;

fn list_setup() -> TestApp {
    let app = TestApp::new();
    let p1 = app.product("Product 1", Some("Category 1"), 10);
    let p2 = app.product("Product 2", Some("Category 2"), 20);
    app.sale(&p1, 5, 50, Utc::now() - Duration::days(1));
    app.sale(&p2, 3, 60, Utc::now());
    app
}

fn aggregate_setup() -> TestApp {
    let app = TestApp::new();
    let p1 = app.product("Product 1", Some("Category 1"), 10);
    let p2 = app.product("Product 2", Some("Category 2"), 20);
    app.sale(&p1, 5, 50, Utc.with_ymd_and_hms(2024, 8, 2, 0, 0, 0).unwrap());
    app.sale(&p2, 3, 60, Utc.with_ymd_and_hms(2024, 7, 3, 0, 0, 0).unwrap());
    app.sale(&p1, 4, 70, Utc.with_ymd_and_hms(2024, 7, 4, 0, 0, 0).unwrap());
    app
}

#[tokio::test]
async fn get_sales_records() {
    let app = list_setup();
    let (status, body) = app.get("/sales-data/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn filter_sales_records_by_category() {
    let app = list_setup();
    let (status, body) = app.get("/sales-data/?category=Category+1").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["product"]["name"], "Product 1");
    assert_eq!(rows[0]["product"]["category"], "Category 1");
    assert_eq!(rows[0]["quantity_sold"], 5);
    assert_eq!(rows[0]["total_sales_amount"], "50.00");
}

#[tokio::test]
async fn filter_sales_records_by_empty_and_missing_category() {
    let app = list_setup();
    let blank = app.product("Blank", Some(""), 1);
    let unset = app.product("Unset", None, 2);
    app.sale(&blank, 1, 1, Utc::now());
    app.sale(&unset, 1, 2, Utc::now());

    let (_, body) = app.get("/sales-data/?category=EMPTY_STR").await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["product"]["name"], "Blank");
    assert_eq!(rows[0]["product"]["category"], "");

    let (_, body) = app.get("/sales-data/?category=NOT_SET").await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["product"]["name"], "Unset");
    assert!(rows[0]["product"]["category"].is_null());

    let (_, body) = app.get("/sales-data/?category=").await;
    assert_eq!(body.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn filter_sales_records_by_date_range() {
    let app = aggregate_setup();
    let (status, body) = app
        .get("/sales-data/?start_date=2024-07-04T23:00:00Z&end_date=2024-08-01")
        .await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["total_sales_amount"], "70.00");
    assert_eq!(rows[0]["date_of_sale"], "2024-07-04T00:00:00Z");
}

#[tokio::test]
async fn paginated_listing_uses_default_limit() {
    let app = aggregate_setup().with_pagination(PaginationConfig {
        default_limit: Some(2),
        max_limit: Some(10),
    });
    let (status, body) = app.get("/sales-data/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
    assert_eq!(body["results"].as_array().unwrap().len(), 2);
    assert_eq!(body["next"], "http://testserver/sales-data/?limit=2&offset=2");
    assert!(body["previous"].is_null());

    let (_, body) = app.get("/sales-data/?limit=2&offset=2").await;
    assert_eq!(body["results"].as_array().unwrap().len(), 1);
    assert!(body["next"].is_null());
    assert_eq!(body["previous"], "http://testserver/sales-data/?limit=2");
}

#[tokio::test]
async fn aggregate_sales_by_category() {
    let app = aggregate_setup();
    let (status, body) = app.get("/sales-data/aggregate?aggregate_by=category").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"group": "Category 1", "total_sales": "120.00", "average_price": "13.33"},
            {"group": "Category 2", "total_sales": "60.00", "average_price": "20.00"},
        ])
    );
}

#[tokio::test]
async fn aggregate_sales_by_month() {
    let app = aggregate_setup();
    let (status, body) = app.get("/sales-data/aggregate?aggregate_by=month").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"group": "2024-07", "total_sales": "130.00", "average_price": "18.57"},
            {"group": "2024-08", "total_sales": "50.00", "average_price": "10.00"},
        ])
    );
}

#[tokio::test]
async fn aggregate_applies_filters() {
    let app = aggregate_setup();
    let (status, body) = app
        .get("/sales-data/aggregate?aggregate_by=month&category=Category+1")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"group": "2024-07", "total_sales": "70.00", "average_price": "17.50"},
            {"group": "2024-08", "total_sales": "50.00", "average_price": "10.00"},
        ])
    );
}

#[tokio::test]
async fn invalid_aggregate_by_parameter() {
    let app = aggregate_setup();
    let (status, body) = app.get("/sales-data/aggregate?aggregate_by=invalid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("aggregate_by").is_some());
}

#[tokio::test]
async fn missing_aggregate_by_parameter() {
    let app = aggregate_setup();
    let (status, body) = app.get("/sales-data/aggregate").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("aggregate_by").is_some());
}

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::new();
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn repeated_category_uses_last_value() {
    let app = list_setup();
    let (status, body) = app.get("/sales-data/?category=A&category=Category+2").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["product"]["name"], "Product 2");
}
