use axum::{
    extract::{RawQuery, State},
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    storage::Storage,
    types::{parse_datetime, AggregateBy, CategoryFilter, SalesError, SalesFilter},
};

use super::{
    models::{
        AggregatedSalesResponse, ErrorResponse, HealthResponse, PaginatedResponse, SalesQuery,
        SalesRecordResponse, ValidationErrors,
    },
    pagination::{next_link, previous_link, request_url},
    AppState,
};

pub async fn health<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
) -> impl IntoResponse {
    let uptime_secs = state.started_at.elapsed().map(|d| d.as_secs()).unwrap_or(0);
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            uptime_secs,
        }),
    )
}

pub async fn list_sales_records<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    RawQuery(raw_query): RawQuery,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    let query = SalesQuery::from_raw(raw_query.as_deref());
    let filter = match parse_filter(&query) {
        Ok(filter) => filter,
        Err(errors) => return validation_error(errors),
    };

    let page = state
        .pagination
        .resolve(query.limit.as_deref(), query.offset.as_deref());

    let Some(page) = page else {
        return match state.storage.list_sales_records(&filter, None) {
            Ok(records) => {
                let body: Vec<SalesRecordResponse> = records.into_iter().map(Into::into).collect();
                Json(body).into_response()
            }
            Err(err) => internal_error("list sales records", err),
        };
    };

    let count = match state.storage.count_sales_records(&filter) {
        Ok(count) => count,
        Err(err) => return internal_error("count sales records", err),
    };
    let records = match state.storage.list_sales_records(&filter, Some(page)) {
        Ok(records) => records,
        Err(err) => return internal_error("list sales records", err),
    };

    let url = request_url(&headers, &uri);
    Json(PaginatedResponse {
        count,
        next: url.as_ref().and_then(|url| next_link(url, page, count)),
        previous: url.as_ref().and_then(|url| previous_link(url, page)),
        results: records.into_iter().map(SalesRecordResponse::from).collect(),
    })
    .into_response()
}

pub async fn aggregate_sales<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    RawQuery(raw_query): RawQuery,
) -> Response {
    let query = SalesQuery::from_raw(raw_query.as_deref());
    let aggregate_by = match parse_aggregate_by(query.aggregate_by.as_deref()) {
        Ok(aggregate_by) => aggregate_by,
        Err(err) => {
            log::warn!("Invalid aggregate_by {:?}: {}", query.aggregate_by, err);
            return validation_error(single_error("aggregate_by", &err));
        }
    };
    let filter = match parse_filter(&query) {
        Ok(filter) => filter,
        Err(errors) => return validation_error(errors),
    };

    match state.storage.aggregate_sales(&filter, aggregate_by) {
        Ok(groups) => {
            let body: Vec<AggregatedSalesResponse> = groups.into_iter().map(Into::into).collect();
            Json(body).into_response()
        }
        Err(err) => internal_error("aggregate sales", err),
    }
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            message: "endpoint not found".to_string(),
        }),
    )
}

fn parse_aggregate_by(raw: Option<&str>) -> Result<AggregateBy, SalesError> {
    raw.unwrap_or_default().parse()
}

fn parse_filter(query: &SalesQuery) -> Result<SalesFilter, ValidationErrors> {
    let mut filter = SalesFilter::default();
    let mut errors = ValidationErrors::new();

    for (field, raw) in [("start_date", &query.start_date), ("end_date", &query.end_date)] {
        let Some(raw) = raw.as_deref().filter(|raw| !raw.is_empty()) else {
            continue;
        };
        match parse_datetime(raw) {
            Ok(at) if field == "start_date" => filter = filter.with_start(at),
            Ok(at) => filter = filter.with_end(at),
            Err(err) => {
                errors.insert(field.to_string(), vec![err.to_string()]);
            }
        }
    }

    if let Some(category) = query.category.as_deref().and_then(CategoryFilter::parse) {
        filter = filter.with_category(category);
    }

    if errors.is_empty() {
        Ok(filter)
    } else {
        Err(errors)
    }
}

fn single_error(field: &str, err: &SalesError) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.insert(field.to_string(), vec![err.to_string()]);
    errors
}

fn validation_error(errors: ValidationErrors) -> Response {
    (StatusCode::BAD_REQUEST, Json(errors)).into_response()
}

fn internal_error(what: &str, err: anyhow::Error) -> Response {
    log::error!("Failed to {}: {:?}", what, err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            message: "internal server error".to_string(),
        }),
    )
        .into_response()
}
