use std::net::SocketAddr;

use axum::{middleware, routing::get, Router};

use crate::storage::Storage;

mod handlers;
mod request_log;
pub mod models;
pub mod pagination;

use handlers::{aggregate_sales, health, list_sales_records, not_found};
use pagination::PaginationConfig;

#[derive(Clone)]
pub struct AppState<S: Storage> {
    pub storage: S,
    pub started_at: std::time::SystemTime,
    pub pagination: PaginationConfig,
}

pub fn router<S: Storage + Clone + Send + Sync + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(health::<S>))
        .route("/sales-data/", get(list_sales_records::<S>))
        .route("/sales-data/aggregate", get(aggregate_sales::<S>))
        .fallback(not_found)
        .layer(middleware::from_fn(request_log::log_request_timing))
        .with_state(state)
}

pub async fn serve<S: Storage + Clone + Send + Sync + 'static>(
    addr: SocketAddr,
    storage: S,
    pagination: PaginationConfig,
    shutdown: tokio_util::sync::CancellationToken,
) -> anyhow::Result<()> {
    log::info!("🌐 REST service on http://{}", addr);

    let app = router(AppState {
        storage,
        started_at: std::time::SystemTime::now(),
        pagination,
    });

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            log::info!("🛑 REST shutdown requested");
        })
        .await?;
    log::info!("👋 REST server exited");
    Ok(())
}
