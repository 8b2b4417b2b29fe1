pub mod batches;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let max_body_bytes = state.config.max_upload_mb * 1024 * 1024;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/batches", post(batches::handle_create_batch))
        .route(
            "/api/v1/batches/:id",
            get(batches::handle_get_batch).delete(batches::handle_delete_batch),
        )
        .route(
            "/api/v1/batches/:id/export.csv",
            get(batches::handle_export_csv),
        )
        .route(
            "/api/v1/batches/:id/export.xlsx",
            get(batches::handle_export_xlsx),
        )
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}
