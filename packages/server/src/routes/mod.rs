mod filters;
mod health;
mod progress;
mod quiz;
mod ui;

use axum::response::{IntoResponse, Response};
use axum::Router;

use crate::response::AppError;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/health", health::router())
        .nest("/api/quiz", quiz::router())
        .nest("/api/filters", filters::router())
        .nest("/api/progress", progress::router())
        .nest("/api/ui", ui::router())
        .fallback(fallback_handler)
        .with_state(state)
}

async fn fallback_handler() -> Response {
    AppError::not_found("Route not found").into_response()
}
