pub mod next_date;
pub mod tasks;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use scheduler_core::{SchedulerError, SchedulerResult, TaskStore};
use serde::Serialize;

use crate::state::AppState;

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Convert scheduler errors and rejected request bodies to HTTP responses
#[derive(Debug)]
pub enum AppError {
    Scheduler(SchedulerError),
    BadRequest(String),
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Scheduler(SchedulerError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Scheduler(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            AppError::Scheduler(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::Scheduler(e) => e.to_string(),
            AppError::BadRequest(message) | AppError::Internal(message) => message,
        };

        if status.is_server_error() {
            tracing::error!(%status, "{}", message);
        } else {
            tracing::debug!(%status, "{}", message);
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<SchedulerError> for AppError {
    fn from(err: SchedulerError) -> Self {
        AppError::Scheduler(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

/// Run store and lifecycle work on the blocking thread pool.
///
/// The closure gets the store and the calendar day the request is
/// evaluated against.
pub(crate) async fn run_blocking<T, F>(state: &AppState, f: F) -> Result<T, AppError>
where
    F: FnOnce(&dyn TaskStore, NaiveDate) -> SchedulerResult<T> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(state.store(), state.today()))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {e}")))?
        .map_err(AppError::from)
}
