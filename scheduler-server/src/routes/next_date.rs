//! Next-date calculator endpoint

use axum::{
    Router,
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;

use scheduler_core::{next_date, parse_date};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/nextdate", get(calculate))
}

#[derive(Deserialize)]
pub struct NextDateQuery {
    #[serde(default)]
    pub now: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub repeat: String,
}

/// GET /api/nextdate - Next occurrence of `repeat` from `date`, after `now`
///
/// Answers in plain text, errors included.
async fn calculate(Query(query): Query<NextDateQuery>) -> Response {
    let now = match parse_date(&query.now) {
        Ok(now) => now,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                format!("Invalid 'now' date '{}'. Expected YYYYMMDD", query.now),
            )
                .into_response();
        }
    };

    match next_date(now, &query.date, &query.repeat) {
        Ok(date) => date.into_response(),
        Err(e) => {
            tracing::debug!(date = %query.date, repeat = %query.repeat, "next date rejected: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}
