//! HTTP API and web front-end for the scheduler.

pub mod routes;
pub mod state;

use std::path::Path;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub use crate::state::AppState;

/// Build the application router: the task API plus static files from
/// `web_dir` for every other path.
pub fn app(state: AppState, web_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::tasks::router())
        .merge(routes::next_date::router())
        .with_state(state)
        .fallback_service(ServeDir::new(web_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
