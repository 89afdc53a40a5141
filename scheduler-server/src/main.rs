use std::sync::Arc;

use anyhow::{Context, Result};
use scheduler_core::{SchedulerConfig, SqliteTaskStore};
use scheduler_server::{AppState, app};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,scheduler_server=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SchedulerConfig::load().context("Failed to load configuration")?;

    let db_path = config.database_path();
    let store = SqliteTaskStore::new(&db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;
    tracing::info!(path = %store.db_path().display(), "database opened");

    let state = AppState::new(Arc::new(store), config.task_limit);
    let web_dir = config.web_path();
    let app = app(state, &web_dir);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("scheduler-server listening on http://{}", addr);
    tracing::info!(web_dir = %web_dir.display(), "serving static files");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
