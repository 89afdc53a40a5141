//! Task endpoints

use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use scheduler_core::{Completion, SchedulerError, Task, lifecycle};

use crate::routes::{AppError, run_blocking};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/task",
            post(create_task)
                .get(get_task)
                .put(update_task)
                .delete(delete_task),
        )
        .route("/api/tasks", get(list_tasks))
        .route("/api/task/done", post(complete_task))
}

#[derive(Deserialize)]
pub struct IdQuery {
    #[serde(default)]
    pub id: String,
}

impl IdQuery {
    fn require(&self) -> Result<String, AppError> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err(SchedulerError::MissingId.into());
        }
        Ok(id.to_string())
    }
}

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: String,
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

#[derive(Serialize)]
pub struct TasksResponse {
    pub tasks: Vec<Task>,
}

/// POST /api/task - Create a task
async fn create_task(
    State(state): State<AppState>,
    body: Result<Json<Task>, JsonRejection>,
) -> Result<Json<CreatedResponse>, AppError> {
    let Json(task) = body?;
    let id = run_blocking(&state, move |store, today| {
        lifecycle::create_task(store, task, today)
    })
    .await?;

    tracing::info!(%id, "task created");
    Ok(Json(CreatedResponse { id }))
}

/// GET /api/tasks - List tasks, optionally filtered by `search`
async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<TasksResponse>, AppError> {
    let limit = state.task_limit();
    let tasks = run_blocking(&state, move |store, _| {
        store.search(query.search.trim(), limit)
    })
    .await?;

    Ok(Json(TasksResponse { tasks }))
}

/// GET /api/task - Fetch one task
async fn get_task(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<Task>, AppError> {
    let id = query.require()?;
    let task = run_blocking(&state, move |store, _| store.get(&id)).await?;
    Ok(Json(task))
}

/// PUT /api/task - Replace a task's fields
async fn update_task(
    State(state): State<AppState>,
    body: Result<Json<Task>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(task) = body?;
    let task = run_blocking(&state, move |store, today| {
        lifecycle::update_task(store, task, today)
    })
    .await?;

    tracing::info!(id = %task.id, date = %task.date, "task updated");
    Ok(Json(json!({})))
}

/// DELETE /api/task - Delete a task
async fn delete_task(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<Value>, AppError> {
    let id = query.require()?;
    let key = id.clone();
    run_blocking(&state, move |store, _| store.delete(&key)).await?;

    tracing::info!(%id, "task deleted");
    Ok(Json(json!({})))
}

/// POST /api/task/done - Complete a task
async fn complete_task(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<Value>, AppError> {
    let id = query.require()?;
    let key = id.clone();
    let completion = run_blocking(&state, move |store, today| {
        lifecycle::complete_task(store, &key, today)
    })
    .await?;

    match completion {
        Completion::Removed => tracing::info!(%id, "one-off task done, removed"),
        Completion::Rescheduled(task) => {
            tracing::info!(%id, next = %task.date, "recurring task done, rescheduled")
        }
    }

    Ok(Json(json!({})))
}
