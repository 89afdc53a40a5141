//! Task persistence.
//!
//! The lifecycle works against the [`TaskStore`] trait; the server wires in
//! [`SqliteTaskStore`] and tests use [`MemoryTaskStore`].

mod memory;
mod sqlite;

pub use memory::MemoryTaskStore;
pub use sqlite::SqliteTaskStore;

use crate::error::{SchedulerError, SchedulerResult};
use crate::task::Task;

/// Default number of tasks returned by a search.
pub const DEFAULT_TASK_LIMIT: usize = 50;

/// Storage operations used by the task lifecycle and the request handlers.
///
/// Each call is atomic on its own; callers get no transaction spanning
/// several calls.
pub trait TaskStore: Send + Sync {
    /// Get a task by id.
    fn get(&self, id: &str) -> SchedulerResult<Task>;

    /// Overwrite every field of the task with the same id.
    fn update(&self, task: &Task) -> SchedulerResult<()>;

    /// Delete a task by id.
    fn delete(&self, id: &str) -> SchedulerResult<()>;

    /// Insert a new task, ignoring its `id`, and return the assigned id.
    fn insert(&self, task: &Task) -> SchedulerResult<String>;

    /// Tasks ordered by date, at most `limit` of them.
    ///
    /// An empty query matches everything; otherwise the query must occur in
    /// the title or the comment.
    fn search(&self, query: &str, limit: usize) -> SchedulerResult<Vec<Task>>;
}

/// Parse a textual task id into the numeric storage key.
///
/// Ids that cannot name a stored row are reported as not found.
pub(crate) fn parse_id(id: &str) -> SchedulerResult<i64> {
    id.trim()
        .parse::<i64>()
        .map_err(|_| SchedulerError::NotFound(id.to_string()))
}
