//! In-memory task store.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{SchedulerError, SchedulerResult};
use crate::store::{TaskStore, parse_id};
use crate::task::Task;

#[derive(Default)]
struct Inner {
    next_id: i64,
    tasks: BTreeMap<i64, Task>,
}

/// A [`TaskStore`] kept in a map, for tests and throwaway servers.
#[derive(Default)]
pub struct MemoryTaskStore {
    inner: Mutex<Inner>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Substring test that folds ASCII letters only, like SQLite's `LIKE`.
fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}

impl TaskStore for MemoryTaskStore {
    fn get(&self, id: &str) -> SchedulerResult<Task> {
        let key = parse_id(id)?;
        self.lock()
            .tasks
            .get(&key)
            .cloned()
            .ok_or_else(|| SchedulerError::NotFound(id.to_string()))
    }

    fn update(&self, task: &Task) -> SchedulerResult<()> {
        let key = parse_id(&task.id)?;
        let mut inner = self.lock();
        let stored = inner
            .tasks
            .get_mut(&key)
            .ok_or_else(|| SchedulerError::NotFound(task.id.clone()))?;

        *stored = Task {
            id: key.to_string(),
            ..task.clone()
        };
        Ok(())
    }

    fn delete(&self, id: &str) -> SchedulerResult<()> {
        let key = parse_id(id)?;
        self.lock()
            .tasks
            .remove(&key)
            .map(|_| ())
            .ok_or_else(|| SchedulerError::NotFound(id.to_string()))
    }

    fn insert(&self, task: &Task) -> SchedulerResult<String> {
        let mut inner = self.lock();
        inner.next_id += 1;
        let key = inner.next_id;
        let id = key.to_string();

        inner.tasks.insert(
            key,
            Task {
                id: id.clone(),
                ..task.clone()
            },
        );
        Ok(id)
    }

    fn search(&self, query: &str, limit: usize) -> SchedulerResult<Vec<Task>> {
        let inner = self.lock();

        let mut tasks: Vec<(i64, &Task)> = inner
            .tasks
            .iter()
            .filter(|(_, t)| {
                query.is_empty()
                    || contains_ignore_ascii_case(&t.title, query)
                    || contains_ignore_ascii_case(&t.comment, query)
            })
            .map(|(key, t)| (*key, t))
            .collect();

        tasks.sort_by(|(ka, a), (kb, b)| a.date.cmp(&b.date).then(ka.cmp(kb)));

        Ok(tasks.into_iter().take(limit).map(|(_, t)| t.clone()).collect())
    }
}
