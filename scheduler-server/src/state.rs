use std::sync::Arc;

use chrono::{Local, NaiveDate};
use scheduler_core::TaskStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn TaskStore>,
    task_limit: usize,
    // Pinned calendar day, used by tests. `None` follows the local clock.
    today: Option<NaiveDate>,
}

impl AppState {
    pub fn new(store: Arc<dyn TaskStore>, task_limit: usize) -> Self {
        AppState {
            store,
            task_limit,
            today: None,
        }
    }

    /// Pin "today" to a fixed date instead of the local clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn store(&self) -> &dyn TaskStore {
        self.store.as_ref()
    }

    pub fn task_limit(&self) -> usize {
        self.task_limit
    }

    /// The calendar day requests are evaluated against.
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}
