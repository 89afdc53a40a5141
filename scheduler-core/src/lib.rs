//! Core of the task scheduler.
//!
//! - [`rule`] and [`date`]: the recurrence grammar and `YYYYMMDD` dates
//! - [`recurrence`]: next occurrence of a recurring task
//! - [`lifecycle`]: stored date on creation, update and completion
//! - [`store`]: task persistence behind the [`TaskStore`] trait

pub mod config;
pub mod date;
pub mod error;
pub mod lifecycle;
pub mod recurrence;
pub mod rule;
pub mod store;
pub mod task;

pub use config::SchedulerConfig;
pub use date::{DATE_FORMAT, format_date, parse_date};
pub use error::{SchedulerError, SchedulerResult};
pub use lifecycle::{Completion, complete_task, create_task, normalize_task, update_task};
pub use recurrence::{next_date, next_occurrence};
pub use rule::{Rule, validate_rule};
pub use store::{MemoryTaskStore, SqliteTaskStore, TaskStore};
pub use task::Task;
