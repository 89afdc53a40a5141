//! Task lifecycle: the date a task is stored with on creation, update and
//! completion.
//!
//! `today` is always passed in by the caller so the policy stays a pure
//! function of its inputs plus the store.

use chrono::NaiveDate;

use crate::date::{format_date, parse_date};
use crate::error::{SchedulerError, SchedulerResult};
use crate::recurrence::next_date;
use crate::rule::validate_rule;
use crate::store::TaskStore;
use crate::task::Task;

/// Outcome of completing a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// A one-off task was deleted.
    Removed,
    /// A recurring task was moved to its next occurrence.
    Rescheduled(Task),
}

/// Decide the stored date of a new or edited task.
///
/// A missing date becomes `today`. A past date becomes `today` for one-off
/// tasks and the next occurrence after `today` for recurring ones. Dates
/// from today onwards are kept.
pub fn normalize_task(mut task: Task, today: NaiveDate) -> SchedulerResult<Task> {
    task.check_fields()?;

    if task.date.is_empty() {
        task.date = format_date(today);
    }
    let date = parse_date(&task.date)?;

    if !task.repeat.is_empty() {
        validate_rule(&task.repeat)?;
    }

    if date < today {
        task.date = if task.repeat.is_empty() {
            format_date(today)
        } else {
            next_date(today, &task.date, &task.repeat)?
        };
    }

    Ok(task)
}

/// Normalize and insert a new task, returning its id.
pub fn create_task(store: &dyn TaskStore, task: Task, today: NaiveDate) -> SchedulerResult<String> {
    let task = normalize_task(task, today)?;
    store.insert(&task)
}

/// Normalize an edited task and overwrite the stored one.
pub fn update_task(store: &dyn TaskStore, task: Task, today: NaiveDate) -> SchedulerResult<Task> {
    if task.id.trim().is_empty() {
        return Err(SchedulerError::MissingId);
    }

    let task = normalize_task(task, today)?;
    store.update(&task)?;
    Ok(task)
}

/// Mark a task done.
///
/// One-off tasks are deleted. Recurring tasks keep their id and move to the
/// first occurrence after `today`, counted from their stored date.
pub fn complete_task(store: &dyn TaskStore, id: &str, today: NaiveDate) -> SchedulerResult<Completion> {
    if id.trim().is_empty() {
        return Err(SchedulerError::MissingId);
    }

    let mut task = store.get(id)?;

    if task.is_one_off() {
        store.delete(&task.id)?;
        return Ok(Completion::Removed);
    }

    task.date = next_date(today, &task.date, &task.repeat)?;
    store.update(&task)?;
    Ok(Completion::Rescheduled(task))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryTaskStore;
    use chrono::Days;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 26).unwrap()
    }

    #[test]
    fn test_create_without_date_uses_today() {
        let store = MemoryTaskStore::new();
        let id = create_task(&store, Task::new("", "Stretch"), today()).unwrap();
        assert_eq!(store.get(&id).unwrap().date, "20240126");
    }

    #[test]
    fn test_create_past_one_off_moves_to_today() {
        let store = MemoryTaskStore::new();
        let id = create_task(&store, Task::new("20231201", "Overdue"), today()).unwrap();
        assert_eq!(store.get(&id).unwrap().date, "20240126");
    }

    #[test]
    fn test_create_past_recurring_moves_to_next_occurrence() {
        let store = MemoryTaskStore::new();
        let task = Task::new("20240110", "Backup").with_repeat("d 3");
        let id = create_task(&store, task, today()).unwrap();

        let expected = next_date(today(), "20240110", "d 3").unwrap();
        assert_eq!(expected, "20240128");
        assert_eq!(store.get(&id).unwrap().date, expected);
    }

    #[test]
    fn test_create_keeps_today_and_future_dates() {
        let store = MemoryTaskStore::new();

        let id = create_task(&store, Task::new("20240126", "Today").with_repeat("d 1"), today()).unwrap();
        assert_eq!(store.get(&id).unwrap().date, "20240126");

        let id = create_task(&store, Task::new("20240301", "Later"), today()).unwrap();
        assert_eq!(store.get(&id).unwrap().date, "20240301");
    }

    #[test]
    fn test_create_rejects_invalid_input() {
        let store = MemoryTaskStore::new();

        assert!(matches!(
            create_task(&store, Task::new("26.01.2024", "Bad date"), today()),
            Err(SchedulerError::BadDateFormat(_))
        ));
        assert!(matches!(
            create_task(&store, Task::new("20240126", ""), today()),
            Err(SchedulerError::MissingTitle)
        ));
        assert!(matches!(
            create_task(&store, Task::new("20240126", "Weekly").with_repeat("w 1"), today()),
            Err(SchedulerError::UnsupportedRule(_))
        ));
        assert!(matches!(
            create_task(&store, Task::new("20240126", "Too often").with_repeat("d 0"), today()),
            Err(SchedulerError::InvalidInterval(_))
        ));

        assert!(store.search("", 50).unwrap().is_empty());
    }

    #[test]
    fn test_create_validates_rule_even_for_future_dates() {
        let store = MemoryTaskStore::new();
        assert!(matches!(
            create_task(&store, Task::new("20300101", "Future").with_repeat("d 401"), today()),
            Err(SchedulerError::InvalidInterval(_))
        ));
    }

    #[test]
    fn test_complete_one_off_removes_task() {
        let store = MemoryTaskStore::new();
        let id = create_task(&store, Task::new("20240126", "Once"), today()).unwrap();

        assert_eq!(complete_task(&store, &id, today()).unwrap(), Completion::Removed);
        assert!(matches!(store.get(&id), Err(SchedulerError::NotFound(_))));
    }

    #[test]
    fn test_complete_recurring_advances_date() {
        let store = MemoryTaskStore::new();
        let id = create_task(&store, Task::new("20240126", "Daily").with_repeat("d 1"), today()).unwrap();

        let completion = complete_task(&store, &id, today()).unwrap();
        let stored = store.get(&id).unwrap();

        assert_eq!(stored.date, "20240127");
        assert!(parse_date(&stored.date).unwrap() > today());
        assert_eq!(completion, Completion::Rescheduled(stored));
    }

    #[test]
    fn test_complete_recurring_from_stale_anchor() {
        let store = MemoryTaskStore::new();
        let id = create_task(&store, Task::new("20240126", "Weekly review").with_repeat("d 7"), today()).unwrap();

        let later = today() + Days::new(30);
        complete_task(&store, &id, later).unwrap();

        // 20240126 + 5 * 7 days
        assert_eq!(store.get(&id).unwrap().date, "20240301");
    }

    #[test]
    fn test_complete_yearly() {
        let store = MemoryTaskStore::new();
        let id = create_task(&store, Task::new("20240229", "Leap day").with_repeat("y"), today()).unwrap();

        complete_task(&store, &id, today()).unwrap();
        assert_eq!(store.get(&id).unwrap().date, "20250228");
    }

    #[test]
    fn test_complete_missing_task() {
        let store = MemoryTaskStore::new();
        assert!(matches!(complete_task(&store, "12", today()), Err(SchedulerError::NotFound(_))));
        assert!(matches!(complete_task(&store, "", today()), Err(SchedulerError::MissingId)));
    }

    #[test]
    fn test_update_normalizes_and_overwrites() {
        let store = MemoryTaskStore::new();
        let id = create_task(
            &store,
            Task::new("20240201", "Draft").with_comment("first"),
            today(),
        )
        .unwrap();

        let mut edited = Task::new("20240101", "Final").with_repeat("d 10");
        edited.id = id.clone();
        let updated = update_task(&store, edited, today()).unwrap();

        assert_eq!(updated.date, "20240131");
        let stored = store.get(&id).unwrap();
        assert_eq!(stored, updated);
        assert_eq!(stored.comment, "");
    }

    #[test]
    fn test_update_without_date_uses_today() {
        let store = MemoryTaskStore::new();
        let id = create_task(&store, Task::new("20240301", "Someday"), today()).unwrap();

        let mut edited = Task::new("", "Someday soon");
        edited.id = id.clone();
        let updated = update_task(&store, edited, today()).unwrap();

        assert_eq!(updated.date, "20240126");
        assert_eq!(store.get(&id).unwrap().date, "20240126");
    }

    #[test]
    fn test_update_errors() {
        let store = MemoryTaskStore::new();

        assert!(matches!(
            update_task(&store, Task::new("20240126", "No id"), today()),
            Err(SchedulerError::MissingId)
        ));

        let mut ghost = Task::new("20240126", "Ghost");
        ghost.id = "99".to_string();
        assert!(matches!(
            update_task(&store, ghost, today()),
            Err(SchedulerError::NotFound(_))
        ));

        let id = create_task(&store, Task::new("20240126", "Real"), today()).unwrap();
        let mut bad = Task::new("2024", "Real");
        bad.id = id.clone();
        assert!(matches!(
            update_task(&store, bad, today()),
            Err(SchedulerError::BadDateFormat(_))
        ));
        assert_eq!(store.get(&id).unwrap().date, "20240126");
    }
}
