//! Task records.

use serde::{Deserialize, Serialize};

use crate::error::{SchedulerError, SchedulerResult};

/// Maximum number of characters per field, matching the storage columns.
pub const MAX_TITLE_LEN: usize = 255;
pub const MAX_DESCRIPTION_LEN: usize = 1000;
pub const MAX_COMMENT_LEN: usize = 1000;
pub const MAX_REPEAT_LEN: usize = 20;

/// A scheduled task.
///
/// `date` is always `YYYYMMDD` once the task has been through the lifecycle.
/// An empty `repeat` marks a one-off task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub repeat: String,
}

impl Task {
    pub fn new(date: impl Into<String>, title: impl Into<String>) -> Self {
        Task {
            date: date.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_repeat(mut self, repeat: impl Into<String>) -> Self {
        self.repeat = repeat.into();
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Whether completing this task removes it instead of rescheduling it.
    pub fn is_one_off(&self) -> bool {
        self.repeat.is_empty()
    }

    /// Check the required title and the column widths.
    pub fn check_fields(&self) -> SchedulerResult<()> {
        if self.title.trim().is_empty() {
            return Err(SchedulerError::MissingTitle);
        }

        let fields = [
            ("title", &self.title, MAX_TITLE_LEN),
            ("description", &self.description, MAX_DESCRIPTION_LEN),
            ("comment", &self.comment, MAX_COMMENT_LEN),
            ("repeat", &self.repeat, MAX_REPEAT_LEN),
        ];

        for (field, value, max) in fields {
            if value.chars().count() > max {
                return Err(SchedulerError::FieldTooLong { field, max });
            }
        }

        Ok(())
    }
}
