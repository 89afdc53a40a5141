//! SQLite task store.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::error::{SchedulerError, SchedulerResult};
use crate::store::{TaskStore, parse_id};
use crate::task::Task;

const SCHEMA: &str = r"
    CREATE TABLE IF NOT EXISTS scheduler (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date CHAR(8) NOT NULL DEFAULT '',
        title VARCHAR(255) NOT NULL DEFAULT '',
        description TEXT(1000) NOT NULL DEFAULT '',
        comment TEXT(1000) NOT NULL DEFAULT '',
        repeat VARCHAR(20) NOT NULL DEFAULT ''
    );

    CREATE INDEX IF NOT EXISTS idx_scheduler_date ON scheduler(date);
";

const SELECT_COLUMNS: &str = "SELECT id, date, title, description, comment, repeat FROM scheduler";

/// A [`TaskStore`] backed by a SQLite database file.
///
/// A connection is opened per operation, so the store itself holds no
/// connection and can be shared between threads.
#[derive(Debug, Clone)]
pub struct SqliteTaskStore {
    db_path: PathBuf,
}

impl SqliteTaskStore {
    /// Open (creating if necessary) the database at `db_path`.
    pub fn new(db_path: impl AsRef<Path>) -> SchedulerResult<Self> {
        let db_path = db_path.as_ref().to_path_buf();
        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let store = Self { db_path };
        store.init_schema()?;
        Ok(store)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn open(&self) -> SchedulerResult<Connection> {
        let conn = Connection::open(&self.db_path)?;
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        Ok(conn)
    }

    fn init_schema(&self) -> SchedulerResult<()> {
        let conn = self.open()?;
        conn.execute_batch(SCHEMA)?;
        tracing::debug!(path = %self.db_path.display(), "task database ready");
        Ok(())
    }
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    let id: i64 = row.get(0)?;
    Ok(Task {
        id: id.to_string(),
        date: row.get(1)?,
        title: row.get(2)?,
        description: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        comment: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        repeat: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
    })
}

/// Escape `%`, `_` and `\` so the query matches literally inside a LIKE pattern.
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl TaskStore for SqliteTaskStore {
    fn get(&self, id: &str) -> SchedulerResult<Task> {
        let key = parse_id(id)?;
        let conn = self.open()?;

        conn.query_row(
            &format!("{SELECT_COLUMNS} WHERE id = ?1"),
            params![key],
            task_from_row,
        )
        .optional()?
        .ok_or_else(|| SchedulerError::NotFound(id.to_string()))
    }

    fn update(&self, task: &Task) -> SchedulerResult<()> {
        let key = parse_id(&task.id)?;
        let conn = self.open()?;

        let affected = conn.execute(
            "UPDATE scheduler
             SET date = ?1, title = ?2, description = ?3, comment = ?4, repeat = ?5
             WHERE id = ?6",
            params![
                task.date,
                task.title,
                task.description,
                task.comment,
                task.repeat,
                key
            ],
        )?;

        if affected == 0 {
            return Err(SchedulerError::NotFound(task.id.clone()));
        }
        Ok(())
    }

    fn delete(&self, id: &str) -> SchedulerResult<()> {
        let key = parse_id(id)?;
        let conn = self.open()?;

        let affected = conn.execute("DELETE FROM scheduler WHERE id = ?1", params![key])?;
        if affected == 0 {
            return Err(SchedulerError::NotFound(id.to_string()));
        }
        Ok(())
    }

    fn insert(&self, task: &Task) -> SchedulerResult<String> {
        let conn = self.open()?;

        conn.execute(
            "INSERT INTO scheduler (date, title, description, comment, repeat)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                task.date,
                task.title,
                task.description,
                task.comment,
                task.repeat
            ],
        )?;

        Ok(conn.last_insert_rowid().to_string())
    }

    fn search(&self, query: &str, limit: usize) -> SchedulerResult<Vec<Task>> {
        let conn = self.open()?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let mut stmt = conn.prepare(&format!(
            "{SELECT_COLUMNS}
             WHERE ?1 = ''
                OR title LIKE '%' || ?1 || '%' ESCAPE '\\'
                OR comment LIKE '%' || ?1 || '%' ESCAPE '\\'
             ORDER BY date, id
             LIMIT ?2"
        ))?;

        let tasks = stmt
            .query_map(params![escape_like(query), limit], task_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(tasks)
    }
}
