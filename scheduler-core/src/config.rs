//! Scheduler configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat, Map};
use serde::Deserialize;

use crate::error::{SchedulerError, SchedulerResult};
use crate::store::DEFAULT_TASK_LIMIT;

static DEFAULTS: &str = r#"
host = "0.0.0.0"
port = 7540
database = "scheduler.db"
web_dir = "web"
"#;

/// Server and storage settings.
///
/// Built from the defaults above, then `~/.config/scheduler/config.toml`
/// (if present), then `SCHEDULER_*` environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SchedulerConfig {
    pub host: String,
    pub port: u16,
    pub database: PathBuf,
    pub web_dir: PathBuf,
    #[serde(default = "default_task_limit")]
    pub task_limit: usize,
}

fn default_task_limit() -> usize {
    DEFAULT_TASK_LIMIT
}

impl SchedulerConfig {
    pub fn config_path() -> SchedulerResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SchedulerError::Config("Could not determine config directory".into()))?
            .join("scheduler");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default config file location.
    pub fn load() -> SchedulerResult<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load using `path` as the (optional) config file.
    pub fn load_from(path: &Path) -> SchedulerResult<Self> {
        Self::load_with_env(path, None)
    }

    /// Like [`load_from`](Self::load_from), reading `SCHEDULER_*` variables
    /// from `env` instead of the process environment when given.
    fn load_with_env(path: &Path, env: Option<Map<String, String>>) -> SchedulerResult<Self> {
        Config::builder()
            .add_source(File::from_str(DEFAULTS, FileFormat::Toml))
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix("SCHEDULER").try_parsing(true).source(env))
            .build()
            .map_err(|e| SchedulerError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| SchedulerError::Config(e.to_string()))
    }

    /// Database path with `~` expanded.
    pub fn database_path(&self) -> PathBuf {
        expand(&self.database)
    }

    /// Web directory with `~` expanded.
    pub fn web_path(&self) -> PathBuf {
        expand(&self.web_dir)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_file() {
        let dir = TempDir::new().unwrap();
        let config = SchedulerConfig::load_from(&dir.path().join("missing.toml")).unwrap();

        assert_eq!(config.port, 7540);
        assert_eq!(config.database, PathBuf::from("scheduler.db"));
        assert_eq!(config.web_dir, PathBuf::from("web"));
        assert_eq!(config.task_limit, DEFAULT_TASK_LIMIT);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "host = \"127.0.0.1\"\nport = 8080\ndatabase = \"~/tasks.db\"\ntask_limit = 10\n",
        )
        .unwrap();

        let config = SchedulerConfig::load_from(&path).unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.task_limit, 10);
        assert_eq!(config.web_dir, PathBuf::from("web"));
        assert!(config.database_path().ends_with("tasks.db"));
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "port = \"not a port\"\n").unwrap();

        assert!(matches!(
            SchedulerConfig::load_from(&path),
            Err(SchedulerError::Config(_))
        ));
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "port = 8080\nweb_dir = \"public\"\n").unwrap();

        let mut env = Map::new();
        env.insert("SCHEDULER_PORT".to_string(), "9001".to_string());
        env.insert("SCHEDULER_DATABASE".to_string(), "/var/lib/scheduler/tasks.db".to_string());

        let config = SchedulerConfig::load_with_env(&path, Some(env)).unwrap();
        assert_eq!(config.port, 9001);
        assert_eq!(config.database, PathBuf::from("/var/lib/scheduler/tasks.db"));
        assert_eq!(config.web_dir, PathBuf::from("public"));
    }
}
