/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | /var/lib/smart-menu | Working directory (database, logs) |
/// | DATABASE_PATH | {WORK_DIR}/menu.db | SQLite database file |
/// | LOG_LEVEL | info | Log verbosity |
/// | EVENT_CAPACITY | 256 | Notification channel capacity |
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for database and log files
    pub work_dir: String,
    /// SQLite database file path
    pub database_path: String,
    /// Log verbosity level
    pub log_level: String,
    /// Capacity of the notification broadcast channel
    pub event_capacity: usize,
}

impl Config {
    /// Load configuration from environment variables, with defaults
    pub fn from_env() -> Self {
        let work_dir =
            std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/smart-menu".into());
        let database_path = std::env::var("DATABASE_PATH")
            .unwrap_or_else(|_| format!("{work_dir}/menu.db"));
        Self {
            work_dir,
            database_path,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            event_capacity: std::env::var("EVENT_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(256),
        }
    }

    /// Override the working directory and database path, for tests
    pub fn with_overrides(work_dir: impl Into<String>) -> Self {
        let work_dir = work_dir.into();
        let mut config = Self::from_env();
        config.database_path = format!("{work_dir}/menu.db");
        config.work_dir = work_dir;
        config
    }
}
