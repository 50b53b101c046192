//! Repository Module
//!
//! CRUD and batch-read operations over the SQLite tables. Functions take
//! the pool for single-statement work and `&mut SqliteConnection` where
//! they must compose into an enclosing transaction.

pub mod category;
pub mod option_group;
pub mod order;
pub mod product;
pub mod voucher;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.message().to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<RepoError> for shared::error::AppError {
    fn from(err: RepoError) -> Self {
        use shared::error::AppError;
        match err {
            RepoError::NotFound(msg) => AppError::with_message(shared::ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => {
                AppError::with_message(shared::ErrorCode::AlreadyExists, msg)
            }
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => {
                // Storage internals stay in the log, not in the caller-facing error
                tracing::error!(error = %msg, "Database error");
                AppError::new(shared::ErrorCode::DatabaseError)
            }
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Build a `?,?,...` placeholder list for dynamic IN clauses
pub(crate) fn placeholders(n: usize) -> String {
    vec!["?"; n].join(",")
}
