use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Failures surfaced by user repositories and their factory.
///
/// A missing user is not an error: `get_user` returns `Ok(None)`.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("unknown repository type: {value}. Use one of: {}", accepted.join(", "))]
    Configuration { value: String, accepted: &'static [&'static str] },
    #[error("storage error: {0}")]
    Storage(#[from] DbErr),
}

impl RepositoryError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            RepositoryError::Configuration { .. } => 1001,
            RepositoryError::Storage(_) => 1200,
        }
    }

    /// True when the persistent backend rejected a duplicate username.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            RepositoryError::Storage(e) => matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))),
            _ => false,
        }
    }
}

/// Input rejected before it reaches a repository.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("invalid email address: {0:?}")]
    InvalidEmail(String),
}
