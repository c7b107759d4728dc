use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use configs::{DatabaseConfig, RepositoryConfig};
use models::{Storage, StorageConfig};

use super::errors::RepositoryError;
use super::repo::{InMemoryUserRepository, SeaOrmUserRepository};
use super::repository::UserRepository;

/// Available user repository backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Memory,
    Sqlite,
}

impl Backend {
    pub const ACCEPTED: &'static [&'static str] = &["memory", "sqlite"];

    pub const fn as_str(self) -> &'static str {
        match self {
            Backend::Memory => "memory",
            Backend::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = RepositoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Backend::Memory),
            "sqlite" => Ok(Backend::Sqlite),
            _ => Err(RepositoryError::Configuration { value: s.to_string(), accepted: Backend::ACCEPTED }),
        }
    }
}

/// Build the repository named by `repo.backend`.
///
/// No storage I/O happens here; the SQLite variant connects on first use.
pub fn create_user_repository(
    repo: &RepositoryConfig,
    pool: &DatabaseConfig,
) -> Result<Arc<dyn UserRepository>, RepositoryError> {
    let backend: Backend = repo.backend.parse()?;
    let built: Arc<dyn UserRepository> = match backend {
        Backend::Memory => Arc::new(InMemoryUserRepository::new()),
        Backend::Sqlite => {
            let storage = Storage::new(StorageConfig::with_pool(repo.sqlite_path.clone(), pool));
            Arc::new(SeaOrmUserRepository::new(Arc::new(storage)))
        }
    };
    Ok(built)
}
