use async_trait::async_trait;

use super::domain::User;
use super::errors::RepositoryError;

/// Storage contract shared by every user backend.
///
/// - `create_user` assigns a fresh id and creation time. Uniqueness of
///   `username` is not part of the contract; a backend may still reject
///   duplicates as a side effect of its schema.
/// - `get_user` returns `Ok(None)` for an unknown id.
/// - `list_users` returns every user in ascending id order.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, username: &str, email: &str) -> Result<User, RepositoryError>;
    async fn get_user(&self, id: i64) -> Result<Option<User>, RepositoryError>;
    async fn list_users(&self) -> Result<Vec<User>, RepositoryError>;

    /// Short backend label, e.g. `memory` or `sqlite`.
    fn backend_name(&self) -> &'static str;

    /// Release backend resources at shutdown. Later calls may fail.
    async fn close(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
