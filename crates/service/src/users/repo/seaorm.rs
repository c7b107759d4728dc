use std::sync::Arc;

use async_trait::async_trait;
use models::{user, Storage};
use tracing::{debug, info};

use crate::users::domain::User;
use crate::users::errors::RepositoryError;
use crate::users::factory::Backend;
use crate::users::repository::UserRepository;

const BACKEND: &str = Backend::Sqlite.as_str();

/// SQLite-backed repository. Each operation runs in its own unit of work
/// opened on the shared [`Storage`]; the schema is applied on first use.
pub struct SeaOrmUserRepository {
    storage: Arc<Storage>,
}

impl SeaOrmUserRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        info!(backend = BACKEND, path = %storage.path(), "user repository initialized");
        Self { storage }
    }

    pub fn storage(&self) -> &Arc<Storage> {
        &self.storage
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create_user(&self, username: &str, email: &str) -> Result<User, RepositoryError> {
        let txn = self.storage.begin().await?;
        let created = user::create(&txn, username, email).await?;
        txn.commit().await?;

        let user = User::from(created);
        info!(backend = BACKEND, user_id = user.id, username = %user.username, "created user");
        Ok(user)
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        let txn = self.storage.begin().await?;
        let found = user::find(&txn, id).await?;
        txn.commit().await?;

        debug!(backend = BACKEND, user_id = id, found = found.is_some(), "get user");
        Ok(found.map(User::from))
    }

    async fn list_users(&self) -> Result<Vec<User>, RepositoryError> {
        let txn = self.storage.begin().await?;
        let rows = user::list_ordered(&txn).await?;
        txn.commit().await?;

        let users: Vec<User> = rows.into_iter().map(User::from).collect();
        debug!(backend = BACKEND, count = users.len(), "listed users");
        Ok(users)
    }

    fn backend_name(&self) -> &'static str {
        BACKEND
    }

    async fn close(&self) -> Result<(), RepositoryError> {
        self.storage.close().await?;
        Ok(())
    }
}
