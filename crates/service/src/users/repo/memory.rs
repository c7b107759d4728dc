use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::users::domain::User;
use crate::users::errors::RepositoryError;
use crate::users::factory::Backend;
use crate::users::repository::UserRepository;

const BACKEND: &str = Backend::Memory.as_str();

struct MemoryState {
    users: HashMap<i64, User>,
    next_id: i64,
}

/// Volatile user store private to one instance.
///
/// Id assignment and insertion happen under the write lock as one critical
/// section; readers take the read lock, so a snapshot never holds a
/// half-built record. Usernames are not checked for uniqueness.
pub struct InMemoryUserRepository {
    state: RwLock<MemoryState>,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        info!(backend = BACKEND, "user repository initialized");
        Self { state: RwLock::new(MemoryState { users: HashMap::new(), next_id: 1 }) }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, username: &str, email: &str) -> Result<User, RepositoryError> {
        let mut state = self.state.write().await;
        let user = User {
            id: state.next_id,
            username: username.to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        };
        state.users.insert(user.id, user.clone());
        state.next_id += 1;
        info!(backend = BACKEND, user_id = user.id, username = %user.username, "created user");
        Ok(user)
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        let state = self.state.read().await;
        let user = state.users.get(&id).cloned();
        debug!(backend = BACKEND, user_id = id, found = user.is_some(), "get user");
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, RepositoryError> {
        let mut users: Vec<User> = {
            let state = self.state.read().await;
            state.users.values().cloned().collect()
        };
        users.sort_by_key(|u| u.id);
        debug!(backend = BACKEND, count = users.len(), "listed users");
        Ok(users)
    }

    fn backend_name(&self) -> &'static str {
        BACKEND
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn ids_start_at_one_and_increase() -> anyhow::Result<()> {
        let repo = InMemoryUserRepository::new();
        let mut last = 0;
        for i in 0..20 {
            let u = repo.create_user(&format!("user{i}"), &format!("user{i}@x.com")).await?;
            assert_eq!(u.id, last + 1);
            last = u.id;
        }
        Ok(())
    }

    #[tokio::test]
    async fn alice_round_trip() -> anyhow::Result<()> {
        let repo = InMemoryUserRepository::new();
        let before = Utc::now();
        let created = repo.create_user("alice", "alice@x.com").await?;

        let found = repo.get_user(1).await?.expect("alice exists");
        assert_eq!(found, created);
        assert_eq!(found.id, 1);
        assert_eq!(found.username, "alice");
        assert_eq!(found.email, "alice@x.com");
        assert!(found.created_at >= before);
        Ok(())
    }

    #[tokio::test]
    async fn empty_store_lists_nothing_and_misses_are_none() -> anyhow::Result<()> {
        let repo = InMemoryUserRepository::new();
        assert!(repo.list_users().await?.is_empty());
        assert!(repo.get_user(999).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn list_in_creation_order() -> anyhow::Result<()> {
        let repo = InMemoryUserRepository::new();
        repo.create_user("alice", "alice@x.com").await?;
        repo.create_user("bob", "bob@x.com").await?;
        let ids: Vec<i64> = repo.list_users().await?.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2]);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_usernames_are_allowed() -> anyhow::Result<()> {
        let repo = InMemoryUserRepository::new();
        let a = repo.create_user("alice", "a1@x.com").await?;
        let b = repo.create_user("alice", "a2@x.com").await?;
        assert_ne!(a.id, b.id);
        assert_eq!(repo.list_users().await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn instances_do_not_share_state() -> anyhow::Result<()> {
        let first = InMemoryUserRepository::new();
        let second = InMemoryUserRepository::new();
        first.create_user("alice", "alice@x.com").await?;
        assert!(second.get_user(1).await?.is_none());
        assert!(second.list_users().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn close_is_a_no_op() -> anyhow::Result<()> {
        let repo = InMemoryUserRepository::new();
        repo.create_user("alice", "alice@x.com").await?;
        repo.close().await?;
        assert_eq!(repo.list_users().await?.len(), 1);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_get_distinct_ids() -> anyhow::Result<()> {
        let repo = Arc::new(InMemoryUserRepository::new());
        let n = 200;
        let mut handles = Vec::with_capacity(n);
        for i in 0..n {
            let r = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                r.create_user(&format!("u{i}"), &format!("u{i}@x.com")).await
            }));
        }
        let mut ids = HashSet::new();
        for h in handles {
            ids.insert(h.await??.id);
        }
        assert_eq!(ids.len(), n);

        let listed = repo.list_users().await?;
        assert_eq!(listed.len(), n);
        let listed_ids: Vec<i64> = listed.iter().map(|u| u.id).collect();
        assert_eq!(listed_ids, (1..=n as i64).collect::<Vec<_>>());
        Ok(())
    }
}
