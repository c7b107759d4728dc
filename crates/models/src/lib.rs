//! Persistent data layer: the `users` entity and the storage handle that owns
//! the SQLite connection pool and its one-time schema setup.

pub mod db;
pub mod user;

pub use db::{Storage, StorageConfig, STORAGE_CLOSED};

#[cfg(test)]
mod tests;
