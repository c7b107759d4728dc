//! Service layer for user registration.
//! - `users::repository` defines the storage contract every backend satisfies.
//! - `users::repo` holds the in-memory and SeaORM-backed variants.
//! - `users::factory` picks a variant from configuration at startup.

pub mod users;
#[cfg(test)]
pub mod test_support;

pub use users::{
    domain::{NewUser, User},
    errors::{RepositoryError, ValidationError},
    factory::{create_user_repository, Backend},
    repository::UserRepository,
};

/// Storage engine error carried unchanged inside `RepositoryError::Storage`.
pub use sea_orm::DbErr;
