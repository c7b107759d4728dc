use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::errors::ValidationError;

/// Registered user as seen by callers of the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<models::user::Model> for User {
    fn from(m: models::user::Model) -> Self {
        Self { id: m.id, username: m.username, email: m.email, created_at: m.created_at }
    }
}

/// Registration input
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewUser {
    pub username: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

impl NewUser {
    /// Basic type constraints only: a non-blank username and a syntactically
    /// valid address whose domain has at least one dot.
    pub fn validate_input(&self) -> Result<(), ValidationError> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::EmptyUsername);
        }
        let dotted_domain = self
            .email
            .rsplit_once('@')
            .is_some_and(|(_, domain)| domain.contains('.'));
        if self.validate().is_err() || !dotted_domain {
            return Err(ValidationError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(username: &str, email: &str) -> NewUser {
        NewUser { username: username.into(), email: email.into() }
    }

    #[test]
    fn accepts_plain_address() {
        assert!(input("alice", "alice@x.com").validate_input().is_ok());
        assert!(input("bob", "bob.smith+tag@mail.example.org").validate_input().is_ok());
    }

    #[test]
    fn rejects_blank_username() {
        assert_eq!(input("   ", "a@x.com").validate_input(), Err(ValidationError::EmptyUsername));
    }

    #[test]
    fn rejects_malformed_email() {
        for bad in ["", "alice", "@x.com", "alice@", "alice@x", "a@b@c.com", "alice@x..com", "al ice@x.com"] {
            assert!(input("alice", bad).validate_input().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn email_error_carries_address() {
        assert_eq!(
            input("alice", "nope").validate_input(),
            Err(ValidationError::InvalidEmail("nope".into()))
        );
    }
}
