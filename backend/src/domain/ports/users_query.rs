//! Driving port for user-facing queries.
//!
//! Inbound adapters (HTTP handlers) use this port to read user documents
//! without importing outbound persistence concerns.

use async_trait::async_trait;

use crate::domain::{DomainError, User, UserId};

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return every user.
    async fn list_users(&self) -> Result<Vec<User>, DomainError>;

    /// Return one user or a not-found error.
    async fn get_user(&self, id: &UserId) -> Result<User, DomainError>;
}
