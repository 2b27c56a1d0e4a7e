//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{AvatarUrl, NewUser, ProfilePatch, User, UserId};

use super::define_persistence_error;

define_persistence_error!(
    /// Persistence errors raised by user repository adapters.
    UserPersistenceError,
    "user repository"
);

/// Storage of user documents.
///
/// Lookups and updates report an unknown identifier as `Ok(None)`; errors are
/// reserved for storage failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every stored user, in storage order.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch the users matching `ids`. Unknown identifiers are skipped.
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError>;

    /// Store a new user under a freshly generated identifier.
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Overwrite the fields present in `patch` and return the updated user.
    async fn update_profile(
        &self,
        id: &UserId,
        patch: &ProfilePatch,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Replace the avatar and return the updated user.
    async fn update_avatar(
        &self,
        id: &UserId,
        avatar: &AvatarUrl,
    ) -> Result<Option<User>, UserPersistenceError>;
}
