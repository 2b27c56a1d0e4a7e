//! Driving port for user mutations.
//!
//! Requests carry raw payload values; the implementing service owns schema
//! validation so every adapter reports violations with the same messages.

use async_trait::async_trait;

use crate::domain::{DomainError, User, UserId};

/// Payload for registering a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateUserRequest {
    /// Requested display name.
    pub name: Option<String>,
    /// Requested description.
    pub about: Option<String>,
    /// Requested avatar link.
    pub avatar: Option<String>,
}

/// Partial profile update for the calling user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProfileRequest {
    /// User being updated.
    pub user_id: UserId,
    /// Replacement name, if any.
    pub name: Option<String>,
    /// Replacement description, if any.
    pub about: Option<String>,
}

/// Avatar replacement for the calling user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateAvatarRequest {
    /// User being updated.
    pub user_id: UserId,
    /// Replacement avatar link, if any.
    pub avatar: Option<String>,
}

/// Domain use-case port for creating and editing users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Validate and store a new user.
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, DomainError>;

    /// Apply a partial profile update.
    ///
    /// An empty update returns the stored user unchanged.
    async fn update_profile(&self, request: UpdateProfileRequest) -> Result<User, DomainError>;

    /// Replace the avatar.
    ///
    /// A request without an avatar returns the stored user unchanged.
    async fn update_avatar(&self, request: UpdateAvatarRequest) -> Result<User, DomainError>;
}
