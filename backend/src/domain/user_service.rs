//! User domain service.
//!
//! Implements the user driving ports on top of a [`UserRepository`]. Schema
//! violations and unknown identifiers become client errors here so storage
//! only ever sees validated documents.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{
    CreateUserRequest, UpdateAvatarRequest, UpdateProfileRequest, UserPersistenceError,
    UserRepository, UsersCommand, UsersQuery,
};
use crate::domain::{
    AvatarUrl, DomainError, FieldValidationError, NewUser, ProfilePatch, User, UserId, messages,
};

pub(crate) fn map_persistence_error(error: UserPersistenceError) -> DomainError {
    warn!(error = %error, "user repository failure");
    match error {
        UserPersistenceError::Connection { message } => {
            DomainError::internal(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            DomainError::internal(format!("user repository error: {message}"))
        }
    }
}

/// User service implementing the driving ports.
#[derive(Clone)]
pub struct UserService<R> {
    users: Arc<R>,
}

impl<R> UserService<R> {
    /// Create a new service backed by `users`.
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    fn schema_violation(message: &'static str) -> impl FnOnce(FieldValidationError) -> DomainError {
        move |error| {
            debug!(field = error.field(), reason = %error, "rejected user payload");
            DomainError::bad_request(message)
        }
    }

    async fn require_user(&self, id: &UserId) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| DomainError::not_found(messages::USER_NOT_FOUND))
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        self.users.list().await.map_err(map_persistence_error)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, DomainError> {
        self.require_user(id).await
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        let CreateUserRequest {
            name,
            about,
            avatar,
        } = request;
        let draft = NewUser::try_from_parts(name, about, avatar)
            .map_err(Self::schema_violation(messages::INVALID_USER_CREATE))?;
        let user = self
            .users
            .insert(&draft)
            .await
            .map_err(map_persistence_error)?;
        debug!(user_id = %user.id(), "user created");
        Ok(user)
    }

    async fn update_profile(&self, request: UpdateProfileRequest) -> Result<User, DomainError> {
        let UpdateProfileRequest {
            user_id,
            name,
            about,
        } = request;
        let patch = ProfilePatch::try_from_parts(name, about)
            .map_err(Self::schema_violation(messages::INVALID_PROFILE_UPDATE))?;
        if patch.is_empty() {
            return self.require_user(&user_id).await;
        }
        self.users
            .update_profile(&user_id, &patch)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| DomainError::not_found(messages::USER_NOT_FOUND))
    }

    async fn update_avatar(&self, request: UpdateAvatarRequest) -> Result<User, DomainError> {
        let UpdateAvatarRequest { user_id, avatar } = request;
        let Some(raw) = avatar else {
            return self.require_user(&user_id).await;
        };
        let avatar = AvatarUrl::new(raw)
            .map_err(Self::schema_violation(messages::INVALID_AVATAR_UPDATE))?;
        self.users
            .update_avatar(&user_id, &avatar)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| DomainError::not_found(messages::USER_NOT_FOUND))
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
