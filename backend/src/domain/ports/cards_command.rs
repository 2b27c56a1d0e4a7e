//! Driving port for card mutations.

use async_trait::async_trait;

use crate::domain::{Card, CardId, DomainError, UserId};

/// Payload for publishing a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCardRequest {
    /// Calling user, recorded as the card owner.
    pub owner: UserId,
    /// Requested caption.
    pub name: Option<String>,
    /// Requested image link.
    pub link: Option<String>,
}

/// Domain use-case port for creating, deleting, and liking cards.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CardsCommand: Send + Sync {
    /// Validate and store a new card owned by the caller.
    async fn create_card(&self, request: CreateCardRequest) -> Result<Card, DomainError>;

    /// Delete a card and return it as it was.
    async fn delete_card(&self, id: &CardId) -> Result<Card, DomainError>;

    /// Add the caller to the card's likes.
    async fn like_card(&self, id: &CardId, user: &UserId) -> Result<Card, DomainError>;

    /// Remove the caller from the card's likes.
    async fn dislike_card(&self, id: &CardId, user: &UserId) -> Result<Card, DomainError>;
}
