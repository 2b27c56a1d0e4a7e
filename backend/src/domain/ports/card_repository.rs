//! Port abstraction for card persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Card, CardId, NewCard, UserId};

use super::define_persistence_error;

define_persistence_error!(
    /// Persistence errors raised by card repository adapters.
    CardPersistenceError,
    "card repository"
);

/// Storage of card documents.
///
/// Like changes must be atomic per card: concurrent likes from different
/// users all land, and a repeated like leaves a single entry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CardRepository: Send + Sync {
    /// Every stored card, in storage order.
    async fn list(&self) -> Result<Vec<Card>, CardPersistenceError>;

    /// Store a new card with no likes, stamped with the current time.
    async fn insert(&self, card: &NewCard) -> Result<Card, CardPersistenceError>;

    /// Remove a card and return it as it was before removal.
    async fn delete(&self, id: &CardId) -> Result<Option<Card>, CardPersistenceError>;

    /// Add `user` to the card's likes and return the updated card.
    async fn add_like(
        &self,
        id: &CardId,
        user: &UserId,
    ) -> Result<Option<Card>, CardPersistenceError>;

    /// Remove `user` from the card's likes and return the updated card.
    async fn remove_like(
        &self,
        id: &CardId,
        user: &UserId,
    ) -> Result<Option<Card>, CardPersistenceError>;
}
