//! Driving port for card listings.

use async_trait::async_trait;

use crate::domain::{CardWithOwner, DomainError};

/// Domain use-case port for reading cards.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CardsQuery: Send + Sync {
    /// Return every card with its owner document resolved.
    async fn list_cards(&self) -> Result<Vec<CardWithOwner>, DomainError>;
}
