//! Card domain service.
//!
//! Implements the card driving ports. Identifiers reaching this layer are
//! already typed, so the service only validates payload fields, resolves
//! owners for listings, and turns absent cards into not-found errors.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{
    CardPersistenceError, CardRepository, CardsCommand, CardsQuery, CreateCardRequest,
    UserRepository,
};
use crate::domain::user_service::map_persistence_error as map_user_persistence_error;
use crate::domain::{Card, CardId, CardWithOwner, DomainError, NewCard, User, UserId, messages};

fn map_persistence_error(error: CardPersistenceError) -> DomainError {
    warn!(error = %error, "card repository failure");
    match error {
        CardPersistenceError::Connection { message } => {
            DomainError::internal(format!("card repository unavailable: {message}"))
        }
        CardPersistenceError::Query { message } => {
            DomainError::internal(format!("card repository error: {message}"))
        }
    }
}

/// Card service implementing the driving ports.
#[derive(Clone)]
pub struct CardService<C, U> {
    cards: Arc<C>,
    users: Arc<U>,
}

impl<C, U> CardService<C, U> {
    /// Create a new service over the card store and the user store used to
    /// resolve owners.
    pub fn new(cards: Arc<C>, users: Arc<U>) -> Self {
        Self { cards, users }
    }
}

impl<C, U> CardService<C, U>
where
    C: CardRepository,
    U: UserRepository,
{
    async fn resolve_owners(&self, cards: &[Card]) -> Result<HashMap<UserId, User>, DomainError> {
        let mut owners: Vec<UserId> = cards.iter().map(|card| *card.owner()).collect();
        owners.sort_unstable();
        owners.dedup();
        if owners.is_empty() {
            return Ok(HashMap::new());
        }
        let users = self
            .users
            .find_by_ids(&owners)
            .await
            .map_err(map_user_persistence_error)?;
        Ok(users.into_iter().map(|user| (*user.id(), user)).collect())
    }
}

#[async_trait]
impl<C, U> CardsQuery for CardService<C, U>
where
    C: CardRepository,
    U: UserRepository,
{
    async fn list_cards(&self) -> Result<Vec<CardWithOwner>, DomainError> {
        let cards = self.cards.list().await.map_err(map_persistence_error)?;
        let owners = self.resolve_owners(&cards).await?;
        Ok(cards
            .into_iter()
            .map(|card| {
                let owner = owners.get(card.owner()).cloned();
                if owner.is_none() {
                    debug!(card_id = %card.id(), owner_id = %card.owner(), "card owner missing");
                }
                CardWithOwner { card, owner }
            })
            .collect())
    }
}

#[async_trait]
impl<C, U> CardsCommand for CardService<C, U>
where
    C: CardRepository,
    U: UserRepository,
{
    async fn create_card(&self, request: CreateCardRequest) -> Result<Card, DomainError> {
        let CreateCardRequest { owner, name, link } = request;
        let draft = NewCard::try_from_parts(owner, name, link).map_err(|error| {
            debug!(field = error.field(), reason = %error, "rejected card payload");
            DomainError::bad_request(messages::INVALID_CARD_CREATE)
        })?;
        let card = self
            .cards
            .insert(&draft)
            .await
            .map_err(map_persistence_error)?;
        debug!(card_id = %card.id(), owner_id = %card.owner(), "card created");
        Ok(card)
    }

    async fn delete_card(&self, id: &CardId) -> Result<Card, DomainError> {
        self.cards
            .delete(id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| DomainError::not_found(messages::CARD_NOT_FOUND))
    }

    async fn like_card(&self, id: &CardId, user: &UserId) -> Result<Card, DomainError> {
        self.cards
            .add_like(id, user)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| DomainError::not_found(messages::UNKNOWN_CARD))
    }

    async fn dislike_card(&self, id: &CardId, user: &UserId) -> Result<Card, DomainError> {
        self.cards
            .remove_like(id, user)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| DomainError::not_found(messages::UNKNOWN_CARD))
    }
}

#[cfg(test)]
#[path = "card_service_tests.rs"]
mod tests;
