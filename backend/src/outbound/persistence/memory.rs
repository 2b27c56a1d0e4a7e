//! In-memory document store.
//!
//! Backs both repository ports with two vectors guarded by `tokio` read-write
//! locks. Documents keep insertion order, and every mutation happens under
//! the write lock, so concurrent like changes on one card never lose
//! updates. Data lives for the life of the process.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::ports::{
    CardPersistenceError, CardRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{
    AvatarUrl, Card, CardId, NewCard, NewUser, ProfilePatch, User, UserId,
};

/// Process-local store for user and card documents.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    users: RwLock<Vec<User>>,
    cards: RwLock<Vec<Card>>,
}

impl InMemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    async fn modify_user(
        &self,
        id: &UserId,
        change: impl FnOnce(&mut User),
    ) -> Option<User> {
        let mut users = self.users.write().await;
        let user = users.iter_mut().find(|user| user.id() == id)?;
        change(user);
        Some(user.clone())
    }

    async fn modify_card(
        &self,
        id: &CardId,
        change: impl FnOnce(&mut Card),
    ) -> Option<Card> {
        let mut cards = self.cards.write().await;
        let card = cards.iter_mut().find(|card| card.id() == id)?;
        change(card);
        Some(card.clone())
    }
}

#[async_trait]
impl UserRepository for InMemoryDocumentStore {
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.users.read().await.clone())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.id() == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .filter(|user| ids.contains(user.id()))
            .cloned()
            .collect())
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let stored = User::new(UserId::generate(), user.clone());
        self.users.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn update_profile(
        &self,
        id: &UserId,
        patch: &ProfilePatch,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.modify_user(id, |user| user.apply_profile(patch)).await)
    }

    async fn update_avatar(
        &self,
        id: &UserId,
        avatar: &AvatarUrl,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .modify_user(id, |user| user.set_avatar(avatar.clone()))
            .await)
    }
}

#[async_trait]
impl CardRepository for InMemoryDocumentStore {
    async fn list(&self) -> Result<Vec<Card>, CardPersistenceError> {
        Ok(self.cards.read().await.clone())
    }

    async fn insert(&self, card: &NewCard) -> Result<Card, CardPersistenceError> {
        let stored = Card::new(CardId::generate(), card.clone(), Utc::now());
        self.cards.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: &CardId) -> Result<Option<Card>, CardPersistenceError> {
        let mut cards = self.cards.write().await;
        let position = cards.iter().position(|card| card.id() == id);
        Ok(position.map(|index| cards.remove(index)))
    }

    async fn add_like(
        &self,
        id: &CardId,
        user: &UserId,
    ) -> Result<Option<Card>, CardPersistenceError> {
        Ok(self
            .modify_card(id, |card| {
                card.add_like(*user);
            })
            .await)
    }

    async fn remove_like(
        &self,
        id: &CardId,
        user: &UserId,
    ) -> Result<Option<Card>, CardPersistenceError> {
        Ok(self
            .modify_card(id, |card| {
                card.remove_like(user);
            })
            .await)
    }
}
