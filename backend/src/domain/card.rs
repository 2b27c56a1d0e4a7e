//! Card documents and the likes relation.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use super::fields::{define_bounded_text, define_link};
use super::object_id::define_object_id;
use super::{FieldValidationError, User, UserId, required};

define_object_id! {
    /// Identifier of a card document.
    CardId
}

define_bounded_text! {
    /// Caption of a card.
    CardName, "name", 2, 30
}

define_link! {
    /// Link to the card's image.
    CardLink, "link"
}

/// Stored card.
///
/// ## Invariants
/// - `owner` is set at creation and never changes.
/// - `likes` holds each user at most once; order carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    id: CardId,
    name: CardName,
    link: CardLink,
    owner: UserId,
    likes: BTreeSet<UserId>,
    created_at: DateTime<Utc>,
}

impl Card {
    /// Assemble a freshly stored card with no likes.
    pub fn new(id: CardId, draft: NewCard, created_at: DateTime<Utc>) -> Self {
        let NewCard { name, link, owner } = draft;
        Self {
            id,
            name,
            link,
            owner,
            likes: BTreeSet::new(),
            created_at,
        }
    }

    /// Rebuild a card read back from storage.
    pub fn restore(
        id: CardId,
        draft: NewCard,
        likes: impl IntoIterator<Item = UserId>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let mut card = Self::new(id, draft, created_at);
        card.likes.extend(likes);
        card
    }

    /// Storage-assigned identifier.
    pub fn id(&self) -> &CardId {
        &self.id
    }

    /// Caption.
    pub fn name(&self) -> &CardName {
        &self.name
    }

    /// Image link.
    pub fn link(&self) -> &CardLink {
        &self.link
    }

    /// User who created the card.
    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Users who liked the card.
    pub fn likes(&self) -> &BTreeSet<UserId> {
        &self.likes
    }

    /// Creation time.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Add a like. Returns `false` when the user had already liked the card.
    pub fn add_like(&mut self, user: UserId) -> bool {
        self.likes.insert(user)
    }

    /// Remove a like. Returns `false` when the user had not liked the card.
    pub fn remove_like(&mut self, user: &UserId) -> bool {
        self.likes.remove(user)
    }
}

/// Validated fields of a card that storage has not yet assigned an id to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCard {
    /// Caption.
    pub name: CardName,
    /// Image link.
    pub link: CardLink,
    /// Creating user.
    pub owner: UserId,
}

impl NewCard {
    /// Validate raw payload fields for a card owned by `owner`.
    pub fn try_from_parts(
        owner: UserId,
        name: Option<String>,
        link: Option<String>,
    ) -> Result<Self, FieldValidationError> {
        Ok(Self {
            name: CardName::new(required(name, "name")?)?,
            link: CardLink::new(required(link, "link")?)?,
            owner,
        })
    }
}

/// Card with its owner document resolved, as served by the card list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardWithOwner {
    /// The card itself.
    pub card: Card,
    /// Owner document; `None` when the owner id no longer resolves.
    pub owner: Option<User>,
}
